//! Page number type.

use std::fmt;

/// Index of a data page within a page file, starting at zero.
///
/// Data page `n` lives in file slot `n + 1`; slot 0 is the header page.
///
/// # Example
/// ```
/// use pagefile::PageNum;
///
/// let page = PageNum::new(2);
/// assert_eq!(page.file_offset(), 3 * 4096);
/// ```
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PageNum(pub u32);

impl PageNum {
    /// The first data page.
    pub const FIRST: PageNum = PageNum(0);

    /// Create a new PageNum.
    #[inline]
    pub fn new(num: u32) -> Self {
        PageNum(num)
    }

    /// Byte offset of this page in the file, skipping the header page.
    #[inline]
    pub fn file_offset(&self) -> u64 {
        (self.0 as u64 + 1) * crate::common::config::PAGE_SIZE as u64
    }

    /// The previous page, or `None` before page 0.
    #[inline]
    pub fn prev(&self) -> Option<PageNum> {
        self.0.checked_sub(1).map(PageNum)
    }

    /// The next page, or `None` past the last representable page.
    #[inline]
    pub fn next(&self) -> Option<PageNum> {
        self.0.checked_add(1).map(PageNum)
    }
}

impl From<u32> for PageNum {
    fn from(num: u32) -> Self {
        PageNum(num)
    }
}

impl From<PageNum> for i64 {
    fn from(page: PageNum) -> Self {
        page.0 as i64
    }
}

impl fmt::Display for PageNum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Page({})", self.0)
    }
}
