//! Page buffer - one block's worth of caller-owned memory.
//!
//! A [`Page`] is the source of every block write and the destination of
//! every block read. The page file only borrows it.

use std::fmt;

use crate::common::config::PAGE_SIZE;

/// A page of data (4KB, 4KB-aligned).
///
/// # Memory Layout
/// - Size: `PAGE_SIZE` bytes
/// - Alignment: 4096 bytes, so the buffer can be handed to aligned I/O as is
///
/// # Clone Implementation
/// `Page` does NOT implement `Clone`: copying a block should be explicit,
/// use [`Page::copy_from_slice`].
///
/// # Example
/// ```
/// use pagefile::Page;
///
/// let mut page = Page::new();
/// page.as_mut_slice()[0] = 0xFF;
/// assert_eq!(page.as_slice()[0], 0xFF);
/// ```
#[repr(align(4096))]
pub struct Page {
    data: [u8; PAGE_SIZE],
}

impl Page {
    /// Create a new zeroed page.
    #[inline]
    pub fn new() -> Self {
        Self {
            data: [0u8; PAGE_SIZE],
        }
    }

    /// Create a page with every byte set to `byte`.
    pub fn filled(byte: u8) -> Self {
        Self {
            data: [byte; PAGE_SIZE],
        }
    }

    /// Get immutable slice of page data.
    #[inline]
    pub fn as_slice(&self) -> &[u8] {
        &self.data
    }

    /// Get mutable slice of page data.
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// Copy `src` into the start of the page, leaving the rest untouched.
    ///
    /// # Panics
    /// Panics if `src.len() > PAGE_SIZE`.
    pub fn copy_from_slice(&mut self, src: &[u8]) {
        self.data[..src.len()].copy_from_slice(src);
    }

    /// True if every byte is zero.
    pub fn is_zeroed(&self) -> bool {
        self.data.iter().all(|&b| b == 0)
    }

    /// Get the size of a page.
    #[inline]
    pub const fn size() -> usize {
        PAGE_SIZE
    }
}

impl Default for Page {
    fn default() -> Self {
        Self::new()
    }
}

impl PartialEq for Page {
    fn eq(&self, other: &Self) -> bool {
        self.data[..] == other.data[..]
    }
}

impl Eq for Page {}

impl fmt::Debug for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let nonzero = self.data.iter().filter(|&&b| b != 0).count();
        f.debug_struct("Page")
            .field("head", &&self.data[..16])
            .field("nonzero_bytes", &nonzero)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_size_and_alignment() {
        assert_eq!(std::mem::size_of::<Page>(), PAGE_SIZE);
        assert_eq!(std::mem::align_of::<Page>(), 4096);
    }

    #[test]
    fn test_page_new_is_zeroed() {
        let page = Page::new();
        assert!(page.is_zeroed());
        assert_eq!(page.as_slice().len(), Page::size());
    }

    #[test]
    fn test_page_filled() {
        let page = Page::filled(0x5A);
        assert!(page.as_slice().iter().all(|&b| b == 0x5A));
        assert!(!page.is_zeroed());
    }

    #[test]
    fn test_page_copy_from_slice() {
        let mut page = Page::filled(0xFF);
        page.copy_from_slice(b"hello");

        assert_eq!(&page.as_slice()[..5], b"hello");
        assert_eq!(page.as_slice()[5], 0xFF);
    }

    #[test]
    fn test_page_equality() {
        let mut a = Page::new();
        let mut b = Page::new();
        assert_eq!(a, b);

        a.as_mut_slice()[4095] = 1;
        assert_ne!(a, b);

        b.as_mut_slice()[4095] = 1;
        assert_eq!(a, b);
    }
}
