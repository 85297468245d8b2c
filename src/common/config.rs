//! Configuration for page files.
//!
//! Layout constants are fixed at compile time; writer and reader of a file
//! must agree on them. Runtime knobs live in [`PageFileOptions`].

/// Size of a page in bytes (4KB).
///
/// Every block in a page file, including the header block, is exactly this
/// long. Files are not portable across builds with a different value.
pub const PAGE_SIZE: usize = 4096;

/// Maximum number of data pages with a `u32` page number.
pub const MAX_PAGES: u64 = u32::MAX as u64;

/// Byte offset of the binary metadata block inside the header page.
///
/// The decimal page count (at most 10 digits plus a NUL) always ends before
/// this offset.
pub const HEADER_META_OFFSET: usize = 32;

/// Size of the binary metadata block in bytes.
pub const HEADER_META_SIZE: usize = 16;

/// Magic bytes opening the binary metadata block.
pub const HEADER_MAGIC: [u8; 4] = *b"PGFH";

/// Current header format version.
pub const HEADER_VERSION: u16 = 1;

/// Runtime options for an open page file.
///
/// # Example
/// ```
/// use pagefile::PageFileOptions;
///
/// let opts = PageFileOptions::new().sync_on_write(true);
/// assert!(opts.syncs_on_write());
/// ```
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct PageFileOptions {
    sync_on_write: bool,
}

impl PageFileOptions {
    /// Options with every knob at its default.
    pub fn new() -> Self {
        Self::default()
    }

    /// Call `sync_data()` after every block write, append and header rewrite.
    ///
    /// Off by default: a successful write is as durable as the filesystem
    /// makes it and no more.
    pub fn sync_on_write(mut self, enabled: bool) -> Self {
        self.sync_on_write = enabled;
        self
    }

    /// Whether writes are followed by `sync_data()`.
    #[inline]
    pub fn syncs_on_write(&self) -> bool {
        self.sync_on_write
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_size_is_power_of_two() {
        assert!(PAGE_SIZE.is_power_of_two());
        assert_eq!(PAGE_SIZE, 4096);
    }

    #[test]
    fn test_header_meta_fits_in_header_page() {
        // "4294967295" plus NUL terminator
        assert!(u32::MAX.to_string().len() + 1 <= HEADER_META_OFFSET);
        assert!(HEADER_META_OFFSET + HEADER_META_SIZE <= PAGE_SIZE);
    }

    #[test]
    fn test_options_default() {
        let opts = PageFileOptions::default();
        assert!(!opts.syncs_on_write());
        assert!(PageFileOptions::new().sync_on_write(true).syncs_on_write());
    }
}
