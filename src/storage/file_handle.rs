//! File handle - lifecycle of a page file.
//!
//! [`FileHandle`] owns one open page file. This module covers creating,
//! opening, closing and destroying page files; block I/O and growth live in
//! the sibling `block_reader`, `block_writer` and `capacity` modules.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

use crate::common::config::{PageFileOptions, PAGE_SIZE};
use crate::common::{Error, PageNum, Result};
use crate::storage::page::{FileHeader, Page};

/// An open page file.
///
/// # File Layout
/// ```text
/// ┌─────────┬─────────┬─────────┬─────────┬───────────┐
/// │ Header  │ Page 0  │ Page 1  │  ...    │ Page N-1  │
/// │ (4KB)   │ (4KB)   │ (4KB)   │         │ (4KB)     │
/// └─────────┴─────────┴─────────┴─────────┴───────────┘
/// Offset:  0      4096     8192    ...    N×4096
/// ```
///
/// Data page `p` is located at file offset `(p + 1) × PAGE_SIZE`, and the
/// file is always `(N + 1) × PAGE_SIZE` bytes long.
///
/// # Current Position
/// Every successful read or write moves the current position to the page it
/// touched. The relative operations (`read_next_block`, `write_current_block`,
/// ...) are computed from it.
///
/// # Thread Safety
/// `FileHandle` is **single-threaded**: every operation that moves the file
/// cursor or the current position takes `&mut self`. Two handles opened on
/// the same path are not coordinated and must not both write.
///
/// # Example
/// ```no_run
/// use pagefile::{FileHandle, Page, PageNum};
///
/// FileHandle::create("t1").unwrap();
/// let mut fh = FileHandle::open("t1").unwrap();
///
/// let mut page = Page::new();
/// fh.read_block(PageNum::new(0), &mut page).unwrap();
/// assert!(page.is_zeroed());
///
/// fh.close().unwrap();
/// FileHandle::destroy("t1").unwrap();
/// ```
#[derive(Debug)]
pub struct FileHandle {
    pub(super) file_name: PathBuf,
    /// Number of data pages, mirrored in the header page.
    pub(super) total_num_pages: u32,
    pub(super) cur_page_pos: PageNum,
    /// `None` once the handle is closed.
    pub(super) file: Option<File>,
    pub(super) options: PageFileOptions,
}

impl FileHandle {
    /// Create a page file with a single zeroed data page.
    ///
    /// An existing file at `path` is truncated. The file is closed again
    /// before returning; use [`FileHandle::open`] to work with it.
    ///
    /// # Errors
    /// Returns `Error::FileNotFound` if the file cannot be created or written.
    pub fn create<P: AsRef<Path>>(path: P) -> Result<()> {
        let path = path.as_ref();
        let mut file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(true)
            .open(path)
            .map_err(|e| Error::file_not_found(path, e))?;

        write_initial_pages(&mut file).map_err(|e| Error::file_not_found(path, e))?;

        log::debug!("created page file {}", path.display());
        Ok(())
    }

    /// Open an existing page file with default options.
    ///
    /// # Errors
    /// Returns `Error::FileNotFound` if the file cannot be opened, or its
    /// header page is missing or invalid.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::open_with(path, PageFileOptions::default())
    }

    /// Open an existing page file.
    ///
    /// The page count is read from the header page and the current position
    /// starts at page 0.
    ///
    /// # Errors
    /// Returns `Error::FileNotFound` if the file cannot be opened, the header
    /// page cannot be read, the header is invalid, or the file is shorter
    /// than the header claims.
    pub fn open_with<P: AsRef<Path>>(path: P, options: PageFileOptions) -> Result<Self> {
        let path = path.as_ref();
        let mut file = OpenOptions::new()
            .read(true)
            .write(true)
            .open(path)
            .map_err(|e| Error::file_not_found(path, e))?;

        let total_num_pages = read_header(&mut file).map_err(|e| Error::file_not_found(path, e))?;

        log::debug!(
            "opened page file {} with {} pages",
            path.display(),
            total_num_pages
        );

        Ok(Self {
            file_name: path.to_path_buf(),
            total_num_pages,
            cur_page_pos: PageNum::FIRST,
            file: Some(file),
            options,
        })
    }

    /// Open a page file, creating it first if it doesn't exist.
    pub fn open_or_create<P: AsRef<Path>>(path: P) -> Result<Self> {
        if !path.as_ref().exists() {
            Self::create(&path)?;
        }
        Self::open(path)
    }

    /// Flush the file to storage and release it.
    ///
    /// Closing an already closed handle succeeds. If the flush fails the
    /// handle stays open, so the close can be retried.
    ///
    /// # Errors
    /// Returns `Error::FileNotFound` if the flush reports an error.
    pub fn close(&mut self) -> Result<()> {
        let file = match self.file.take() {
            Some(file) => file,
            None => return Ok(()),
        };

        if let Err(e) = file.sync_all() {
            self.file = Some(file);
            return Err(Error::file_not_found(&self.file_name, e));
        }

        log::debug!("closed page file {}", self.file_name.display());
        Ok(())
    }

    /// Remove a page file from storage.
    ///
    /// There is no check that the file is closed.
    ///
    /// # Errors
    /// Returns `Error::FileNotFound` if the file cannot be removed.
    pub fn destroy<P: AsRef<Path>>(path: P) -> Result<()> {
        let path = path.as_ref();
        fs::remove_file(path).map_err(|e| Error::file_not_found(path, e))?;

        log::debug!("destroyed page file {}", path.display());
        Ok(())
    }

    /// Path the handle was opened with.
    #[inline]
    pub fn file_name(&self) -> &Path {
        &self.file_name
    }

    /// Number of data pages in the file.
    #[inline]
    pub fn total_num_pages(&self) -> u32 {
        self.total_num_pages
    }

    /// Current page position, the target of the relative operations.
    #[inline]
    pub fn block_pos(&self) -> PageNum {
        self.cur_page_pos
    }

    /// Whether the underlying file is still open.
    #[inline]
    pub fn is_open(&self) -> bool {
        self.file.is_some()
    }

    /// Options the handle was opened with.
    #[inline]
    pub fn options(&self) -> PageFileOptions {
        self.options
    }

    /// Expected size of the file in bytes, header page included.
    #[inline]
    pub fn file_size(&self) -> u64 {
        (self.total_num_pages as u64 + 1) * PAGE_SIZE as u64
    }
}

impl Drop for FileHandle {
    fn drop(&mut self) {
        if let Err(e) = self.close() {
            match std::error::Error::source(&e) {
                Some(cause) => log::warn!("dropping page file handle: {}: {}", e, cause),
                None => log::warn!("dropping page file handle: {}", e),
            }
        }
    }
}

fn write_initial_pages(file: &mut File) -> io::Result<()> {
    file.write_all(FileHeader::new(1).to_page().as_slice())?;
    file.write_all(Page::new().as_slice())?;
    Ok(())
}

fn read_header(file: &mut File) -> io::Result<u32> {
    let mut page = Page::new();
    file.seek(SeekFrom::Start(0))?;
    file.read_exact(page.as_mut_slice())?;

    let header = FileHeader::from_page(&page)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;

    let expected = (header.total_num_pages as u64 + 1) * PAGE_SIZE as u64;
    let actual = file.metadata()?.len();
    if actual < expected {
        return Err(io::Error::new(
            io::ErrorKind::UnexpectedEof,
            format!(
                "header declares {} pages ({} bytes) but file is {} bytes",
                header.total_num_pages, expected, actual
            ),
        ));
    }

    Ok(header.total_num_pages)
}
