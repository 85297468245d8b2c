//! Error types for page files.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Convenient Result type alias.
///
/// Instead of writing `Result<T, Error>` everywhere, we can write `Result<T>`
/// (see `std::io::Result`).
pub type Result<T> = std::result::Result<T, Error>;

/// Every way a page file operation can fail.
///
/// The variants are result kinds, not I/O detail: an I/O error during a block
/// read is a [`Error::ReadNonExistingPage`], during a block write a
/// [`Error::WriteFailed`]. The underlying error is logged where it is folded.
#[derive(Debug, Error)]
pub enum Error {
    /// The file could not be created, opened, closed or removed, or its
    /// header page is unreadable or invalid.
    #[error("file not found: {}", .path.display())]
    FileNotFound {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The handle is closed, the page is outside `[0, total_pages)`, or the
    /// page could not be read in full.
    ///
    /// `page` is signed so that a relative step before page 0 can be
    /// reported as `-1`.
    #[error("read of non-existing page {page} (file has {total_pages} pages)")]
    ReadNonExistingPage { page: i64, total_pages: u32 },

    /// The handle is closed, the page is outside `[0, total_pages)`, or the
    /// write (or a step of an append) failed.
    #[error("write of page {page} failed (file has {total_pages} pages)")]
    WriteFailed { page: i64, total_pages: u32 },

    /// A growth operation was invoked on a handle whose file is closed.
    #[error("file handle not initialized")]
    HandleNotInit,
}

impl Error {
    pub(crate) fn file_not_found(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Error::FileNotFound {
            path: path.into(),
            source,
        }
    }
}
