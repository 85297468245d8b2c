//! pagefile - a file of fixed-size pages with an in-band page count header.
//!
//! # Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                           FileHandle                            │
//! ├─────────────────────────────────────────────────────────────────┤
//! │  Lifecycle        create / open / close / destroy               │
//! │  Block Reader     read_block + first/last/previous/current/next │
//! │  Block Writer     write_block, write_current_block, append      │
//! │  Capacity         ensure_capacity ──→ append_empty_block        │
//! ├─────────────────────────────────────────────────────────────────┤
//! │  Page (4KB buffer)           FileHeader (page count encoding)   │
//! └─────────────────────────────────────────────────────────────────┘
//!                                ↓
//!   ┌────────┬────────┬────────┬─────┬──────────┐
//!   │ Header │ Page 0 │ Page 1 │ ... │ Page N-1 │   one file on disk
//!   └────────┴────────┴────────┴─────┴──────────┘
//! ```
//!
//! # Modules
//! - [`common`] - Shared primitives (PageNum, Error, config)
//! - [`storage`] - The page file and page formats
//!
//! # Quick Start
//! ```no_run
//! use pagefile::{FileHandle, Page, PageNum};
//!
//! FileHandle::create("my_pages.pf").unwrap();
//! let mut fh = FileHandle::open("my_pages.pf").unwrap();
//!
//! // Make room for 8 pages and fill page 5
//! fh.ensure_capacity(8).unwrap();
//! fh.write_block(PageNum::new(5), &Page::filled(0x42)).unwrap();
//!
//! let mut page = Page::new();
//! fh.read_block(PageNum::new(5), &mut page).unwrap();
//! fh.close().unwrap();
//! ```

pub mod common;
pub mod storage;

// Re-export commonly used items at crate root for convenience
pub use common::config::{PageFileOptions, PAGE_SIZE};
pub use common::{Error, PageNum, Result};

pub use storage::page::{FileHeader, Page};
pub use storage::FileHandle;
