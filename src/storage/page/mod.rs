//! Page buffer and header page layout.
//!
//! This module contains:
//! - [`Page`] - The raw 4KB data container
//! - [`FileHeader`] - Encoding of the header page

mod file_header;
#[allow(clippy::module_inception)]
mod page;

pub use file_header::{FileHeader, HeaderError};
pub use page::Page;
