//! Storage layer - page file I/O and page formats.
//!
//! - [`FileHandle`] - An open page file: lifecycle, block reads and writes,
//!   capacity growth
//! - [`page`] - Page buffer and header page layout

mod block_reader;
mod block_writer;
mod capacity;
mod file_handle;
pub mod page;

pub use file_handle::FileHandle;
