//! Common types shared across the crate.
//!
//! - Configuration constants and [`PageFileOptions`](config::PageFileOptions)
//! - Error types
//! - [`PageNum`]

pub mod config;
pub mod error;
mod page_num;

pub use error::{Error, Result};
pub use page_num::PageNum;
