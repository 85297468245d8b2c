//! Block writes and appends.
//!
//! Appending is the only way a page file grows. Each append writes the new
//! zero page first and the header page second; the in-memory page count only
//! moves once both have landed.

use std::fs::File;
use std::io::{self, Seek, SeekFrom, Write};

use crate::common::{Error, PageNum, Result};
use crate::storage::page::{FileHeader, Page};

use super::FileHandle;

impl FileHandle {
    /// Write `buf` to data page `page`.
    ///
    /// On success the current position moves to `page`.
    ///
    /// # Errors
    /// Returns `Error::WriteFailed` if the handle is closed, `page` is not
    /// below `total_num_pages()`, or the page cannot be written in full.
    pub fn write_block(&mut self, page: PageNum, buf: &Page) -> Result<()> {
        let total_pages = self.total_num_pages;
        let sync = self.options.syncs_on_write();
        let failed = || Error::WriteFailed {
            page: page.into(),
            total_pages,
        };

        let file = self.file.as_mut().ok_or_else(failed)?;
        if page.0 >= total_pages {
            return Err(failed());
        }

        if let Err(e) = write_page_at(file, page.file_offset(), buf, sync) {
            log::warn!(
                "writing {} of {} failed: {}",
                page,
                self.file_name.display(),
                e
            );
            return Err(failed());
        }

        self.cur_page_pos = page;
        log::trace!("wrote {} of {}", page, self.file_name.display());
        Ok(())
    }

    /// Write `buf` to the page at the current position.
    pub fn write_current_block(&mut self, buf: &Page) -> Result<()> {
        self.write_block(self.cur_page_pos, buf)
    }

    /// Grow the file by one zeroed page and rewrite the header page.
    ///
    /// On success the page count goes up by one and the current position
    /// moves to the new last page.
    ///
    /// # Errors
    /// Returns `Error::HandleNotInit` if the handle is closed, and
    /// `Error::WriteFailed` if the file already holds
    /// [`MAX_PAGES`](crate::common::config::MAX_PAGES) pages or the new page
    /// or header cannot be written. A failed append leaves the page count as
    /// it was.
    pub fn append_empty_block(&mut self) -> Result<()> {
        let total_pages = self.total_num_pages;
        let sync = self.options.syncs_on_write();
        let failed = || Error::WriteFailed {
            page: total_pages.into(),
            total_pages,
        };

        let file = self.file.as_mut().ok_or(Error::HandleNotInit)?;
        let new_total = total_pages.checked_add(1).ok_or_else(failed)?;
        let new_page = PageNum::new(total_pages);

        if let Err(e) = append_page(file, new_page, new_total, sync) {
            log::warn!(
                "appending {} to {} failed: {}",
                new_page,
                self.file_name.display(),
                e
            );
            return Err(failed());
        }

        self.total_num_pages = new_total;
        self.cur_page_pos = new_page;
        log::trace!(
            "appended {} to {}, now {} pages",
            new_page,
            self.file_name.display(),
            new_total
        );
        Ok(())
    }
}

fn write_page_at(file: &mut File, offset: u64, buf: &Page, sync: bool) -> io::Result<()> {
    file.seek(SeekFrom::Start(offset))?;
    file.write_all(buf.as_slice())?;
    if sync {
        file.sync_data()?;
    }
    Ok(())
}

/// The new page goes at its computed slot rather than wherever the file
/// currently ends, so a page orphaned by an earlier failed header rewrite is
/// overwritten instead of shifting every later page.
fn append_page(file: &mut File, page: PageNum, new_total: u32, sync: bool) -> io::Result<()> {
    write_page_at(file, page.file_offset(), &Page::new(), false)?;
    write_page_at(file, 0, &FileHeader::new(new_total).to_page(), sync)
}
