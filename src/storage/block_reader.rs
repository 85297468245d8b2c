//! Block reads, by absolute page number or relative to the current position.

use std::fs::File;
use std::io::{self, Read, Seek, SeekFrom};

use crate::common::{Error, PageNum, Result};
use crate::storage::page::Page;

use super::FileHandle;

impl FileHandle {
    /// Read data page `page` into `buf`.
    ///
    /// On success the current position moves to `page`.
    ///
    /// # Errors
    /// Returns `Error::ReadNonExistingPage` if the handle is closed, `page` is
    /// not below `total_num_pages()`, or the page cannot be read in full.
    pub fn read_block(&mut self, page: PageNum, buf: &mut Page) -> Result<()> {
        let total_pages = self.total_num_pages;
        let non_existing = || Error::ReadNonExistingPage {
            page: page.into(),
            total_pages,
        };

        let file = self.file.as_mut().ok_or_else(non_existing)?;
        if page.0 >= total_pages {
            return Err(non_existing());
        }

        if let Err(e) = read_page_at(file, page.file_offset(), buf) {
            log::warn!(
                "reading {} of {} failed: {}",
                page,
                self.file_name.display(),
                e
            );
            return Err(non_existing());
        }

        self.cur_page_pos = page;
        log::trace!("read {} of {}", page, self.file_name.display());
        Ok(())
    }

    /// Read the first page.
    pub fn read_first_block(&mut self, buf: &mut Page) -> Result<()> {
        self.read_block(PageNum::FIRST, buf)
    }

    /// Read the last page.
    pub fn read_last_block(&mut self, buf: &mut Page) -> Result<()> {
        match self.total_num_pages.checked_sub(1) {
            Some(last) => self.read_block(PageNum::new(last), buf),
            None => Err(self.before_first()),
        }
    }

    /// Read the page before the current position.
    ///
    /// # Errors
    /// Returns `Error::ReadNonExistingPage` (page `-1`) when positioned on
    /// page 0.
    pub fn read_previous_block(&mut self, buf: &mut Page) -> Result<()> {
        match self.cur_page_pos.prev() {
            Some(prev) => self.read_block(prev, buf),
            None => Err(self.before_first()),
        }
    }

    /// Read the page at the current position.
    pub fn read_current_block(&mut self, buf: &mut Page) -> Result<()> {
        self.read_block(self.cur_page_pos, buf)
    }

    /// Read the page after the current position.
    ///
    /// # Errors
    /// Returns `Error::ReadNonExistingPage` when positioned on the last page.
    pub fn read_next_block(&mut self, buf: &mut Page) -> Result<()> {
        match self.cur_page_pos.next() {
            Some(next) => self.read_block(next, buf),
            None => Err(Error::ReadNonExistingPage {
                page: i64::from(self.cur_page_pos) + 1,
                total_pages: self.total_num_pages,
            }),
        }
    }

    fn before_first(&self) -> Error {
        Error::ReadNonExistingPage {
            page: -1,
            total_pages: self.total_num_pages,
        }
    }
}

fn read_page_at(file: &mut File, offset: u64, buf: &mut Page) -> io::Result<()> {
    file.seek(SeekFrom::Start(offset))?;
    file.read_exact(buf.as_mut_slice())
}
