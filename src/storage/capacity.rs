//! Capacity management.

use crate::common::{Error, Result};

use super::FileHandle;

impl FileHandle {
    /// Grow the file until it has at least `number_of_pages` pages.
    ///
    /// Already large enough is a no-op. Growth is one append at a time and
    /// is not transactional: if an append fails the file keeps the pages
    /// appended so far, with a header that matches them.
    ///
    /// # Errors
    /// Returns `Error::HandleNotInit` if the handle is closed, otherwise the
    /// first error from [`FileHandle::append_empty_block`].
    pub fn ensure_capacity(&mut self, number_of_pages: u32) -> Result<()> {
        if !self.is_open() {
            return Err(Error::HandleNotInit);
        }
        if self.total_num_pages >= number_of_pages {
            return Ok(());
        }

        log::debug!(
            "growing {} from {} to {} pages",
            self.file_name.display(),
            self.total_num_pages,
            number_of_pages
        );

        while self.total_num_pages < number_of_pages {
            self.append_empty_block()?;
        }
        Ok(())
    }
}
