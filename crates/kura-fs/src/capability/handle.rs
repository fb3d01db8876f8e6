use std::fs;

use crate::error::FsResult;
use crate::item::Item;

/// A node that can be opened as a file handle. Handles close on drop.
pub trait FileHandleConvertible: Item {
    /// Open read-only.
    fn file_handle_for_reading(&self) -> FsResult<fs::File> {
        Ok(fs::File::open(self.path())?)
    }

    /// Open write-only. The file is neither created nor truncated.
    fn file_handle_for_writing(&self) -> FsResult<fs::File> {
        Ok(fs::OpenOptions::new().write(true).open(self.path())?)
    }

    /// Open for reading and writing.
    fn file_handle_for_updating(&self) -> FsResult<fs::File> {
        Ok(fs::OpenOptions::new()
            .read(true)
            .write(true)
            .open(self.path())?)
    }
}
