use std::fs;
use std::io::Write;

use crate::capability::{
    Aliasable, Copyable, CopyableSubitem, File, FileHandleConvertible, FileWrapperConvertible,
    Linkable, Moveable, MoveableSubitem, Removeable, Renameable, Subitem, SymbolicLinkable,
};
use crate::error::FsResult;
use crate::item::Item;
use crate::path::FsPath;
use crate::trash::Trashable;

node_wrapper! {
    /// A regular file.
    RegularFile => RegularFile
}

impl RegularFile {
    /// Create an empty file at `at`. Fails if anything is there.
    pub fn create(at: impl Into<FsPath>) -> FsResult<Self> {
        Self::write_new(at, &[])
    }

    /// Create a file at `at` holding `contents`. Fails if anything is there.
    pub fn write_new(at: impl Into<FsPath>, contents: &[u8]) -> FsResult<Self> {
        let at = at.into();
        tracing::debug!(path = %at, len = contents.len(), "create file");
        let mut file = fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&at)?;
        file.write_all(contents)?;
        Ok(Self::new(at))
    }

    /// Size in bytes.
    pub fn size(&self) -> FsResult<u64> {
        Ok(fs::symlink_metadata(self.path())?.len())
    }
}

impl Subitem for RegularFile {}
impl Copyable for RegularFile {}
impl CopyableSubitem for RegularFile {}
impl Moveable for RegularFile {}
impl MoveableSubitem for RegularFile {}
impl Renameable for RegularFile {}
impl Removeable for RegularFile {}
impl Trashable for RegularFile {}
impl Linkable for RegularFile {}
impl SymbolicLinkable for RegularFile {}
impl Aliasable for RegularFile {}
impl FileHandleConvertible for RegularFile {}
impl FileWrapperConvertible for RegularFile {}
impl File for RegularFile {}
