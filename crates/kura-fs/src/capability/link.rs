use std::fs;
use std::os::unix::fs::symlink;

use super::revalidate;
use crate::alias;
use crate::error::FsResult;
use crate::item::{Item, PathRepresentable};
use crate::nodes::{AliasFile, SymbolicLink};
use crate::path::FsPath;

/// A node that can be hard linked.
pub trait Linkable: PathRepresentable {
    /// Create a hard link at `at`. A symbolic link is linked itself, not
    /// its destination.
    fn link(&self, at: &FsPath) -> FsResult<Self> {
        tracing::debug!(path = %self.path(), at = %at, "hard link");
        fs::hard_link(self.path(), at)?;
        revalidate(at)
    }
}

/// A node a symbolic link can point to.
pub trait SymbolicLinkable: Item {
    /// Create a symbolic link at `at` pointing to this node's absolute path.
    fn symbolic_link(&self, at: &FsPath) -> FsResult<SymbolicLink> {
        let target = self.path().standardized();
        tracing::debug!(path = %target, at = %at, "symbolic link");
        symlink(target.as_path(), at)?;
        Ok(SymbolicLink::new(at.clone()))
    }
}

/// A node an alias file can point to.
pub trait Aliasable: Item {
    /// Write an alias file at `at` pointing to this node. `at` must end in
    /// `.desktop` and must not exist.
    fn make_alias(&self, at: &FsPath) -> FsResult<AliasFile> {
        tracing::debug!(path = %self.path(), at = %at, "make alias");
        alias::write_alias(at, self.path())?;
        Ok(AliasFile::new(at.clone()))
    }
}
