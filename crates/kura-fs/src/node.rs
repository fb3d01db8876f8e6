//! The tagged union over the five node kinds.

use std::fmt;

use kura_types::{Capability, NodeKind};

use crate::capability::{Copyable, Moveable, Removeable, Renameable};
use crate::classify;
use crate::config::FsConfig;
use crate::error::{FsError, FsResult};
use crate::item::{Item, PathRepresentable};
use crate::nodes::{AliasFile, Directory, RegularFile, SymbolicLink, Volume};
use crate::path::FsPath;
use crate::trash::{TrashOutcome, Trashable};

/// A classified node.
///
/// Capability questions go through [`Node::supports`]; the variant's
/// wrapper carries the matching trait impls.
#[derive(Clone, PartialEq, Eq, Hash)]
pub enum Node {
    Volume(Volume),
    Directory(Directory),
    SymbolicLink(SymbolicLink),
    AliasFile(AliasFile),
    RegularFile(RegularFile),
}

impl Node {
    /// Classify whatever is at `path`. See [`classify::classify`].
    pub fn classify(path: impl Into<FsPath>) -> Option<Node> {
        classify::classify(&path.into())
    }

    /// Wrap `path` as `kind` without probing the host.
    pub fn from_kind_unchecked(kind: NodeKind, path: FsPath) -> Node {
        match kind {
            NodeKind::Volume => Node::Volume(Volume::from_path_unchecked(path)),
            NodeKind::Directory => Node::Directory(Directory::from_path_unchecked(path)),
            NodeKind::SymbolicLink => Node::SymbolicLink(SymbolicLink::from_path_unchecked(path)),
            NodeKind::AliasFile => Node::AliasFile(AliasFile::from_path_unchecked(path)),
            NodeKind::RegularFile => Node::RegularFile(RegularFile::from_path_unchecked(path)),
        }
    }

    /// Returns true if this node's kind supports `capability`.
    pub fn supports(&self, capability: Capability) -> bool {
        self.kind().supports(capability)
    }

    pub fn as_volume(&self) -> Option<&Volume> {
        match self {
            Node::Volume(volume) => Some(volume),
            _ => None,
        }
    }

    pub fn as_directory(&self) -> Option<&Directory> {
        match self {
            Node::Directory(directory) => Some(directory),
            _ => None,
        }
    }

    pub fn as_symbolic_link(&self) -> Option<&SymbolicLink> {
        match self {
            Node::SymbolicLink(link) => Some(link),
            _ => None,
        }
    }

    pub fn as_alias_file(&self) -> Option<&AliasFile> {
        match self {
            Node::AliasFile(alias) => Some(alias),
            _ => None,
        }
    }

    pub fn as_regular_file(&self) -> Option<&RegularFile> {
        match self {
            Node::RegularFile(file) => Some(file),
            _ => None,
        }
    }

    pub fn into_volume(self) -> Option<Volume> {
        match self {
            Node::Volume(volume) => Some(volume),
            _ => None,
        }
    }

    pub fn into_directory(self) -> Option<Directory> {
        match self {
            Node::Directory(directory) => Some(directory),
            _ => None,
        }
    }

    pub fn into_symbolic_link(self) -> Option<SymbolicLink> {
        match self {
            Node::SymbolicLink(link) => Some(link),
            _ => None,
        }
    }

    pub fn into_alias_file(self) -> Option<AliasFile> {
        match self {
            Node::AliasFile(alias) => Some(alias),
            _ => None,
        }
    }

    pub fn into_regular_file(self) -> Option<RegularFile> {
        match self {
            Node::RegularFile(file) => Some(file),
            _ => None,
        }
    }

    /// Consume into the wrapped path.
    pub fn into_path(self) -> FsPath {
        match self {
            Node::Volume(n) => n.into_path(),
            Node::Directory(n) => n.into_path(),
            Node::SymbolicLink(n) => n.into_path(),
            Node::AliasFile(n) => n.into_path(),
            Node::RegularFile(n) => n.into_path(),
        }
    }

    /// Copy the node to `destination`. Volumes cannot be copied.
    pub fn copy_to(&self, destination: &FsPath) -> FsResult<Node> {
        match self {
            Node::Volume(volume) => Err(unsupported(volume, Capability::Copy)),
            Node::Directory(n) => n.copy_to(destination).map(Node::from),
            Node::SymbolicLink(n) => n.copy_to(destination).map(Node::from),
            Node::AliasFile(n) => n.copy_to(destination).map(Node::from),
            Node::RegularFile(n) => n.copy_to(destination).map(Node::from),
        }
    }

    /// Move the node to `destination`. Volumes cannot be moved.
    pub fn move_to(&mut self, destination: &FsPath) -> FsResult<()> {
        match self {
            Node::Volume(volume) => Err(unsupported(&*volume, Capability::Move)),
            Node::Directory(n) => n.move_to(destination),
            Node::SymbolicLink(n) => n.move_to(destination),
            Node::AliasFile(n) => n.move_to(destination),
            Node::RegularFile(n) => n.move_to(destination),
        }
    }

    /// Rename the node in place.
    pub fn rename(&mut self, name: &str) -> FsResult<()> {
        match self {
            Node::Volume(n) => n.rename(name),
            Node::Directory(n) => n.rename(name),
            Node::SymbolicLink(n) => n.rename(name),
            Node::AliasFile(n) => n.rename(name),
            Node::RegularFile(n) => n.rename(name),
        }
    }

    /// Remove the node. Volumes cannot be removed.
    pub fn remove(&self) -> FsResult<()> {
        match self {
            Node::Volume(volume) => Err(unsupported(volume, Capability::Remove)),
            Node::Directory(n) => n.remove(),
            Node::SymbolicLink(n) => n.remove(),
            Node::AliasFile(n) => n.remove(),
            Node::RegularFile(n) => n.remove(),
        }
    }

    /// Move the node to the trash using the process-wide config.
    pub fn trash(&mut self) -> FsResult<TrashOutcome> {
        self.trash_with(FsConfig::global())
    }

    /// Move the node to the trash. Volumes cannot be trashed.
    pub fn trash_with(&mut self, config: &FsConfig) -> FsResult<TrashOutcome> {
        match self {
            Node::Volume(volume) => Err(unsupported(&*volume, Capability::Trash)),
            Node::Directory(n) => n.trash_with(config),
            Node::SymbolicLink(n) => n.trash_with(config),
            Node::AliasFile(n) => n.trash_with(config),
            Node::RegularFile(n) => n.trash_with(config),
        }
    }
}

fn unsupported(item: &impl Item, capability: Capability) -> FsError {
    FsError::unsupported(format!("{} does not support {capability}", item.describe()))
}

impl Item for Node {
    fn path(&self) -> &FsPath {
        match self {
            Node::Volume(n) => n.path(),
            Node::Directory(n) => n.path(),
            Node::SymbolicLink(n) => n.path(),
            Node::AliasFile(n) => n.path(),
            Node::RegularFile(n) => n.path(),
        }
    }

    fn kind(&self) -> NodeKind {
        match self {
            Node::Volume(_) => NodeKind::Volume,
            Node::Directory(_) => NodeKind::Directory,
            Node::SymbolicLink(_) => NodeKind::SymbolicLink,
            Node::AliasFile(_) => NodeKind::AliasFile,
            Node::RegularFile(_) => NodeKind::RegularFile,
        }
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path())
    }
}

impl fmt::Debug for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.describe())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;
    use tempfile::TempDir;

    #[test]
    fn test_unchecked_construction_keeps_kind() {
        for kind in NodeKind::iter() {
            let node = Node::from_kind_unchecked(kind, FsPath::from("/nowhere"));
            assert_eq!(node.kind(), kind);
            assert_eq!(node.path(), &FsPath::from("/nowhere"));
        }
    }

    #[test]
    fn test_accessors() {
        let dir = TempDir::new().unwrap();
        let node = Node::classify(dir.path()).unwrap();
        assert!(node.as_directory().is_some());
        assert!(node.as_regular_file().is_none());
        assert!(node.supports(Capability::Parent));
        assert!(!node.supports(Capability::FileHandle));

        let directory = node.clone().into_directory().unwrap();
        assert_eq!(Node::from(directory), node);
        assert_eq!(node.into_path(), FsPath::new(dir.path()));
    }

    #[test]
    fn test_volume_refuses_remove() {
        let root = Node::classify("/").unwrap();
        assert!(matches!(root.remove(), Err(FsError::Unsupported(_))));
        assert!(root.exists());
    }

    #[test]
    fn test_remove_dispatches() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("a.txt");
        std::fs::write(&file, "x").unwrap();

        let node = Node::classify(&file).unwrap();
        node.remove().unwrap();
        assert!(Node::classify(&file).is_none());
    }
}
