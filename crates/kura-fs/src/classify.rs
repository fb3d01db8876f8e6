//! Node-kind classification.
//!
//! One `lstat` per path decides the kind. Flags are evaluated in
//! [`NodeKind::PRIORITY`] order: a volume root is also a directory, and a
//! symbolic link to a directory is a symbolic link.

use std::fs;
use std::os::unix::fs::MetadataExt;
use std::path::Path;

use kura_types::NodeKind;

use crate::alias;
use crate::error::FsResult;
use crate::node::Node;
use crate::path::FsPath;

/// Result of a metadata probe.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Probe {
    pub is_volume: bool,
    pub is_directory: bool,
    pub is_symbolic_link: bool,
    pub is_alias_file: bool,
    pub is_regular_file: bool,
}

impl Probe {
    /// The flag for `kind`.
    pub fn flag(&self, kind: NodeKind) -> bool {
        match kind {
            NodeKind::Volume => self.is_volume,
            NodeKind::Directory => self.is_directory,
            NodeKind::SymbolicLink => self.is_symbolic_link,
            NodeKind::AliasFile => self.is_alias_file,
            NodeKind::RegularFile => self.is_regular_file,
        }
    }

    /// The highest-priority kind whose flag is set.
    pub fn kind(&self) -> Option<NodeKind> {
        NodeKind::PRIORITY
            .into_iter()
            .find(|kind| self.flag(*kind))
    }
}

/// Probe all five flags for `path`.
///
/// Errors if the path cannot be stat'ed.
pub fn probe(path: &FsPath) -> FsResult<Probe> {
    let meta = fs::symlink_metadata(path)?;
    let file_type = meta.file_type();
    let is_directory = file_type.is_dir();
    let is_regular_file = file_type.is_file();

    Ok(Probe {
        is_volume: is_directory && is_mount_point(path.as_path(), &meta)?,
        is_directory,
        is_symbolic_link: file_type.is_symlink(),
        is_alias_file: is_regular_file && alias::is_alias_file(path.as_path()),
        is_regular_file,
    })
}

/// Classify `path` into a node.
///
/// Returns `None` if nothing is there, if the probe fails, or if the entry
/// is none of the five kinds (sockets, devices, pipes).
pub fn classify(path: &FsPath) -> Option<Node> {
    match probe(path) {
        Ok(probe) => probe
            .kind()
            .map(|kind| Node::from_kind_unchecked(kind, path.clone())),
        Err(e) => {
            tracing::trace!(path = %path, error = %e, "probe failed");
            None
        }
    }
}

/// Probe the single flag for `kind`. Used by validated construction.
pub fn probe_flag(path: &FsPath, kind: NodeKind) -> bool {
    let meta = match fs::symlink_metadata(path) {
        Ok(meta) => meta,
        Err(e) => {
            tracing::trace!(path = %path, kind = %kind, error = %e, "probe failed");
            return false;
        }
    };

    match kind {
        NodeKind::Volume => meta.is_dir() && is_mount_point(path.as_path(), &meta).unwrap_or(false),
        NodeKind::Directory => meta.is_dir(),
        NodeKind::SymbolicLink => meta.file_type().is_symlink(),
        NodeKind::AliasFile => meta.is_file() && alias::is_alias_file(path.as_path()),
        NodeKind::RegularFile => meta.is_file(),
    }
}

/// Returns true if the directory at `path` is the root of a mounted
/// filesystem: its device differs from its parent's, or it is its own
/// parent.
pub(crate) fn is_mount_point(path: &Path, meta: &fs::Metadata) -> FsResult<bool> {
    let canonical = dunce::canonicalize(path)?;
    let Some(parent) = canonical.parent() else {
        return Ok(true);
    };
    let parent_meta = fs::metadata(parent)?;
    Ok(meta.dev() != parent_meta.dev() || meta.ino() == parent_meta.ino())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::Item;
    use tempfile::TempDir;

    #[test]
    fn test_priority_picks_first_flag() {
        let probe = Probe {
            is_volume: true,
            is_directory: true,
            ..Default::default()
        };
        assert_eq!(probe.kind(), Some(NodeKind::Volume));

        let probe = Probe {
            is_alias_file: true,
            is_regular_file: true,
            ..Default::default()
        };
        assert_eq!(probe.kind(), Some(NodeKind::AliasFile));

        assert_eq!(Probe::default().kind(), None);
    }

    #[test]
    fn test_root_is_volume() {
        let root = FsPath::from("/");
        let probe = probe(&root).unwrap();
        assert!(probe.is_volume);
        assert!(probe.is_directory);
        assert_eq!(classify(&root).map(|n| n.kind()), Some(NodeKind::Volume));
    }

    #[test]
    fn test_classify_kinds() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("a.txt");
        std::fs::write(&file, "hello").unwrap();
        std::os::unix::fs::symlink(&file, dir.path().join("link")).unwrap();
        std::os::unix::fs::symlink(dir.path(), dir.path().join("dirlink")).unwrap();
        std::fs::create_dir(dir.path().join("sub")).unwrap();

        let kind = |name: &str| classify(&FsPath::new(dir.path().join(name))).map(|n| n.kind());
        assert_eq!(kind("a.txt"), Some(NodeKind::RegularFile));
        assert_eq!(kind("link"), Some(NodeKind::SymbolicLink));
        assert_eq!(kind("dirlink"), Some(NodeKind::SymbolicLink));
        assert_eq!(kind("sub"), Some(NodeKind::Directory));
        assert_eq!(kind("missing"), None);
    }

    #[test]
    fn test_probe_errors_are_absent_not_fatal() {
        let missing = FsPath::from("/definitely/not/here");
        assert!(probe(&missing).is_err());
        assert!(classify(&missing).is_none());
        assert!(!probe_flag(&missing, NodeKind::Directory));
    }

    #[test]
    fn test_single_flag_probe() {
        let dir = TempDir::new().unwrap();
        let path = FsPath::new(dir.path());
        assert!(probe_flag(&path, NodeKind::Directory));
        assert!(!probe_flag(&path, NodeKind::RegularFile));
        assert!(!probe_flag(&path, NodeKind::SymbolicLink));
        assert!(probe_flag(&FsPath::from("/"), NodeKind::Volume));
        assert!(probe_flag(&FsPath::from("/"), NodeKind::Directory));
    }
}
