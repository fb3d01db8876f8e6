//! In-memory snapshots of files, links and directory trees.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// A detached snapshot of a filesystem entry.
///
/// Directory children are keyed by name, so two snapshots of the same tree
/// compare equal regardless of the order the host enumerated them in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum FileWrapper {
    /// A regular file with its contents.
    Regular {
        name: String,
        perm: u32,
        contents: Vec<u8>,
    },
    /// A directory with its children.
    Directory {
        name: String,
        perm: u32,
        children: BTreeMap<String, FileWrapper>,
    },
    /// A symbolic link and its (unresolved) destination.
    SymbolicLink { name: String, destination: PathBuf },
}

impl FileWrapper {
    /// Entry name (last path component).
    pub fn name(&self) -> &str {
        match self {
            FileWrapper::Regular { name, .. }
            | FileWrapper::Directory { name, .. }
            | FileWrapper::SymbolicLink { name, .. } => name,
        }
    }

    /// Returns true if this wraps a regular file.
    pub fn is_regular_file(&self) -> bool {
        matches!(self, FileWrapper::Regular { .. })
    }

    /// Returns true if this wraps a directory.
    pub fn is_directory(&self) -> bool {
        matches!(self, FileWrapper::Directory { .. })
    }

    /// Returns true if this wraps a symbolic link.
    pub fn is_symbolic_link(&self) -> bool {
        matches!(self, FileWrapper::SymbolicLink { .. })
    }

    /// Regular file contents, if this is a regular file.
    pub fn contents(&self) -> Option<&[u8]> {
        match self {
            FileWrapper::Regular { contents, .. } => Some(contents),
            _ => None,
        }
    }

    /// Look up a direct child by name.
    pub fn child(&self, name: &str) -> Option<&FileWrapper> {
        match self {
            FileWrapper::Directory { children, .. } => children.get(name),
            _ => None,
        }
    }

    /// Total bytes of regular-file contents in this snapshot.
    pub fn content_len(&self) -> u64 {
        match self {
            FileWrapper::Regular { contents, .. } => contents.len() as u64,
            FileWrapper::Directory { children, .. } => {
                children.values().map(FileWrapper::content_len).sum()
            }
            FileWrapper::SymbolicLink { .. } => 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_tree() -> FileWrapper {
        let mut children = BTreeMap::new();
        children.insert(
            "a.txt".to_string(),
            FileWrapper::Regular {
                name: "a.txt".into(),
                perm: 0o644,
                contents: b"hello".to_vec(),
            },
        );
        children.insert(
            "link".to_string(),
            FileWrapper::SymbolicLink {
                name: "link".into(),
                destination: PathBuf::from("a.txt"),
            },
        );
        FileWrapper::Directory {
            name: "dir".into(),
            perm: 0o755,
            children,
        }
    }

    #[test]
    fn test_tree_accessors() {
        let tree = sample_tree();
        assert!(tree.is_directory());
        assert_eq!(tree.name(), "dir");
        assert_eq!(tree.content_len(), 5);

        let file = tree.child("a.txt").unwrap();
        assert!(file.is_regular_file());
        assert_eq!(file.contents(), Some(&b"hello"[..]));

        let link = tree.child("link").unwrap();
        assert!(link.is_symbolic_link());
        assert!(link.contents().is_none());
        assert!(tree.child("missing").is_none());
        assert!(file.child("anything").is_none());
    }
}
