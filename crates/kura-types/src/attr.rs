//! Raw attribute snapshots.
//!
//! These mirror what `lstat(2)` reports. They never follow the final
//! symbolic link of a path.

use serde::{Deserialize, Serialize};
use std::time::SystemTime;

/// File type as reported by the host, before classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RawFileType {
    /// Regular file.
    Regular,
    /// Directory.
    Directory,
    /// Symbolic link.
    Symlink,
    /// Block device.
    BlockDevice,
    /// Character device.
    CharDevice,
    /// Named pipe.
    Fifo,
    /// Unix domain socket.
    Socket,
}

/// Attributes of a filesystem entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attributes {
    /// Size in bytes.
    pub size: u64,
    /// Entry type.
    pub file_type: RawFileType,
    /// Permission bits (e.g., 0o644).
    pub perm: u32,
    /// Content modification time.
    pub mtime: SystemTime,
    /// Content access time, if the host records it.
    pub atime: Option<SystemTime>,
    /// Attribute (status) change time.
    pub ctime: Option<SystemTime>,
    /// Creation time, if the host records it.
    pub btime: Option<SystemTime>,
    /// Number of hard links.
    pub nlink: u64,
    /// Owner user ID.
    pub uid: u32,
    /// Owner group ID.
    pub gid: u32,
    /// Device containing the entry.
    pub dev: u64,
    /// Inode number.
    pub ino: u64,
}

impl Attributes {
    /// Returns true if this is a regular file.
    pub fn is_file(&self) -> bool {
        self.file_type == RawFileType::Regular
    }

    /// Returns true if this is a directory.
    pub fn is_dir(&self) -> bool {
        self.file_type == RawFileType::Directory
    }

    /// Returns true if this is a symbolic link.
    pub fn is_symlink(&self) -> bool {
        self.file_type == RawFileType::Symlink
    }
}

/// Attributes to set on an entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetAttributes {
    /// New permission bits.
    pub perm: Option<u32>,
    /// New content modification time.
    pub mtime: Option<SystemTime>,
    /// New content access time.
    pub atime: Option<SystemTime>,
    /// New owner user ID.
    pub uid: Option<u32>,
    /// New owner group ID.
    pub gid: Option<u32>,
}

impl SetAttributes {
    /// Create an empty change set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set permissions.
    pub fn with_perm(mut self, perm: u32) -> Self {
        self.perm = Some(perm);
        self
    }

    /// Set the modification time.
    pub fn with_mtime(mut self, mtime: SystemTime) -> Self {
        self.mtime = Some(mtime);
        self
    }

    /// Set the access time.
    pub fn with_atime(mut self, atime: SystemTime) -> Self {
        self.atime = Some(atime);
        self
    }

    /// Set the owner.
    pub fn with_owner(mut self, uid: u32, gid: u32) -> Self {
        self.uid = Some(uid);
        self.gid = Some(gid);
        self
    }

    /// Returns true if nothing would change.
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    /// Returns true if either timestamp is set.
    pub fn touches_times(&self) -> bool {
        self.mtime.is_some() || self.atime.is_some()
    }
}
