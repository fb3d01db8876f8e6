//! Mounted filesystems.

use std::collections::HashSet;
use std::fs;
use std::io;
use std::os::unix::fs::MetadataExt;
use std::path::PathBuf;

use rustix::fs::{StatVfs, StatVfsMountFlags};

use crate::capability::{Linkable, Parent, Renameable, SymbolicLinkable};
use crate::config::FsConfig;
use crate::error::FsResult;
use crate::item::{Item, PathRepresentable};
use crate::mounts::{self, MountEntry};

/// Filesystem types for optical media, which can always be ejected.
const OPTICAL_FILE_SYSTEMS: &[&str] = &["iso9660", "udf"];

node_wrapper! {
    /// The root directory of a mounted filesystem.
    Volume => Volume
}

impl Volume {
    /// Every mounted volume, in mount-table order.
    pub fn mounted() -> FsResult<Vec<Volume>> {
        Self::mounted_with(FsConfig::global())
    }

    /// Every mounted volume listed in `config`'s mount table. Mount points
    /// that cannot be probed (or are shadowed twice) appear once or not at
    /// all.
    pub fn mounted_with(config: &FsConfig) -> FsResult<Vec<Volume>> {
        let mut seen = HashSet::new();
        let volumes = mounts::read_mounts(config)?
            .into_iter()
            .filter(|entry| seen.insert(entry.mount_point.clone()))
            .filter_map(|entry| Volume::from_path(entry.mount_point))
            .collect::<Vec<_>>();
        tracing::debug!(count = volumes.len(), "mounted volumes");
        Ok(volumes)
    }

    fn statvfs(&self) -> FsResult<StatVfs> {
        Ok(rustix::fs::statvfs(self.path().as_path()).map_err(io::Error::from)?)
    }

    /// Total size in bytes.
    pub fn total_capacity(&self) -> FsResult<u64> {
        let stat = self.statvfs()?;
        Ok(stat.f_blocks * stat.f_frsize)
    }

    /// Bytes available to unprivileged users.
    pub fn available_capacity(&self) -> FsResult<u64> {
        let stat = self.statvfs()?;
        Ok(stat.f_bavail * stat.f_frsize)
    }

    /// Bytes in use.
    pub fn used_capacity(&self) -> FsResult<u64> {
        let stat = self.statvfs()?;
        Ok(stat.f_blocks.saturating_sub(stat.f_bfree) * stat.f_frsize)
    }

    /// Returns true if mounted read-only.
    pub fn is_read_only(&self) -> FsResult<bool> {
        Ok(self.statvfs()?.f_flag.contains(StatVfsMountFlags::RDONLY))
    }

    /// The mount-table entry for this volume.
    pub fn mount_entry(&self) -> FsResult<MountEntry> {
        mounts::entry_for(self.path().as_path(), FsConfig::global())
    }

    /// Filesystem type, e.g. `ext4`.
    pub fn file_system_type(&self) -> FsResult<String> {
        Ok(self.mount_entry()?.fs_type)
    }

    /// Mounted device or source, e.g. `/dev/sda1`.
    pub fn device(&self) -> FsResult<String> {
        Ok(self.mount_entry()?.device)
    }

    /// Returns true unless the filesystem type is a network filesystem.
    pub fn is_local(&self) -> FsResult<bool> {
        let fs_type = self.file_system_type()?;
        Ok(!FsConfig::global().is_network_file_system(&fs_type))
    }

    /// Returns true if the backing block device reports removable media.
    /// Volumes without a block device (tmpfs, proc, network) are not.
    pub fn is_removable(&self) -> FsResult<bool> {
        let dev = fs::metadata(self.path())?.dev();
        let block = PathBuf::from(format!(
            "/sys/dev/block/{}:{}",
            rustix::fs::major(dev),
            rustix::fs::minor(dev)
        ));

        // Partitions carry the flag on their parent device.
        for flag in [block.join("removable"), block.join("../removable")] {
            match fs::read_to_string(&flag) {
                Ok(text) => return Ok(text.trim() == "1"),
                Err(e) if e.kind() == io::ErrorKind::NotFound => continue,
                Err(e) => return Err(e.into()),
            }
        }
        Ok(false)
    }

    /// Returns true for removable or optical media.
    pub fn is_ejectable(&self) -> FsResult<bool> {
        if self.is_removable()? {
            return Ok(true);
        }
        let fs_type = self.file_system_type()?;
        Ok(OPTICAL_FILE_SYSTEMS.contains(&fs_type.as_str()))
    }

    /// Returns true for local, non-removable volumes.
    pub fn is_internal(&self) -> FsResult<bool> {
        Ok(self.is_local()? && !self.is_removable()?)
    }
}

impl Parent for Volume {}
impl Renameable for Volume {}
impl Linkable for Volume {}
impl SymbolicLinkable for Volume {}
