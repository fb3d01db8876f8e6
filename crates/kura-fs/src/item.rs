//! The base traits every node implements.

use std::fs;
use std::os::unix::fs::{MetadataExt, PermissionsExt};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use kura_types::{Attributes, NodeKind, RawFileType, SetAttributes};
use rustix::fs::{Access, AtFlags, Timespec, Timestamps, CWD};
use rustix::io::Errno;

use crate::alias;
use crate::classify;
use crate::config::FsConfig;
use crate::error::FsResult;
use crate::path::FsPath;

pub(crate) mod private {
    use crate::path::FsPath;

    /// Keeps the stored path writable only from inside the crate.
    pub trait Sealed {
        fn replace_path(&mut self, path: FsPath);
    }
}

/// Anything represented by a path: the five node wrappers and [`crate::Node`].
///
/// Every query is a fresh call to the host; nothing is cached. Queries do
/// not follow a final symbolic link unless noted.
pub trait Item {
    /// The represented path.
    fn path(&self) -> &FsPath;

    /// The node kind.
    fn kind(&self) -> NodeKind;

    /// Returns true if something exists at the path (links followed).
    fn exists(&self) -> bool {
        self.path().exists()
    }

    /// Name shown to users: a desktop entry's `Name=`, else the last path
    /// component.
    fn localized_name(&self) -> FsResult<String> {
        if fs::symlink_metadata(self.path())?.is_file() {
            let entry = alias::read_desktop_entry(self.path().as_path())?;
            if let Some(name) = entry.and_then(|e| e.name) {
                return Ok(name);
            }
        }
        Ok(self.path().last_component())
    }

    /// Returns true if the caller may read the item.
    fn is_readable(&self) -> FsResult<bool> {
        check_access(self.path(), Access::READ_OK)
    }

    /// Returns true if the caller may write the item.
    fn is_writable(&self) -> FsResult<bool> {
        check_access(self.path(), Access::WRITE_OK)
    }

    /// Returns true if the caller may execute (or search) the item.
    fn is_executable(&self) -> FsResult<bool> {
        check_access(self.path(), Access::EXEC_OK)
    }

    /// Returns true for dot-files.
    fn is_hidden(&self) -> FsResult<bool> {
        fs::symlink_metadata(self.path())?;
        Ok(self.path().last_component().starts_with('.'))
    }

    /// Returns true for a directory with a package extension.
    fn is_package(&self) -> FsResult<bool> {
        is_package_with(self.path(), FsConfig::global())
    }

    /// Returns true for an `.app` package or an application desktop entry.
    fn is_application(&self) -> FsResult<bool> {
        let path = self.path();
        if is_package_with(path, FsConfig::global())? {
            return Ok(path.extension().eq_ignore_ascii_case("app"));
        }
        if !fs::symlink_metadata(path)?.is_file() {
            return Ok(false);
        }
        Ok(alias::read_desktop_entry(path.as_path())?.is_some_and(|e| e.is_application()))
    }

    /// Returns true if the item is an alias file.
    fn is_alias_file(&self) -> FsResult<bool> {
        Ok(fs::symlink_metadata(self.path())?.is_file()
            && alias::is_alias_file(self.path().as_path()))
    }

    /// Returns true if the item is a symbolic link.
    fn is_symbolic_link(&self) -> FsResult<bool> {
        Ok(fs::symlink_metadata(self.path())?.file_type().is_symlink())
    }

    /// Creation (birth) time. Errors where the host does not record it.
    fn creation_date(&self) -> FsResult<SystemTime> {
        Ok(fs::symlink_metadata(self.path())?.created()?)
    }

    /// Last content access.
    fn content_access_date(&self) -> FsResult<SystemTime> {
        Ok(fs::symlink_metadata(self.path())?.accessed()?)
    }

    /// Last content modification.
    fn content_modification_date(&self) -> FsResult<SystemTime> {
        Ok(fs::symlink_metadata(self.path())?.modified()?)
    }

    /// Last attribute (status) change.
    fn attribute_modification_date(&self) -> FsResult<SystemTime> {
        let meta = fs::symlink_metadata(self.path())?;
        Ok(system_time(meta.ctime(), meta.ctime_nsec()))
    }

    /// Raw attributes. Does not follow symbolic links.
    fn attributes(&self) -> FsResult<Attributes> {
        Ok(attributes_from(&fs::symlink_metadata(self.path())?))
    }

    /// Apply attribute changes.
    ///
    /// Times and ownership are changed on the entry itself; permissions
    /// follow a symbolic link, as `chmod(2)` does.
    fn set_attributes(&self, changes: &SetAttributes) -> FsResult<()> {
        let path = self.path();
        tracing::debug!(path = %path, ?changes, "set attributes");

        if let Some(perm) = changes.perm {
            fs::set_permissions(path, fs::Permissions::from_mode(perm))?;
        }

        if changes.touches_times() {
            let meta = fs::symlink_metadata(path)?;
            let atime = changes
                .atime
                .unwrap_or_else(|| system_time(meta.atime(), meta.atime_nsec()));
            let mtime = changes
                .mtime
                .unwrap_or_else(|| system_time(meta.mtime(), meta.mtime_nsec()));
            let times = Timestamps {
                last_access: timespec(atime),
                last_modification: timespec(mtime),
            };
            rustix::fs::utimensat(CWD, path.as_path(), &times, AtFlags::SYMLINK_NOFOLLOW)
                .map_err(std::io::Error::from)?;
        }

        if changes.uid.is_some() || changes.gid.is_some() {
            std::os::unix::fs::lchown(path, changes.uid, changes.gid)?;
        }
        Ok(())
    }

    /// Debug text, e.g. `directory /tmp`.
    fn describe(&self) -> String {
        format!("{} {}", self.kind(), self.path())
    }
}

/// A node type constructible from a path.
pub trait PathRepresentable: Item + Sized + private::Sealed {
    /// The kind this type represents.
    const KIND: NodeKind;

    /// Wrap `path` without probing the host.
    fn from_path_unchecked(path: FsPath) -> Self;

    /// Wrap `path` if the host reports it is of [`Self::KIND`].
    fn from_path(path: impl Into<FsPath>) -> Option<Self> {
        let path = path.into();
        classify::probe_flag(&path, Self::KIND).then(|| Self::from_path_unchecked(path))
    }
}

pub(crate) fn is_package_with(path: &FsPath, config: &FsConfig) -> FsResult<bool> {
    let meta = fs::symlink_metadata(path)?;
    Ok(meta.is_dir() && config.is_package_extension(&path.extension()))
}

fn check_access(path: &FsPath, access: Access) -> FsResult<bool> {
    match rustix::fs::access(path.as_path(), access) {
        Ok(()) => Ok(true),
        Err(Errno::ACCESS) | Err(Errno::PERM) | Err(Errno::ROFS) | Err(Errno::TXTBSY) => Ok(false),
        Err(e) => Err(std::io::Error::from(e).into()),
    }
}

pub(crate) fn attributes_from(meta: &fs::Metadata) -> Attributes {
    use std::os::unix::fs::FileTypeExt;

    let file_type = meta.file_type();
    let file_type = if file_type.is_dir() {
        RawFileType::Directory
    } else if file_type.is_symlink() {
        RawFileType::Symlink
    } else if file_type.is_block_device() {
        RawFileType::BlockDevice
    } else if file_type.is_char_device() {
        RawFileType::CharDevice
    } else if file_type.is_fifo() {
        RawFileType::Fifo
    } else if file_type.is_socket() {
        RawFileType::Socket
    } else {
        RawFileType::Regular
    };

    Attributes {
        size: meta.len(),
        file_type,
        perm: meta.permissions().mode() & 0o7777,
        mtime: meta.modified().unwrap_or(UNIX_EPOCH),
        atime: meta.accessed().ok(),
        ctime: Some(system_time(meta.ctime(), meta.ctime_nsec())),
        btime: meta.created().ok(),
        nlink: meta.nlink(),
        uid: meta.uid(),
        gid: meta.gid(),
        dev: meta.dev(),
        ino: meta.ino(),
    }
}

fn system_time(secs: i64, nsecs: i64) -> SystemTime {
    let nsecs = nsecs.clamp(0, 999_999_999) as u32;
    if secs >= 0 {
        UNIX_EPOCH + Duration::new(secs as u64, nsecs)
    } else {
        UNIX_EPOCH - Duration::from_secs(secs.unsigned_abs()) + Duration::from_nanos(u64::from(nsecs))
    }
}

fn timespec(time: SystemTime) -> Timespec {
    match time.duration_since(UNIX_EPOCH) {
        Ok(since) => Timespec {
            tv_sec: since.as_secs() as _,
            tv_nsec: since.subsec_nanos() as _,
        },
        Err(before) => {
            let before = before.duration();
            let mut secs = -(before.as_secs() as i64);
            let mut nsecs = before.subsec_nanos() as i64;
            if nsecs > 0 {
                secs -= 1;
                nsecs = 1_000_000_000 - nsecs;
            }
            Timespec {
                tv_sec: secs as _,
                tv_nsec: nsecs as _,
            }
        }
    }
}
