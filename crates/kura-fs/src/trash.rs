//! Freedesktop.org trash.
//!
//! A trash directory holds `files/` (the trashed entries) and `info/` (one
//! `<name>.trashinfo` per entry recording where it came from):
//!
//! ```text
//! [Trash Info]
//! Path=/home/amy/report%20final.pdf
//! DeletionDate=2026-03-01T14:02:11
//! ```
//!
//! Items on the home trash's filesystem go to the home trash. Items on other
//! filesystems go to `$topdir/.Trash-$uid` on their own volume, with `Path=`
//! relative to that volume.

use std::fs;
use std::io::{self, Write};
use std::os::unix::fs::{DirBuilderExt, MetadataExt};
use std::path::{Path, PathBuf};

use url::Url;

use crate::capability::{relocate, remove_entry};
use crate::config::{FsConfig, TrashPolicy};
use crate::error::{FsError, FsResult};
use crate::item::PathRepresentable;
use crate::mounts;
use crate::path::FsPath;

const INFO_EXTENSION: &str = "trashinfo";

/// What happened to a trashed node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrashOutcome {
    /// Moved into the trash; the node now points here.
    Trashed { location: FsPath },
    /// No trash available; removed immediately.
    Removed,
}

/// A node that can be moved to the trash.
pub trait Trashable: PathRepresentable {
    /// Trash using the process-wide config.
    fn trash(&mut self) -> FsResult<TrashOutcome> {
        self.trash_with(FsConfig::global())
    }

    /// Trash using `config`.
    ///
    /// When the policy resolves to [`TrashPolicy::Remove`] the node is
    /// removed instead. On success with a trash, the node points at its
    /// location inside the trash.
    fn trash_with(&mut self, config: &FsConfig) -> FsResult<TrashOutcome> {
        if config.trash_policy() == TrashPolicy::Remove {
            tracing::warn!(path = %self.path(), "no trash available, removing");
            remove_entry(self.path().as_path())?;
            return Ok(TrashOutcome::Removed);
        }

        let can = TrashCan::for_item(self.path(), config)?;
        let location = can.put(self.path())?;
        self.replace_path(location.clone());
        Ok(TrashOutcome::Trashed { location })
    }
}

/// One trash directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrashCan {
    root: PathBuf,
    /// Volume root for per-volume trashes; `Path=` is relative to it.
    topdir: Option<PathBuf>,
}

impl TrashCan {
    /// A trash rooted at `root` that records absolute paths.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            topdir: None,
        }
    }

    /// The user's home trash.
    pub fn home(config: &FsConfig) -> FsResult<Self> {
        config
            .home_trash_dir()
            .map(Self::new)
            .ok_or_else(|| FsError::unsupported("no home trash directory"))
    }

    /// The trash an item at `path` belongs in.
    pub fn for_item(path: &FsPath, config: &FsConfig) -> FsResult<Self> {
        let home = Self::home(config)?;
        let item_dev = fs::symlink_metadata(path)?.dev();

        // The home trash may not exist yet; its nearest existing ancestor
        // decides the device.
        let home_dev = home
            .root
            .ancestors()
            .find_map(|dir| fs::metadata(dir).ok())
            .map(|meta| meta.dev());
        if home_dev.is_none_or(|dev| dev == item_dev) {
            return Ok(home);
        }

        let parent = path.standardized().deleting_last_component();
        let topdir = mounts::mount_point_of(parent.as_path())?;
        let uid = rustix::process::getuid().as_raw();
        Ok(Self {
            root: topdir.join(format!(".Trash-{uid}")),
            topdir: Some(topdir),
        })
    }

    /// The trash directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Where trashed entries live.
    pub fn files_dir(&self) -> PathBuf {
        self.root.join("files")
    }

    /// Where `.trashinfo` records live.
    pub fn info_dir(&self) -> PathBuf {
        self.root.join("info")
    }

    /// Move `item` into this trash and return its new location.
    ///
    /// The info record is written first. If the move fails the record is
    /// removed again.
    pub fn put(&self, item: &FsPath) -> FsResult<FsPath> {
        let source = item.standardized();
        fs::symlink_metadata(&source)?;

        let files = self.files_dir();
        let info = self.info_dir();
        for dir in [&files, &info] {
            fs::DirBuilder::new().recursive(true).mode(0o700).create(dir)?;
        }

        let (record, name) = self.reserve(&source, &files, &info)?;
        let destination = files.join(&name);
        tracing::debug!(path = %source, trash = %destination.display(), "trash");

        if let Err(e) = relocate(source.as_path(), &destination) {
            if let Err(cleanup) = fs::remove_file(&record) {
                tracing::warn!(path = %record.display(), error = %cleanup, "stale trash info");
            }
            return Err(e);
        }
        Ok(FsPath::new(destination))
    }

    /// Claim a free name by creating its info record exclusively.
    fn reserve(&self, source: &FsPath, files: &Path, info: &Path) -> FsResult<(PathBuf, String)> {
        let base = source.last_component();
        let original = self.recorded_path(source)?;
        let deleted = chrono::Local::now().format("%Y-%m-%dT%H:%M:%S");

        for n in 1u32.. {
            let name = if n == 1 {
                base.clone()
            } else {
                format!("{base} {n}")
            };
            if fs::symlink_metadata(files.join(&name)).is_ok() {
                continue;
            }

            let record = info.join(format!("{name}.{INFO_EXTENSION}"));
            match fs::OpenOptions::new().write(true).create_new(true).open(&record) {
                Ok(mut file) => {
                    write!(
                        file,
                        "[Trash Info]\nPath={original}\nDeletionDate={deleted}\n"
                    )?;
                    return Ok((record, name));
                }
                Err(e) if e.kind() == io::ErrorKind::AlreadyExists => continue,
                Err(e) => return Err(e.into()),
            }
        }
        Err(FsError::already_exists(source))
    }

    /// URL-escaped `Path=` value.
    fn recorded_path(&self, source: &FsPath) -> FsResult<String> {
        let escaped = escape_path(source.as_path()).ok_or_else(|| FsError::invalid_name(source))?;
        let Some(topdir) = &self.topdir else {
            return Ok(escaped);
        };
        let topdir = escape_path(topdir).ok_or_else(|| FsError::invalid_name(topdir.display()))?;
        let relative = escaped
            .strip_prefix(topdir.trim_end_matches('/'))
            .map(|rest| rest.trim_start_matches('/').to_string());
        Ok(relative.unwrap_or(escaped))
    }
}

/// Percent-encode an absolute path as in a `file://` URL.
fn escape_path(path: &Path) -> Option<String> {
    Url::from_file_path(path).ok().map(|url| url.path().to_string())
}
