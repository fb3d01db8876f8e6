//! Well-known directories.
//!
//! Locations come from the XDG base and user directories via `dirs`; each
//! is validated, so a configured but missing directory is `None`.

use std::path::PathBuf;

use uzers::os::unix::UserExt;

use crate::config::FsConfig;
use crate::error::{FsError, FsResult};
use crate::item::PathRepresentable;
use crate::nodes::Directory;

const DEFAULT_DATA_DIRS: &str = "/usr/local/share:/usr/share";

fn existing(dir: Option<PathBuf>) -> Option<Directory> {
    Directory::from_path(dir?)
}

/// `$XDG_DATA_HOME` followed by `$XDG_DATA_DIRS`.
fn data_dirs() -> Vec<PathBuf> {
    let system = std::env::var("XDG_DATA_DIRS")
        .ok()
        .filter(|dirs| !dirs.is_empty())
        .unwrap_or_else(|| DEFAULT_DATA_DIRS.to_string());

    dirs::data_dir()
        .into_iter()
        .chain(
            system
                .split(':')
                .filter(|dir| !dir.is_empty())
                .map(PathBuf::from),
        )
        .collect()
}

impl Directory {
    /// The temporary directory.
    pub fn temporary() -> Option<Directory> {
        existing(Some(std::env::temp_dir()))
    }

    /// The current user's home directory.
    pub fn home() -> Option<Directory> {
        existing(dirs::home_dir())
    }

    /// Home directory of `user`, from the system user database.
    ///
    /// `Ok(None)` if there is no such user or their home is missing.
    pub fn home_for_user(user: &str) -> FsResult<Option<Directory>> {
        Self::home_for_user_with(user, FsConfig::global())
    }

    /// [`Directory::home_for_user`] with an explicit config.
    pub fn home_for_user_with(user: &str, config: &FsConfig) -> FsResult<Option<Directory>> {
        if !config.home_lookup {
            return Err(FsError::unsupported("home directory lookup is disabled"));
        }
        let home = uzers::get_user_by_name(user).map(|u| u.home_dir().to_path_buf());
        tracing::debug!(user, home = ?home, "home lookup");
        Ok(existing(home))
    }

    pub fn document() -> Option<Directory> {
        existing(dirs::document_dir())
    }

    pub fn caches() -> Option<Directory> {
        existing(dirs::cache_dir())
    }

    pub fn desktop() -> Option<Directory> {
        existing(dirs::desktop_dir())
    }

    pub fn downloads() -> Option<Directory> {
        existing(dirs::download_dir())
    }

    pub fn movies() -> Option<Directory> {
        existing(dirs::video_dir())
    }

    pub fn music() -> Option<Directory> {
        existing(dirs::audio_dir())
    }

    pub fn pictures() -> Option<Directory> {
        existing(dirs::picture_dir())
    }

    /// Per-user application data (`$XDG_DATA_HOME`).
    pub fn application_support() -> Option<Directory> {
        existing(dirs::data_dir())
    }

    /// Per-user, machine-local data.
    pub fn library() -> Option<Directory> {
        existing(dirs::data_local_dir())
    }

    /// Every `applications` directory under the data directories.
    pub fn applications() -> Vec<Directory> {
        data_dirs()
            .into_iter()
            .filter_map(|dir| Directory::from_path(dir.join("applications")))
            .collect()
    }

    /// Every data directory, user first.
    pub fn libraries() -> Vec<Directory> {
        data_dirs()
            .into_iter()
            .filter_map(|dir| Directory::from_path(dir))
            .collect()
    }
}
