//! Host capability configuration.
//!
//! Platform-dependent behaviour (whether a trash facility exists, whether
//! per-user home directories can be looked up, where the mount table lives)
//! is resolved once into an [`FsConfig`] instead of being decided at each
//! call site.
//!
//! Config files are RON:
//!
//! ```ron
//! (
//!     trash: (policy: Freedesktop, home_trash: Some("~/.local/share/Trash")),
//!     home_lookup: true,
//!     package_extensions: ["app", "bundle"],
//! )
//! ```
//!
//! Every field is optional; missing fields take the detected defaults.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use strum::{Display, EnumString};

use crate::error::FsResult;

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV: &str = "KURA_CONFIG";

/// Config file name looked up under the user config directory.
pub const CONFIG_FILE: &str = "kura/config.ron";

/// How `trash` behaves.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Display, EnumString,
)]
#[strum(serialize_all = "snake_case")]
pub enum TrashPolicy {
    /// Use the freedesktop trash when a home trash can be located, otherwise
    /// remove immediately.
    #[default]
    Auto,
    /// Always use the freedesktop trash; fail if it cannot be located.
    Freedesktop,
    /// Never trash; remove immediately.
    Remove,
}

/// Trash settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrashConfig {
    /// Trash behaviour.
    pub policy: TrashPolicy,
    /// Override for the home trash directory (`~` is expanded).
    pub home_trash: Option<String>,
}

/// Resolved host capabilities.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FsConfig {
    /// Trash settings.
    pub trash: TrashConfig,
    /// Whether other users' home directories may be looked up.
    pub home_lookup: bool,
    /// Mount table to read volumes from.
    pub mounts_table: PathBuf,
    /// Directory extensions treated as packages.
    pub package_extensions: Vec<String>,
    /// Filesystem types that are not local.
    pub network_file_systems: Vec<String>,
}

impl Default for FsConfig {
    fn default() -> Self {
        Self {
            trash: TrashConfig::default(),
            home_lookup: cfg!(unix),
            mounts_table: PathBuf::from("/proc/self/mounts"),
            package_extensions: ["app", "bundle", "framework", "plugin", "kext", "xpc"]
                .into_iter()
                .map(String::from)
                .collect(),
            network_file_systems: [
                "nfs", "nfs4", "cifs", "smb3", "smbfs", "ncpfs", "afs", "9p", "ceph",
                "glusterfs", "davfs", "fuse.sshfs", "fuse.rclone", "sshfs",
            ]
            .into_iter()
            .map(String::from)
            .collect(),
        }
    }
}

impl FsConfig {
    /// Detect host capabilities.
    ///
    /// `Auto` trash policy is resolved here, so a detected config always
    /// states concretely whether trashing is possible.
    pub fn detect() -> Self {
        let mut config = Self::default();
        config.trash.policy = config.trash_policy();
        tracing::debug!(
            trash = %config.trash.policy,
            home_lookup = config.home_lookup,
            "detected host capabilities"
        );
        config
    }

    /// Parse a RON config.
    pub fn from_ron_str(text: &str) -> FsResult<Self> {
        Ok(ron::from_str(text)?)
    }

    /// Load a RON config file.
    pub fn load(path: impl AsRef<Path>) -> FsResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let config = Self::from_ron_str(&text)?;
        tracing::info!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Process-wide config, resolved on first use.
    ///
    /// Reads `$KURA_CONFIG` if set, else `<config dir>/kura/config.ron` if
    /// present, else falls back to [`FsConfig::detect`]. The result never
    /// changes afterwards.
    pub fn global() -> &'static FsConfig {
        static GLOBAL: OnceLock<FsConfig> = OnceLock::new();
        GLOBAL.get_or_init(Self::from_environment)
    }

    fn from_environment() -> Self {
        let explicit = std::env::var_os(CONFIG_ENV).map(PathBuf::from);
        let candidate = explicit.or_else(|| {
            dirs::config_dir()
                .map(|dir| dir.join(CONFIG_FILE))
                .filter(|path| path.is_file())
        });

        match candidate {
            Some(path) => match Self::load(&path) {
                Ok(config) => config,
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "ignoring unreadable config");
                    Self::detect()
                }
            },
            None => Self::detect(),
        }
    }

    /// Home trash directory, if one can be located.
    pub fn home_trash_dir(&self) -> Option<PathBuf> {
        match &self.trash.home_trash {
            Some(dir) => Some(expand_path(dir)),
            None => dirs::data_dir().map(|dir| dir.join("Trash")),
        }
    }

    /// Effective trash policy: `Auto` resolved against the host.
    pub fn trash_policy(&self) -> TrashPolicy {
        match self.trash.policy {
            TrashPolicy::Auto if self.home_trash_dir().is_some() => TrashPolicy::Freedesktop,
            TrashPolicy::Auto => TrashPolicy::Remove,
            policy => policy,
        }
    }

    /// Returns true if `extension` marks a package directory.
    pub fn is_package_extension(&self, extension: &str) -> bool {
        !extension.is_empty()
            && self
                .package_extensions
                .iter()
                .any(|ext| ext.eq_ignore_ascii_case(extension))
    }

    /// Returns true if `fs_type` is a network filesystem.
    pub fn is_network_file_system(&self, fs_type: &str) -> bool {
        self.network_file_systems.iter().any(|t| t == fs_type)
    }
}

/// Expand `~` in a configured path.
pub(crate) fn expand_path(path: &str) -> PathBuf {
    shellexpand::tilde(path).as_ref().into()
}
