//! Mount table access and mount-point lookup.

use std::fs;
use std::os::unix::fs::MetadataExt;
use std::path::{Path, PathBuf};

use crate::config::FsConfig;
use crate::error::{FsError, FsResult};

/// One line of the mount table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MountEntry {
    /// Mounted device or source (e.g., `/dev/sda1`, `tmpfs`).
    pub device: String,
    /// Where it is mounted.
    pub mount_point: PathBuf,
    /// Filesystem type (e.g., `ext4`).
    pub fs_type: String,
    /// Mount options.
    pub options: Vec<String>,
}

impl MountEntry {
    /// Returns true if mounted read-only.
    pub fn is_read_only(&self) -> bool {
        self.options.iter().any(|o| o == "ro")
    }
}

/// Parse `/proc/mounts`-format text. Malformed lines are skipped.
pub fn parse_mounts(text: &str) -> Vec<MountEntry> {
    text.lines()
        .filter_map(|line| {
            let mut fields = line.split_whitespace();
            let device = unescape(fields.next()?);
            let mount_point = PathBuf::from(unescape(fields.next()?));
            let fs_type = fields.next()?.to_string();
            let options = fields
                .next()
                .map(|o| o.split(',').map(String::from).collect())
                .unwrap_or_default();
            Some(MountEntry {
                device,
                mount_point,
                fs_type,
                options,
            })
        })
        .collect()
}

/// Undo the octal escapes the kernel applies to spaces, tabs, newlines
/// and backslashes (`\040` etc.).
fn unescape(field: &str) -> String {
    let bytes = field.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        // At most `\377`; anything larger is not an escape.
        let octal = bytes.get(i + 1..i + 4).filter(|digits| {
            (b'0'..=b'3').contains(&digits[0])
                && digits.iter().all(|b| (b'0'..=b'7').contains(b))
        });
        if let (b'\\', Some(digits)) = (bytes[i], octal) {
            let code = digits
                .iter()
                .fold(0u8, |acc, digit| acc * 8 + (digit - b'0'));
            out.push(code);
            i += 4;
        } else {
            out.push(bytes[i]);
            i += 1;
        }
    }
    String::from_utf8_lossy(&out).into_owned()
}

/// Read the configured mount table.
pub fn read_mounts(config: &FsConfig) -> FsResult<Vec<MountEntry>> {
    let text = fs::read_to_string(&config.mounts_table)?;
    Ok(parse_mounts(&text))
}

/// Entry for the filesystem mounted at `mount_point`. Later entries shadow
/// earlier ones, as the kernel does.
pub fn entry_for(mount_point: &Path, config: &FsConfig) -> FsResult<MountEntry> {
    let canonical = dunce::canonicalize(mount_point)?;
    read_mounts(config)?
        .into_iter()
        .rev()
        .find(|entry| entry.mount_point == canonical)
        .ok_or_else(|| FsError::not_a_volume(canonical.display()))
}

/// Mount point of the filesystem containing `path`.
///
/// Walks up from the resolved path until the device changes.
pub fn mount_point_of(path: &Path) -> FsResult<PathBuf> {
    let canonical = dunce::canonicalize(path)?;
    let device = fs::metadata(&canonical)?.dev();

    let mut current = canonical.as_path();
    while let Some(parent) = current.parent() {
        let parent_meta = fs::metadata(parent)?;
        if parent_meta.dev() != device {
            break;
        }
        current = parent;
    }
    Ok(current.to_path_buf())
}
