//! Alias files as freedesktop desktop-entry links.
//!
//! An alias is a `*.desktop` file whose `[Desktop Entry]` group declares
//! `Type=Link` with a `file://` URL:
//!
//! ```text
//! [Desktop Entry]
//! Version=1.0
//! Type=Link
//! Name=report.pdf
//! URL=file:///home/amy/report.pdf
//! ```

use std::fs;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use url::Url;

use crate::error::{FsError, FsResult};
use crate::path::FsPath;

/// Extension every desktop entry carries.
pub const DESKTOP_EXTENSION: &str = "desktop";

/// Desktop entries larger than this are not inspected.
const MAX_ENTRY_LEN: u64 = 64 * 1024;

const ENTRY_GROUP: &str = "[Desktop Entry]";

/// The keys of a `[Desktop Entry]` group that matter here.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DesktopEntry {
    pub entry_type: Option<String>,
    pub name: Option<String>,
    pub url: Option<String>,
}

impl DesktopEntry {
    /// Returns true for `Type=Link`.
    pub fn is_link(&self) -> bool {
        self.entry_type.as_deref() == Some("Link")
    }

    /// Returns true for `Type=Application`.
    pub fn is_application(&self) -> bool {
        self.entry_type.as_deref() == Some("Application")
    }

    /// Local destination of a link entry.
    pub fn file_target(&self) -> Option<PathBuf> {
        if !self.is_link() {
            return None;
        }
        let url = Url::parse(self.url.as_deref()?).ok()?;
        if url.scheme() != "file" {
            return None;
        }
        url.to_file_path().ok()
    }
}

/// Parse the `[Desktop Entry]` group of a desktop file.
///
/// Returns `None` if the group is absent. Localized keys (`Name[de]=`) and
/// other groups are ignored.
pub fn parse_desktop_entry(text: &str) -> Option<DesktopEntry> {
    let mut entry = None::<DesktopEntry>;
    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        if line.starts_with('[') {
            if entry.is_some() {
                break;
            }
            if line == ENTRY_GROUP {
                entry = Some(DesktopEntry::default());
            }
            continue;
        }
        let Some(current) = entry.as_mut() else {
            continue;
        };
        let Some((key, value)) = line.split_once('=') else {
            continue;
        };
        let value = value.trim().to_string();
        match key.trim() {
            "Type" => current.entry_type = Some(value),
            "Name" => current.name = Some(value),
            "URL" => current.url = Some(value),
            _ => {}
        }
    }
    entry
}

/// Read the desktop entry at `path`, if it has the desktop extension and
/// is readable UTF-8 text.
pub(crate) fn read_desktop_entry(path: &Path) -> FsResult<Option<DesktopEntry>> {
    if path.extension().and_then(|e| e.to_str()) != Some(DESKTOP_EXTENSION) {
        return Ok(None);
    }
    let mut text = String::new();
    let file = fs::File::open(path)?;
    match file.take(MAX_ENTRY_LEN).read_to_string(&mut text) {
        Ok(_) => Ok(parse_desktop_entry(&text)),
        Err(e) if e.kind() == std::io::ErrorKind::InvalidData => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// Returns true if `path` is an alias file. Read errors count as false.
pub fn is_alias_file(path: &Path) -> bool {
    matches!(
        read_desktop_entry(path),
        Ok(Some(entry)) if entry.file_target().is_some()
    )
}

/// Destination of the alias at `path`.
pub(crate) fn alias_target(path: &FsPath) -> FsResult<FsPath> {
    read_desktop_entry(path.as_path())?
        .and_then(|entry| entry.file_target())
        .map(FsPath::new)
        .ok_or_else(|| FsError::target_missing(path))
}

/// Write an alias at `at` pointing to `target`. Fails if `at` exists.
pub(crate) fn write_alias(at: &FsPath, target: &FsPath) -> FsResult<()> {
    if at.extension() != DESKTOP_EXTENSION {
        return Err(FsError::invalid_name(format!(
            "alias name must end in .{DESKTOP_EXTENSION}: {at}"
        )));
    }
    let target = target.standardized();
    let url = Url::from_file_path(target.as_path())
        .map_err(|()| FsError::invalid_name(&target))?;

    let mut file = fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(at)?;
    write!(
        file,
        "{ENTRY_GROUP}\nVersion=1.0\nType=Link\nName={}\nURL={}\n",
        target.last_component(),
        url
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_parse_link_entry() {
        let entry = parse_desktop_entry(
            "# comment\n[Desktop Entry]\nType=Link\nName=Docs\nName[de]=Dokumente\nURL=file:///usr/share/doc\n\n[Other]\nType=Application\n",
        )
        .unwrap();
        assert!(entry.is_link());
        assert_eq!(entry.name.as_deref(), Some("Docs"));
        assert_eq!(entry.file_target(), Some(PathBuf::from("/usr/share/doc")));
    }

    #[test]
    fn test_non_file_urls_are_not_aliases() {
        let entry = parse_desktop_entry("[Desktop Entry]\nType=Link\nURL=https://example.com/\n").unwrap();
        assert!(entry.is_link());
        assert!(entry.file_target().is_none());
    }

    #[test]
    fn test_application_entry() {
        let entry = parse_desktop_entry("[Desktop Entry]\nType=Application\nExec=true\n").unwrap();
        assert!(entry.is_application());
        assert!(entry.file_target().is_none());
    }

    #[test]
    fn test_missing_group() {
        assert!(parse_desktop_entry("Type=Link\n").is_none());
        assert!(parse_desktop_entry("[Something]\nType=Link\n").is_none());
    }

    #[test]
    fn test_write_and_resolve_alias() {
        let dir = TempDir::new().unwrap();
        let target = FsPath::new(dir.path().join("report with spaces.pdf"));
        std::fs::write(&target, "pdf").unwrap();

        let alias = FsPath::new(dir.path().join("report.desktop"));
        write_alias(&alias, &target).unwrap();

        assert!(is_alias_file(alias.as_path()));
        assert_eq!(alias_target(&alias).unwrap(), target);

        // Exclusive create
        assert!(write_alias(&alias, &target).is_err());
    }

    #[test]
    fn test_alias_name_needs_desktop_extension() {
        let dir = TempDir::new().unwrap();
        let result = write_alias(
            &FsPath::new(dir.path().join("report.lnk")),
            &FsPath::new(dir.path()),
        );
        assert!(matches!(result, Err(FsError::InvalidName(_))));
    }

    #[test]
    fn test_plain_files_are_not_aliases() {
        let dir = TempDir::new().unwrap();
        let plain = dir.path().join("notes.desktop");
        std::fs::write(&plain, "just text").unwrap();
        assert!(!is_alias_file(&plain));
        assert!(!is_alias_file(&dir.path().join("missing.desktop")));
        assert!(matches!(
            alias_target(&FsPath::new(&plain)),
            Err(FsError::TargetMissing(_))
        ));
    }
}
