//! Capability traits.
//!
//! Each trait is a narrow operation set. The node wrappers opt in with
//! empty `impl` blocks, so which node supports what is decided at compile
//! time and mirrored by [`kura_types::NodeKind::supports`] at runtime.
//!
//! | Trait                      | Implemented by                               |
//! |----------------------------|----------------------------------------------|
//! | [`Parent`]                 | Volume, Directory                            |
//! | [`Subitem`]                | everything but Volume                        |
//! | [`Copyable`]               | everything but Volume                        |
//! | [`Moveable`]               | everything but Volume                        |
//! | [`Renameable`]             | all                                          |
//! | [`Removeable`]             | everything but Volume                        |
//! | [`Linkable`]               | everything but Directory                     |
//! | [`SymbolicLinkable`]       | all                                          |
//! | [`Aliasable`]              | everything but Volume                        |
//! | [`FileHandleConvertible`]  | RegularFile                                  |
//! | [`FileWrapperConvertible`] | Directory, RegularFile, SymbolicLink         |
//! | [`File`]                   | RegularFile, SymbolicLink, AliasFile         |

mod copy;
mod file;
mod handle;
mod link;
mod moving;
mod parent;
mod remove;

pub use copy::{Copyable, CopyableSubitem};
pub use file::{File, FileWrapperConvertible, FileWrapperExt};
pub use handle::FileHandleConvertible;
pub use link::{Aliasable, Linkable, SymbolicLinkable};
pub use moving::{Moveable, MoveableSubitem, Renameable};
pub use parent::{Parent, Subitem};
pub use remove::Removeable;

use std::fs;
use std::io;
use std::os::unix::fs::symlink;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::error::{FsError, FsResult};
use crate::item::PathRepresentable;
use crate::path::FsPath;

/// Fail with `AlreadyExists` if anything (even a dangling link) is at
/// `destination`.
pub(crate) fn ensure_vacant(destination: &FsPath) -> FsResult<()> {
    match fs::symlink_metadata(destination) {
        Ok(_) => Err(FsError::already_exists(destination)),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e.into()),
    }
}

/// A name usable as a single path component.
pub(crate) fn validate_name(name: &str) -> FsResult<()> {
    if name.is_empty() || name == "." || name == ".." || name.contains(['/', '\0']) {
        return Err(FsError::invalid_name(name));
    }
    Ok(())
}

/// What a copy does with sockets, pipes and devices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SpecialFiles {
    /// Leave them out of the copy.
    Skip,
    /// Fail with `Unsupported`.
    Refuse,
}

/// Copy an entry. Directories are copied recursively, symbolic links as
/// links.
pub(crate) fn copy_entry(source: &Path, destination: &Path, special: SpecialFiles) -> FsResult<()> {
    // Applied deepest first once everything is written, so read-only
    // directories can still be filled.
    let mut directories = Vec::new();

    for entry in WalkDir::new(source).follow_links(false) {
        let entry = entry.map_err(io::Error::from)?;
        let Ok(relative) = entry.path().strip_prefix(source) else {
            continue;
        };
        let target = if relative.as_os_str().is_empty() {
            destination.to_path_buf()
        } else {
            destination.join(relative)
        };

        let file_type = entry.file_type();
        if file_type.is_symlink() {
            symlink(fs::read_link(entry.path())?, &target)?;
        } else if file_type.is_dir() {
            fs::create_dir(&target)?;
            let permissions = entry.metadata().map_err(io::Error::from)?.permissions();
            directories.push((target, permissions));
        } else if file_type.is_file() {
            fs::copy(entry.path(), &target)?;
        } else if special == SpecialFiles::Refuse {
            return Err(FsError::unsupported(format!(
                "cannot copy special file {}",
                entry.path().display()
            )));
        } else {
            tracing::trace!(path = %entry.path().display(), "skipping special file");
        }
    }

    for (dir, permissions) in directories.into_iter().rev() {
        fs::set_permissions(dir, permissions)?;
    }
    Ok(())
}

/// Remove an entry without following a final symbolic link.
pub(crate) fn remove_entry(path: &Path) -> FsResult<()> {
    if fs::symlink_metadata(path)?.is_dir() {
        fs::remove_dir_all(path)?;
    } else {
        fs::remove_file(path)?;
    }
    Ok(())
}

/// Rename an entry, copying then removing when the two paths are on
/// different filesystems.
///
/// The source is only removed once the copy is complete. A special file
/// anywhere in the source fails the move, and a partial copy is removed
/// again.
pub(crate) fn relocate(source: &Path, destination: &Path) -> FsResult<()> {
    match fs::rename(source, destination) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::CrossesDevices => {
            tracing::debug!(
                source = %source.display(),
                destination = %destination.display(),
                "cross-device move, copying"
            );
            let taken = fs::symlink_metadata(destination).is_ok();
            if let Err(e) = copy_entry(source, destination, SpecialFiles::Refuse) {
                if !taken && fs::symlink_metadata(destination).is_ok() {
                    if let Err(cleanup) = remove_entry(destination) {
                        tracing::warn!(
                            path = %destination.display(),
                            error = %cleanup,
                            "partial copy left behind"
                        );
                    }
                }
                return Err(e);
            }
            remove_entry(source)
        }
        Err(e) => Err(e.into()),
    }
}

/// Move `node` to `destination` and point it there. The node keeps its
/// old path if anything fails.
pub(crate) fn move_node<T: PathRepresentable>(node: &mut T, destination: &FsPath) -> FsResult<()> {
    tracing::debug!(source = %node.path(), destination = %destination, "move");
    ensure_vacant(destination)?;
    relocate(node.path().as_path(), destination.as_path())?;
    node.replace_path(destination.clone());
    Ok(())
}

/// Standardized path with its parent resolved, so the entry itself is not
/// followed.
pub(crate) fn resolve_parent(path: &FsPath) -> PathBuf {
    let standardized = path.standardized();
    let Some(name) = standardized.as_path().file_name() else {
        return standardized.into_path_buf();
    };
    match standardized.as_path().parent().map(dunce::canonicalize) {
        Some(Ok(parent)) => parent.join(name),
        _ => standardized.into_path_buf(),
    }
}

/// Re-validate a freshly created entry as `T`.
pub(crate) fn revalidate<T: PathRepresentable>(path: &FsPath) -> FsResult<T> {
    T::from_path(path).ok_or_else(|| FsError::target_missing(path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_validate_name() {
        assert!(validate_name("report.txt").is_ok());
        assert!(validate_name(".hidden").is_ok());
        for bad in ["", ".", "..", "a/b", "/abs", "nul\0"] {
            assert!(matches!(validate_name(bad), Err(FsError::InvalidName(_))), "{bad:?}");
        }
    }

    #[test]
    fn test_ensure_vacant_sees_dangling_links() {
        let dir = TempDir::new().unwrap();
        let link = dir.path().join("dangling");
        symlink(dir.path().join("missing"), &link).unwrap();

        assert!(matches!(
            ensure_vacant(&FsPath::new(&link)),
            Err(FsError::AlreadyExists(_))
        ));
        assert!(ensure_vacant(&FsPath::new(dir.path().join("free"))).is_ok());
    }

    #[test]
    fn test_copy_entry_tree() {
        let dir = TempDir::new().unwrap();
        let source = dir.path().join("src");
        fs::create_dir_all(source.join("nested")).unwrap();
        fs::write(source.join("nested/a.txt"), "alpha").unwrap();
        symlink("nested/a.txt", source.join("link")).unwrap();

        let destination = dir.path().join("dst");
        copy_entry(&source, &destination, SpecialFiles::Skip).unwrap();

        assert_eq!(fs::read_to_string(destination.join("nested/a.txt")).unwrap(), "alpha");
        assert_eq!(
            fs::read_link(destination.join("link")).unwrap(),
            Path::new("nested/a.txt")
        );
        // Source untouched
        assert!(source.join("nested/a.txt").exists());
    }

    /// Scratch space on another filesystem, if the host has one.
    fn other_device(near: &Path) -> Option<TempDir> {
        use std::os::unix::fs::MetadataExt;

        let scratch = tempfile::Builder::new()
            .prefix("kura")
            .tempdir_in("/dev/shm")
            .ok()?;
        let near_dev = fs::metadata(near).ok()?.dev();
        (fs::metadata(scratch.path()).ok()?.dev() != near_dev).then_some(scratch)
    }

    #[test]
    fn test_relocate_across_devices() {
        let dir = TempDir::new().unwrap();
        let Some(other) = other_device(dir.path()) else {
            return;
        };
        let source = dir.path().join("src");
        fs::create_dir(&source).unwrap();
        fs::write(source.join("a.txt"), "alpha").unwrap();
        symlink("a.txt", source.join("link")).unwrap();

        let destination = other.path().join("moved");
        relocate(&source, &destination).unwrap();

        assert!(fs::symlink_metadata(&source).is_err());
        assert_eq!(fs::read_to_string(destination.join("a.txt")).unwrap(), "alpha");
        assert_eq!(fs::read_link(destination.join("link")).unwrap(), Path::new("a.txt"));
    }

    #[test]
    fn test_relocate_across_devices_keeps_special_files() {
        let dir = TempDir::new().unwrap();
        let Some(other) = other_device(dir.path()) else {
            return;
        };
        let source = dir.path().join("src");
        fs::create_dir(&source).unwrap();
        fs::write(source.join("a.txt"), "alpha").unwrap();
        let _listener = std::os::unix::net::UnixListener::bind(source.join("sock")).unwrap();

        let destination = other.path().join("moved");
        let result = relocate(&source, &destination);

        assert!(matches!(result, Err(FsError::Unsupported(_))));
        // Source intact, no partial copy left behind
        assert!(source.join("a.txt").exists());
        assert!(fs::symlink_metadata(source.join("sock")).is_ok());
        assert!(fs::symlink_metadata(&destination).is_err());
    }

    #[test]
    fn test_copy_entry_skips_special_files() {
        let dir = TempDir::new().unwrap();
        let source = dir.path().join("src");
        fs::create_dir(&source).unwrap();
        fs::write(source.join("a.txt"), "alpha").unwrap();
        let _listener = std::os::unix::net::UnixListener::bind(source.join("sock")).unwrap();

        let destination = dir.path().join("dst");
        copy_entry(&source, &destination, SpecialFiles::Skip).unwrap();
        assert!(destination.join("a.txt").exists());
        assert!(fs::symlink_metadata(destination.join("sock")).is_err());
    }

    #[test]
    fn test_remove_entry_does_not_follow_links() {
        let dir = TempDir::new().unwrap();
        let target = dir.path().join("target");
        fs::create_dir(&target).unwrap();
        fs::write(target.join("keep.txt"), "keep").unwrap();
        let link = dir.path().join("link");
        symlink(&target, &link).unwrap();

        remove_entry(&link).unwrap();
        assert!(fs::symlink_metadata(&link).is_err());
        assert!(target.join("keep.txt").exists());

        remove_entry(&target).unwrap();
        assert!(!target.exists());
    }
}
