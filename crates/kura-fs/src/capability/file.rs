//! File snapshots and content comparison.

use std::collections::BTreeMap;
use std::fs;
use std::io::{self, Read, Write};
use std::os::unix::fs::{symlink, PermissionsExt};
use std::path::Path;

use kura_types::FileWrapper;
use walkdir::WalkDir;

use super::{ensure_vacant, validate_name};
use crate::error::{FsError, FsResult};
use crate::item::Item;
use crate::path::FsPath;

const COMPARE_CHUNK: usize = 64 * 1024;

/// A node that can be snapshotted into a [`FileWrapper`].
pub trait FileWrapperConvertible: Item {
    /// Read the node (and, for directories, everything beneath it) into
    /// memory. Symbolic links are recorded, not followed.
    fn file_wrapper(&self) -> FsResult<FileWrapper> {
        tracing::debug!(path = %self.path(), "snapshot");
        snapshot(self.path().as_path(), self.path().last_component())
    }
}

/// A directory still being filled during a walk.
struct OpenDir {
    name: String,
    perm: u32,
    children: BTreeMap<String, FileWrapper>,
}

fn snapshot(path: &Path, name: String) -> FsResult<FileWrapper> {
    // One entry per directory between the walk root and the current entry.
    let mut open: Vec<OpenDir> = Vec::new();
    let mut root = None;

    for entry in WalkDir::new(path).follow_links(false) {
        let entry = entry.map_err(io::Error::from)?;
        while open.len() > entry.depth() {
            close_dir(&mut open, &mut root);
        }

        let entry_name = if entry.depth() == 0 {
            name.clone()
        } else {
            entry.file_name().to_string_lossy().into_owned()
        };
        let file_type = entry.file_type();
        let perm = entry.metadata().map_err(io::Error::from)?.permissions().mode() & 0o7777;

        let wrapper = if file_type.is_symlink() {
            FileWrapper::SymbolicLink {
                name: entry_name,
                destination: fs::read_link(entry.path())?,
            }
        } else if file_type.is_dir() {
            open.push(OpenDir {
                name: entry_name,
                perm,
                children: BTreeMap::new(),
            });
            continue;
        } else if file_type.is_file() {
            FileWrapper::Regular {
                name: entry_name,
                perm,
                contents: fs::read(entry.path())?,
            }
        } else {
            continue;
        };
        attach(&mut open, &mut root, wrapper);
    }
    while !open.is_empty() {
        close_dir(&mut open, &mut root);
    }

    root.ok_or_else(|| FsError::unsupported(format!("cannot snapshot {}", path.display())))
}

fn close_dir(open: &mut Vec<OpenDir>, root: &mut Option<FileWrapper>) {
    if let Some(dir) = open.pop() {
        let wrapper = FileWrapper::Directory {
            name: dir.name,
            perm: dir.perm,
            children: dir.children,
        };
        attach(open, root, wrapper);
    }
}

fn attach(open: &mut [OpenDir], root: &mut Option<FileWrapper>, wrapper: FileWrapper) {
    match open.last_mut() {
        Some(parent) => {
            parent.children.insert(wrapper.name().to_string(), wrapper);
        }
        None => *root = Some(wrapper),
    }
}

/// Writing a [`FileWrapper`] back to disk.
pub trait FileWrapperExt {
    /// Materialize the snapshot at `at`, which must not exist. The
    /// wrapper's own name is ignored; child names are kept.
    fn write_to(&self, at: &FsPath) -> FsResult<()>;
}

impl FileWrapperExt for FileWrapper {
    fn write_to(&self, at: &FsPath) -> FsResult<()> {
        tracing::debug!(path = %at, "write snapshot");
        ensure_vacant(at)?;
        materialize(self, at.as_path())
    }
}

fn materialize(wrapper: &FileWrapper, at: &Path) -> FsResult<()> {
    match wrapper {
        FileWrapper::Regular { perm, contents, .. } => {
            let mut file = fs::OpenOptions::new()
                .write(true)
                .create_new(true)
                .open(at)?;
            file.write_all(contents)?;
            fs::set_permissions(at, fs::Permissions::from_mode(*perm))?;
        }
        FileWrapper::Directory { perm, children, .. } => {
            fs::create_dir(at)?;
            for (name, child) in children {
                validate_name(name)?;
                materialize(child, &at.join(name))?;
            }
            // Last, so a read-only directory can still be filled.
            fs::set_permissions(at, fs::Permissions::from_mode(*perm))?;
        }
        FileWrapper::SymbolicLink { destination, .. } => {
            symlink(destination, at)?;
        }
    }
    Ok(())
}

/// The single-file node kinds.
pub trait File: Item + Sized {
    /// Returns true if both nodes hold the same bytes. Symbolic links are
    /// equal when they point to the same destination. Any error (including
    /// a missing file) yields `false`.
    fn is_content_equal(&self, other: &Self) -> bool {
        match contents_equal(self.path().as_path(), other.path().as_path()) {
            Ok(equal) => equal,
            Err(e) => {
                tracing::trace!(
                    path = %self.path(),
                    other = %other.path(),
                    error = %e,
                    "content comparison failed"
                );
                false
            }
        }
    }
}

fn contents_equal(a: &Path, b: &Path) -> io::Result<bool> {
    let meta_a = fs::symlink_metadata(a)?;
    let meta_b = fs::symlink_metadata(b)?;

    match (meta_a.file_type().is_symlink(), meta_b.file_type().is_symlink()) {
        (true, true) => return Ok(fs::read_link(a)? == fs::read_link(b)?),
        (false, false) => {}
        _ => return Ok(false),
    }
    if meta_a.len() != meta_b.len() {
        return Ok(false);
    }

    let mut file_a = fs::File::open(a)?;
    let mut file_b = fs::File::open(b)?;
    let mut buf_a = vec![0u8; COMPARE_CHUNK];
    let mut buf_b = vec![0u8; COMPARE_CHUNK];
    loop {
        let read = read_full(&mut file_a, &mut buf_a)?;
        if read != read_full(&mut file_b, &mut buf_b)? || buf_a[..read] != buf_b[..read] {
            return Ok(false);
        }
        if read == 0 {
            return Ok(true);
        }
    }
}

/// Fill `buf` as far as the reader allows.
fn read_full(reader: &mut impl Read, buf: &mut [u8]) -> io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
            Err(e) => return Err(e),
        }
    }
    Ok(filled)
}
