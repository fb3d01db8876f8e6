use super::{copy_entry, ensure_vacant, resolve_parent, revalidate, SpecialFiles};
use crate::capability::{Parent, Subitem};
use crate::error::{FsError, FsResult};
use crate::item::PathRepresentable;
use crate::path::FsPath;

/// A node that can be copied.
pub trait Copyable: PathRepresentable {
    /// Copy to `destination`, which must not exist.
    ///
    /// Directories are copied recursively and symbolic links as links. The
    /// copy is re-classified; if it is not of the same kind the result is
    /// [`FsError::TargetMissing`] (the copy stays on disk).
    fn copy_to(&self, destination: &FsPath) -> FsResult<Self> {
        let source = self.path();
        tracing::debug!(source = %source, destination = %destination, "copy");

        // Resolved, so a destination reached through a link into the source
        // is still caught.
        let outer = resolve_parent(source);
        let inner = resolve_parent(destination);
        if inner != outer && inner.starts_with(&outer) {
            return Err(FsError::invalid_name(format!(
                "cannot copy {source} into itself"
            )));
        }

        ensure_vacant(destination)?;
        copy_entry(source.as_path(), destination.as_path(), SpecialFiles::Skip)?;
        revalidate(destination)
    }
}

/// A copyable node that can be copied into a parent under its own name.
pub trait CopyableSubitem: Copyable + Subitem {
    /// Copy into `parent`, keeping the last path component.
    fn copy_into(&self, parent: &impl Parent) -> FsResult<Self> {
        let destination = parent
            .path()
            .appending_component(self.path().last_component());
        self.copy_to(&destination)
    }
}
