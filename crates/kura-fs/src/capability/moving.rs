use super::{move_node, validate_name, Parent, Subitem};
use crate::error::FsResult;
use crate::item::PathRepresentable;
use crate::path::FsPath;

/// A node that can be moved.
pub trait Moveable: PathRepresentable {
    /// Move to `destination`, which must not exist.
    ///
    /// Moves across filesystems are done as copy then remove. On success
    /// the node points at `destination`; on failure it is unchanged.
    fn move_to(&mut self, destination: &FsPath) -> FsResult<()> {
        move_node(self, destination)
    }
}

/// A moveable node that can be moved into a parent under its own name.
pub trait MoveableSubitem: Moveable + Subitem {
    /// Move into `parent`, keeping the last path component.
    fn move_into(&mut self, parent: &impl Parent) -> FsResult<()> {
        let destination = parent
            .path()
            .appending_component(self.path().last_component());
        self.move_to(&destination)
    }
}

/// A node that can be renamed in place.
pub trait Renameable: PathRepresentable {
    /// Replace the last path component with `name`.
    ///
    /// `name` must be a single component. On success the node points at the
    /// new path.
    fn rename(&mut self, name: &str) -> FsResult<()> {
        validate_name(name)?;
        let destination = self.path().replacing_last_component(name);
        move_node(self, &destination)
    }
}
