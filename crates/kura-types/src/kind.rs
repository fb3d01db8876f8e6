//! Node kinds and the capability table.
//!
//! The mapping from kind to capability is closed and fixed. `kura-fs`
//! encodes it twice: once as trait impls (compile time) and once here, so
//! code holding a tagged [`NodeKind`] can ask what a node supports without
//! inspecting types at runtime. The two must agree.

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString, IntoEnumIterator};

/// Kind of filesystem node.
///
/// Declaration order is classification priority: a volume root is also a
/// directory, and a symbolic link is never resolved before it is
/// classified.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum NodeKind {
    /// Root directory of a mounted filesystem.
    Volume,
    /// Directory.
    Directory,
    /// Symbolic link (never followed during classification).
    SymbolicLink,
    /// Alias file pointing at another node.
    AliasFile,
    /// Regular file.
    RegularFile,
}

impl NodeKind {
    /// All kinds, highest classification priority first.
    pub const PRIORITY: [NodeKind; 5] = [
        NodeKind::Volume,
        NodeKind::Directory,
        NodeKind::SymbolicLink,
        NodeKind::AliasFile,
        NodeKind::RegularFile,
    ];

    /// Returns true if nodes of this kind support `capability`.
    pub fn supports(self, capability: Capability) -> bool {
        use Capability::*;
        use NodeKind::*;

        match capability {
            Parent => matches!(self, Volume | Directory),
            Subitem | Copy | Move | Remove | Trash | AliasTarget => self != Volume,
            Rename | SymbolicLinkTarget => true,
            HardLink => self != Directory,
            FileHandle => self == RegularFile,
            FileWrapper => matches!(self, Directory | RegularFile | SymbolicLink),
        }
    }

    /// Iterate the capabilities supported by this kind.
    pub fn capabilities(self) -> impl Iterator<Item = Capability> {
        Capability::iter().filter(move |capability| self.supports(*capability))
    }

    /// Returns true for the three single-file kinds.
    pub fn is_file(self) -> bool {
        matches!(
            self,
            NodeKind::RegularFile | NodeKind::SymbolicLink | NodeKind::AliasFile
        )
    }
}

/// A narrow set of operations a node kind may support.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Capability {
    /// Can list nested entries.
    Parent,
    /// Lives inside a parent directory and volume.
    Subitem,
    /// Can be copied (also into a parent).
    Copy,
    /// Can be moved (also into a parent).
    Move,
    /// Can be renamed in place.
    Rename,
    /// Can be removed immediately.
    Remove,
    /// Can be moved to the trash.
    Trash,
    /// Can be hard linked.
    HardLink,
    /// Can be the destination of a symbolic link.
    SymbolicLinkTarget,
    /// Can be the destination of an alias file.
    AliasTarget,
    /// Can be opened as a file handle.
    FileHandle,
    /// Can be snapshotted into a [`crate::FileWrapper`].
    FileWrapper,
}
