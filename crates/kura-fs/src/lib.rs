//! Typed filesystem nodes for kura.
//!
//! Every location is an [`FsPath`]. Classifying a path yields one of five
//! node kinds, each a thin wrapper around its path; what a node can do is
//! expressed as small capability traits it implements. Every operation is
//! a single blocking call into the host with the host's error passed
//! through.
//!
//! # Key Types
//!
//! |-------------------|----------------------------------------------------|
//! | Type              | Purpose                                            |
//! |-------------------|----------------------------------------------------|
//! | [`FsPath`]        | Immutable location, compared by standardized form  |
//! | [`Node`]          | A classified node of one of the five kinds         |
//! | [`Volume`]        | Root of a mounted filesystem                       |
//! | [`Directory`]     | Directory, plus well-known locations               |
//! | [`RegularFile`]   | Regular file                                       |
//! | [`SymbolicLink`]  | Symbolic link, resolvable to a node                |
//! | [`AliasFile`]     | Desktop-entry link file, resolvable to a node      |
//! | [`TrashCan`]      | A freedesktop trash directory                      |
//! | [`FsConfig`]      | Host capabilities, resolved once                   |
//! | [`FsError`]       | Error type for every fallible operation            |
//! |-------------------|----------------------------------------------------|
//!
//! # Example
//!
//! ```no_run
//! use kura_fs::{Copyable, FsPath, Node};
//!
//! if let Some(Node::RegularFile(file)) = FsPath::from("/etc/hostname").item() {
//!     let copy = file.copy_to(&FsPath::from("/tmp/hostname"))?;
//!     println!("{} bytes", copy.size()?);
//! }
//! # Ok::<(), kura_fs::FsError>(())
//! ```

#![cfg(unix)]

pub mod alias;
pub mod capability;
pub mod classify;
pub mod config;
pub mod directories;
pub mod error;
pub mod item;
pub mod mounts;
pub mod node;
pub mod nodes;
pub mod path;
pub mod trash;

pub use capability::{
    Aliasable, Copyable, CopyableSubitem, File, FileHandleConvertible, FileWrapperConvertible,
    FileWrapperExt, Linkable, Moveable, MoveableSubitem, Parent, Removeable, Renameable, Subitem,
    SymbolicLinkable,
};
pub use config::{FsConfig, TrashConfig, TrashPolicy};
pub use error::{FsError, FsResult};
pub use item::{Item, PathRepresentable};
pub use mounts::MountEntry;
pub use node::Node;
pub use nodes::{AliasFile, Directory, RegularFile, SymbolicLink, Volume};
pub use path::FsPath;
pub use trash::{TrashCan, TrashOutcome, Trashable};

pub use kura_types::{
    Attributes, Capability, FileWrapper, NodeKind, RawFileType, Relationship, SetAttributes,
};
