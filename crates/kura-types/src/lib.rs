//! Shared node and attribute types for kura.
//!
//! This crate is the vocabulary the filesystem layer speaks: which kinds of
//! node exist, which capabilities each kind carries, and the plain data
//! returned by metadata queries. It performs **no filesystem access**; it is a
//! pure leaf crate that `kura-fs` builds on.
//!
//! # Key Types
//!
//! |--------------------|---------------------------------------------------|
//! | Type               | Purpose                                           |
//! |--------------------|---------------------------------------------------|
//! | [`NodeKind`]       | The five node kinds, in classification priority   |
//! | [`Capability`]     | Narrow operation sets a kind may support          |
//! | [`Attributes`]     | Raw `lstat` snapshot of an entry                  |
//! | [`SetAttributes`]  | Attribute changes to apply                        |
//! | [`FileWrapper`]    | In-memory snapshot of a file, link or tree        |
//! | [`Relationship`]   | How a directory relates to another item           |
//! |--------------------|---------------------------------------------------|

pub mod attr;
pub mod kind;
pub mod relationship;
pub mod wrapper;

pub use attr::{Attributes, RawFileType, SetAttributes};
pub use kind::{Capability, NodeKind};
pub use relationship::Relationship;
pub use wrapper::FileWrapper;
