//! The five node wrappers.
//!
//! Each wrapper holds exactly one [`crate::FsPath`]. The capability `impl` blocks
//! in the per-kind modules are the compile-time half of the capability
//! table.

macro_rules! node_wrapper {
    ($(#[$meta:meta])* $name:ident => $kind:ident) => {
        $(#[$meta])*
        #[derive(Clone, PartialEq, Eq, Hash)]
        pub struct $name {
            path: $crate::path::FsPath,
        }

        impl $name {
            /// Wrap `path` without probing the host.
            pub fn new(path: impl Into<$crate::path::FsPath>) -> Self {
                Self { path: path.into() }
            }

            /// Consume into the wrapped path.
            pub fn into_path(self) -> $crate::path::FsPath {
                self.path
            }
        }

        impl $crate::item::Item for $name {
            fn path(&self) -> &$crate::path::FsPath {
                &self.path
            }

            fn kind(&self) -> kura_types::NodeKind {
                kura_types::NodeKind::$kind
            }
        }

        impl $crate::item::private::Sealed for $name {
            fn replace_path(&mut self, path: $crate::path::FsPath) {
                self.path = path;
            }
        }

        impl $crate::item::PathRepresentable for $name {
            const KIND: kura_types::NodeKind = kura_types::NodeKind::$kind;

            fn from_path_unchecked(path: $crate::path::FsPath) -> Self {
                Self { path }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.path)
            }
        }

        impl std::fmt::Debug for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&$crate::item::Item::describe(self))
            }
        }

        impl From<$name> for $crate::node::Node {
            fn from(node: $name) -> Self {
                $crate::node::Node::$kind(node)
            }
        }
    };
}

mod alias_file;
mod directory;
mod regular_file;
mod symbolic_link;
mod volume;

pub use alias_file::AliasFile;
pub use directory::Directory;
pub use regular_file::RegularFile;
pub use symbolic_link::SymbolicLink;
pub use volume::Volume;
