use std::fs;
use std::path::PathBuf;

use kura_types::Capability;

use crate::capability::{
    Aliasable, Copyable, CopyableSubitem, File, FileWrapperConvertible, Linkable, Moveable,
    MoveableSubitem, Removeable, Renameable, Subitem, SymbolicLinkable,
};
use crate::classify;
use crate::error::{FsError, FsResult};
use crate::item::Item;
use crate::node::Node;
use crate::path::FsPath;
use crate::trash::Trashable;

node_wrapper! {
    /// A symbolic link. Never followed when classified.
    SymbolicLink => SymbolicLink
}

impl SymbolicLink {
    /// The link's stored target, unresolved.
    pub fn target(&self) -> FsResult<PathBuf> {
        Ok(fs::read_link(self.path())?)
    }

    /// The node the link points to.
    ///
    /// A relative target is taken relative to the link's directory. Fails
    /// with [`FsError::TargetMissing`] if the target is not one of the five
    /// kinds (including when it does not exist).
    pub fn destination(&self) -> FsResult<Node> {
        let target = self.target()?;
        let destination = if target.is_absolute() {
            FsPath::new(target)
        } else {
            let dir = self.path().standardized().deleting_last_component();
            FsPath::new(dir.as_path().join(target))
        };
        tracing::debug!(path = %self.path(), destination = %destination, "resolve link");

        classify::classify(&destination)
            .filter(|node| node.supports(Capability::SymbolicLinkTarget))
            .ok_or_else(|| FsError::target_missing(destination))
    }
}

impl Subitem for SymbolicLink {}
impl Copyable for SymbolicLink {}
impl CopyableSubitem for SymbolicLink {}
impl Moveable for SymbolicLink {}
impl MoveableSubitem for SymbolicLink {}
impl Renameable for SymbolicLink {}
impl Removeable for SymbolicLink {}
impl Trashable for SymbolicLink {}
impl Linkable for SymbolicLink {}
impl SymbolicLinkable for SymbolicLink {}
impl Aliasable for SymbolicLink {}
impl FileWrapperConvertible for SymbolicLink {}
impl File for SymbolicLink {}
