use kura_types::Capability;

use crate::alias;
use crate::capability::{
    Aliasable, Copyable, CopyableSubitem, File, Linkable, Moveable, MoveableSubitem, Removeable,
    Renameable, Subitem, SymbolicLinkable,
};
use crate::classify;
use crate::error::{FsError, FsResult};
use crate::item::Item;
use crate::node::Node;
use crate::trash::Trashable;

node_wrapper! {
    /// An alias file: a `.desktop` link entry pointing at another node.
    AliasFile => AliasFile
}

impl AliasFile {
    /// The node the alias points to.
    ///
    /// Fails with [`FsError::TargetMissing`] if the entry has no local
    /// target, or the target is gone or is a volume.
    pub fn destination(&self) -> FsResult<Node> {
        let destination = alias::alias_target(self.path())?;
        tracing::debug!(path = %self.path(), destination = %destination, "resolve alias");

        classify::classify(&destination)
            .filter(|node| node.supports(Capability::AliasTarget))
            .ok_or_else(|| FsError::target_missing(destination))
    }
}

impl Subitem for AliasFile {}
impl Copyable for AliasFile {}
impl CopyableSubitem for AliasFile {}
impl Moveable for AliasFile {}
impl MoveableSubitem for AliasFile {}
impl Renameable for AliasFile {}
impl Removeable for AliasFile {}
impl Trashable for AliasFile {}
impl Linkable for AliasFile {}
impl SymbolicLinkable for AliasFile {}
impl Aliasable for AliasFile {}
impl File for AliasFile {}
