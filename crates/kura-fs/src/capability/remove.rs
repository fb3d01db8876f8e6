use super::remove_entry;
use crate::error::FsResult;
use crate::item::Item;

/// A node that can be removed immediately.
pub trait Removeable: Item {
    /// Remove the node. Directories go with everything in them; symbolic
    /// links are removed, not their destinations. Irreversible.
    fn remove(&self) -> FsResult<()> {
        tracing::debug!(path = %self.path(), kind = %self.kind(), "remove");
        remove_entry(self.path().as_path())
    }
}
