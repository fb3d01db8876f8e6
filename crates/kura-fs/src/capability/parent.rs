//! Enumeration and containment.

use std::io;

use kura_types::NodeKind;
use walkdir::WalkDir;

use crate::classify;
use crate::error::FsResult;
use crate::item::{Item, PathRepresentable};
use crate::mounts;
use crate::node::Node;
use crate::nodes::{Directory, Volume};
use crate::path::FsPath;

/// A node that contains other nodes.
pub trait Parent: Item {
    /// Every node beneath this one, depth first, in the order the host
    /// lists them.
    ///
    /// Symbolic links are listed but not followed. Entries that are not one
    /// of the five kinds, and volumes mounted beneath this one, are skipped.
    fn subitems(&self) -> FsResult<Vec<Node>> {
        tracing::debug!(path = %self.path(), "list subitems");
        let mut nodes = Vec::new();
        collect_subitems(self.path(), &mut nodes)?;
        Ok(nodes)
    }

    /// Returns true if [`Parent::subitems`] would be empty.
    fn is_empty(&self) -> FsResult<bool> {
        Ok(self.subitems()?.is_empty())
    }

    /// Returns true if `item` is listed by [`Parent::subitems`].
    fn contains(&self, item: &impl Item) -> FsResult<bool> {
        Ok(self
            .subitems()?
            .iter()
            .any(|node| node.path() == item.path()))
    }
}

fn collect_subitems(dir: &FsPath, nodes: &mut Vec<Node>) -> FsResult<()> {
    // walkdir yields a directory on another filesystem without entering it;
    // it classifies as a volume and is dropped below.
    let mut walker = WalkDir::new(dir)
        .min_depth(1)
        .follow_links(false)
        .same_file_system(true)
        .into_iter();

    while let Some(entry) = walker.next() {
        let entry = entry.map_err(io::Error::from)?;
        let path = FsPath::new(entry.path());
        match classify::classify(&path) {
            Some(Node::Volume(_)) => {
                tracing::trace!(path = %path, "skipping mount point");
            }
            None => {
                tracing::trace!(path = %path, "skipping entry");
                if entry.file_type().is_dir() {
                    walker.skip_current_dir();
                }
            }
            Some(node) => nodes.push(node),
        }
    }
    Ok(())
}

/// A node that lives inside a directory on some volume.
pub trait Subitem: Item {
    /// The volume this node lives on.
    fn root_volume(&self) -> FsResult<Volume> {
        // A link lives where it is, not where it points.
        let anchor = if self.kind() == NodeKind::SymbolicLink {
            self.path().standardized().deleting_last_component()
        } else {
            self.path().clone()
        };
        Ok(Volume::new(mounts::mount_point_of(anchor.as_path())?))
    }

    /// The directory containing this node, or `None` at `/`.
    ///
    /// A volume root counts as a directory here.
    fn parent_directory(&self) -> Option<Directory> {
        let standardized = self.path().standardized();
        standardized.as_path().parent()?;
        Directory::from_path(standardized.deleting_last_component())
    }
}
