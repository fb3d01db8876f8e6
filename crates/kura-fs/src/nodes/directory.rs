use std::fs;

use kura_types::Relationship;

use crate::capability::{
    resolve_parent, Aliasable, Copyable, CopyableSubitem, FileWrapperConvertible, Moveable, MoveableSubitem,
    Parent, Removeable, Renameable, Subitem, SymbolicLinkable,
};
use crate::error::FsResult;
use crate::item::Item;
use crate::path::FsPath;
use crate::trash::Trashable;

node_wrapper! {
    /// A directory.
    Directory => Directory
}

impl Directory {
    /// Create a directory at `at`, with missing ancestors if
    /// `with_intermediate` is set.
    ///
    /// Without `with_intermediate`, fails if `at` exists. With it, an
    /// existing directory is accepted.
    pub fn create(at: impl Into<FsPath>, with_intermediate: bool) -> FsResult<Self> {
        let at = at.into();
        tracing::debug!(path = %at, with_intermediate, "create directory");
        fs::DirBuilder::new()
            .recursive(with_intermediate)
            .create(&at)?;
        Ok(Self::new(at))
    }

    /// How this directory relates to `item`.
    ///
    /// Symbolic links in the ancestors of either path are resolved; a final
    /// symbolic link in `item` is not.
    pub fn relationship(&self, item: &impl Item) -> FsResult<Relationship> {
        let dir = dunce::canonicalize(self.path())?;
        let other = resolve_parent(item.path());

        Ok(if other == dir {
            Relationship::Same
        } else if other.starts_with(&dir) {
            Relationship::Contains
        } else {
            Relationship::Other
        })
    }
}

impl Parent for Directory {}
impl Subitem for Directory {}
impl Copyable for Directory {}
impl CopyableSubitem for Directory {}
impl Moveable for Directory {}
impl MoveableSubitem for Directory {}
impl Renameable for Directory {}
impl Removeable for Directory {}
impl Trashable for Directory {}
impl SymbolicLinkable for Directory {}
impl Aliasable for Directory {}
impl FileWrapperConvertible for Directory {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nodes::RegularFile;
    use tempfile::TempDir;

    #[test]
    fn test_create_with_intermediate() {
        let dir = TempDir::new().unwrap();
        let deep = dir.path().join("a/b/c");

        assert!(Directory::create(&deep, false).is_err());
        let created = Directory::create(&deep, true).unwrap();
        assert!(created.exists());
        // Existing directories are fine with intermediates
        assert!(Directory::create(&deep, true).is_ok());
        assert!(Directory::create(&deep, false).is_err());
    }

    #[test]
    fn test_relationship() {
        let dir = TempDir::new().unwrap();
        let root = Directory::new(dir.path());
        let sub = Directory::create(dir.path().join("sub"), false).unwrap();
        let file = RegularFile::write_new(dir.path().join("sub/f.txt"), b"x").unwrap();
        let outside = Directory::new("/");

        assert_eq!(root.relationship(&root).unwrap(), Relationship::Same);
        assert_eq!(root.relationship(&sub).unwrap(), Relationship::Contains);
        assert_eq!(root.relationship(&file).unwrap(), Relationship::Contains);
        assert_eq!(sub.relationship(&outside).unwrap(), Relationship::Other);
        assert_eq!(
            root.relationship(&FsPath::new(dir.path().join("sub/../sub/f.txt")).item().unwrap())
                .unwrap(),
            Relationship::Contains
        );
    }

    #[test]
    fn test_relationship_does_not_follow_final_link() {
        let dir = TempDir::new().unwrap();
        let inside = Directory::create(dir.path().join("inside"), false).unwrap();
        let other = TempDir::new().unwrap();
        let link = dir.path().join("inside/out");
        std::os::unix::fs::symlink(other.path(), &link).unwrap();

        let link = crate::nodes::SymbolicLink::new(&link);
        assert_eq!(inside.relationship(&link).unwrap(), Relationship::Contains);
    }
}
