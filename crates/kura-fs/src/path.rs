//! Filesystem location values.

use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::convert::Infallible;
use std::ffi::OsStr;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::path::{Component, Path, PathBuf};
use std::str::FromStr;

use crate::classify;
use crate::node::Node;

/// An immutable filesystem location.
///
/// The raw form is kept exactly as given. Equality and hashing use the
/// standardized form, so `/tmp/x` and `/tmp/./x` are the same path. The
/// standardization pass runs on every comparison.
#[derive(Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FsPath {
    raw: PathBuf,
}

impl FsPath {
    /// Create a path from its raw form.
    pub fn new(raw: impl Into<PathBuf>) -> Self {
        Self { raw: raw.into() }
    }

    /// Create a path from components, e.g. `["/", "tmp", "x"]`.
    pub fn from_components<I, S>(components: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        Self {
            raw: components.into_iter().map(|c| PathBuf::from(c.as_ref())).collect(),
        }
    }

    /// The raw path.
    pub fn as_path(&self) -> &Path {
        &self.raw
    }

    /// The raw path as a string (lossy for non-UTF-8 paths).
    pub fn raw(&self) -> Cow<'_, str> {
        self.raw.to_string_lossy()
    }

    /// Consume into the raw `PathBuf`.
    pub fn into_path_buf(self) -> PathBuf {
        self.raw
    }

    /// Extension of the last component, or an empty string.
    pub fn extension(&self) -> String {
        self.raw
            .extension()
            .map(|ext| ext.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    /// Path components; the root is rendered as `/`.
    pub fn components(&self) -> Vec<String> {
        self.raw.components().map(component_string).collect()
    }

    /// Last path component; `/` for the root.
    pub fn last_component(&self) -> String {
        self.raw
            .components()
            .next_back()
            .map(component_string)
            .unwrap_or_default()
    }

    /// Append a component. Leading separators in `component` are ignored,
    /// so the result always stays beneath `self`.
    pub fn appending_component(&self, component: impl AsRef<Path>) -> FsPath {
        let mut raw = self.raw.clone();
        for part in component.as_ref().components() {
            match part {
                Component::RootDir | Component::Prefix(_) => {}
                other => raw.push(other.as_os_str()),
            }
        }
        FsPath { raw }
    }

    /// Remove the last component.
    ///
    /// Works on the standardized form when the raw path ends in `.` or
    /// `..`, so `a/b/..` loses `a` rather than `..`.
    pub fn deleting_last_component(&self) -> FsPath {
        let base = match self.raw.components().next_back() {
            Some(Component::Normal(_)) => Cow::Borrowed(self.raw.as_path()),
            _ => Cow::Owned(standardize(&self.raw)),
        };
        let raw = base
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| base.to_path_buf());
        FsPath { raw }
    }

    /// Replace the last component with `component`.
    pub fn replacing_last_component(&self, component: impl AsRef<Path>) -> FsPath {
        self.deleting_last_component().appending_component(component)
    }

    /// Standardized form: absolute, without `.` and with `..` folded.
    ///
    /// Purely lexical; only the current directory is read, and only for
    /// relative paths.
    pub fn standardized(&self) -> FsPath {
        FsPath {
            raw: standardize(&self.raw),
        }
    }

    /// Path with symbolic links resolved by the host.
    ///
    /// Falls back to the standardized form if the path cannot be resolved.
    pub fn resolved(&self) -> FsPath {
        match dunce::canonicalize(&self.raw) {
            Ok(raw) => FsPath { raw },
            Err(_) => self.standardized(),
        }
    }

    /// Returns true if something exists here (symbolic links followed).
    pub fn exists(&self) -> bool {
        self.raw.exists()
    }

    /// Display names of the components, or `None` if the path does not
    /// exist.
    pub fn components_to_display(&self) -> Option<Vec<String>> {
        if !self.exists() {
            return None;
        }
        Some(self.standardized().components())
    }

    /// Classify whatever is at this path.
    pub fn item(&self) -> Option<Node> {
        classify::classify(self)
    }
}

fn component_string(component: Component<'_>) -> String {
    match component {
        Component::RootDir => "/".to_string(),
        other => other.as_os_str().to_string_lossy().into_owned(),
    }
}

/// Lexically standardize a path.
pub(crate) fn standardize(path: &Path) -> PathBuf {
    let absolute: Cow<'_, Path> = if path.is_absolute() {
        Cow::Borrowed(path)
    } else {
        match std::env::current_dir() {
            Ok(cwd) => Cow::Owned(cwd.join(path)),
            Err(_) => Cow::Borrowed(path),
        }
    };

    let mut result = PathBuf::new();
    for component in absolute.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match result.components().next_back() {
                Some(Component::Normal(_)) => {
                    result.pop();
                }
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => result.push(".."),
            },
            other => result.push(other.as_os_str()),
        }
    }
    if result.as_os_str().is_empty() {
        result.push(".");
    }
    result
}

impl PartialEq for FsPath {
    fn eq(&self, other: &Self) -> bool {
        standardize(&self.raw) == standardize(&other.raw)
    }
}

impl Eq for FsPath {}

impl Hash for FsPath {
    fn hash<H: Hasher>(&self, state: &mut H) {
        standardize(&self.raw).hash(state);
    }
}

impl fmt::Display for FsPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.raw.display())
    }
}

impl fmt::Debug for FsPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.raw.display())
    }
}

impl AsRef<Path> for FsPath {
    fn as_ref(&self) -> &Path {
        &self.raw
    }
}

impl From<&str> for FsPath {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

impl From<String> for FsPath {
    fn from(raw: String) -> Self {
        Self::new(raw)
    }
}

impl From<PathBuf> for FsPath {
    fn from(raw: PathBuf) -> Self {
        Self::new(raw)
    }
}

impl From<&PathBuf> for FsPath {
    fn from(raw: &PathBuf) -> Self {
        Self::new(raw)
    }
}

impl From<&Path> for FsPath {
    fn from(raw: &Path) -> Self {
        Self::new(raw)
    }
}

impl From<&FsPath> for FsPath {
    fn from(path: &FsPath) -> Self {
        path.clone()
    }
}

impl FromStr for FsPath {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::new(s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_equality_uses_standardized_form() {
        assert_eq!(FsPath::from("/tmp/x"), FsPath::from("/tmp/./x"));
        assert_eq!(FsPath::from("/a/b/../c"), FsPath::from("/a/c"));
        assert_eq!(FsPath::from("/a/b/"), FsPath::from("/a/b"));
        assert_ne!(FsPath::from("/a/b"), FsPath::from("/a/c"));
    }

    #[test]
    fn test_hash_agrees_with_equality() {
        let mut set = HashSet::new();
        set.insert(FsPath::from("/tmp/x"));
        assert!(set.contains(&FsPath::from("/tmp/./x")));
        assert!(set.contains(&FsPath::from("/tmp/y/../x")));
    }

    #[test]
    fn test_raw_form_is_preserved() {
        let path = FsPath::from("/tmp/./x");
        assert_eq!(path.raw(), "/tmp/./x");
        assert_eq!(path.to_string(), "/tmp/./x");
        assert_eq!(path.standardized().raw(), "/tmp/x");
    }

    #[test]
    fn test_relative_paths_standardize_against_cwd() {
        let cwd = std::env::current_dir().unwrap();
        assert_eq!(FsPath::from("some/file"), FsPath::new(cwd.join("some/file")));
        assert!(FsPath::from("a").standardized().as_path().is_absolute());
    }

    #[test]
    fn test_parent_dir_stops_at_root() {
        assert_eq!(FsPath::from("/../..").standardized().raw(), "/");
        assert_eq!(FsPath::from("/..").standardized(), FsPath::from("/"));
    }

    #[test]
    fn test_accessors() {
        let path = FsPath::from("/usr/share/doc/readme.txt");
        assert_eq!(path.extension(), "txt");
        assert_eq!(path.last_component(), "readme.txt");
        assert_eq!(path.components(), vec!["/", "usr", "share", "doc", "readme.txt"]);

        assert_eq!(FsPath::from("/usr/bin").extension(), "");
        assert_eq!(FsPath::from("/").last_component(), "/");
    }

    #[test]
    fn test_from_components() {
        let path = FsPath::from_components(["/", "tmp", "x.txt"]);
        assert_eq!(path.raw(), "/tmp/x.txt");
        assert_eq!(path.components(), vec!["/", "tmp", "x.txt"]);
    }

    #[test]
    fn test_append_then_delete_round_trips() {
        for raw in ["/tmp", "/tmp/./a", "/a/b/", "/"] {
            let path = FsPath::from(raw);
            let back = path.appending_component("child").deleting_last_component();
            assert_eq!(back, path.standardized(), "{raw}");
        }
    }

    #[test]
    fn test_append_ignores_leading_separator() {
        let path = FsPath::from("/tmp").appending_component("/etc/passwd");
        assert_eq!(path.raw(), "/tmp/etc/passwd");
    }

    #[test]
    fn test_delete_last_component() {
        assert_eq!(FsPath::from("/a/b/c").deleting_last_component().raw(), "/a/b");
        assert_eq!(FsPath::from("/a/b/..").deleting_last_component(), FsPath::from("/"));
        assert_eq!(FsPath::from("/").deleting_last_component().raw(), "/");
    }

    #[test]
    fn test_replace_last_component() {
        let path = FsPath::from("/a/b/old.txt").replacing_last_component("new.txt");
        assert_eq!(path.raw(), "/a/b/new.txt");
    }

    #[test]
    fn test_exists_and_display_components() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = FsPath::new(dir.path());
        assert!(path.exists());

        let shown = path.components_to_display().unwrap();
        assert_eq!(shown.first().map(String::as_str), Some("/"));

        let missing = path.appending_component("missing");
        assert!(!missing.exists());
        assert!(missing.components_to_display().is_none());
    }

    #[test]
    fn test_resolved_follows_symlinks() {
        let dir = tempfile::TempDir::new().unwrap();
        let target = dir.path().join("target");
        std::fs::create_dir(&target).unwrap();
        std::os::unix::fs::symlink(&target, dir.path().join("link")).unwrap();

        let resolved = FsPath::new(dir.path().join("link")).resolved();
        assert_eq!(resolved, FsPath::new(dunce::canonicalize(&target).unwrap()));

        let missing = FsPath::from("/definitely/not/./here");
        assert_eq!(missing.resolved().raw(), "/definitely/not/here");
    }
}
