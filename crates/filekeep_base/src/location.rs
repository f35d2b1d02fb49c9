use relative_path::RelativePath;
use std::borrow::Borrow;
use std::path::{Path, PathBuf};

/* 📖 # What is a StorageLocation?

A storage location is the opaque key a Storage uses to find a stored object. For the
filesystem backend it is a path, for the in-memory backend it is just a map key.
The engine never interprets it beyond equality and its string form, which is what gets
written to the recent-files history.
*/

/// Opaque key identifying where an object is persisted.
///
/// # Examples
///
/// ```
/// use filekeep_base::StorageLocation;
///
/// let location = StorageLocation::from("documents/report.json");
/// assert_eq!(location.as_str(), "documents/report.json");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StorageLocation(String);

impl StorageLocation {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }

    /// Appends a child component, using `/` as the separator.
    pub fn join(&self, child: &str) -> Self {
        if self.0.is_empty() {
            return Self(child.to_string());
        }
        Self(RelativePath::new(&self.0).join(child).into_string())
    }

    /// Resolves the location to a filesystem path below `base_dir`.
    ///
    /// Absolute locations are returned unchanged. Relative ones are interpreted with
    /// forward slashes as separators on every platform.
    pub fn resolve_under(&self, base_dir: &Path) -> PathBuf {
        let as_path = Path::new(&self.0);
        if as_path.is_absolute() {
            return as_path.to_path_buf();
        }
        RelativePath::new(&self.0).to_path(base_dir)
    }
}

impl From<&str> for StorageLocation {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for StorageLocation {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&String> for StorageLocation {
    fn from(s: &String) -> Self {
        Self(s.clone())
    }
}

impl From<&Path> for StorageLocation {
    fn from(p: &Path) -> Self {
        Self(p.to_string_lossy().into_owned())
    }
}

impl std::fmt::Display for StorageLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for StorageLocation {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for StorageLocation {
    fn borrow(&self) -> &str {
        &self.0
    }
}
