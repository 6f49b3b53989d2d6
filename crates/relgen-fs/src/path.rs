//! Normalized path handling for cross-platform compatibility

use std::path::{Path, PathBuf};

/// A path normalized to use forward slashes internally.
///
/// Template stores and bundle trees address files by `/`-separated keys
/// regardless of platform. Conversion to a native path happens only at
/// I/O boundaries.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize)]
pub struct NormalizedPath {
    inner: String,
}

impl NormalizedPath {
    /// Create a new NormalizedPath from any path-like input.
    ///
    /// Backslashes become forward slashes and repeated separators collapse
    /// into one. A leading `/` is preserved.
    pub fn new(path: impl AsRef<Path>) -> Self {
        let raw = path.as_ref().to_string_lossy().replace('\\', "/");
        let absolute = raw.starts_with('/');
        let joined = raw
            .split('/')
            .filter(|c| !c.is_empty())
            .collect::<Vec<_>>()
            .join("/");
        let inner = match (absolute, joined.is_empty()) {
            (true, true) => "/".to_string(),
            (true, false) => format!("/{}", joined),
            (false, _) => joined,
        };
        Self { inner }
    }

    /// Get the internal normalized string representation.
    pub fn as_str(&self) -> &str {
        &self.inner
    }

    /// Convert to a platform-native PathBuf for I/O operations.
    pub fn to_native(&self) -> PathBuf {
        PathBuf::from(&self.inner)
    }

    /// Join this path with a `/`-separated relative segment.
    pub fn join(&self, segment: &str) -> Self {
        if self.inner.is_empty() {
            return Self::new(segment);
        }
        Self::new(format!("{}/{}", self.inner, segment))
    }

    /// Non-empty path components, in order.
    pub fn components(&self) -> Vec<&str> {
        self.inner.split('/').filter(|c| !c.is_empty()).collect()
    }

    /// Strip `base` from the front of this path, component-wise.
    ///
    /// Returns `None` when `base` is not a prefix.
    pub fn strip_prefix(&self, base: &NormalizedPath) -> Option<Self> {
        let mine = self.components();
        let theirs = base.components();
        if theirs.len() > mine.len() || mine[..theirs.len()] != theirs[..] {
            return None;
        }
        Some(Self {
            inner: mine[theirs.len()..].join("/"),
        })
    }

    /// Get the parent directory.
    pub fn parent(&self) -> Option<Self> {
        let trimmed = self.inner.trim_end_matches('/');
        match trimmed.rfind('/') {
            Some(0) => Some(Self {
                inner: "/".to_string(),
            }),
            Some(idx) => Some(Self {
                inner: trimmed[..idx].to_string(),
            }),
            None => None,
        }
    }

    /// Get the file name component.
    pub fn file_name(&self) -> Option<&str> {
        self.inner
            .trim_end_matches('/')
            .rsplit('/')
            .next()
            .filter(|n| !n.is_empty())
    }

    /// Get the extension if present.
    pub fn extension(&self) -> Option<&str> {
        self.file_name().and_then(|name| {
            let idx = name.rfind('.')?;
            if idx == 0 { None } else { Some(&name[idx + 1..]) }
        })
    }

    pub fn exists(&self) -> bool {
        self.to_native().exists()
    }

    pub fn is_dir(&self) -> bool {
        self.to_native().is_dir()
    }

    pub fn is_file(&self) -> bool {
        self.to_native().is_file()
    }
}

impl AsRef<Path> for NormalizedPath {
    fn as_ref(&self) -> &Path {
        Path::new(&self.inner)
    }
}

impl std::fmt::Display for NormalizedPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.inner)
    }
}

impl From<&str> for NormalizedPath {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for NormalizedPath {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<PathBuf> for NormalizedPath {
    fn from(p: PathBuf) -> Self {
        Self::new(p)
    }
}

impl From<&Path> for NormalizedPath {
    fn from(p: &Path) -> Self {
        Self::new(p)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collapses_repeated_separators() {
        assert_eq!(NormalizedPath::new("a//b///c").as_str(), "a/b/c");
        assert_eq!(NormalizedPath::new("/a/b/").as_str(), "/a/b");
    }

    #[test]
    fn strip_prefix_is_component_wise() {
        let path = NormalizedPath::new("releng/.github/workflows/ci.yml");
        let stripped = path.strip_prefix(&NormalizedPath::new("releng")).unwrap();
        assert_eq!(stripped.as_str(), ".github/workflows/ci.yml");
        assert!(path.strip_prefix(&NormalizedPath::new("rel")).is_none());
    }

    #[test]
    fn file_name_of_root_is_none() {
        assert_eq!(NormalizedPath::new("").file_name(), None);
        assert_eq!(NormalizedPath::new("a/b.yml").file_name(), Some("b.yml"));
    }
}
