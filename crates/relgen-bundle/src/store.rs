//! Fragment stores
//!
//! A store maps `/`-separated keys to template source text. Bundles are
//! built from the key listing and read fragments lazily at render time.

use std::collections::BTreeMap;
use std::fs;

use relgen_fs::NormalizedPath;

use crate::{Error, Result};

/// Backing storage for template fragments.
pub trait FragmentStore: Send + Sync {
    /// Every key in the store, sorted.
    fn list(&self) -> Result<Vec<NormalizedPath>>;

    /// Source text stored under `key`.
    fn read(&self, key: &NormalizedPath) -> Result<String>;
}

/// Fragments read from a directory on disk. Keys are relative to `root`.
#[derive(Debug, Clone)]
pub struct DirStore {
    root: NormalizedPath,
}

impl DirStore {
    pub fn new(root: impl Into<NormalizedPath>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &NormalizedPath {
        &self.root
    }

    fn walk(&self, dir: &NormalizedPath, keys: &mut Vec<NormalizedPath>) -> Result<()> {
        let native = dir.to_native();
        let entries = fs::read_dir(&native).map_err(|e| relgen_fs::Error::io(&native, e))?;
        let mut children = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| relgen_fs::Error::io(&native, e))?;
            let file_type = entry
                .file_type()
                .map_err(|e| relgen_fs::Error::io(entry.path(), e))?;
            children.push((entry.file_name().to_string_lossy().into_owned(), file_type));
        }
        children.sort_by(|a, b| a.0.cmp(&b.0));

        for (name, file_type) in children {
            let path = dir.join(&name);
            if file_type.is_dir() {
                self.walk(&path, keys)?;
            } else if let Some(key) = path.strip_prefix(&self.root) {
                keys.push(key);
            }
        }
        Ok(())
    }
}

impl FragmentStore for DirStore {
    fn list(&self) -> Result<Vec<NormalizedPath>> {
        let mut keys = Vec::new();
        self.walk(&self.root, &mut keys)?;
        tracing::debug!(root = %self.root, fragments = keys.len(), "listed template store");
        Ok(keys)
    }

    fn read(&self, key: &NormalizedPath) -> Result<String> {
        let path = self.root.join(key.as_str());
        relgen_fs::io::read_text(&path).map_err(|e| {
            if e.is_not_found() {
                Error::FragmentNotFound {
                    key: key.to_string(),
                }
            } else {
                e.into()
            }
        })
    }
}

/// Fragments held in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    fragments: BTreeMap<NormalizedPath, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: &str, source: impl Into<String>) {
        self.fragments.insert(NormalizedPath::new(key), source.into());
    }

    /// Builder-style [`insert`](Self::insert).
    pub fn with(mut self, key: &str, source: impl Into<String>) -> Self {
        self.insert(key, source);
        self
    }
}

impl FragmentStore for MemoryStore {
    fn list(&self) -> Result<Vec<NormalizedPath>> {
        Ok(self.fragments.keys().cloned().collect())
    }

    fn read(&self, key: &NormalizedPath) -> Result<String> {
        self.fragments
            .get(key)
            .cloned()
            .ok_or_else(|| Error::FragmentNotFound {
                key: key.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use relgen_test_utils::TemplateTree;

    #[test]
    fn dir_store_lists_sorted_relative_keys() {
        let tree = TemplateTree::new()
            .file("b/z.tmpl", "z")
            .file("a.tmpl", "a")
            .file("b/a.tmpl", "ba")
            .dir("empty");
        let store = DirStore::new(tree.root());

        let keys: Vec<String> = store
            .list()
            .unwrap()
            .into_iter()
            .map(|k| k.to_string())
            .collect();
        assert_eq!(keys, vec!["a.tmpl", "b/a.tmpl", "b/z.tmpl"]);
        assert_eq!(store.read(&NormalizedPath::new("b/a.tmpl")).unwrap(), "ba");
    }

    #[test]
    fn missing_fragment_is_reported_by_key() {
        let tree = TemplateTree::new();
        let store = DirStore::new(tree.root());
        let err = store.read(&NormalizedPath::new("nope.tmpl")).unwrap_err();
        assert!(matches!(err, Error::FragmentNotFound { key } if key == "nope.tmpl"));

        let err = MemoryStore::new()
            .read(&NormalizedPath::new("nope.tmpl"))
            .unwrap_err();
        assert!(matches!(err, Error::FragmentNotFound { .. }));
    }
}
