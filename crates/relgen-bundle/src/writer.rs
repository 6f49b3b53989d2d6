//! Output writers for rendered files

use std::collections::BTreeMap;

use relgen_fs::NormalizedPath;

use crate::Result;

/// Destination for rendered files.
pub trait OutputWriter {
    /// Store `content` at the bundle-relative `path`.
    fn write(&mut self, path: &NormalizedPath, content: &[u8]) -> Result<()>;
}

/// Writes below a root directory, creating intermediate directories.
///
/// Files are written atomically under a lock. `*.sh` outputs are made
/// executable.
#[derive(Debug, Clone)]
pub struct DirWriter {
    root: NormalizedPath,
}

impl DirWriter {
    pub fn new(root: impl Into<NormalizedPath>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &NormalizedPath {
        &self.root
    }
}

impl OutputWriter for DirWriter {
    fn write(&mut self, path: &NormalizedPath, content: &[u8]) -> Result<()> {
        let target = self.root.join(path.as_str());
        relgen_fs::io::write_atomic(&target, content)?;
        if target.extension() == Some("sh") {
            relgen_fs::io::make_executable(&target)?;
        }
        Ok(())
    }
}

/// Collects rendered files in memory, keyed by path.
#[derive(Debug, Clone, Default)]
pub struct MemoryWriter {
    files: BTreeMap<NormalizedPath, Vec<u8>>,
}

impl MemoryWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn files(&self) -> &BTreeMap<NormalizedPath, Vec<u8>> {
        &self.files
    }

    /// Content at `path` as UTF-8 text.
    pub fn text(&self, path: &str) -> Option<&str> {
        self.files
            .get(&NormalizedPath::new(path))
            .and_then(|b| std::str::from_utf8(b).ok())
    }

    pub fn into_files(self) -> BTreeMap<NormalizedPath, Vec<u8>> {
        self.files
    }
}

impl OutputWriter for MemoryWriter {
    fn write(&mut self, path: &NormalizedPath, content: &[u8]) -> Result<()> {
        self.files.insert(path.clone(), content.to_vec());
        Ok(())
    }
}
