//! Shared application state

use relgen_fs::NormalizedPath;
use relgen_variations::{Parsed, TestsuiteVariations, load_file};
use tokio::sync::RwLock;

use crate::{Error, Result};

/// Variations held for the life of the server.
///
/// Queries take the read lock; a reload parses the source file off the
/// async runtime and swaps the whole value under the write lock.
pub struct AppState {
    pub variations: RwLock<TestsuiteVariations>,
    source: Option<NormalizedPath>,
    default_branch: String,
}

impl AppState {
    /// State over already parsed variations, without a reload source.
    pub fn new(variations: TestsuiteVariations) -> Self {
        Self {
            variations: RwLock::new(variations),
            source: None,
            default_branch: relgen_variations::DEFAULT_BRANCH.to_string(),
        }
    }

    /// Load variations from `path`, which later reloads re-read.
    pub fn load(path: NormalizedPath, default_branch: &str) -> Result<Self> {
        let parsed = load_file(&path)?;
        Ok(Self {
            variations: RwLock::new(parsed.variations.with_default_branch(default_branch)),
            source: Some(path),
            default_branch: default_branch.to_string(),
        })
    }

    pub fn source(&self) -> Option<&NormalizedPath> {
        self.source.as_ref()
    }

    /// Re-read the source file and replace the held variations.
    pub async fn reload(&self) -> Result<Parsed> {
        let path = self.source.clone().ok_or(Error::NoSource)?;
        let parsed = tokio::task::spawn_blocking(move || load_file(&path)).await??;

        let mut held = self.variations.write().await;
        *held = parsed
            .variations
            .clone()
            .with_default_branch(self.default_branch.clone());
        tracing::info!(
            repos = held.repos().len(),
            warnings = parsed.warnings.len(),
            "reloaded variations"
        );
        Ok(parsed)
    }
}
