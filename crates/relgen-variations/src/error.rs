//! Error types for relgen-variations

use std::path::PathBuf;

/// Result type for relgen-variations operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while loading or querying variations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("no variations for repo {repo}")]
    RepoNotFound { repo: String },

    #[error("no variation {repo}/{branch}/{trigger}/{testsuite}")]
    VariationNotFound {
        repo: String,
        branch: String,
        trigger: String,
        testsuite: String,
    },

    #[error("unknown variation field {field:?}, expected one of {expected}")]
    UnknownField { field: String, expected: String },

    #[error("no loadable variation files in {}", .dir.display())]
    NoLoadableFiles { dir: PathBuf },

    #[error("failed to write outputs: {0}")]
    Output(#[from] std::io::Error),

    #[error("failed to encode variation field: {0}")]
    Encode(#[from] serde_json::Error),

    /// Filesystem or document parse error from relgen-fs
    #[error(transparent)]
    Fs(#[from] relgen_fs::Error),
}

impl Error {
    /// True for queries naming something the loaded matrix does not have.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::RepoNotFound { .. } | Self::VariationNotFound { .. }
        )
    }
}
