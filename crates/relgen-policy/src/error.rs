//! Error types for relgen-policy

/// Result type for relgen-policy operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while loading or resolving policies
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The repo has no entry under `repos`
    #[error("repo {repo} unknown among {known:?}")]
    RepoNotFound { repo: String, known: Vec<String> },

    /// A `source_branch` chain names a branch absent from the repo's branch map
    #[error("repo {repo}: source_branch chain of {branch} references {missing}, which is not in the branch map")]
    SourceBranchMissing {
        repo: String,
        branch: String,
        missing: String,
    },

    /// A `source_branch` chain loops back on itself
    #[error("repo {repo}: source_branch cycle {}", .chain.join(" -> "))]
    SourceBranchCycle { repo: String, chain: Vec<String> },

    /// A stored timestamp is not in Unix date format
    #[error("invalid timestamp {value:?}: {source}")]
    InvalidTimestamp {
        value: String,
        #[source]
        source: chrono::ParseError,
    },

    /// Filesystem or document parse error from relgen-fs
    #[error(transparent)]
    Fs(#[from] relgen_fs::Error),
}

impl Error {
    /// True for lookups of things the document does not define.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::RepoNotFound { .. })
    }

    /// True for defects in the document itself.
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            Self::SourceBranchMissing { .. } | Self::SourceBranchCycle { .. } | Self::Fs(_)
        )
    }
}
