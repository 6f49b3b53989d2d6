//! Error types for relgen-bundle

/// Result type for relgen-bundle operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while building or rendering a bundle
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A fragment container name is already used elsewhere in the tree
    #[error("fragment container {name} at {path} already exists at {existing}")]
    DuplicateContainer {
        name: String,
        path: String,
        existing: String,
    },

    /// A path would turn a file into a directory or the reverse
    #[error("{path} conflicts with an existing node")]
    PathConflict { path: String },

    /// No node exists at the requested path
    #[error("no node at {path} in bundle {bundle}")]
    NodeNotFound { bundle: String, path: String },

    /// A fragment key is not present in the store
    #[error("fragment {key} not found in store")]
    FragmentNotFound { key: String },

    /// Template parse or evaluation failure, including undefined keys
    #[error("render {path}: {source}")]
    Template {
        path: String,
        #[source]
        source: minijinja::Error,
    },

    /// A rendered YAML file does not parse
    #[error("rendered {path} is not valid YAML: {message}")]
    InvalidYaml { path: String, message: String },

    /// Filesystem error from relgen-fs
    #[error(transparent)]
    Fs(#[from] relgen_fs::Error),
}

impl Error {
    /// True for lookups of things the bundle does not contain.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NodeNotFound { .. })
    }

    /// True for failures producing a single output file.
    pub fn is_render_error(&self) -> bool {
        matches!(
            self,
            Self::Template { .. } | Self::InvalidYaml { .. } | Self::FragmentNotFound { .. }
        )
    }
}
