//! Error types for relgen-cli

/// Result type for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;

/// Errors that can occur in CLI operations
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Error from relgen-policy
    #[error(transparent)]
    Policy(#[from] relgen_policy::Error),

    /// Error from relgen-bundle
    #[error(transparent)]
    Bundle(#[from] relgen_bundle::Error),

    /// Error from relgen-variations
    #[error(transparent)]
    Variations(#[from] relgen_variations::Error),

    /// Error from relgen-server
    #[error(transparent)]
    Server(#[from] relgen_server::Error),

    /// Error from relgen-fs
    #[error(transparent)]
    Fs(#[from] relgen_fs::Error),

    /// Standard I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// JSON encoding error
    #[error("failed to encode JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// User-facing error with a message
    #[error("{message}")]
    User { message: String },
}

impl CliError {
    /// Create a new user error with the given message
    pub fn user(message: impl Into<String>) -> Self {
        Self::User {
            message: message.into(),
        }
    }
}
