use std::path::PathBuf;

/// Alias for `Result<T, LfError>`.
pub type LfResult<T> = Result<T, LfError>;

/// Errors that can occur while loading data, validating input, or persisting files.
#[derive(Debug, thiserror::Error)]
pub enum LfError {
    /// A file exists but could not be read or written.
    #[error("cannot access {}: {source}", .path.display())]
    Io {
        /// The file that failed.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A file was read but does not contain valid JSON for the expected shape.
    #[error("invalid JSON in {}: {source}", .path.display())]
    Parse {
        /// The file that failed to parse.
        path: PathBuf,
        /// The underlying decode error.
        #[source]
        source: serde_json::Error,
    },

    /// A value could not be encoded as JSON.
    #[error("JSON serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    /// A required file or named template does not exist.
    #[error("{0} not found")]
    NotFound(String),

    /// The target of a create operation already exists.
    #[error("{0} already exists")]
    AlreadyExists(String),

    /// A caller-supplied argument is missing or out of range.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Input is well-formed but semantically rejected.
    #[error("validation error: {0}")]
    Validation(String),
}
