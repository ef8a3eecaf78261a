//! Error types for shadow window reading.

#[derive(Debug, thiserror::Error)]
pub enum WindowError {
    /// A required window document does not exist.
    #[error("{kind} not found: {path}")]
    MissingArtifact { kind: &'static str, path: String },

    #[error("failed to read file: {path}: {source}")]
    ReadFile {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// A required labeled field is absent from a document.
    #[error("pattern not found: {pattern}")]
    PatternNotFound { pattern: String },

    /// A labeled field matched but its value does not fit the expected type.
    #[error("invalid value {value:?} for pattern: {pattern}")]
    InvalidValue { pattern: String, value: String },

    #[error("invalid regex pattern {pattern:?}: {message}")]
    InvalidPattern { pattern: String, message: String },
}
