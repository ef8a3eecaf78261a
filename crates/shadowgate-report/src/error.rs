//! Error types for artifact rendering and writing.

#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error("failed to serialize {artifact}: {source}")]
    Serialize {
        artifact: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to write file: {path}: {source}")]
    WriteFile {
        path: String,
        #[source]
        source: std::io::Error,
    },
}
