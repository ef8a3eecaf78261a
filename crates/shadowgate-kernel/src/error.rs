//! Error types for whitelist parsing and handler route scanning.

/// Fatal conditions raised while loading reconciliation inputs.
#[derive(Debug, thiserror::Error)]
pub enum RouteError {
    /// A whitelist or source file could not be read.
    #[error("failed to read file: {path}: {source}")]
    ReadFile {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The handler tree could not be walked.
    #[error("failed to walk {root}: {message}")]
    Walk { root: String, message: String },

    /// The whitelist yielded no critical/high route records.
    #[error("no critical/high routes parsed from whitelist: {path}")]
    EmptyWhitelist { path: String },

    /// The handler tree yielded no registered routes.
    #[error("no registered routes parsed from handler source: {root}")]
    EmptyRegistry { root: String },
}
