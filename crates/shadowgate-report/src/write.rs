//! Artifact writing. Existing files are overwritten.

use crate::error::ReportError;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Write `contents` to `path`, creating parent directories, and return the
/// absolute path written.
pub fn write_text(path: impl AsRef<Path>, contents: &str) -> Result<PathBuf, ReportError> {
    let path = path.as_ref();
    let write_err = |source| ReportError::WriteFile {
        path: path.display().to_string(),
        source,
    };
    let absolute = std::path::absolute(path).map_err(write_err)?;
    if let Some(parent) = absolute.parent() {
        fs::create_dir_all(parent).map_err(write_err)?;
    }
    fs::write(&absolute, contents).map_err(write_err)?;
    tracing::info!(path = %absolute.display(), bytes = contents.len(), "wrote artifact");
    Ok(absolute)
}

/// Pretty JSON with a trailing newline.
pub fn write_json<T: Serialize>(
    path: impl AsRef<Path>,
    artifact: &'static str,
    value: &T,
) -> Result<PathBuf, ReportError> {
    let mut rendered = serde_json::to_string_pretty(value)
        .map_err(|source| ReportError::Serialize { artifact, source })?;
    rendered.push('\n');
    write_text(path, &rendered)
}
