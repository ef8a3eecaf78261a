//! Artifact rendering for shadowgate.
//!
//! Every generator is a pure function from already-computed data (and a
//! caller-supplied timestamp) to a document; [`write`] puts documents on disk.

pub mod alert_policy;
pub mod classification;
pub mod dashboard;
pub mod error;
pub mod write;
pub mod yaml;

pub use alert_policy::{AlertPolicy, build_alert_policy, render_alert_policy};
pub use classification::{MismatchCategory, SecuritySummary, render_classification_report};
pub use dashboard::{Dashboard, build_dashboard};
pub use error::ReportError;
pub use write::{write_json, write_text};
pub use yaml::emit_yaml;

use chrono::{DateTime, Utc};

/// UTC, second precision, `Z`-suffixed.
pub fn format_timestamp(at: DateTime<Utc>) -> String {
    at.format("%Y-%m-%dT%H:%M:%SZ").to_string()
}

pub fn now_timestamp() -> String {
    format_timestamp(Utc::now())
}
