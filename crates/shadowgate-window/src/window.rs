//! Window directory layout and metric assembly.

use crate::error::WindowError;
use crate::extract::{extract_decimal, extract_number, extract_text};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const SUMMARY_FILE: &str = "window-summary.md";
pub const DECISION_FILE: &str = "shadow-gate-decision.md";
pub const ALERT_PROBE_FILE: &str = "alert-probe.md";

const COMPLETED_HOURS_PATTERN: &str = r"Duration Hours \(completed\):\s*(\d+)";
const REQUESTED_HOURS_PATTERN: &str = r"Duration Hours \(requested\):\s*(\d+)";
const OVERALL_STATUS_PATTERN: &str = r"Overall Status:\s*(\w+)";
const MISMATCH_RATE_PATTERN: &str = r"Mismatch rate:\s*([0-9]+(?:\.[0-9]+)?)%";
const SECURITY_INCIDENTS_PATTERN: &str = r"Security incidents:\s*(\d+)";
const SEV1_PATTERN: &str = r"Sev-1 regressions:\s*(\d+)";
const SEV2_PATTERN: &str = r"Sev-2 regressions:\s*(\d+)";
const DECISION_PATTERN: &str = r"Decision:\s*([A-Z\-]+)";

const NO_ALERT_MARKER: &str = "- none";

/// Alert-probe state for the last completed checkpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertProbe {
    /// The probe exists and lists no alerts.
    None,
    /// The probe exists and lists at least one alert.
    Triggered,
    /// No probe was recorded.
    Unknown,
}

impl AlertProbe {
    pub fn from_text(text: &str) -> Self {
        if text.contains(NO_ALERT_MARKER) {
            Self::None
        } else {
            Self::Triggered
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Triggered => "triggered",
            Self::Unknown => "unknown",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryFields {
    pub completed_hours: u64,
    pub requested_hours: u64,
    pub status: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DecisionFields {
    pub mismatch_rate: f64,
    pub security_incidents: u64,
    pub sev1_regressions: u64,
    pub sev2_regressions: u64,
    pub decision: String,
}

/// Metrics of one shadow window, with source paths for traceability.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WindowMetrics {
    pub requested_hours: u64,
    pub completed_hours: u64,
    pub status: String,
    pub decision: String,
    /// Percentage, e.g. `0.37` for 0.37%.
    pub mismatch_rate: f64,
    pub security_incidents: u64,
    pub sev1_regressions: u64,
    pub sev2_regressions: u64,
    pub alert_probe: AlertProbe,
    pub summary_file: String,
    pub decision_file: String,
    #[serde(default)]
    pub alert_file: Option<String>,
}

impl WindowMetrics {
    pub fn alert_file_display(&self) -> &str {
        self.alert_file.as_deref().unwrap_or("n/a")
    }

    pub fn has_incidents(&self) -> bool {
        self.security_incidents > 0 || self.sev1_regressions > 0 || self.sev2_regressions > 0
    }
}

pub fn parse_summary(text: &str) -> Result<SummaryFields, WindowError> {
    Ok(SummaryFields {
        completed_hours: extract_number(text, COMPLETED_HOURS_PATTERN)?,
        requested_hours: extract_number(text, REQUESTED_HOURS_PATTERN)?,
        status: extract_text(text, OVERALL_STATUS_PATTERN)?,
    })
}

pub fn parse_decision(text: &str) -> Result<DecisionFields, WindowError> {
    Ok(DecisionFields {
        mismatch_rate: extract_decimal(text, MISMATCH_RATE_PATTERN)?,
        security_incidents: extract_number(text, SECURITY_INCIDENTS_PATTERN)?,
        sev1_regressions: extract_number(text, SEV1_PATTERN)?,
        sev2_regressions: extract_number(text, SEV2_PATTERN)?,
        decision: extract_text(text, DECISION_PATTERN)?,
    })
}

/// `<window-dir>/checkpoint-H<completed>`, hours zero-padded to two digits.
pub fn checkpoint_dir(window_dir: impl AsRef<Path>, completed_hours: u64) -> PathBuf {
    window_dir
        .as_ref()
        .join(format!("checkpoint-H{completed_hours:02}"))
}

fn read_required(path: &Path, kind: &'static str) -> Result<String, WindowError> {
    if !path.is_file() {
        return Err(WindowError::MissingArtifact {
            kind,
            path: path.display().to_string(),
        });
    }
    fs::read_to_string(path).map_err(|source| WindowError::ReadFile {
        path: path.display().to_string(),
        source,
    })
}

pub fn read_window(window_dir: impl AsRef<Path>) -> Result<WindowMetrics, WindowError> {
    let window_dir = window_dir.as_ref();
    let summary_path = window_dir.join(SUMMARY_FILE);
    let summary = parse_summary(&read_required(&summary_path, "window summary")?)?;

    let checkpoint = checkpoint_dir(window_dir, summary.completed_hours);
    let decision_path = checkpoint.join(DECISION_FILE);
    let decision = parse_decision(&read_required(&decision_path, "decision report")?)?;

    let alert_path = checkpoint.join(ALERT_PROBE_FILE);
    let (alert_probe, alert_file) = if alert_path.is_file() {
        let text = fs::read_to_string(&alert_path).map_err(|source| WindowError::ReadFile {
            path: alert_path.display().to_string(),
            source,
        })?;
        (
            AlertProbe::from_text(&text),
            Some(alert_path.display().to_string()),
        )
    } else {
        (AlertProbe::Unknown, None)
    };

    tracing::info!(
        window = %window_dir.display(),
        completed = summary.completed_hours,
        decision = %decision.decision,
        alert = alert_probe.as_str(),
        "read shadow window"
    );

    Ok(WindowMetrics {
        requested_hours: summary.requested_hours,
        completed_hours: summary.completed_hours,
        status: summary.status,
        decision: decision.decision,
        mismatch_rate: decision.mismatch_rate,
        security_incidents: decision.security_incidents,
        sev1_regressions: decision.sev1_regressions,
        sev2_regressions: decision.sev2_regressions,
        alert_probe,
        summary_file: summary_path.display().to_string(),
        decision_file: decision_path.display().to_string(),
        alert_file,
    })
}
