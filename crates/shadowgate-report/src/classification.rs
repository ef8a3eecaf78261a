//! Markdown mismatch and security classification report.

use serde::Serialize;
use shadowgate_kernel::{Classification, ClassifiedRoute};
use shadowgate_window::WindowMetrics;

pub const MISMATCH_BLOCKING_THRESHOLD: f64 = 1.0;
pub const MISMATCH_WARNING_THRESHOLD: f64 = 0.5;

const EMPTY_TABLE_ROW: &str = "| none | n/a | none-observed | n/a |";
const TABLE_HEADER: [&str; 2] = ["| Route | Owner | Basis | Notes |", "|------|-------|-------|-------|"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MismatchCategory {
    Blocking,
    Warning,
    Low,
}

impl MismatchCategory {
    /// `rate` is a percentage.
    pub fn from_rate(rate: f64) -> Self {
        if rate >= MISMATCH_BLOCKING_THRESHOLD {
            Self::Blocking
        } else if rate >= MISMATCH_WARNING_THRESHOLD {
            Self::Warning
        } else {
            Self::Low
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Blocking => "blocking",
            Self::Warning => "warning",
            Self::Low => "low",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SecuritySummary {
    pub category: &'static str,
    pub root_cause: &'static str,
    pub mitigation: &'static str,
    pub status: &'static str,
}

impl SecuritySummary {
    pub fn from_window(window: &WindowMetrics) -> Self {
        if window.has_incidents() {
            Self {
                category: "incidents-detected",
                root_cause: "To be determined by incident review",
                mitigation: "Block cutover and complete remediation",
                status: "open",
            }
        } else {
            Self {
                category: "none",
                root_cause: "N/A",
                mitigation: "N/A",
                status: "closed",
            }
        }
    }
}

fn push_route_table(lines: &mut Vec<String>, routes: &[ClassifiedRoute]) {
    lines.extend(TABLE_HEADER.iter().map(|row| row.to_string()));
    if routes.is_empty() {
        lines.push(EMPTY_TABLE_ROW.to_string());
        return;
    }
    for item in routes {
        lines.push(format!(
            "| {} | {} | {} | {} |",
            item.route,
            item.owner,
            item.basis(),
            item.notes
        ));
    }
}

pub fn render_classification_report(
    window: &WindowMetrics,
    classification: &Classification,
    generated_at: &str,
) -> String {
    let mismatch = MismatchCategory::from_rate(window.mismatch_rate);
    let security = SecuritySummary::from_window(window);

    let mut lines = vec![
        "# Shadow Gate Mismatch and Security Classification Report".to_string(),
        String::new(),
        format!("- Generated At: {generated_at}"),
        format!("- Window Summary: `{}`", window.summary_file),
        format!("- Decision Source: `{}`", window.decision_file),
        format!("- Alert Probe: `{}`", window.alert_file_display()),
        String::new(),
        "## Execution Overview".to_string(),
        String::new(),
        format!("- Requested Hours: {}", window.requested_hours),
        format!("- Completed Hours: {}", window.completed_hours),
        format!("- Window Status: {}", window.status),
        format!("- Gate Decision: {}", window.decision),
        String::new(),
        "## Mismatch Classification".to_string(),
        String::new(),
        format!("- Measured mismatch rate: {:.2}%", window.mismatch_rate),
        format!("- Category: {}", mismatch.as_str()),
        format!("- Threshold: blocking if >= {MISMATCH_BLOCKING_THRESHOLD:.2}%"),
        String::new(),
        "## Security Incident Summary".to_string(),
        String::new(),
        format!("- Critical security incidents: {}", window.security_incidents),
        format!("- Sev-1 regressions: {}", window.sev1_regressions),
        format!("- Sev-2 regressions: {}", window.sev2_regressions),
        format!("- Summary: {}", security.category),
        format!("- Root Cause: {}", security.root_cause),
        format!("- Mitigation: {}", security.mitigation),
        format!("- Mitigation Status: {}", security.status),
        String::new(),
        "## Route-level Blocking Defects".to_string(),
        String::new(),
    ];
    push_route_table(&mut lines, &classification.blocking);

    lines.extend([
        String::new(),
        "## Route-level Non-blocking Defects".to_string(),
        String::new(),
    ]);
    push_route_table(&mut lines, &classification.non_blocking);

    lines.extend([
        String::new(),
        "## Notes".to_string(),
        String::new(),
        "- This classification combines shadow window evidence with route registrations observed in handler source.".to_string(),
        "- metadata-stale means the whitelist goStatus disagrees with the observed route registration and needs business-level confirmation.".to_string(),
    ]);

    let mut out = lines.join("\n");
    out.push('\n');
    out
}
