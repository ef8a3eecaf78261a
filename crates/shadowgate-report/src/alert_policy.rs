//! Alert-policy document.

use crate::dashboard::DOCUMENT_VERSION;
use crate::error::ReportError;
use crate::yaml::emit_yaml;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AlertPolicy {
    pub version: String,
    pub generated_at: String,
    pub source_whitelist: String,
    pub severity_model: SeverityModel,
    pub rules: Vec<AlertRule>,
    pub escalation: Escalation,
}

/// Expected response per severity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SeverityModel {
    pub critical: String,
    pub high: String,
    pub warning: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AlertRule {
    pub name: String,
    pub expr: String,
    #[serde(rename = "for")]
    pub for_duration: String,
    pub severity: String,
    pub action: String,
}

impl AlertRule {
    fn new(name: &str, expr: &str, for_duration: &str, severity: &str, action: &str) -> Self {
        Self {
            name: name.to_string(),
            expr: expr.to_string(),
            for_duration: for_duration.to_string(),
            severity: severity.to_string(),
            action: action.to_string(),
        }
    }
}

/// Contacts per severity tier, in paging order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Escalation {
    pub critical: Vec<String>,
    pub high: Vec<String>,
    pub warning: Vec<String>,
}

fn contacts(names: &[&str]) -> Vec<String> {
    names.iter().map(|name| name.to_string()).collect()
}

pub fn build_alert_policy(whitelist_path: &str, generated_at: &str) -> AlertPolicy {
    AlertPolicy {
        version: DOCUMENT_VERSION.to_string(),
        generated_at: generated_at.to_string(),
        source_whitelist: whitelist_path.to_string(),
        severity_model: SeverityModel {
            critical: "block cutover immediately".to_string(),
            high: "investigate within 30m".to_string(),
            warning: "review within 4h".to_string(),
        },
        rules: vec![
            AlertRule::new(
                "shadow_mismatch_rate_block",
                r#"shadow_mismatch_rate_percent{scope="critical"} >= 1"#,
                "5m",
                "critical",
                "no-go",
            ),
            AlertRule::new(
                "shadow_security_incident_block",
                r#"shadow_security_incidents_total{severity=~"critical|high"} > 0"#,
                "1m",
                "critical",
                "no-go",
            ),
            AlertRule::new(
                "shadow_sev12_regression_block",
                r#"shadow_regressions_total{severity=~"sev1|sev2"} > 0"#,
                "1m",
                "critical",
                "no-go",
            ),
            AlertRule::new(
                "shadow_error_distribution_warn",
                "sum(rate(shadow_route_errors_total[5m])) > 0",
                "10m",
                "warning",
                "investigate",
            ),
        ],
        escalation: Escalation {
            critical: contacts(&[
                "Observability Engineer",
                "Release Manager",
                "Engineering Manager",
            ]),
            high: contacts(&["Observability Engineer", "API Compatibility Owner"]),
            warning: contacts(&["Observability Engineer"]),
        },
    }
}

pub fn render_alert_policy(policy: &AlertPolicy) -> Result<String, ReportError> {
    let value = serde_json::to_value(policy).map_err(|source| ReportError::Serialize {
        artifact: "alert policy",
        source,
    })?;
    Ok(emit_yaml(&value))
}
