//! Observability dashboard document.

use serde::Serialize;
use serde_json::{Value, json};
use shadowgate_kernel::{RouteRecord, Section};

pub const DASHBOARD_NAME: &str = "shadow-gate-observability";
pub const DOCUMENT_VERSION: &str = "1.0.0";

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Dashboard {
    pub name: String,
    pub version: String,
    pub generated_at: String,
    pub source_whitelist: String,
    pub coverage: Coverage,
    pub panels: Vec<Panel>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Coverage {
    pub critical_route_count: usize,
    pub high_priority_route_count: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PanelKind {
    Timeseries,
    Stat,
    Table,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Panel {
    pub id: String,
    pub title: String,
    #[serde(rename = "type")]
    pub kind: PanelKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thresholds: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rows: Option<Vec<CoverageRow>>,
}

impl Panel {
    fn query(id: &str, title: &str, kind: PanelKind, query: &str, thresholds: Option<Value>) -> Self {
        Self {
            id: id.to_string(),
            title: title.to_string(),
            kind,
            query: Some(query.to_string()),
            thresholds,
            rows: None,
        }
    }
}

/// One critical route in the coverage table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CoverageRow {
    pub route: String,
    pub owner: String,
    pub priority: String,
    pub blocking_level: String,
    pub go_status: String,
}

impl CoverageRow {
    fn from_record(record: &RouteRecord) -> Self {
        Self {
            route: format!("{} {}", record.method, record.path),
            owner: record.owner_or_default().to_string(),
            priority: record.priority.clone().unwrap_or_else(|| "P0".to_string()),
            blocking_level: record
                .blocking_level
                .clone()
                .unwrap_or_else(|| "critical".to_string()),
            go_status: record.go_status_or_default().to_string(),
        }
    }
}

pub fn build_dashboard(records: &[RouteRecord], whitelist_path: &str, generated_at: &str) -> Dashboard {
    let coverage_rows: Vec<CoverageRow> = records
        .iter()
        .filter(|r| r.section == Section::Critical)
        .map(CoverageRow::from_record)
        .collect();
    let high_priority_route_count = records.iter().filter(|r| r.section == Section::High).count();

    Dashboard {
        name: DASHBOARD_NAME.to_string(),
        version: DOCUMENT_VERSION.to_string(),
        generated_at: generated_at.to_string(),
        source_whitelist: whitelist_path.to_string(),
        coverage: Coverage {
            critical_route_count: coverage_rows.len(),
            high_priority_route_count,
        },
        panels: vec![
            Panel::query(
                "shadow_mismatch_rate",
                "Shadow Critical Route Mismatch Rate",
                PanelKind::Timeseries,
                r#"shadow_mismatch_rate_percent{scope="critical"}"#,
                Some(json!({"warning": 0.5, "critical": 1.0})),
            ),
            Panel::query(
                "shadow_security_incidents",
                "Shadow Critical Security Incidents",
                PanelKind::Stat,
                r#"shadow_security_incidents_total{severity=~"critical|high"}"#,
                Some(json!({"critical": 0})),
            ),
            Panel::query(
                "shadow_sev12_regressions",
                "Shadow Sev-1/Sev-2 Regressions",
                PanelKind::Stat,
                r#"shadow_regressions_total{severity=~"sev1|sev2"}"#,
                Some(json!({"critical": 0})),
            ),
            Panel::query(
                "shadow_error_distribution",
                "Shadow Route Error Distribution",
                PanelKind::Timeseries,
                "sum by (route, error_class) (rate(shadow_route_errors_total[5m]))",
                None,
            ),
            Panel {
                id: "shadow_critical_route_coverage".to_string(),
                title: "Critical Route Coverage".to_string(),
                kind: PanelKind::Table,
                query: None,
                thresholds: None,
                rows: Some(coverage_rows),
            },
        ],
    }
}
