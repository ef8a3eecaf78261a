//! Whitelist parsing.
//!
//! The whitelist is a line-oriented document with three top-level blocks:
//!
//! ```text
//! criticalApis:
//!   - path: "/user/info"
//!     method: "GET"
//!     owner: "identity"
//!     goStatus: "done"
//! highPriorityApis:
//!   - path: "/chart/list"
//!     method: "POST"
//! nativeGoRoutes:
//!   - path: "/healthz"
//! ```
//!
//! Entries in `criticalApis` and `highPriorityApis` become [`RouteRecord`]s.
//! `nativeGoRoutes` is tracked as a section but never opens a record.

use crate::error::RouteError;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use std::sync::OnceLock;

pub const CRITICAL_MARKER: &str = "criticalApis:";
pub const HIGH_MARKER: &str = "highPriorityApis:";
pub const NATIVE_MARKER: &str = "nativeGoRoutes:";

const DEFAULT_OWNER: &str = "unknown";
const DEFAULT_GO_STATUS: &str = "unknown";

/// Which whitelist block an entry was declared under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Section {
    Critical,
    High,
    Native,
}

impl Section {
    fn from_marker(line: &str) -> Option<Self> {
        if line.starts_with(CRITICAL_MARKER) {
            Some(Self::Critical)
        } else if line.starts_with(HIGH_MARKER) {
            Some(Self::High)
        } else if line.starts_with(NATIVE_MARKER) {
            Some(Self::Native)
        } else {
            None
        }
    }

    /// Only critical and high entries are materialized as records.
    fn opens_records(self) -> bool {
        matches!(self, Self::Critical | Self::High)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Critical => "critical",
            Self::High => "high",
            Self::Native => "native",
        }
    }
}

impl std::fmt::Display for Section {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One whitelist-declared API route.
///
/// Values are kept exactly as declared; in particular `method` is not
/// upper-cased here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteRecord {
    pub section: Section,
    pub path: String,
    pub method: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blocking_level: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub go_status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// Declared keys without a dedicated field.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub extra: BTreeMap<String, String>,
}

impl RouteRecord {
    /// Look up any declared key by its whitelist spelling.
    pub fn get(&self, key: &str) -> Option<&str> {
        match key {
            "path" => Some(self.path.as_str()),
            "method" => Some(self.method.as_str()),
            "owner" => self.owner.as_deref(),
            "priority" => self.priority.as_deref(),
            "blockingLevel" => self.blocking_level.as_deref(),
            "goStatus" => self.go_status.as_deref(),
            "notes" => self.notes.as_deref(),
            other => self.extra.get(other).map(String::as_str),
        }
    }

    pub fn owner_or_default(&self) -> &str {
        self.owner.as_deref().unwrap_or(DEFAULT_OWNER)
    }

    pub fn go_status_or_default(&self) -> &str {
        self.go_status.as_deref().unwrap_or(DEFAULT_GO_STATUS)
    }

    pub fn is_critical(&self) -> bool {
        self.section == Section::Critical
    }
}

/// An entry that has been opened by a `- path:` line but not yet committed.
#[derive(Debug)]
struct RecordDraft {
    section: Section,
    fields: BTreeMap<String, String>,
}

impl RecordDraft {
    fn open(section: Section, path: &str) -> Self {
        let mut fields = BTreeMap::new();
        fields.insert("path".to_string(), path.to_string());
        Self { section, fields }
    }

    fn set(&mut self, key: &str, value: &str) {
        self.fields.insert(key.to_string(), value.to_string());
    }

    /// Entries without both `path` and `method` are dropped.
    fn into_record(mut self) -> Option<RouteRecord> {
        let path = self.fields.remove("path")?;
        let method = self.fields.remove("method")?;
        Some(RouteRecord {
            section: self.section,
            path,
            method,
            owner: self.fields.remove("owner"),
            priority: self.fields.remove("priority"),
            blocking_level: self.fields.remove("blockingLevel"),
            go_status: self.fields.remove("goStatus"),
            notes: self.fields.remove("notes"),
            extra: self.fields,
        })
    }
}

fn entry_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r#"^-\s+path:\s+"([^"]+)""#).expect("entry regex must compile"))
}

fn field_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"^([a-zA-Z]+):\s+"([^"]+)""#).expect("field regex must compile")
    })
}

fn commit(draft: Option<RecordDraft>, records: &mut Vec<RouteRecord>) {
    if let Some(record) = draft.and_then(RecordDraft::into_record) {
        records.push(record);
    }
}

/// Advance the open-record state by one line inside a record-bearing section.
fn step(
    open: Option<RecordDraft>,
    section: Section,
    line: &str,
    records: &mut Vec<RouteRecord>,
) -> Option<RecordDraft> {
    if let Some(caps) = entry_re().captures(line) {
        commit(open, records);
        return Some(RecordDraft::open(section, &caps[1]));
    }
    let mut draft = open?;
    if let Some(caps) = field_re().captures(line) {
        draft.set(&caps[1], &caps[2]);
    }
    Some(draft)
}

/// Parse whitelist text into critical/high route records, in declaration order.
pub fn parse_whitelist(text: &str) -> Vec<RouteRecord> {
    let mut section: Option<Section> = None;
    let mut open: Option<RecordDraft> = None;
    let mut records = Vec::new();

    for raw in text.lines() {
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }

        if let Some(next) = Section::from_marker(line) {
            commit(open.take(), &mut records);
            tracing::debug!(section = next.as_str(), "whitelist section");
            section = Some(next);
            continue;
        }

        let Some(active) = section.filter(|s| s.opens_records()) else {
            continue;
        };
        open = step(open, active, line, &mut records);
    }
    commit(open, &mut records);
    records
}

/// Read and parse a whitelist file. Zero records is a configuration error.
pub fn load_whitelist(path: impl AsRef<Path>) -> Result<Vec<RouteRecord>, RouteError> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|source| RouteError::ReadFile {
        path: path.display().to_string(),
        source,
    })?;
    let records = parse_whitelist(&text);
    if records.is_empty() {
        return Err(RouteError::EmptyWhitelist {
            path: path.display().to_string(),
        });
    }
    tracing::info!(
        path = %path.display(),
        critical = records.iter().filter(|r| r.section == Section::Critical).count(),
        high = records.iter().filter(|r| r.section == Section::High).count(),
        "parsed whitelist"
    );
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
version: "1"
criticalApis:
  - path: "/user/info"
    method: "GET"
    owner: "identity"
    priority: "P0"
    blockingLevel: "critical"
    goStatus: "done"
    notes: "session bootstrap"
  - path: "/chart/{id}"
    method: "post"
    ticket: "MIG-12"
highPriorityApis:
  - path: "/dataset/tree"
    method: "POST"
    goStatus: "partial"
nativeGoRoutes:
  - path: "/healthz"
    method: "GET"
    owner: "platform"
"#;

    #[test]
    fn parses_critical_and_high_sections_in_order() {
        let records = parse_whitelist(SAMPLE);
        let summary: Vec<(Section, &str)> = records
            .iter()
            .map(|r| (r.section, r.path.as_str()))
            .collect();
        assert_eq!(
            summary,
            vec![
                (Section::Critical, "/user/info"),
                (Section::Critical, "/chart/{id}"),
                (Section::High, "/dataset/tree"),
            ]
        );
    }

    #[test]
    fn native_section_never_emits_records() {
        let text = r#"
nativeGoRoutes:
  - path: "/healthz"
    method: "GET"
  - path: "/metrics"
    method: "GET"
    goStatus: "done"
"#;
        assert!(parse_whitelist(text).is_empty());
        assert!(
            parse_whitelist(SAMPLE)
                .iter()
                .all(|r| r.section != Section::Native)
        );
    }

    #[test]
    fn entries_without_method_are_dropped() {
        let text = r#"
criticalApis:
  - path: "/no/method"
    owner: "someone"
  - path: "/with/method"
    method: "DELETE"
"#;
        let records = parse_whitelist(text);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].path, "/with/method");
    }

    #[test]
    fn declared_values_round_trip_verbatim() {
        let records = parse_whitelist(SAMPLE);
        let first = &records[0];
        assert_eq!(first.get("owner"), Some("identity"));
        assert_eq!(first.get("priority"), Some("P0"));
        assert_eq!(first.get("blockingLevel"), Some("critical"));
        assert_eq!(first.get("goStatus"), Some("done"));
        assert_eq!(first.get("notes"), Some("session bootstrap"));

        let second = &records[1];
        assert_eq!(second.method, "post");
        assert_eq!(second.get("ticket"), Some("MIG-12"));
        assert_eq!(second.owner, None);
        assert_eq!(second.owner_or_default(), "unknown");
        assert_eq!(second.go_status_or_default(), "unknown");
    }

    #[test]
    fn block_marker_commits_open_record() {
        let text = r#"
criticalApis:
  - path: "/a"
    method: "GET"
nativeGoRoutes:
    goStatus: "stub"
"#;
        let records = parse_whitelist(text);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].go_status, None);
    }

    #[test]
    fn lines_before_any_marker_are_ignored() {
        let text = r#"
  - path: "/orphan"
    method: "GET"
criticalApis:
    method: "PUT"
  - path: "/kept"
    method: "GET"
"#;
        let records = parse_whitelist(text);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].path, "/kept");
        assert_eq!(records[0].method, "GET");
    }

    #[test]
    fn unquoted_and_malformed_lines_are_skipped() {
        let text = r#"
criticalApis:
  - path: "/a"
    method: GET
    owner: "team"
    # comment: "ignored"
"#;
        assert!(parse_whitelist(text).is_empty());
    }

    #[test]
    fn empty_text_yields_no_records() {
        assert!(parse_whitelist("").is_empty());
        assert!(parse_whitelist("criticalApis:\nhighPriorityApis:\n").is_empty());
    }
}
