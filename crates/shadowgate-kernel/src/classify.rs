//! Classification of critical whitelist routes against the registered set.
//!
//! Existence is checked before metadata: a critical route that cannot be
//! found registered is always blocking, whatever its declared `goStatus`.
//! A route that exists but whose `goStatus` claims it is `missing` or a
//! `stub` is metadata drift, not a blocker.

use crate::path::normalize_path;
use crate::registry::{RegisteredRoute, RegisteredRoutes};
use crate::whitelist::RouteRecord;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

const DEFAULT_METHOD: &str = "GET";

/// Routes renamed between the legacy and the new implementation.
///
/// Keys and values are `(METHOD, normalized path)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AliasMap {
    entries: BTreeMap<RegisteredRoute, RegisteredRoute>,
}

impl Default for AliasMap {
    fn default() -> Self {
        Self::builtin()
    }
}

impl AliasMap {
    pub fn empty() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    /// The known renames.
    pub fn builtin() -> Self {
        let mut map = Self::empty();
        map.insert(
            "GET",
            "/templateMarket/searchTemplate",
            "GET",
            "/templateMarket/search",
        );
        map
    }

    /// Register `from -> to`. Methods are upper-cased and paths normalized.
    pub fn insert(&mut self, from_method: &str, from_path: &str, to_method: &str, to_path: &str) {
        self.entries.insert(
            RegisteredRoute::new(from_method.to_ascii_uppercase(), normalize_path(from_path)),
            RegisteredRoute::new(to_method.to_ascii_uppercase(), normalize_path(to_path)),
        );
    }

    pub fn resolve(&self, method: &str, path: &str) -> Option<&RegisteredRoute> {
        self.entries.get(&RegisteredRoute::new(method, path))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Why a route landed in the blocking or non-blocking list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Reason {
    RouteMissing,
    MetadataStale,
    Partial,
}

impl Reason {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::RouteMissing => "route-missing",
            Self::MetadataStale => "metadata-stale",
            Self::Partial => "partial",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "verdict", content = "reason", rename_all = "kebab-case")]
pub enum Verdict {
    Blocking(Reason),
    NonBlocking(Reason),
    Clean,
}

/// One classified route as it is reported.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassifiedRoute {
    /// `"<METHOD> <normalized path>"`.
    pub route: String,
    pub owner: String,
    /// Displayed status; rewritten to `route-missing` or `metadata-stale`
    /// when the verdict reclassifies the declared one.
    pub go_status: String,
    pub notes: String,
    pub reason: Reason,
}

impl ClassifiedRoute {
    pub fn basis(&self) -> String {
        format!("goStatus={}", self.go_status)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Classification {
    pub blocking: Vec<ClassifiedRoute>,
    pub non_blocking: Vec<ClassifiedRoute>,
    /// Critical routes that were found and carry no drift.
    pub clean: usize,
    /// Critical routes considered.
    pub evaluated: usize,
}

impl Classification {
    pub fn has_blocking(&self) -> bool {
        !self.blocking.is_empty()
    }
}

fn request_key(record: &RouteRecord) -> (String, String) {
    let method = record.method.trim();
    let method = if method.is_empty() {
        DEFAULT_METHOD.to_string()
    } else {
        method.to_ascii_uppercase()
    };
    (method, normalize_path(&record.path))
}

fn is_registered(
    method: &str,
    path: &str,
    registered: &RegisteredRoutes,
    aliases: &AliasMap,
) -> bool {
    if registered.contains(method, path) {
        return true;
    }
    aliases
        .resolve(method, path)
        .is_some_and(|alias| registered.contains(&alias.method, &alias.path))
}

/// Decide a single record's verdict. The record's section is not consulted.
pub fn classify_record(
    record: &RouteRecord,
    registered: &RegisteredRoutes,
    aliases: &AliasMap,
) -> Verdict {
    let (method, path) = request_key(record);
    if !is_registered(&method, &path, registered, aliases) {
        return Verdict::Blocking(Reason::RouteMissing);
    }
    match record.go_status_or_default() {
        "missing" | "stub" => Verdict::NonBlocking(Reason::MetadataStale),
        "partial" => Verdict::NonBlocking(Reason::Partial),
        _ => Verdict::Clean,
    }
}

/// Classify every critical record, preserving declaration order.
pub fn classify_routes(
    records: &[RouteRecord],
    registered: &RegisteredRoutes,
    aliases: &AliasMap,
) -> Classification {
    let mut out = Classification::default();
    for record in records.iter().filter(|r| r.is_critical()) {
        out.evaluated += 1;
        let (method, path) = request_key(record);
        let verdict = classify_record(record, registered, aliases);
        let entry = |reason: Reason, go_status: &str| ClassifiedRoute {
            route: format!("{method} {path}"),
            owner: record.owner_or_default().to_string(),
            go_status: go_status.to_string(),
            notes: record.notes.clone().unwrap_or_default(),
            reason,
        };
        match verdict {
            Verdict::Blocking(reason) => out.blocking.push(entry(reason, reason.as_str())),
            Verdict::NonBlocking(Reason::MetadataStale) => out
                .non_blocking
                .push(entry(Reason::MetadataStale, Reason::MetadataStale.as_str())),
            Verdict::NonBlocking(reason) => out
                .non_blocking
                .push(entry(reason, record.go_status_or_default())),
            Verdict::Clean => out.clean += 1,
        }
    }
    tracing::debug!(
        evaluated = out.evaluated,
        blocking = out.blocking.len(),
        non_blocking = out.non_blocking.len(),
        clean = out.clean,
        "classified critical routes"
    );
    out
}
