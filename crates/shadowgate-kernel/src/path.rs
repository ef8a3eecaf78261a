//! Canonical path-parameter syntax.

use regex::Regex;
use std::sync::OnceLock;

fn brace_param_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\{([a-zA-Z0-9_]+)\}").expect("brace-param regex must compile"))
}

/// Rewrite `{name}` placeholders into `:name` so whitelist paths and
/// registered handler paths compare equal.
///
/// Already-canonical `:name` segments pass through untouched, so applying
/// the rewrite twice is the same as applying it once.
pub fn normalize_path(path: &str) -> String {
    brace_param_re().replace_all(path, ":$1").into_owned()
}
