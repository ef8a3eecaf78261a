//! Labeled-pattern extraction from free text.
//!
//! Each pattern carries exactly one capture group holding the value. A pattern
//! that does not match is reported verbatim so the malformed document can be
//! located.

use crate::error::WindowError;
use regex::Regex;

fn compile_regex(pattern: &str) -> Result<Regex, WindowError> {
    Regex::new(pattern).map_err(|source| WindowError::InvalidPattern {
        pattern: pattern.to_string(),
        message: source.to_string(),
    })
}

fn captured<'t>(text: &'t str, pattern: &str) -> Result<&'t str, WindowError> {
    let re = compile_regex(pattern)?;
    re.captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
        .ok_or_else(|| WindowError::PatternNotFound {
            pattern: pattern.to_string(),
        })
}

pub fn extract_number(text: &str, pattern: &str) -> Result<u64, WindowError> {
    let raw = captured(text, pattern)?;
    raw.parse().map_err(|_| WindowError::InvalidValue {
        pattern: pattern.to_string(),
        value: raw.to_string(),
    })
}

pub fn extract_decimal(text: &str, pattern: &str) -> Result<f64, WindowError> {
    let raw = captured(text, pattern)?;
    raw.parse().map_err(|_| WindowError::InvalidValue {
        pattern: pattern.to_string(),
        value: raw.to_string(),
    })
}

pub fn extract_text(text: &str, pattern: &str) -> Result<String, WindowError> {
    captured(text, pattern).map(str::to_string)
}
