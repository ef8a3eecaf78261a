//! Optional TOML configuration.
//!
//! ```toml
//! handler_root = "internal/transport/http/handler"
//! source_extension = "go"
//!
//! [[alias]]
//! method = "GET"
//! from = "/templateMarket/searchTemplate"
//! to = "/templateMarket/search"
//! ```
//!
//! Command-line flags win over config values, which win over built-in
//! defaults. Aliases are added on top of the built-in table.

use serde::Deserialize;
use shadowgate_kernel::{AliasMap, DEFAULT_SOURCE_EXTENSION, RouteScanner};
use std::fs;
use std::path::Path;

pub const DEFAULT_HANDLER_ROOT: &str = "internal/transport/http/handler";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GateConfig {
    #[serde(default)]
    pub handler_root: Option<String>,
    #[serde(default)]
    pub source_extension: Option<String>,
    #[serde(default, rename = "alias")]
    pub aliases: Vec<AliasEntry>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AliasEntry {
    pub method: String,
    pub from: String,
    pub to: String,
    #[serde(default)]
    pub to_method: Option<String>,
}

impl GateConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, String> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)
            .map_err(|err| format!("failed to read config {}: {err}", path.display()))?;
        Self::parse(&text).map_err(|err| format!("invalid config {}: {err}", path.display()))
    }

    pub fn parse(text: &str) -> Result<Self, String> {
        toml::from_str(text).map_err(|err| err.to_string())
    }

    pub fn handler_root(&self, flag: Option<String>) -> String {
        flag.or_else(|| self.handler_root.clone())
            .unwrap_or_else(|| DEFAULT_HANDLER_ROOT.to_string())
    }

    pub fn scanner(&self) -> RouteScanner {
        RouteScanner::with_extension(
            self.source_extension
                .as_deref()
                .unwrap_or(DEFAULT_SOURCE_EXTENSION),
        )
    }

    pub fn alias_map(&self) -> AliasMap {
        let mut aliases = AliasMap::builtin();
        for entry in &self.aliases {
            let to_method = entry.to_method.as_deref().unwrap_or(&entry.method);
            aliases.insert(&entry.method, &entry.from, to_method, &entry.to);
        }
        aliases
    }
}
