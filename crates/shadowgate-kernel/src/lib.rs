//! # Shadowgate Kernel
//!
//! Reconciles a declarative route whitelist against the routes a service
//! actually registers, and classifies every critical whitelist entry as a
//! blocking defect, non-blocking drift, or clean.
//!
//! ## Architecture
//!
//! ```text
//! whitelist text ──▶ parse_whitelist ──▶ Vec<RouteRecord> ─┐
//!                                                          ├─▶ classify_routes ──▶ Classification
//! handler tree ────▶ RouteScanner ─────▶ RegisteredRoutes ─┤
//!                                                          │
//!                    AliasMap ─────────────────────────────┘
//! ```
//!
//! Both inputs are compared through [`normalize_path`], which rewrites
//! `{name}` placeholders into `:name`.

pub mod classify;
pub mod error;
pub mod path;
pub mod registry;
pub mod whitelist;

pub use classify::{
    AliasMap, Classification, ClassifiedRoute, Reason, Verdict, classify_record, classify_routes,
};
pub use error::RouteError;
pub use path::normalize_path;
pub use registry::{
    DEFAULT_SOURCE_EXTENSION, RegisteredRoute, RegisteredRoutes, RouteScanner,
    load_registered_routes,
};
pub use whitelist::{RouteRecord, Section, load_whitelist, parse_whitelist};
