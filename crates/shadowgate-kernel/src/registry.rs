//! Handler route scanning.
//!
//! Recovers the registered `(method, path)` set from handler source text by
//! recognizing two call conventions:
//!
//! - group binding: `api := router.Group("/api")`
//! - registration: `api.GET("/users/:id", h.Get)` (also `POST`, `PUT`,
//!   `DELETE`, `PATCH`, and `Any`)
//!
//! This is a textual recognizer, not a parser. Routes registered through any
//! other indirection are not recovered.

use crate::error::RouteError;
use crate::path::normalize_path;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};
use std::fs;
use std::path::Path;
use std::sync::OnceLock;
use walkdir::WalkDir;

pub const DEFAULT_SOURCE_EXTENSION: &str = "go";

/// A concretely registered route: upper-case method plus normalized path.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RegisteredRoute {
    pub method: String,
    pub path: String,
}

impl RegisteredRoute {
    pub fn new(method: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            path: path.into(),
        }
    }
}

impl std::fmt::Display for RegisteredRoute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.method, self.path)
    }
}

/// The set of routes recovered from a handler tree.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RegisteredRoutes(BTreeSet<RegisteredRoute>);

impl RegisteredRoutes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, route: RegisteredRoute) -> bool {
        self.0.insert(route)
    }

    pub fn contains(&self, method: &str, path: &str) -> bool {
        self.0.contains(&RegisteredRoute::new(method, path))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &RegisteredRoute> {
        self.0.iter()
    }

    pub fn extend(&mut self, other: RegisteredRoutes) {
        self.0.extend(other.0);
    }
}

impl FromIterator<RegisteredRoute> for RegisteredRoutes {
    fn from_iter<I: IntoIterator<Item = RegisteredRoute>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a RegisteredRoutes {
    type Item = &'a RegisteredRoute;
    type IntoIter = std::collections::btree_set::Iter<'a, RegisteredRoute>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

fn group_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"([A-Za-z_][A-Za-z0-9_]*)\s*:=\s*[A-Za-z0-9_.]+\s*\.Group\("([^"]+)"\)"#)
            .expect("group regex must compile")
    })
}

fn route_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"([A-Za-z_][A-Za-z0-9_]*)\.(GET|POST|PUT|DELETE|PATCH|Any)\("([^"]+)""#)
            .expect("route regex must compile")
    })
}

/// Group variable to path prefix, valid for a single source file.
#[derive(Debug, Default)]
struct GroupScope {
    prefixes: HashMap<String, String>,
}

impl GroupScope {
    fn bind(&mut self, variable: &str, prefix: &str) {
        self.prefixes
            .insert(variable.to_string(), prefix.to_string());
    }

    fn prefix(&self, variable: &str) -> Option<&str> {
        self.prefixes.get(variable).map(String::as_str)
    }

    fn scan_line(&mut self, line: &str, routes: &mut RegisteredRoutes) {
        if line.starts_with("//") {
            return;
        }

        if let Some(caps) = group_re().captures(line) {
            self.bind(&caps[1], &caps[2]);
            return;
        }

        let Some(caps) = route_re().captures(line) else {
            return;
        };
        let method = caps[2].to_ascii_uppercase();
        let route_path = &caps[3];
        if let Some(prefix) = self.prefix(&caps[1]) {
            let full = format!("{prefix}{route_path}");
            routes.insert(RegisteredRoute::new(method, normalize_path(&full)));
        } else if route_path.starts_with('/') {
            routes.insert(RegisteredRoute::new(method, normalize_path(route_path)));
        }
    }
}

/// Regular files, plus symlinks that resolve to one. Symlinked directories
/// are not descended into.
fn is_source_file(entry: &walkdir::DirEntry) -> bool {
    entry.file_type().is_file() || (entry.path_is_symlink() && entry.path().is_file())
}

/// Scans handler sources with a given file extension.
#[derive(Debug, Clone)]
pub struct RouteScanner {
    extension: String,
}

impl Default for RouteScanner {
    fn default() -> Self {
        Self::new()
    }
}

impl RouteScanner {
    pub fn new() -> Self {
        Self::with_extension(DEFAULT_SOURCE_EXTENSION)
    }

    /// `extension` may be given with or without the leading dot.
    pub fn with_extension(extension: impl AsRef<str>) -> Self {
        Self {
            extension: extension.as_ref().trim_start_matches('.').to_string(),
        }
    }

    pub fn extension(&self) -> &str {
        &self.extension
    }

    fn accepts(&self, path: &Path) -> bool {
        path.file_name()
            .map(|name| {
                name.to_string_lossy()
                    .ends_with(&format!(".{}", self.extension))
            })
            .unwrap_or(false)
    }

    /// Scan a single file's text. Group bindings start empty and are
    /// discarded afterwards.
    pub fn scan_source(&self, text: &str) -> RegisteredRoutes {
        let mut scope = GroupScope::default();
        let mut routes = RegisteredRoutes::new();
        for raw in text.lines() {
            scope.scan_line(raw.trim(), &mut routes);
        }
        routes
    }

    /// Walk `root` in sorted order and union the routes of every source file.
    /// The first unreadable or non-UTF-8 source file aborts the scan.
    pub fn scan_tree(&self, root: impl AsRef<Path>) -> Result<RegisteredRoutes, RouteError> {
        let root = root.as_ref();
        let mut routes = RegisteredRoutes::new();
        for entry in WalkDir::new(root).sort_by_file_name() {
            let entry = entry.map_err(|err| RouteError::Walk {
                root: root.display().to_string(),
                message: err.to_string(),
            })?;
            if !is_source_file(&entry) || !self.accepts(entry.path()) {
                continue;
            }
            let text = fs::read_to_string(entry.path()).map_err(|source| RouteError::ReadFile {
                path: entry.path().display().to_string(),
                source,
            })?;
            let found = self.scan_source(&text);
            tracing::debug!(path = %entry.path().display(), routes = found.len(), "scanned source");
            routes.extend(found);
        }
        Ok(routes)
    }
}

/// Scan a handler tree. An empty result signals a broken scan root and is a
/// configuration error.
pub fn load_registered_routes(
    root: impl AsRef<Path>,
    scanner: &RouteScanner,
) -> Result<RegisteredRoutes, RouteError> {
    let root = root.as_ref();
    let routes = scanner.scan_tree(root)?;
    if routes.is_empty() {
        return Err(RouteError::EmptyRegistry {
            root: root.display().to_string(),
        });
    }
    tracing::info!(root = %root.display(), routes = routes.len(), "scanned handler tree");
    Ok(routes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use std::time::{SystemTime, UNIX_EPOCH};

    struct TempDirGuard {
        path: PathBuf,
    }

    impl TempDirGuard {
        fn new(prefix: &str) -> Self {
            let unique = SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .expect("clock should be after unix epoch")
                .as_nanos();
            let path = std::env::temp_dir().join(format!(
                "shadowgate-kernel-{prefix}-{}-{unique}",
                std::process::id()
            ));
            fs::create_dir_all(&path).expect("temp dir should be created");
            Self { path }
        }

        fn path(&self) -> &Path {
            &self.path
        }
    }

    impl Drop for TempDirGuard {
        fn drop(&mut self) {
            let _ = fs::remove_dir_all(&self.path);
        }
    }

    fn pairs(routes: &RegisteredRoutes) -> Vec<String> {
        routes.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn group_prefix_is_joined_and_normalized() {
        let source = r#"
func RegisterUser(r *gin.RouterGroup, h *UserHandler) {
    user := r.Group("/user")
    user.GET("/info", h.Info)
    user.POST("/{id}/enable", h.Enable)
}
"#;
        let routes = RouteScanner::new().scan_source(source);
        assert_eq!(pairs(&routes), vec!["GET /user/info", "POST /user/:id/enable"]);
    }

    #[test]
    fn ungrouped_absolute_paths_are_top_level_routes() {
        let source = r#"
    r.GET("/ping", ping)
    r.PUT("relative", nope)
    engine.Any("/proxy/*path", proxy)
"#;
        let routes = RouteScanner::new().scan_source(source);
        assert_eq!(pairs(&routes), vec!["ANY /proxy/*path", "GET /ping"]);
    }

    #[test]
    fn comment_lines_are_skipped() {
        let source = r#"
    // api := r.Group("/api")
    // r.GET("/commented", h)
    api := r.Group("/v2")
    api.DELETE("/item/:id", h.Delete)
"#;
        let routes = RouteScanner::new().scan_source(source);
        assert_eq!(pairs(&routes), vec!["DELETE /v2/item/:id"]);
    }

    #[test]
    fn bindings_are_found_anywhere_in_the_line() {
        let source = r#"
    if g := r.Group("/nested"); g != nil { register(g) }
    g.PATCH("/x", h)
"#;
        let routes = RouteScanner::new().scan_source(source);
        assert_eq!(pairs(&routes), vec!["PATCH /nested/x"]);
    }

    #[test]
    fn group_line_does_not_register_a_route() {
        let source = r#"
    api := r.Group("/api"); r.GET("/same-line", h)
"#;
        assert!(RouteScanner::new().scan_source(source).is_empty());
    }

    #[test]
    fn later_binding_overrides_earlier_one() {
        let source = r#"
    g := r.Group("/first")
    g.GET("/a", h)
    g := r.Group("/second")
    g.GET("/a", h)
"#;
        let routes = RouteScanner::new().scan_source(source);
        assert_eq!(pairs(&routes), vec!["GET /first/a", "GET /second/a"]);
    }

    #[test]
    fn group_bindings_do_not_leak_across_files() {
        let tmp = TempDirGuard::new("no-leak");
        fs::write(
            tmp.path().join("a_user.go"),
            "g := r.Group(\"/user\")\ng.GET(\"/info\", h)\n",
        )
        .expect("write a");
        fs::write(
            tmp.path().join("b_chart.go"),
            "g.GET(\"/list\", h)\ng := r.Group(\"/chart\")\ng.GET(\"/detail\", h)\n",
        )
        .expect("write b");

        let routes = RouteScanner::new().scan_tree(tmp.path()).expect("scan");
        assert_eq!(pairs(&routes), vec!["GET /chart/detail", "GET /list", "GET /user/info"]);
        assert!(!routes.contains("GET", "/user/list"));
    }

    #[test]
    fn only_matching_extension_is_scanned() {
        let tmp = TempDirGuard::new("extension");
        let nested = tmp.path().join("handler").join("v1");
        fs::create_dir_all(&nested).expect("nested dir");
        fs::write(nested.join("routes.go"), "r.GET(\"/go\", h)\n").expect("write go");
        fs::write(nested.join("routes.go.bak"), "r.GET(\"/bak\", h)\n").expect("write bak");
        fs::write(nested.join("notes.md"), "r.GET(\"/md\", h)\n").expect("write md");

        let routes = RouteScanner::new().scan_tree(tmp.path()).expect("scan");
        assert_eq!(pairs(&routes), vec!["GET /go"]);

        let md = RouteScanner::with_extension(".md")
            .scan_tree(tmp.path())
            .expect("scan md");
        assert_eq!(pairs(&md), vec!["GET /md"]);
    }

    #[cfg(unix)]
    #[test]
    fn symlinked_source_files_are_scanned() {
        let tmp = TempDirGuard::new("symlink-file");
        let real = tmp.path().join("real.go");
        fs::write(&real, "r.GET(\"/sym\", h)\n").expect("write real");
        let handler = tmp.path().join("h");
        fs::create_dir_all(&handler).expect("handler dir");
        std::os::unix::fs::symlink(&real, handler.join("link.go")).expect("symlink file");

        let routes = RouteScanner::new().scan_tree(&handler).expect("scan");
        assert_eq!(pairs(&routes), vec!["GET /sym"]);
    }

    #[cfg(unix)]
    #[test]
    fn symlinked_directories_are_not_descended() {
        let tmp = TempDirGuard::new("symlink-dir");
        let outside = tmp.path().join("outside");
        fs::create_dir_all(&outside).expect("outside dir");
        fs::write(outside.join("extra.go"), "r.GET(\"/outside\", h)\n").expect("write outside");
        let handler = tmp.path().join("h");
        fs::create_dir_all(&handler).expect("handler dir");
        fs::write(handler.join("main.go"), "r.GET(\"/inside\", h)\n").expect("write inside");
        std::os::unix::fs::symlink(&outside, handler.join("linked")).expect("symlink dir");

        let routes = RouteScanner::new().scan_tree(&handler).expect("scan");
        assert_eq!(pairs(&routes), vec!["GET /inside"]);
    }

    #[test]
    fn non_utf8_source_file_aborts_the_scan() {
        let tmp = TempDirGuard::new("non-utf8");
        fs::write(tmp.path().join("a_good.go"), "r.GET(\"/ok\", h)\n").expect("write good");
        fs::write(tmp.path().join("bad.go"), b"r.GET(\"/x\", h) \xff\n").expect("write bad");

        let err = RouteScanner::new()
            .scan_tree(tmp.path())
            .expect_err("non-utf8 source should fail");
        match err {
            RouteError::ReadFile { path, source } => {
                assert!(path.ends_with("bad.go"), "{path}");
                assert_eq!(source.kind(), std::io::ErrorKind::InvalidData);
            }
            other => panic!("expected ReadFile, got {other:?}"),
        }
    }

    #[test]
    fn empty_tree_is_a_configuration_error() {
        let tmp = TempDirGuard::new("empty");
        fs::write(tmp.path().join("main.go"), "package main\n").expect("write");
        let err = load_registered_routes(tmp.path(), &RouteScanner::new())
            .expect_err("empty registry should fail");
        assert!(matches!(err, RouteError::EmptyRegistry { .. }));
    }

    #[test]
    fn missing_root_is_a_walk_error() {
        let tmp = TempDirGuard::new("missing");
        let err = RouteScanner::new()
            .scan_tree(tmp.path().join("does-not-exist"))
            .expect_err("missing root should fail");
        assert!(matches!(err, RouteError::Walk { .. }));
    }
}
