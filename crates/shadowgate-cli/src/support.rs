use crate::config::GateConfig;
use serde_json::Value;
use shadowgate_kernel::{RegisteredRoutes, RouteRecord, load_registered_routes, load_whitelist};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

pub const SAMPLE_LIMIT: usize = 25;

/// Logs go to stderr so stdout stays machine-readable.
pub fn init_logging(level: &str) {
    let filter = EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();
}

pub fn exit_with_error(message: impl std::fmt::Display) -> ! {
    eprintln!("error: {message}");
    std::process::exit(1);
}

pub fn load_config_or_exit(path: Option<&str>) -> GateConfig {
    match path {
        Some(path) => GateConfig::load(path).unwrap_or_else(|err| exit_with_error(err)),
        None => GateConfig::default(),
    }
}

pub fn load_whitelist_or_exit(path: &str) -> Vec<RouteRecord> {
    load_whitelist(path).unwrap_or_else(|err| exit_with_error(err))
}

pub fn load_routes_or_exit(handler_root: &str, config: &GateConfig) -> RegisteredRoutes {
    load_registered_routes(handler_root, &config.scanner()).unwrap_or_else(|err| exit_with_error(err))
}

pub fn print_json_or_exit(payload: &Value, label: &str) {
    let rendered = serde_json::to_string_pretty(payload).unwrap_or_else(|err| {
        eprintln!("error: failed to render {label} payload: {err}");
        std::process::exit(2);
    });
    println!("{rendered}");
}

pub fn sample_with_truncation<T>(items: Vec<T>, limit: usize) -> (Vec<T>, usize) {
    let total = items.len();
    let sample: Vec<T> = items.into_iter().take(limit).collect();
    let truncated = total.saturating_sub(sample.len());
    (sample, truncated)
}

pub fn print_sample_block(header: &str, items: &[String], truncated: usize) {
    if items.is_empty() {
        return;
    }

    println!("  {header} (showing up to {}):", items.len());
    for item in items {
        println!("    - {item}");
    }
    if truncated > 0 {
        println!("    - ... and {truncated} more");
    }
}
