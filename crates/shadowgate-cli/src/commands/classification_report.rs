use crate::config::GateConfig;
use crate::support::{
    exit_with_error, load_routes_or_exit, load_whitelist_or_exit, print_json_or_exit,
};
use serde_json::json;
use shadowgate_kernel::classify_routes;
use shadowgate_report::{
    MismatchCategory, SecuritySummary, now_timestamp, render_classification_report, write_text,
};
use shadowgate_window::read_window;

const CHECK_KIND: &str = "shadowgate.classification_report.v1";

pub struct Args {
    pub whitelist: String,
    pub window_dir: String,
    pub handler_root: Option<String>,
    pub out: String,
    pub json: bool,
}

pub fn run(args: Args, config: &GateConfig) {
    let records = load_whitelist_or_exit(&args.whitelist);
    let handler_root = config.handler_root(args.handler_root);
    let registered = load_routes_or_exit(&handler_root, config);
    let window = read_window(&args.window_dir).unwrap_or_else(|err| exit_with_error(err));

    let classification = classify_routes(&records, &registered, &config.alias_map());
    let generated_at = now_timestamp();
    let report = render_classification_report(&window, &classification, &generated_at);
    let report_path = write_text(&args.out, &report).unwrap_or_else(|err| exit_with_error(err));

    tracing::info!(
        blocking = classification.blocking.len(),
        non_blocking = classification.non_blocking.len(),
        "classification report written"
    );

    if args.json {
        let payload = json!({
            "schema": 1,
            "checkKind": CHECK_KIND,
            "generatedAt": generated_at,
            "reportPath": report_path.display().to_string(),
            "handlerRoot": handler_root,
            "registeredRouteCount": registered.len(),
            "mismatchCategory": MismatchCategory::from_rate(window.mismatch_rate),
            "security": SecuritySummary::from_window(&window),
            "window": window,
            "classification": classification,
        });
        print_json_or_exit(&payload, "classification-report");
        return;
    }
    println!("{}", report_path.display());
}
