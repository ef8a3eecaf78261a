use crate::config::GateConfig;
use crate::support::{
    SAMPLE_LIMIT, load_routes_or_exit, load_whitelist_or_exit, print_json_or_exit,
    print_sample_block, sample_with_truncation,
};
use serde_json::json;
use shadowgate_kernel::{Classification, ClassifiedRoute, RegisteredRoutes, classify_routes};

const CHECK_KIND: &str = "shadowgate.route_inventory.v1";
const FAILURE_CLASS_ROUTE_MISSING: &str = "route_missing";

fn describe(route: &ClassifiedRoute) -> String {
    format!("{} ({}, owner={})", route.route, route.basis(), route.owner)
}

pub fn run(
    handler_root: Option<String>,
    whitelist: Option<String>,
    json_output: bool,
    config: &GateConfig,
) {
    let handler_root = config.handler_root(handler_root);
    let registered = load_routes_or_exit(&handler_root, config);
    let classification = whitelist.as_deref().map(|path| {
        let records = load_whitelist_or_exit(path);
        classify_routes(&records, &registered, &config.alias_map())
    });

    let rejected = classification.as_ref().is_some_and(Classification::has_blocking);
    let result = if rejected { "rejected" } else { "accepted" };
    let failure_classes: Vec<&str> = if rejected {
        vec![FAILURE_CLASS_ROUTE_MISSING]
    } else {
        Vec::new()
    };

    if json_output {
        let payload = json!({
            "schema": 1,
            "checkKind": CHECK_KIND,
            "result": result,
            "failureClasses": failure_classes,
            "handlerRoot": handler_root,
            "whitelist": whitelist,
            "registeredRoutes": registered,
            "classification": classification,
        });
        print_json_or_exit(&payload, "route-inventory");
    } else {
        print_text(&handler_root, &registered, classification.as_ref(), result);
    }

    if rejected {
        std::process::exit(1);
    }
}

fn print_text(
    handler_root: &str,
    registered: &RegisteredRoutes,
    classification: Option<&Classification>,
    result: &str,
) {
    println!("shadowgate route-inventory");
    println!("  Handler root: {handler_root}");
    println!("  Registered routes: {}", registered.len());
    let (sample, truncated) = sample_with_truncation(
        registered.iter().map(ToString::to_string).collect(),
        SAMPLE_LIMIT,
    );
    print_sample_block("Routes", &sample, truncated);

    let Some(classification) = classification else {
        return;
    };
    println!("  Critical routes evaluated: {}", classification.evaluated);
    println!("  Clean: {}", classification.clean);
    println!("  Blocking: {}", classification.blocking.len());
    println!("  Non-blocking: {}", classification.non_blocking.len());
    let blocking: Vec<String> = classification.blocking.iter().map(describe).collect();
    print_sample_block("Blocking", &blocking, 0);
    let non_blocking: Vec<String> = classification.non_blocking.iter().map(describe).collect();
    print_sample_block("Non-blocking", &non_blocking, 0);
    println!("  Result: {result}");
}
