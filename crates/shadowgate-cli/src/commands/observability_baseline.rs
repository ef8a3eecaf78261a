use crate::support::{exit_with_error, load_whitelist_or_exit, print_json_or_exit};
use serde_json::json;
use shadowgate_report::{
    build_alert_policy, build_dashboard, now_timestamp, render_alert_policy, write_json,
    write_text,
};
use std::path::Path;

pub const DASHBOARD_FILE: &str = "shadow-dashboard.json";
pub const ALERT_POLICY_FILE: &str = "shadow-alert-policy.yaml";

pub fn run(whitelist: String, out_dir: String, json_output: bool) {
    let records = load_whitelist_or_exit(&whitelist);
    let generated_at = now_timestamp();
    let out_dir = Path::new(&out_dir);

    let dashboard = build_dashboard(&records, &whitelist, &generated_at);
    let dashboard_path = write_json(out_dir.join(DASHBOARD_FILE), "dashboard", &dashboard)
        .unwrap_or_else(|err| exit_with_error(err));

    let policy = build_alert_policy(&whitelist, &generated_at);
    let rendered = render_alert_policy(&policy).unwrap_or_else(|err| exit_with_error(err));
    let policy_path = write_text(out_dir.join(ALERT_POLICY_FILE), &rendered)
        .unwrap_or_else(|err| exit_with_error(err));

    if json_output {
        let payload = json!({
            "schema": 1,
            "action": "observability-baseline",
            "generatedAt": generated_at,
            "sourceWhitelist": whitelist,
            "coverage": dashboard.coverage,
            "dashboardPath": dashboard_path.display().to_string(),
            "alertPolicyPath": policy_path.display().to_string(),
        });
        print_json_or_exit(&payload, "observability-baseline");
        return;
    }
    println!("{}", dashboard_path.display());
    println!("{}", policy_path.display());
}
