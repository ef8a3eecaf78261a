use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "shadowgate",
    about = "Shadowgate: reconcile a route whitelist against registered handler routes for shadow-traffic cutover gates",
    version
)]
pub struct Cli {
    /// Log filter (trace, debug, info, warn, error, or a tracing directive)
    #[arg(long, global = true, default_value = "warn")]
    pub log_level: String,

    /// Optional TOML config (handler_root, source_extension, [[alias]] entries)
    #[arg(long, global = true)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate the shadow observability dashboard and alert policy from a whitelist
    ObservabilityBaseline {
        /// Path to the route whitelist
        #[arg(long)]
        whitelist: String,

        /// Directory receiving shadow-dashboard.json and shadow-alert-policy.yaml
        #[arg(long)]
        out_dir: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Classify critical routes and write the mismatch/security classification report
    ClassificationReport {
        /// Path to the route whitelist
        #[arg(long)]
        whitelist: String,

        /// Shadow window directory (window-summary.md + checkpoint-HNN/)
        #[arg(long)]
        window_dir: String,

        /// Handler source root to scan for registered routes
        #[arg(long)]
        handler_root: Option<String>,

        /// Markdown report output path
        #[arg(long)]
        out: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// List registered handler routes, optionally classifying a whitelist against them
    RouteInventory {
        /// Handler source root to scan for registered routes
        #[arg(long)]
        handler_root: Option<String>,

        /// Optional whitelist to classify against the recovered routes
        #[arg(long)]
        whitelist: Option<String>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}
