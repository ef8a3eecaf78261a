//! Shadowgate CLI: the `shadowgate` command.

mod cli;
mod commands;
mod config;
mod support;

use clap::Parser;
use cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();
    support::init_logging(&cli.log_level);
    let config = support::load_config_or_exit(cli.config.as_deref());

    match cli.command {
        Commands::ObservabilityBaseline {
            whitelist,
            out_dir,
            json,
        } => commands::observability_baseline::run(whitelist, out_dir, json),

        Commands::ClassificationReport {
            whitelist,
            window_dir,
            handler_root,
            out,
            json,
        } => commands::classification_report::run(
            commands::classification_report::Args {
                whitelist,
                window_dir,
                handler_root,
                out,
                json,
            },
            &config,
        ),

        Commands::RouteInventory {
            handler_root,
            whitelist,
            json,
        } => commands::route_inventory::run(handler_root, whitelist, json, &config),
    }
}
