//! Netswitch Control - CLI entry point
//!
//! One evaluation per invocation: load facts/config/state, decide,
//! print action and reason lines, persist the new state.

use anyhow::Result;
use clap::Parser;
use netswitch_common::{evaluate, store};
use netswitchctl::{inputs, output};
use std::path::PathBuf;

const DEFAULT_STATE_FILE: &str = "/tmp/netswitch-state.json";

#[derive(Parser)]
#[command(name = "netswitchctl")]
#[command(about = "Ethernet/WiFi failover policy - one-shot evaluation", long_about = None)]
#[command(version)]
struct Cli {
    /// Print what would be done without toggling anything or saving state
    #[arg(short = 'd', long)]
    dry_run: bool,

    /// Path to the persisted state file
    #[arg(short = 's', long)]
    state_file: Option<PathBuf>,

    /// Load config from a JSON fixture instead of the environment
    #[arg(short = 'c', long)]
    config_file: Option<PathBuf>,

    /// Load facts from a JSON fixture instead of the environment
    #[arg(short = 'f', long)]
    facts_file: Option<PathBuf>,

    /// Print the persisted state as JSON after the decision
    #[arg(long)]
    debug: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Environment variables back the flags for launchd/systemd wrappers.
    let dry_run = cli.dry_run || std::env::var("DRY_RUN").map(|v| v == "1").unwrap_or(false);
    let debug = cli.debug || std::env::var("DEBUG").map(|v| v == "1").unwrap_or(false);
    let state_file = cli
        .state_file
        .or_else(|| std::env::var("STATE_FILE").ok().map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_STATE_FILE));

    let facts = inputs::load_facts(cli.facts_file.as_deref()).await?;
    let config = inputs::load_config(cli.config_file.as_deref()).await?;
    let state = store::load_state(&state_file).await;

    let decision = evaluate(&facts, &state, &config);

    for action in &decision.actions {
        println!("{}", output::format_action(action, dry_run));
    }
    for reason in &decision.reason_codes {
        println!("{}", output::format_reason(reason));
    }

    if !dry_run {
        store::save_state(&state_file, &decision.new_state).await?;
    }

    if debug {
        println!(
            "STATE: {}",
            serde_json::to_string_pretty(&decision.new_state)?
        );
    }

    Ok(())
}
