//! Netswitch Daemon - ethernet/wifi failover policy
//!
//! Watches the wired interface, collects facts, runs the decision
//! engine, and applies the resulting actions. One evaluation at a time;
//! state is persisted after each one.

mod config;
mod debounce;
mod executor;
mod facts;
mod probe;
mod runner;
mod watcher;

use anyhow::Result;
use config::DaemonConfig;
use debounce::Debouncer;
use executor::Executor;
use facts::FactCollector;
use netswitch_common::{evaluate, store, Config};
use runner::{CommandRunner, SystemCommandRunner};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, error, info};
use watcher::{LinkWatcher, WatchEvent};

/// Minimum gap between event-driven evaluation batches.
const MIN_BATCH_GAP: Duration = Duration::from_secs(5);

/// Delay after a link event before reading facts, so DHCP and routes
/// have a moment to settle.
const SETTLE_DELAY: Duration = Duration::from_secs(2);

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("netswitchd v{} starting", env!("CARGO_PKG_VERSION"));

    let cfg = DaemonConfig::load();
    info!(
        "Watching {} (wifi fallback: {}, dry_run={})",
        cfg.eth_dev, cfg.wifi_dev, cfg.dry_run
    );

    run(cfg).await
}

async fn run(cfg: DaemonConfig) -> Result<()> {
    let runner = SystemCommandRunner;
    let policy = cfg.policy.to_engine_config();
    let collector = FactCollector::new(&runner, &cfg.eth_dev, &cfg.wifi_dev);
    let executor = Executor::new(&runner, cfg.dry_run);

    let (tx, mut rx) = mpsc::unbounded_channel();
    let _watcher = LinkWatcher::new(&cfg.eth_dev, tx.clone())?;

    // Startup batch, same path as a fresh link event.
    let _ = tx.send(WatchEvent::Startup);

    let mut debouncer = Debouncer::new(MIN_BATCH_GAP);
    let mut tick = tokio::time::interval(Duration::from_secs(cfg.poll_interval_secs.max(1)));
    tick.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
    tick.tick().await; // the first tick completes immediately

    let mut pending_recheck: Option<JoinHandle<()>> = None;

    let shutdown = tokio::signal::ctrl_c();
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            _ = &mut shutdown => {
                info!("Shutting down gracefully");
                break;
            }
            Some(event) = rx.recv() => {
                match event {
                    WatchEvent::Startup | WatchEvent::LinkChange => {
                        if !debouncer.fire() {
                            continue;
                        }
                        tokio::time::sleep(SETTLE_DELAY).await;
                    }
                    // Self-scheduled follow-ups bypass the debouncer.
                    WatchEvent::Recheck => {}
                }
                let hint = evaluate_once(&collector, &runner, &executor, &policy, &cfg).await;
                schedule_recheck(&mut pending_recheck, hint, tx.clone());
            }
            _ = tick.tick() => {
                let hint = evaluate_once(&collector, &runner, &executor, &policy, &cfg).await;
                schedule_recheck(&mut pending_recheck, hint, tx.clone());
            }
        }
    }

    if let Some(handle) = pending_recheck.take() {
        handle.abort();
    }
    Ok(())
}

/// One full cycle: facts -> probe -> load state -> evaluate -> execute
/// actions in order -> persist. Returns a re-check delay when the
/// engine asked for one.
async fn evaluate_once<R: CommandRunner>(
    collector: &FactCollector<'_, R>,
    runner: &R,
    executor: &Executor<'_, R>,
    policy: &Config,
    cfg: &DaemonConfig,
) -> Option<Duration> {
    let mut facts = collector.collect().await;
    if policy.check_internet {
        facts.eth_has_internet = probe::check_internet(
            runner,
            policy.check_method,
            &cfg.eth_dev,
            policy.check_target.as_deref(),
        )
        .await;
    }

    let state = store::load_state(&cfg.state_file).await;
    let decision = evaluate(&facts, &state, policy);

    for reason in &decision.reason_codes {
        debug!("Decision reason: {}", reason);
    }

    let mut hint = None;
    for action in &decision.actions {
        if let Some(delay) = executor.execute(action).await {
            hint = Some(delay);
        }
    }

    if !cfg.dry_run {
        if let Err(e) = store::save_state(&cfg.state_file, &decision.new_state).await {
            error!("Failed to persist state: {}", e);
        }
    }

    hint
}

/// Replace any pending re-check with a fresh one. Superseded tasks are
/// aborted so only a single delayed wakeup exists at a time.
fn schedule_recheck(
    pending: &mut Option<JoinHandle<()>>,
    hint: Option<Duration>,
    tx: mpsc::UnboundedSender<WatchEvent>,
) {
    let Some(duration) = hint else {
        return;
    };
    if let Some(handle) = pending.take() {
        handle.abort();
    }
    *pending = Some(tokio::spawn(async move {
        tokio::time::sleep(duration).await;
        let _ = tx.send(WatchEvent::Recheck);
    }));
}
