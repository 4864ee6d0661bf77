//! Action executor.
//!
//! Maps engine actions onto the system: nmcli for the radio, tracing
//! for logs. Failures are logged, never fed back into the engine.

use crate::runner::CommandRunner;
use netswitch_common::Action;
use std::time::Duration;
use tracing::{debug, error, info, warn};

pub struct Executor<'a, R: CommandRunner> {
    runner: &'a R,
    dry_run: bool,
}

impl<'a, R: CommandRunner> Executor<'a, R> {
    pub fn new(runner: &'a R, dry_run: bool) -> Self {
        Self { runner, dry_run }
    }

    /// Apply one action. Returns a re-evaluation delay when the engine
    /// asked the caller to come back (WaitForIp).
    pub async fn execute(&self, action: &Action) -> Option<Duration> {
        match action {
            Action::EnableWifi { reason } => {
                info!("Enabling WiFi: {}", reason);
                self.set_radio("on").await;
                None
            }
            Action::DisableWifi { reason } => {
                info!("Disabling WiFi: {}", reason);
                self.set_radio("off").await;
                None
            }
            Action::WaitForIp { duration, reason } => {
                debug!("Re-check scheduled in {}s: {}", duration, reason);
                Some(Duration::from_secs(*duration))
            }
            Action::Log { message } => {
                info!("{}", message);
                None
            }
            Action::NoAction { reason } => {
                debug!("No action: {}", reason);
                None
            }
            Action::CheckInternet { interface, reason } => {
                warn!(
                    "Reserved action CHECK_INTERNET (interface={}, reason={}), skipping",
                    interface, reason
                );
                None
            }
            Action::ForceRoute {
                interface,
                gateway,
                reason,
            } => {
                warn!(
                    "Reserved action FORCE_ROUTE (interface={}, gateway={}, reason={}), skipping",
                    interface, gateway, reason
                );
                None
            }
        }
    }

    async fn set_radio(&self, on_off: &str) {
        if self.dry_run {
            info!("[DRY RUN] Would execute: nmcli radio wifi {}", on_off);
            return;
        }

        match self.runner.run("nmcli", &["radio", "wifi", on_off]).await {
            Ok(output) if output.success => {}
            Ok(_) => error!("nmcli radio wifi {} exited non-zero", on_off),
            Err(e) => error!("Failed to toggle wifi radio: {}", e),
        }
    }
}
