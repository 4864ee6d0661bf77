//! Link watcher - triggers re-evaluation on carrier changes.
//!
//! sysfs attribute files do not emit inotify events, so this uses
//! notify's PollWatcher with content comparison over the wired
//! interface's carrier and operstate files.

use anyhow::Result;
use notify::{Event, PollWatcher, RecursiveMode, Watcher as NotifyWatcher};
use std::path::Path;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{info, warn};

const SYSFS_NET: &str = "/sys/class/net";

/// Events driving the evaluation loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WatchEvent {
    /// Initial batch on daemon start
    Startup,
    /// Carrier or operstate changed
    LinkChange,
    /// Self-scheduled follow-up after a WaitForIp action
    Recheck,
}

pub struct LinkWatcher {
    _watcher: PollWatcher,
}

impl LinkWatcher {
    pub fn new(eth_dev: &str, tx: mpsc::UnboundedSender<WatchEvent>) -> Result<Self> {
        Self::with_options(Path::new(SYSFS_NET), eth_dev, Duration::from_secs(1), tx)
    }

    pub(crate) fn with_options(
        sysfs_root: &Path,
        eth_dev: &str,
        poll_interval: Duration,
        tx: mpsc::UnboundedSender<WatchEvent>,
    ) -> Result<Self> {
        let config = notify::Config::default()
            .with_poll_interval(poll_interval)
            .with_compare_contents(true);

        let mut watcher = PollWatcher::new(
            move |res: Result<Event, notify::Error>| match res {
                Ok(_) => {
                    let _ = tx.send(WatchEvent::LinkChange);
                }
                Err(e) => warn!("Watch error: {:?}", e),
            },
            config,
        )?;

        let iface = sysfs_root.join(eth_dev);
        let mut watched = 0;
        for name in ["carrier", "operstate"] {
            let path = iface.join(name);
            if path.exists() {
                watcher.watch(&path, RecursiveMode::NonRecursive)?;
                watched += 1;
            }
        }
        if watched == 0 {
            warn!(
                "No watchable sysfs files for {}, relying on periodic polling only",
                eth_dev
            );
        } else {
            info!("Link watcher initialized for {}", eth_dev);
        }

        Ok(Self { _watcher: watcher })
    }
}
