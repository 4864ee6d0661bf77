//! Fact collection from sysfs and system tools.
//!
//! Link/carrier comes from /sys/class/net, address assignment from
//! `ip`, radio power from `nmcli`. Every read failure degrades to a
//! conservative false rather than an error.

use crate::runner::CommandRunner;
use chrono::Utc;
use netswitch_common::Facts;
use std::path::PathBuf;

const SYSFS_NET: &str = "/sys/class/net";

pub struct FactCollector<'a, R: CommandRunner> {
    runner: &'a R,
    eth_dev: String,
    wifi_dev: String,
    sysfs_root: PathBuf,
}

impl<'a, R: CommandRunner> FactCollector<'a, R> {
    pub fn new(runner: &'a R, eth_dev: &str, wifi_dev: &str) -> Self {
        Self {
            runner,
            eth_dev: eth_dev.to_string(),
            wifi_dev: wifi_dev.to_string(),
            sysfs_root: PathBuf::from(SYSFS_NET),
        }
    }

    #[cfg(test)]
    pub fn with_sysfs_root(mut self, root: &std::path::Path) -> Self {
        self.sysfs_root = root.to_path_buf();
        self
    }

    /// Take one snapshot of the network facts. Reachability is left
    /// unmeasured here; the probe fills it in when checking is enabled.
    pub async fn collect(&self) -> Facts {
        Facts {
            eth_dev: self.eth_dev.clone(),
            wifi_dev: self.wifi_dev.clone(),
            eth_has_link: self.eth_has_link().await,
            eth_has_ip: self.eth_has_ip().await,
            wifi_is_on: self.wifi_is_on().await,
            timestamp: Utc::now().timestamp_millis(),
            eth_has_internet: None,
            wifi_has_internet: None,
            interface_priority: None,
        }
    }

    async fn eth_has_link(&self) -> bool {
        let iface = self.sysfs_root.join(&self.eth_dev);

        // carrier reads fail with EINVAL while the interface is down,
        // so fall back to operstate.
        if let Ok(carrier) = tokio::fs::read_to_string(iface.join("carrier")).await {
            return carrier.trim() == "1";
        }
        match tokio::fs::read_to_string(iface.join("operstate")).await {
            Ok(operstate) => operstate.trim() == "up",
            Err(_) => false,
        }
    }

    async fn eth_has_ip(&self) -> bool {
        match self
            .runner
            .run("ip", &["-o", "-4", "addr", "show", "dev", &self.eth_dev])
            .await
        {
            Ok(output) => output.success && output.stdout.contains("inet "),
            Err(_) => false,
        }
    }

    async fn wifi_is_on(&self) -> bool {
        match self.runner.run("nmcli", &["radio", "wifi"]).await {
            Ok(output) => output.success && output.stdout.trim() == "enabled",
            Err(_) => false,
        }
    }
}
