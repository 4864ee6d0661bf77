//! Configuration management for netswitchd.
//!
//! Loads settings from /etc/netswitch/config.toml or uses defaults.
//! The [policy] section maps onto the engine's Config.

use anyhow::Result;
use netswitch_common::CheckMethod;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use tracing::{info, warn};

/// Config file path
pub const CONFIG_PATH: &str = "/etc/netswitch/config.toml";

/// Decision policy section, converted to the engine's Config.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PolicyConfig {
    /// Seconds to wait for DHCP after link-up before failing over
    #[serde(default = "default_timeout")]
    pub timeout: u64,

    /// Probe internet reachability on top of link+IP
    #[serde(default)]
    pub check_internet: bool,

    #[serde(default)]
    pub check_method: CheckMethod,

    /// Target for ping/curl probes
    #[serde(default)]
    pub check_target: Option<String>,

    /// Seconds between reachability probes
    #[serde(default = "default_check_interval")]
    pub check_interval: u64,

    /// Log every probe, not only transitions
    #[serde(default)]
    pub log_all_checks: bool,

    /// Advisory interface priority order (comma-separated)
    #[serde(default)]
    pub interface_priority: Option<String>,
}

fn default_timeout() -> u64 {
    7
}

fn default_check_interval() -> u64 {
    30
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self {
            timeout: default_timeout(),
            check_internet: false,
            check_method: CheckMethod::default(),
            check_target: None,
            check_interval: default_check_interval(),
            log_all_checks: false,
            interface_priority: None,
        }
    }
}

impl PolicyConfig {
    /// Convert to the engine's Config.
    pub fn to_engine_config(&self) -> netswitch_common::Config {
        netswitch_common::Config {
            timeout: self.timeout,
            check_internet: self.check_internet,
            check_method: self.check_method,
            check_target: self.check_target.clone(),
            check_interval: self.check_interval,
            log_all_checks: self.log_all_checks,
            interface_priority: self.interface_priority.clone(),
        }
    }
}

/// Full daemon configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DaemonConfig {
    /// Wired interface name
    #[serde(default = "default_eth_dev")]
    pub eth_dev: String,

    /// Wireless interface name
    #[serde(default = "default_wifi_dev")]
    pub wifi_dev: String,

    /// Persisted state location
    #[serde(default = "default_state_file")]
    pub state_file: PathBuf,

    /// Seconds between periodic re-evaluations
    #[serde(default = "default_poll_interval")]
    pub poll_interval_secs: u64,

    /// Log decisions without toggling the radio or saving state
    #[serde(default)]
    pub dry_run: bool,

    #[serde(default)]
    pub policy: PolicyConfig,
}

fn default_eth_dev() -> String {
    "eth0".to_string()
}

fn default_wifi_dev() -> String {
    "wlan0".to_string()
}

fn default_state_file() -> PathBuf {
    PathBuf::from("/var/lib/netswitch/state.json")
}

fn default_poll_interval() -> u64 {
    30
}

impl Default for DaemonConfig {
    fn default() -> Self {
        Self {
            eth_dev: default_eth_dev(),
            wifi_dev: default_wifi_dev(),
            state_file: default_state_file(),
            poll_interval_secs: default_poll_interval(),
            dry_run: false,
            policy: PolicyConfig::default(),
        }
    }
}

impl DaemonConfig {
    /// Load config from the system path, or return defaults.
    pub fn load() -> Self {
        Self::load_from_path(CONFIG_PATH).unwrap_or_else(|e| {
            warn!("Config not found, using defaults: {}", e);
            DaemonConfig::default()
        })
    }

    /// Load config from a specific path.
    pub fn load_from_path(path: &str) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let config: DaemonConfig = toml::from_str(&content)?;
        info!("Loaded config from {}", path);
        Ok(config)
    }
}
