//! Core data types for netswitch
//!
//! Field names serialize as camelCase so state files and JSON fixtures
//! stay compatible with existing shell harnesses.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Snapshot of network facts for one evaluation.
///
/// Supplied fresh each call by a fact source (env vars, JSON fixture,
/// or the daemon's collectors). The engine never reads the clock;
/// `timestamp` must come from the caller and be non-decreasing across
/// calls that share one `State`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Facts {
    /// Wired interface name (e.g. "eth0", "en5")
    pub eth_dev: String,
    /// Wireless interface name (e.g. "wlan0", "en0")
    pub wifi_dev: String,
    /// Wired interface has link/carrier
    pub eth_has_link: bool,
    /// Wired interface has an assigned address
    pub eth_has_ip: bool,
    /// Wireless radio is powered on
    pub wifi_is_on: bool,
    /// Capture timestamp in milliseconds
    pub timestamp: i64,
    /// Wired internet reachability; `None` means not measured
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub eth_has_internet: Option<bool>,
    /// Wireless internet reachability; `None` means not measured
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wifi_has_internet: Option<bool>,
    /// Advisory interface priority order (comma-separated), unused by the engine
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interface_priority: Option<String>,
}

/// Wired connectivity classification carried in persisted state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LinkState {
    Connected,
    #[default]
    Disconnected,
}

/// Outcome of the most recent internet reachability check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckState {
    Success,
    Failed,
}

/// State persisted between evaluations.
///
/// The engine never mutates its input; each call returns a new value
/// and the caller persists it before the next call. Fields only change
/// on actual transitions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct State {
    pub last_eth_state: LinkState,
    /// Timestamp (ms) of the last wired connect/disconnect edge
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_eth_state_change: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_internet_check_state: Option<CheckState>,
    /// Timestamp (ms) of the last successful reachability check
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_internet_check_success: Option<i64>,
}

impl State {
    /// State for a first run, before anything has been observed.
    pub fn initial() -> Self {
        Self {
            last_eth_state: LinkState::Disconnected,
            last_eth_state_change: None,
            last_internet_check_state: None,
            last_internet_check_success: None,
        }
    }
}

impl Default for State {
    fn default() -> Self {
        Self::initial()
    }
}

/// How internet reachability is probed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum CheckMethod {
    /// A default route exists for the interface
    #[default]
    Gateway,
    /// One ICMP echo to the check target
    Ping,
    /// HTTP HEAD against the check target
    Curl,
}

impl FromStr for CheckMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "gateway" => Ok(CheckMethod::Gateway),
            "ping" => Ok(CheckMethod::Ping),
            "curl" => Ok(CheckMethod::Curl),
            other => Err(format!("unknown check method: {}", other)),
        }
    }
}

impl fmt::Display for CheckMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CheckMethod::Gateway => write!(f, "gateway"),
            CheckMethod::Ping => write!(f, "ping"),
            CheckMethod::Curl => write!(f, "curl"),
        }
    }
}

/// Policy configuration, normally loaded once per process.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Seconds to wait for address assignment after link-up
    #[serde(default = "default_timeout")]
    pub timeout: u64,

    /// Layer internet reachability on top of link+IP
    #[serde(default)]
    pub check_internet: bool,

    #[serde(default)]
    pub check_method: CheckMethod,

    /// Target for ping/curl checks (e.g. "8.8.8.8", "http://1.1.1.1")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub check_target: Option<String>,

    /// Seconds between reachability checks; scheduling is the caller's job
    #[serde(default = "default_check_interval")]
    pub check_interval: u64,

    /// Log every check attempt, not only transitions
    #[serde(default)]
    pub log_all_checks: bool,

    /// Advisory interface priority order (comma-separated)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interface_priority: Option<String>,
}

fn default_timeout() -> u64 {
    7
}

fn default_check_interval() -> u64 {
    30
}

impl Default for Config {
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

/// One step for the action executor to perform, in emission order.
///
/// `CheckInternet` and `ForceRoute` are reserved: they are part of the
/// executor contract but the current engine never emits them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Action {
    EnableWifi { reason: String },
    DisableWifi { reason: String },
    WaitForIp { duration: u64, reason: String },
    CheckInternet { interface: String, reason: String },
    ForceRoute { interface: String, gateway: String, reason: String },
    Log { message: String },
    NoAction { reason: String },
}

/// Diagnostic code explaining a decision. Opaque to consumers; the
/// string forms are stable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Reason {
    EthConnected,
    EthDisconnected,
    EthWaitingForIp,
    EthIpTimeout,
    EthNoInternet,
    WifiAlreadyOn,
    WifiAlreadyOff,
}

impl Reason {
    pub fn as_str(&self) -> &'static str {
        match self {
            Reason::EthConnected => "ETH_CONNECTED",
            Reason::EthDisconnected => "ETH_DISCONNECTED",
            Reason::EthWaitingForIp => "ETH_WAITING_FOR_IP",
            Reason::EthIpTimeout => "ETH_IP_TIMEOUT",
            Reason::EthNoInternet => "ETH_NO_INTERNET",
            Reason::WifiAlreadyOn => "WIFI_ALREADY_ON",
            Reason::WifiAlreadyOff => "WIFI_ALREADY_OFF",
        }
    }
}

impl fmt::Display for Reason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Output of one evaluation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Decision {
    /// Actions to perform, in order
    pub actions: Vec<Action>,
    /// Reason codes explaining the decision
    pub reason_codes: Vec<Reason>,
    /// Updated state for the caller to persist
    pub new_state: State,
}
