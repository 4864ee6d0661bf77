//! Facts and config loading from environment variables or JSON fixtures.
//!
//! Fixture files exist for testing: a facts file freezes the timestamp,
//! which environment-driven runs take from the wall clock instead.

use anyhow::{Context, Result};
use chrono::Utc;
use netswitch_common::{CheckMethod, Config, Facts};
use std::path::Path;

/// Environment lookup seam so tests can script variables without
/// touching the process environment.
pub type EnvLookup<'a> = &'a dyn Fn(&str) -> Option<String>;

fn env_var(name: &str) -> Option<String> {
    std::env::var(name).ok()
}

/// "1" is true, anything else (including unset) is false.
fn env_flag(get: EnvLookup, name: &str) -> bool {
    get(name).as_deref() == Some("1")
}

/// "1" -> Some(true), "0" -> Some(false), otherwise not measured.
fn env_tristate(get: EnvLookup, name: &str) -> Option<bool> {
    match get(name).as_deref() {
        Some("1") => Some(true),
        Some("0") => Some(false),
        _ => None,
    }
}

fn env_u64(get: EnvLookup, name: &str, default: u64) -> u64 {
    get(name)
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

/// Load facts from a JSON fixture file, or from the environment.
pub async fn load_facts(facts_file: Option<&Path>) -> Result<Facts> {
    if let Some(path) = facts_file {
        let content = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read facts file {}", path.display()))?;
        return serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse facts file {}", path.display()));
    }
    Ok(facts_from_env(&env_var, Utc::now().timestamp_millis()))
}

/// Build facts from environment variables.
pub fn facts_from_env(get: EnvLookup, timestamp: i64) -> Facts {
    Facts {
        eth_dev: get("ETH_DEV").unwrap_or_else(|| "eth0".to_string()),
        wifi_dev: get("WIFI_DEV").unwrap_or_else(|| "wlan0".to_string()),
        eth_has_link: env_flag(get, "ETH_HAS_LINK"),
        eth_has_ip: env_flag(get, "ETH_HAS_IP"),
        wifi_is_on: env_flag(get, "WIFI_IS_ON"),
        timestamp,
        eth_has_internet: env_tristate(get, "ETH_HAS_INTERNET"),
        wifi_has_internet: env_tristate(get, "WIFI_HAS_INTERNET"),
        interface_priority: get("INTERFACE_PRIORITY"),
    }
}

/// Load config from a JSON fixture file, or from the environment.
pub async fn load_config(config_file: Option<&Path>) -> Result<Config> {
    if let Some(path) = config_file {
        let content = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        return serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()));
    }
    Ok(config_from_env(&env_var))
}

/// Build config from environment variables, falling back to defaults
/// for anything unset or unparsable.
pub fn config_from_env(get: EnvLookup) -> Config {
    let defaults = Config::default();
    Config {
        timeout: env_u64(get, "TIMEOUT", defaults.timeout),
        check_internet: env_flag(get, "CHECK_INTERNET"),
        check_method: get("CHECK_METHOD")
            .and_then(|v| v.parse::<CheckMethod>().ok())
            .unwrap_or(defaults.check_method),
        check_target: get("CHECK_TARGET"),
        check_interval: env_u64(get, "CHECK_INTERVAL", defaults.check_interval),
        log_all_checks: env_flag(get, "LOG_ALL_CHECKS"),
        interface_priority: get("INTERFACE_PRIORITY"),
    }
}
