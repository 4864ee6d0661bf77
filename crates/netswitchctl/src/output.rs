//! Deterministic line output for shell harnesses.
//!
//! The line shapes are a stable contract: `ACTION: <type> [<params>]`,
//! `LOG: <message>`, `REASON: <code>`. Dry-run prefixes action lines
//! with `[DRY_RUN] `; reason lines are never prefixed.

use netswitch_common::{Action, Reason};

pub fn format_action(action: &Action, dry_run: bool) -> String {
    let prefix = if dry_run { "[DRY_RUN] " } else { "" };

    match action {
        Action::EnableWifi { .. } => format!("{}ACTION: ENABLE_WIFI", prefix),
        Action::DisableWifi { .. } => format!("{}ACTION: DISABLE_WIFI", prefix),
        Action::WaitForIp { duration, .. } => {
            format!("{}ACTION: WAIT_FOR_IP duration={}", prefix, duration)
        }
        Action::CheckInternet { interface, .. } => {
            format!("{}ACTION: CHECK_INTERNET interface={}", prefix, interface)
        }
        Action::ForceRoute {
            interface, gateway, ..
        } => format!(
            "{}ACTION: FORCE_ROUTE interface={} gateway={}",
            prefix, interface, gateway
        ),
        Action::Log { message } => format!("{}LOG: {}", prefix, message),
        Action::NoAction { .. } => format!("{}ACTION: NO_ACTION", prefix),
    }
}

pub fn format_reason(reason: &Reason) -> String {
    format!("REASON: {}", reason)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_actions() {
        assert_eq!(
            format_action(
                &Action::EnableWifi {
                    reason: "x".to_string()
                },
                false
            ),
            "ACTION: ENABLE_WIFI"
        );
        assert_eq!(
            format_action(
                &Action::WaitForIp {
                    duration: 1,
                    reason: "x".to_string()
                },
                false
            ),
            "ACTION: WAIT_FOR_IP duration=1"
        );
        assert_eq!(
            format_action(
                &Action::ForceRoute {
                    interface: "eth0".to_string(),
                    gateway: "10.0.0.1".to_string(),
                    reason: "x".to_string()
                },
                false
            ),
            "ACTION: FORCE_ROUTE interface=eth0 gateway=10.0.0.1"
        );
        assert_eq!(
            format_action(
                &Action::Log {
                    message: "hello".to_string()
                },
                false
            ),
            "LOG: hello"
        );
        assert_eq!(
            format_action(
                &Action::NoAction {
                    reason: "x".to_string()
                },
                false
            ),
            "ACTION: NO_ACTION"
        );
    }

    #[test]
    fn test_dry_run_prefix() {
        assert_eq!(
            format_action(
                &Action::DisableWifi {
                    reason: "x".to_string()
                },
                true
            ),
            "[DRY_RUN] ACTION: DISABLE_WIFI"
        );
    }

    #[test]
    fn test_format_reason() {
        assert_eq!(
            format_reason(&netswitch_common::Reason::EthWaitingForIp),
            "REASON: ETH_WAITING_FOR_IP"
        );
    }
}
