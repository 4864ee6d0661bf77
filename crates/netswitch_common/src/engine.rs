//! Pure decision engine for ethernet/wifi switching
//!
//! `evaluate` is total and deterministic: no I/O, no clock, no mutation
//! of its inputs. Identical inputs always produce identical output.

use crate::types::{
    Action, CheckState, Config, Decision, Facts, LinkState, Reason, State,
};

/// Policy for the "DHCP timed out but wifi is already on" corner.
///
/// When true the engine emits only the `ETH_IP_TIMEOUT` reason and
/// stays silent, with no `NO_ACTION` companion. Set to false to emit
/// `WIFI_ALREADY_ON` + `NoAction` for symmetry with the connected and
/// disconnected branches. Harnesses that count action lines depend on
/// the silent form.
const TIMEOUT_SILENT_WHEN_WIFI_ON: bool = true;

/// Evaluate the current facts against persisted state and configuration.
///
/// Returns the ordered actions to perform, the reason codes explaining
/// them, and the new state for the caller to persist.
pub fn evaluate(facts: &Facts, state: &State, config: &Config) -> Decision {
    let mut actions: Vec<Action> = Vec::new();
    let mut reason_codes: Vec<Reason> = Vec::new();
    let mut new_state = state.clone();

    let eth_connected = facts.eth_has_link && facts.eth_has_ip;

    // Edge detection: record the transition timestamp only on actual
    // edges, never on repeated polls. The DHCP wait below depends on it.
    let eth_state_changed = match state.last_eth_state {
        LinkState::Disconnected => eth_connected,
        LinkState::Connected => !eth_connected,
    };
    if eth_state_changed {
        new_state.last_eth_state = if eth_connected {
            LinkState::Connected
        } else {
            LinkState::Disconnected
        };
        new_state.last_eth_state_change = Some(facts.timestamp);
    }

    if eth_connected {
        if config.check_internet && facts.eth_has_internet == Some(false) {
            // Wired is up but unreachable: fail over to wifi.
            reason_codes.push(Reason::EthNoInternet);

            if !facts.wifi_is_on {
                actions.push(Action::EnableWifi {
                    reason: "Ethernet connected but no internet - enabling WiFi for failover"
                        .to_string(),
                });
                actions.push(Action::Log {
                    message: "Ethernet has no internet connectivity - switching to WiFi"
                        .to_string(),
                });
            } else {
                reason_codes.push(Reason::WifiAlreadyOn);
                actions.push(Action::NoAction {
                    reason: "WiFi already enabled for failover".to_string(),
                });
            }
        } else {
            // Connected, and reachability is ok, unmeasured, or not checked.
            reason_codes.push(Reason::EthConnected);

            if facts.wifi_is_on {
                actions.push(Action::DisableWifi {
                    reason: "Ethernet connected with valid IP - disabling WiFi".to_string(),
                });
                actions.push(Action::Log {
                    message: "Ethernet connected - WiFi disabled".to_string(),
                });
            } else {
                reason_codes.push(Reason::WifiAlreadyOff);
                actions.push(Action::NoAction {
                    reason: "Ethernet connected, WiFi already off".to_string(),
                });
            }
        }
    } else if facts.eth_has_link && !facts.eth_has_ip {
        // Link is up, DHCP still pending.
        reason_codes.push(Reason::EthWaitingForIp);

        // Missing change timestamp counts as zero elapsed.
        let waited_secs = match state.last_eth_state_change {
            Some(changed_at) => (facts.timestamp - changed_at) / 1000,
            None => 0,
        };

        if waited_secs < config.timeout as i64 {
            actions.push(Action::WaitForIp {
                duration: 1,
                reason: format!(
                    "Ethernet active but no IP yet (waited {}s/{}s)",
                    waited_secs, config.timeout
                ),
            });
            actions.push(Action::Log {
                message: format!(
                    "Ethernet interface active but no IP yet, waiting... ({}s)",
                    waited_secs
                ),
            });
        } else {
            reason_codes.push(Reason::EthIpTimeout);

            if !facts.wifi_is_on {
                actions.push(Action::EnableWifi {
                    reason: format!(
                        "Ethernet failed to acquire IP after {}s - enabling WiFi",
                        config.timeout
                    ),
                });
                actions.push(Action::Log {
                    message: format!(
                        "Ethernet IP acquisition timeout ({}s) - enabling WiFi",
                        config.timeout
                    ),
                });
            } else if !TIMEOUT_SILENT_WHEN_WIFI_ON {
                reason_codes.push(Reason::WifiAlreadyOn);
                actions.push(Action::NoAction {
                    reason: "Ethernet IP timeout, WiFi already on".to_string(),
                });
            }
        }
    } else {
        // No carrier at all.
        reason_codes.push(Reason::EthDisconnected);

        if !facts.wifi_is_on {
            actions.push(Action::EnableWifi {
                reason: "Ethernet disconnected - enabling WiFi".to_string(),
            });
            actions.push(Action::Log {
                message: "Ethernet disconnected - WiFi enabled".to_string(),
            });
        } else {
            reason_codes.push(Reason::WifiAlreadyOn);
            actions.push(Action::NoAction {
                reason: "Ethernet disconnected, WiFi already on".to_string(),
            });
        }
    }

    // Reachability bookkeeping, independent of the decision tree above.
    // Only runs when checking is on and a measurement actually exists.
    if config.check_internet {
        if let Some(has_internet) = facts.eth_has_internet {
            let current = if has_internet {
                CheckState::Success
            } else {
                CheckState::Failed
            };

            match state.last_internet_check_state {
                None => {
                    new_state.last_internet_check_state = Some(current);
                    if current == CheckState::Success {
                        new_state.last_internet_check_success = Some(facts.timestamp);
                    }

                    if config.log_all_checks {
                        let outcome = if current == CheckState::Success {
                            "active and has internet"
                        } else {
                            "not active"
                        };
                        actions.push(Action::Log {
                            message: format!("Internet check: {} is {}", facts.eth_dev, outcome),
                        });
                    }
                }
                Some(previous) if previous != current => {
                    new_state.last_internet_check_state = Some(current);
                    if current == CheckState::Success {
                        new_state.last_internet_check_success = Some(facts.timestamp);
                    }

                    let message = if current == CheckState::Success {
                        format!(
                            "Internet check: {} is now reachable (recovered from failure)",
                            facts.eth_dev
                        )
                    } else {
                        format!(
                            "Internet check: {} is now unreachable (was working before)",
                            facts.eth_dev
                        )
                    };
                    actions.push(Action::Log { message });
                }
                Some(_) => {
                    if config.log_all_checks {
                        let outcome = if current == CheckState::Success {
                            "succeeded"
                        } else {
                            "failed"
                        };
                        actions.push(Action::Log {
                            message: format!(
                                "Internet check: {} check via {} {}",
                                config.check_method, facts.eth_dev, outcome
                            ),
                        });
                    }
                }
            }
        }
    }

    Decision {
        actions,
        reason_codes,
        new_state,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::CheckMethod;

    const T0: i64 = 1_700_000_000_000;

    fn facts(eth_has_link: bool, eth_has_ip: bool, wifi_is_on: bool) -> Facts {
        Facts {
            eth_dev: "eth0".to_string(),
            wifi_dev: "wlan0".to_string(),
            eth_has_link,
            eth_has_ip,
            wifi_is_on,
            timestamp: T0,
            eth_has_internet: None,
            wifi_has_internet: None,
            interface_priority: None,
        }
    }

    fn connected_state(changed_at: i64) -> State {
        State {
            last_eth_state: LinkState::Connected,
            last_eth_state_change: Some(changed_at),
            ..State::initial()
        }
    }

    fn has_enable_wifi(decision: &Decision) -> bool {
        decision
            .actions
            .iter()
            .any(|a| matches!(a, Action::EnableWifi { .. }))
    }

    fn has_disable_wifi(decision: &Decision) -> bool {
        decision
            .actions
            .iter()
            .any(|a| matches!(a, Action::DisableWifi { .. }))
    }

    fn has_wait_for_ip(decision: &Decision) -> bool {
        decision
            .actions
            .iter()
            .any(|a| matches!(a, Action::WaitForIp { .. }))
    }

    fn log_messages(decision: &Decision) -> Vec<&str> {
        decision
            .actions
            .iter()
            .filter_map(|a| match a {
                Action::Log { message } => Some(message.as_str()),
                _ => None,
            })
            .collect()
    }

    // Scenario A: wired connects while wifi is on.
    #[test]
    fn test_wired_connects_disables_wifi() {
        let decision = evaluate(
            &facts(true, true, true),
            &State::initial(),
            &Config::default(),
        );

        assert!(has_disable_wifi(&decision));
        assert!(decision.reason_codes.contains(&Reason::EthConnected));
        assert_eq!(decision.new_state.last_eth_state, LinkState::Connected);
        assert_eq!(decision.new_state.last_eth_state_change, Some(T0));
    }

    #[test]
    fn test_wired_connected_wifi_already_off() {
        let decision = evaluate(
            &facts(true, true, false),
            &connected_state(T0 - 60_000),
            &Config::default(),
        );

        assert!(decision.reason_codes.contains(&Reason::EthConnected));
        assert!(decision.reason_codes.contains(&Reason::WifiAlreadyOff));
        assert!(decision
            .actions
            .iter()
            .any(|a| matches!(a, Action::NoAction { .. })));
        assert!(!has_disable_wifi(&decision));
    }

    // Scenario B: wired drops while wifi is off.
    #[test]
    fn test_wired_drops_enables_wifi() {
        let mut f = facts(false, false, false);
        f.timestamp = T0;
        let decision = evaluate(&f, &connected_state(T0 - 10_000), &Config::default());

        assert!(has_enable_wifi(&decision));
        assert!(decision.reason_codes.contains(&Reason::EthDisconnected));
        assert_eq!(decision.new_state.last_eth_state, LinkState::Disconnected);
        assert_eq!(decision.new_state.last_eth_state_change, Some(T0));
    }

    #[test]
    fn test_wired_down_wifi_already_on() {
        let decision = evaluate(
            &facts(false, false, true),
            &State::initial(),
            &Config::default(),
        );

        assert!(decision.reason_codes.contains(&Reason::EthDisconnected));
        assert!(decision.reason_codes.contains(&Reason::WifiAlreadyOn));
        assert!(!has_enable_wifi(&decision));
    }

    // Scenario C: DHCP still within the patience window.
    #[test]
    fn test_dhcp_in_progress_waits() {
        let mut f = facts(true, false, false);
        f.timestamp = T0;
        let state = State {
            last_eth_state: LinkState::Disconnected,
            last_eth_state_change: Some(T0 - 2_000),
            ..State::initial()
        };
        let decision = evaluate(&f, &state, &Config::default());

        assert!(decision.reason_codes.contains(&Reason::EthWaitingForIp));
        assert!(has_wait_for_ip(&decision));
        assert!(!has_enable_wifi(&decision));
        assert!(!decision.reason_codes.contains(&Reason::EthIpTimeout));
    }

    // Scenario D: DHCP timed out, wifi off.
    #[test]
    fn test_dhcp_timeout_enables_wifi() {
        let mut f = facts(true, false, false);
        f.timestamp = T0;
        let state = State {
            last_eth_state: LinkState::Disconnected,
            last_eth_state_change: Some(T0 - 8_000),
            ..State::initial()
        };
        let decision = evaluate(&f, &state, &Config::default());

        assert!(decision.reason_codes.contains(&Reason::EthIpTimeout));
        assert!(has_enable_wifi(&decision));
    }

    #[test]
    fn test_dhcp_timeout_wifi_already_on_stays_silent() {
        let mut f = facts(true, false, true);
        f.timestamp = T0;
        let state = State {
            last_eth_state: LinkState::Disconnected,
            last_eth_state_change: Some(T0 - 8_000),
            ..State::initial()
        };
        let decision = evaluate(&f, &state, &Config::default());

        assert!(decision.reason_codes.contains(&Reason::EthIpTimeout));
        assert!(decision.actions.is_empty());
    }

    #[test]
    fn test_timeout_boundary() {
        let timeout = Config::default().timeout as i64;
        for k in 0..=10i64 {
            let mut f = facts(true, false, false);
            f.timestamp = T0 + k * 1_000;
            let state = State {
                last_eth_state: LinkState::Disconnected,
                last_eth_state_change: Some(T0),
                ..State::initial()
            };
            let decision = evaluate(&f, &state, &Config::default());

            if k < timeout {
                assert!(has_wait_for_ip(&decision), "k={} should wait", k);
            } else {
                assert!(
                    decision.reason_codes.contains(&Reason::EthIpTimeout),
                    "k={} should time out",
                    k
                );
            }
        }
    }

    #[test]
    fn test_missing_change_timestamp_counts_as_zero_elapsed() {
        let f = facts(true, false, false);
        let state = State::initial();
        let decision = evaluate(&f, &state, &Config::default());

        assert!(has_wait_for_ip(&decision));
        assert!(!decision.reason_codes.contains(&Reason::EthIpTimeout));
    }

    // Scenario E: wired up but unreachable, wifi off.
    #[test]
    fn test_internet_failover() {
        let mut f = facts(true, true, false);
        f.eth_has_internet = Some(false);
        let config = Config {
            check_internet: true,
            ..Config::default()
        };
        let decision = evaluate(&f, &connected_state(T0 - 60_000), &config);

        assert!(has_enable_wifi(&decision));
        assert!(decision.reason_codes.contains(&Reason::EthNoInternet));
        assert!(!decision.reason_codes.contains(&Reason::EthConnected));
    }

    #[test]
    fn test_internet_failover_wifi_already_on() {
        let mut f = facts(true, true, true);
        f.eth_has_internet = Some(false);
        let config = Config {
            check_internet: true,
            ..Config::default()
        };
        let decision = evaluate(&f, &connected_state(T0 - 60_000), &config);

        assert!(decision.reason_codes.contains(&Reason::EthNoInternet));
        assert!(decision.reason_codes.contains(&Reason::WifiAlreadyOn));
        assert!(!has_enable_wifi(&decision));
    }

    #[test]
    fn test_unmeasured_internet_is_not_a_failure() {
        // None means "not measured", not false.
        let mut f = facts(true, true, true);
        f.eth_has_internet = None;
        let config = Config {
            check_internet: true,
            ..Config::default()
        };
        let decision = evaluate(&f, &connected_state(T0 - 60_000), &config);

        assert!(decision.reason_codes.contains(&Reason::EthConnected));
        assert!(has_disable_wifi(&decision));
    }

    #[test]
    fn test_internet_false_ignored_when_check_disabled() {
        let mut f = facts(true, true, true);
        f.eth_has_internet = Some(false);
        let decision = evaluate(&f, &connected_state(T0 - 60_000), &Config::default());

        assert!(decision.reason_codes.contains(&Reason::EthConnected));
        assert!(!decision.reason_codes.contains(&Reason::EthNoInternet));
    }

    // Scenario F: reachability transition success -> failed.
    #[test]
    fn test_internet_transition_to_failed_logs_once() {
        let mut f = facts(true, true, true);
        f.eth_has_internet = Some(false);
        let state = State {
            last_internet_check_state: Some(CheckState::Success),
            last_internet_check_success: Some(T0 - 30_000),
            ..connected_state(T0 - 60_000)
        };
        let config = Config {
            check_internet: true,
            ..Config::default()
        };
        let decision = evaluate(&f, &state, &config);

        let unreachable_logs: Vec<&str> = log_messages(&decision)
            .into_iter()
            .filter(|m| m.contains("unreachable"))
            .collect();
        assert_eq!(unreachable_logs.len(), 1);
        assert!(unreachable_logs[0].contains("eth0"));
        assert_eq!(
            decision.new_state.last_internet_check_state,
            Some(CheckState::Failed)
        );
        // Success timestamp is not rewritten on a failure.
        assert_eq!(
            decision.new_state.last_internet_check_success,
            Some(T0 - 30_000)
        );
    }

    #[test]
    fn test_internet_recovery_logs_and_stamps_success() {
        let mut f = facts(true, true, false);
        f.eth_has_internet = Some(true);
        let state = State {
            last_internet_check_state: Some(CheckState::Failed),
            ..connected_state(T0 - 60_000)
        };
        let config = Config {
            check_internet: true,
            ..Config::default()
        };
        let decision = evaluate(&f, &state, &config);

        assert!(log_messages(&decision)
            .iter()
            .any(|m| m.contains("recovered") && m.contains("eth0")));
        assert_eq!(
            decision.new_state.last_internet_check_state,
            Some(CheckState::Success)
        );
        assert_eq!(decision.new_state.last_internet_check_success, Some(T0));
    }

    #[test]
    fn test_first_internet_observation_silent_by_default() {
        let mut f = facts(true, true, false);
        f.eth_has_internet = Some(true);
        let config = Config {
            check_internet: true,
            ..Config::default()
        };
        let decision = evaluate(&f, &connected_state(T0 - 60_000), &config);

        assert_eq!(
            decision.new_state.last_internet_check_state,
            Some(CheckState::Success)
        );
        assert_eq!(decision.new_state.last_internet_check_success, Some(T0));
        assert!(!log_messages(&decision)
            .iter()
            .any(|m| m.contains("Internet check")));
    }

    #[test]
    fn test_first_internet_observation_logged_when_verbose() {
        let mut f = facts(true, true, false);
        f.eth_has_internet = Some(true);
        let config = Config {
            check_internet: true,
            log_all_checks: true,
            ..Config::default()
        };
        let decision = evaluate(&f, &connected_state(T0 - 60_000), &config);

        assert!(log_messages(&decision)
            .iter()
            .any(|m| m.contains("active and has internet")));
    }

    #[test]
    fn test_steady_state_check_logged_only_when_verbose() {
        let mut f = facts(true, true, false);
        f.eth_has_internet = Some(true);
        let state = State {
            last_internet_check_state: Some(CheckState::Success),
            last_internet_check_success: Some(T0 - 30_000),
            ..connected_state(T0 - 60_000)
        };

        let quiet = Config {
            check_internet: true,
            ..Config::default()
        };
        let decision = evaluate(&f, &state, &quiet);
        assert!(!log_messages(&decision)
            .iter()
            .any(|m| m.contains("Internet check")));

        let verbose = Config {
            check_internet: true,
            log_all_checks: true,
            check_method: CheckMethod::Ping,
            ..Config::default()
        };
        let decision = evaluate(&f, &state, &verbose);
        assert!(log_messages(&decision)
            .iter()
            .any(|m| m.contains("ping check via eth0 succeeded")));
    }

    #[test]
    fn test_determinism() {
        let mut f = facts(true, false, true);
        f.eth_has_internet = Some(true);
        let state = State {
            last_eth_state: LinkState::Disconnected,
            last_eth_state_change: Some(T0 - 3_000),
            last_internet_check_state: Some(CheckState::Failed),
            last_internet_check_success: None,
        };
        let config = Config {
            check_internet: true,
            log_all_checks: true,
            ..Config::default()
        };

        let first = evaluate(&f, &state, &config);
        let second = evaluate(&f, &state, &config);
        assert_eq!(first, second);
    }

    #[test]
    fn test_no_edge_leaves_state_untouched() {
        // Connected and staying connected: both fields carried over exactly.
        let state = connected_state(T0 - 120_000);
        let decision = evaluate(&facts(true, true, false), &state, &Config::default());
        assert_eq!(decision.new_state.last_eth_state, state.last_eth_state);
        assert_eq!(
            decision.new_state.last_eth_state_change,
            state.last_eth_state_change
        );

        // Disconnected and staying disconnected.
        let state = State {
            last_eth_state: LinkState::Disconnected,
            last_eth_state_change: Some(T0 - 5_000),
            ..State::initial()
        };
        let decision = evaluate(&facts(false, false, true), &state, &Config::default());
        assert_eq!(
            decision.new_state.last_eth_state_change,
            Some(T0 - 5_000)
        );
    }

    #[test]
    fn test_link_without_ip_is_not_an_edge_from_disconnected() {
        // link-up/no-ip is still "disconnected" for edge purposes, so a
        // prior change timestamp keeps aging toward the timeout.
        let state = State {
            last_eth_state: LinkState::Disconnected,
            last_eth_state_change: Some(T0 - 4_000),
            ..State::initial()
        };
        let mut f = facts(true, false, false);
        f.timestamp = T0;
        let decision = evaluate(&f, &state, &Config::default());

        assert_eq!(decision.new_state.last_eth_state, LinkState::Disconnected);
        assert_eq!(decision.new_state.last_eth_state_change, Some(T0 - 4_000));
    }

    #[test]
    fn test_connected_outcomes_mutually_exclusive() {
        // Ignoring Log, exactly one of EnableWifi/DisableWifi/NoAction
        // fires whenever wired is connected.
        for wifi_is_on in [false, true] {
            for eth_has_internet in [None, Some(true), Some(false)] {
                for check_internet in [false, true] {
                    let mut f = facts(true, true, wifi_is_on);
                    f.eth_has_internet = eth_has_internet;
                    let config = Config {
                        check_internet,
                        ..Config::default()
                    };
                    let decision = evaluate(&f, &connected_state(T0 - 60_000), &config);

                    let count = decision
                        .actions
                        .iter()
                        .filter(|a| {
                            matches!(
                                a,
                                Action::EnableWifi { .. }
                                    | Action::DisableWifi { .. }
                                    | Action::NoAction { .. }
                            )
                        })
                        .count();
                    assert_eq!(
                        count, 1,
                        "wifi_is_on={} internet={:?} check={}",
                        wifi_is_on, eth_has_internet, check_internet
                    );
                }
            }
        }
    }

    #[test]
    fn test_reserved_actions_never_emitted() {
        for eth_has_link in [false, true] {
            for eth_has_ip in [false, true] {
                for wifi_is_on in [false, true] {
                    let f = facts(eth_has_link, eth_has_ip, wifi_is_on);
                    let decision = evaluate(&f, &State::initial(), &Config::default());
                    assert!(!decision.actions.iter().any(|a| matches!(
                        a,
                        Action::CheckInternet { .. } | Action::ForceRoute { .. }
                    )));
                }
            }
        }
    }
}
