//! Internet reachability probes.
//!
//! A probe that cannot run yields `None` (unmeasured), never an error;
//! the engine treats unmeasured as distinct from unreachable.

use crate::runner::CommandRunner;
use netswitch_common::CheckMethod;
use tracing::warn;

pub const DEFAULT_PING_TARGET: &str = "8.8.8.8";
pub const DEFAULT_CURL_TARGET: &str = "http://1.1.1.1";

/// Probe reachability via the configured method.
pub async fn check_internet<R: CommandRunner>(
    runner: &R,
    method: CheckMethod,
    eth_dev: &str,
    target: Option<&str>,
) -> Option<bool> {
    let result = match method {
        CheckMethod::Gateway => runner
            .run("ip", &["route", "show", "default", "dev", eth_dev])
            .await
            .map(|o| o.success && !o.stdout.trim().is_empty()),
        CheckMethod::Ping => {
            let target = target.unwrap_or(DEFAULT_PING_TARGET);
            runner
                .run("ping", &["-c", "1", "-W", "2", target])
                .await
                .map(|o| o.success)
        }
        CheckMethod::Curl => {
            let target = target.unwrap_or(DEFAULT_CURL_TARGET);
            runner
                .run("curl", &["-s", "--head", "--max-time", "3", target])
                .await
                .map(|o| o.success)
        }
    };

    match result {
        Ok(reachable) => Some(reachable),
        Err(e) => {
            warn!("Internet probe could not run: {}", e);
            None
        }
    }
}
