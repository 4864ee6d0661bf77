//! Command execution seam.
//!
//! Fact collection, probes, and the executor all shell out through this
//! trait so tests can script command output instead of touching nmcli.

use netswitch_common::NetswitchError;

#[derive(Debug, Clone)]
pub struct CommandOutput {
    pub success: bool,
    pub stdout: String,
}

#[allow(async_fn_in_trait)]
pub trait CommandRunner {
    async fn run(&self, program: &str, args: &[&str]) -> Result<CommandOutput, NetswitchError>;
}

/// Runs commands on the real system via tokio.
pub struct SystemCommandRunner;

impl CommandRunner for SystemCommandRunner {
    async fn run(&self, program: &str, args: &[&str]) -> Result<CommandOutput, NetswitchError> {
        let output = tokio::process::Command::new(program)
            .args(args)
            .output()
            .await
            .map_err(|e| NetswitchError::Command(format!("{}: failed to spawn: {}", program, e)))?;

        Ok(CommandOutput {
            success: output.status.success(),
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
        })
    }
}
