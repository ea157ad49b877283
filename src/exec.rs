//! External command execution.
//!
//! Every probe in the check shells out (`ifconfig`, `ping`). They all go
//! through the [`CommandRunner`] trait so the orchestrator can be driven by
//! a scripted runner in tests.

use async_trait::async_trait;
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;
use tokio::time::timeout;
use tracing::debug;

/// Failure to obtain an exit status from an external command
#[derive(Debug, thiserror::Error)]
pub enum ExecError {
    /// The process could not be started (binary missing, permissions, ...)
    #[error("failed to spawn {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// The process did not finish within its time bound and was killed
    #[error("{program} timed out after {}ms", .after.as_millis())]
    Timeout { program: String, after: Duration },
}

/// Captured result of a finished command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutput {
    /// Exit code (0 = success, -1 when terminated by a signal)
    pub exit_code: i32,
    /// Standard output
    pub stdout: String,
    /// Standard error
    pub stderr: String,
}

impl CommandOutput {
    /// Create a successful result
    pub fn success(stdout: impl Into<String>) -> Self {
        Self {
            exit_code: 0,
            stdout: stdout.into(),
            stderr: String::new(),
        }
    }

    /// Create a failed result
    pub fn failure(exit_code: i32, stderr: impl Into<String>) -> Self {
        Self {
            exit_code,
            stdout: String::new(),
            stderr: stderr.into(),
        }
    }

    /// Check if the command succeeded
    pub fn is_success(&self) -> bool {
        self.exit_code == 0
    }
}

/// Runs an external program and captures its output
#[async_trait]
pub trait CommandRunner: Send + Sync {
    /// Run `program` with `args`, killing it if it outlives `limit`
    async fn run(
        &self,
        program: &str,
        args: &[String],
        limit: Duration,
    ) -> Result<CommandOutput, ExecError>;
}

/// Runs commands on the local host with `tokio::process`
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

#[async_trait]
impl CommandRunner for SystemRunner {
    async fn run(
        &self,
        program: &str,
        args: &[String],
        limit: Duration,
    ) -> Result<CommandOutput, ExecError> {
        debug!(program, ?args, timeout_ms = limit.as_millis() as u64, "Running command");

        let child = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|source| ExecError::Spawn {
                program: program.to_string(),
                source,
            })?;

        // Dropping the wait future on timeout drops the child, which kills it.
        let output = match timeout(limit, child.wait_with_output()).await {
            Ok(result) => result.map_err(|source| ExecError::Spawn {
                program: program.to_string(),
                source,
            })?,
            Err(_) => {
                return Err(ExecError::Timeout {
                    program: program.to_string(),
                    after: limit,
                });
            }
        };

        Ok(CommandOutput {
            exit_code: output.status.code().unwrap_or(-1),
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_output_constructors() {
        let ok = CommandOutput::success("igb0: flags=8843");
        assert!(ok.is_success());
        assert_eq!(ok.stdout, "igb0: flags=8843");
        assert!(ok.stderr.is_empty());

        let failed = CommandOutput::failure(1, "interface igb9 does not exist");
        assert!(!failed.is_success());
        assert_eq!(failed.exit_code, 1);
        assert!(failed.stdout.is_empty());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_system_runner_captures_output() {
        let out = SystemRunner
            .run("sh", &["-c".to_string(), "echo carp; exit 3".to_string()], Duration::from_secs(5))
            .await
            .unwrap();
        assert_eq!(out.exit_code, 3);
        assert_eq!(out.stdout.trim(), "carp");
    }

    #[tokio::test]
    async fn test_system_runner_missing_binary() {
        let err = SystemRunner
            .run("/nonexistent/carpcheck-ifconfig", &[], Duration::from_secs(1))
            .await
            .unwrap_err();
        assert!(matches!(err, ExecError::Spawn { .. }));
        assert!(err.to_string().contains("carpcheck-ifconfig"));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_system_runner_timeout() {
        let err = SystemRunner
            .run("sleep", &["5".to_string()], Duration::from_millis(100))
            .await
            .unwrap_err();
        assert!(matches!(err, ExecError::Timeout { .. }));
    }
}
