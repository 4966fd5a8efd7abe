//! Foreground launcher for llama.cpp processes.
//!
//! One child per call: spawn, inherit the terminal, block until the child
//! exits or Ctrl-C arrives. `kill_on_drop` keeps a child from outliving the
//! call on any unwind path.

use crate::error::LaunchError;
use std::path::Path;
use std::process::Stdio;
use tokio::process::Command;

pub const DEFAULT_SERVER_COMMAND: &str = "llama-server";
pub const DEFAULT_CLI_COMMAND: &str = "llama-cli";

/// How a launched child ended.
///
/// A non-zero exit code is the server's own termination status, passed
/// through unchanged — not a launcher error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LaunchOutcome {
    /// The child exited on its own. `None` when it was terminated by a
    /// signal rather than exiting.
    Exited(Option<i32>),
    /// Ctrl-C arrived; the child was terminated and reaped before return.
    Interrupted,
}

/// Launches llama.cpp binaries against a cataloged model file.
///
/// Command names resolve through the host `PATH`. The launcher trusts the
/// model path it is given — existence and extension checks happen earlier,
/// at the shell boundary.
pub struct Launcher {
    server_command: String,
    cli_command: String,
}

impl Default for Launcher {
    fn default() -> Self {
        Self::new(DEFAULT_SERVER_COMMAND, DEFAULT_CLI_COMMAND)
    }
}

impl Launcher {
    pub fn new(server_command: impl Into<String>, cli_command: impl Into<String>) -> Self {
        Self {
            server_command: server_command.into(),
            cli_command: cli_command.into(),
        }
    }

    /// Run `llama-server` in the foreground until it exits or Ctrl-C.
    pub async fn serve(
        &self,
        model_path: &Path,
        ctx_len: Option<i64>,
    ) -> Result<LaunchOutcome, LaunchError> {
        self.launch(&self.server_command, model_path, ctx_len).await
    }

    /// Run `llama-cli` in the foreground until it exits or Ctrl-C.
    pub async fn run_cli(
        &self,
        model_path: &Path,
        ctx_len: Option<i64>,
    ) -> Result<LaunchOutcome, LaunchError> {
        self.launch(&self.cli_command, model_path, ctx_len).await
    }

    async fn launch(
        &self,
        command: &str,
        model_path: &Path,
        ctx_len: Option<i64>,
    ) -> Result<LaunchOutcome, LaunchError> {
        let mut child = Command::new(command)
            .args(build_args(model_path, ctx_len))
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| LaunchError::Spawn {
                command: command.to_string(),
                source: e,
            })?;

        tokio::select! {
            status = child.wait() => {
                let status = status.map_err(|e| LaunchError::Wait {
                    command: command.to_string(),
                    source: e,
                })?;
                Ok(LaunchOutcome::Exited(status.code()))
            }
            _ = tokio::signal::ctrl_c() => {
                // The child shares our terminal and may already be dying
                // from the same SIGINT; kill() is a no-op then.
                let _ = child.kill().await;
                let _ = child.wait().await;
                Ok(LaunchOutcome::Interrupted)
            }
        }
    }
}

/// Deterministic argv: the model path flag always comes first, the context
/// flag only when a nonzero override is present. llama.cpp's own parser may
/// be order-sensitive, so this order is part of the contract.
fn build_args(model_path: &Path, ctx_len: Option<i64>) -> Vec<String> {
    let mut args = vec!["-m".to_string(), model_path.to_string_lossy().into_owned()];
    if let Some(ctx) = ctx_len.filter(|c| *c != 0) {
        args.push("-c".to_string());
        args.push(ctx.to_string());
    }
    args
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::path::PathBuf;

    #[test]
    fn test_args_with_context() {
        let args = build_args(&PathBuf::from("/tmp/a.gguf"), Some(4096));
        assert_eq!(args, ["-m", "/tmp/a.gguf", "-c", "4096"]);
    }

    #[test]
    fn test_args_without_context() {
        let args = build_args(&PathBuf::from("/tmp/a.gguf"), None);
        assert_eq!(args, ["-m", "/tmp/a.gguf"]);
    }

    #[test]
    fn test_zero_context_treated_as_absent() {
        let args = build_args(&PathBuf::from("/tmp/a.gguf"), Some(0));
        assert_eq!(args, ["-m", "/tmp/a.gguf"]);
    }

    #[tokio::test]
    async fn test_spawn_failure_is_launch_error() {
        let launcher = Launcher::new("gglib-no-such-binary", "gglib-no-such-binary");
        let err = launcher
            .serve(&PathBuf::from("/tmp/a.gguf"), None)
            .await
            .unwrap_err();
        assert!(matches!(err, LaunchError::Spawn { .. }));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_exit_status_passed_through() {
        // `true` and `false` ignore the -m argument; only the exit status
        // matters here.
        let ok = Launcher::new("true", "true");
        let outcome = ok.serve(&PathBuf::from("/tmp/a.gguf"), None).await.unwrap();
        assert_eq!(outcome, LaunchOutcome::Exited(Some(0)));

        let fail = Launcher::new("false", "false");
        let outcome = fail
            .run_cli(&PathBuf::from("/tmp/a.gguf"), Some(2048))
            .await
            .unwrap();
        assert_eq!(outcome, LaunchOutcome::Exited(Some(1)));
    }
}
