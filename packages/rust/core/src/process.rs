//! Captured external command execution with a deadline.

use std::ffi::OsStr;
use std::path::Path;
use std::process::Stdio;
use std::time::Duration;

use tokio::process::Command;
use tracing::debug;

use sdkdocs_shared::{DocGenError, Result, ToolCommand};

/// Captured result of a finished command.
#[derive(Debug, Clone)]
pub struct ToolOutput {
    /// Whether the command exited with status zero.
    pub success: bool,
    /// Exit code, `None` when killed by a signal.
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl ToolOutput {
    /// Trimmed stdout of a successful run, `None` on failure or empty output.
    pub fn stdout_if_ok(&self) -> Option<&str> {
        let out = self.stdout.trim();
        (self.success && !out.is_empty()).then_some(out)
    }

    /// Last non-empty stderr line, for log messages.
    pub fn stderr_tail(&self) -> &str {
        self.stderr
            .lines()
            .rev()
            .find(|l| !l.trim().is_empty())
            .unwrap_or("")
            .trim()
    }
}

/// Run `cmd` followed by `extra` arguments, capturing its output.
///
/// Spawn failures map to [`DocGenError::Process`]; a run past
/// `cmd.timeout_secs` is killed and maps to [`DocGenError::Timeout`]. A
/// non-zero exit is not an error: callers inspect [`ToolOutput::success`].
pub async fn run_tool<I, S>(cmd: &ToolCommand, extra: I, cwd: Option<&Path>) -> Result<ToolOutput>
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    let mut command = Command::new(&cmd.program);
    command
        .args(&cmd.args)
        .args(extra)
        .stdin(Stdio::null())
        .kill_on_drop(true);
    if let Some(dir) = cwd {
        command.current_dir(dir);
    }

    debug!(command = %cmd.display(), cwd = ?cwd, timeout_secs = cmd.timeout_secs, "running command");

    let deadline = Duration::from_secs(cmd.timeout_secs);
    let output = match tokio::time::timeout(deadline, command.output()).await {
        Ok(result) => result.map_err(|e| DocGenError::process(&cmd.program, e.to_string()))?,
        Err(_) => {
            return Err(DocGenError::Timeout {
                program: cmd.program.clone(),
                secs: cmd.timeout_secs,
            });
        }
    };

    let out = ToolOutput {
        success: output.status.success(),
        code: output.status.code(),
        stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
    };

    debug!(
        command = %cmd.display(),
        success = out.success,
        code = ?out.code,
        stdout_len = out.stdout.len(),
        "command finished"
    );

    Ok(out)
}
