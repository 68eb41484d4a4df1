//! Shell command execution with captured output.

use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;
use tokio::time::timeout;

use crate::error::{ActionError, ActionResult};

/// Wall-clock bound for one shell command.
pub const SHELL_TIMEOUT: Duration = Duration::from_secs(60);

/// Run a command line through `sh -c`. The report carries the return
/// code and both output streams.
pub async fn run_shell(command_line: &str, limit: Duration) -> ActionResult<String> {
    let trimmed = command_line.trim();
    if trimmed.is_empty() {
        return Err(ActionError::InvalidArgument(
            "command cannot be empty".to_string(),
        ));
    }

    let output_future = Command::new("sh")
        .arg("-c")
        .arg(trimmed)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true)
        .output();

    let output = timeout(limit, output_future)
        .await
        .map_err(|_| ActionError::Timeout)??;

    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    let code = output.status.code().unwrap_or(-1);

    Ok(format!(
        "Return code: {code}\n\nSTDOUT:\n{stdout}\n\nSTDERR:\n{stderr}"
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_empty_command_rejected() {
        let err = run_shell("", SHELL_TIMEOUT).await.unwrap_err();
        assert!(matches!(err, ActionError::InvalidArgument(_)));
    }

    #[tokio::test]
    async fn test_report_contains_code_and_streams() {
        let report = run_shell("echo hi", SHELL_TIMEOUT).await.unwrap();
        assert_eq!(report, "Return code: 0\n\nSTDOUT:\nhi\n\nSTDERR:\n");
    }

    #[tokio::test]
    async fn test_nonzero_exit_is_still_ok() {
        let report = run_shell("exit 3", SHELL_TIMEOUT).await.unwrap();
        assert!(report.starts_with("Return code: 3"));
    }

    #[tokio::test]
    async fn test_stderr_captured() {
        let report = run_shell("echo oops 1>&2", SHELL_TIMEOUT).await.unwrap();
        assert!(report.contains("STDERR:\noops"));
    }

    #[tokio::test]
    async fn test_timeout_kills_command() {
        let err = run_shell("sleep 5", Duration::from_millis(100))
            .await
            .unwrap_err();
        assert!(matches!(err, ActionError::Timeout));
    }
}
