//! Launching programs and opening files.

use std::path::Path;
use std::process::Stdio;
use tokio::process::Command;

use crate::error::{ActionError, ActionResult};

/// Open a target: existing paths go through the desktop handler,
/// anything else is tokenized and spawned directly.
pub async fn open_target(target: &str) -> ActionResult<String> {
    let trimmed = target.trim();
    if trimmed.is_empty() {
        return Err(ActionError::InvalidArgument(
            "target cannot be empty".to_string(),
        ));
    }

    if Path::new(trimmed).exists() {
        spawn_detached("xdg-open", &[trimmed])?;
        return Ok(format!("Opened '{trimmed}'."));
    }

    let mut parts = trimmed.split_whitespace();
    let program = parts.next().ok_or_else(|| {
        ActionError::InvalidArgument("target cannot be empty".to_string())
    })?;
    let args: Vec<&str> = parts.collect();

    let pid = spawn_detached(program, &args)?;
    Ok(format!("Launched '{trimmed}' (pid={pid})."))
}

/// Launched programs must not inherit the surface's terminal.
fn spawn_detached(program: &str, args: &[&str]) -> ActionResult<u32> {
    let child = Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .map_err(|e| {
            ActionError::OperationFailed(format!("failed to launch '{program}': {e}"))
        })?;

    Ok(child.id().unwrap_or_default())
}
