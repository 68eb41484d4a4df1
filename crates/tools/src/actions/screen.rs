//! Screen capture through the Wayland grab tools.

use chrono::Utc;
use deskhand_core::CaptureMode;
use tokio::process::Command;

use crate::error::{ActionError, ActionResult};

pub async fn capture_screen(mode: CaptureMode) -> ActionResult<String> {
    if !command_exists("grim").await {
        return Err(ActionError::OperationFailed(
            "No screenshot backend found (install 'grim')".to_string(),
        ));
    }

    let target = format!("/tmp/deskhand-shot-{}.png", Utc::now().timestamp());

    match mode {
        CaptureMode::Full => run_checked("grim", &[&target]).await?,
        CaptureMode::Region => {
            let selection = run_output("slurp", &[]).await.map_err(|_| {
                ActionError::OperationFailed(
                    "Region selection failed (is 'slurp' installed?)".to_string(),
                )
            })?;
            let geometry = selection.trim().to_string();
            if geometry.is_empty() {
                return Err(ActionError::OperationFailed(
                    "Region selection cancelled".to_string(),
                ));
            }
            run_checked("grim", &["-g", &geometry, &target]).await?;
        }
    }

    Ok(format!("Screenshot saved to {target}"))
}

async fn command_exists(command: &str) -> bool {
    Command::new("which")
        .arg(command)
        .output()
        .await
        .map(|output| output.status.success())
        .unwrap_or(false)
}

async fn run_checked(command: &str, args: &[&str]) -> ActionResult<()> {
    let output = Command::new(command).args(args).output().await?;
    if output.status.success() {
        return Ok(());
    }
    Err(ActionError::OperationFailed(
        String::from_utf8_lossy(&output.stderr).to_string(),
    ))
}

async fn run_output(command: &str, args: &[&str]) -> ActionResult<String> {
    let output = Command::new(command).args(args).output().await?;
    if output.status.success() {
        return Ok(String::from_utf8_lossy(&output.stdout).to_string());
    }
    Err(ActionError::OperationFailed(
        String::from_utf8_lossy(&output.stderr).to_string(),
    ))
}
