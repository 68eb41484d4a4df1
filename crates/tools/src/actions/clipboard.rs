//! Clipboard access. All calls hop to a blocking thread; the platform
//! clipboard APIs are synchronous.

use tokio::task;

use crate::error::{ActionError, ActionResult};

pub async fn read_clipboard() -> ActionResult<String> {
    task::spawn_blocking(|| {
        let mut clipboard = open_clipboard()?;
        match clipboard.get_text() {
            Ok(text) if text.is_empty() => Ok("Clipboard is empty.".to_string()),
            Ok(text) => Ok(format!("Clipboard contents:\n{text}")),
            Err(arboard::Error::ContentNotAvailable) => Ok("Clipboard is empty.".to_string()),
            Err(e) => Err(ActionError::OperationFailed(e.to_string())),
        }
    })
    .await
    .map_err(|e| ActionError::OperationFailed(e.to_string()))?
}

pub async fn write_clipboard(text: String) -> ActionResult<String> {
    task::spawn_blocking(move || {
        let mut clipboard = open_clipboard()?;
        clipboard
            .set_text(text)
            .map_err(|e| ActionError::OperationFailed(e.to_string()))?;
        Ok("Copied to clipboard.".to_string())
    })
    .await
    .map_err(|e| ActionError::OperationFailed(e.to_string()))?
}

pub async fn clear_clipboard() -> ActionResult<String> {
    task::spawn_blocking(|| {
        let mut clipboard = open_clipboard()?;
        clipboard
            .clear()
            .map_err(|e| ActionError::OperationFailed(e.to_string()))?;
        Ok("Clipboard cleared.".to_string())
    })
    .await
    .map_err(|e| ActionError::OperationFailed(e.to_string()))?
}

fn open_clipboard() -> ActionResult<arboard::Clipboard> {
    arboard::Clipboard::new()
        .map_err(|e| ActionError::OperationFailed(format!("clipboard unavailable: {e}")))
}
