use async_trait::async_trait;
use deskhand_core::{AuditEntry, Decision};

/// Yes/no approval for a privileged action. Answered by the presentation
/// surface, which owns all modal interaction.
#[async_trait]
pub trait ConfirmationGate: Send + Sync {
    async fn confirm(&self, description: &str) -> Decision;
}

/// Append-only audit log. Implementations must tolerate concurrent
/// appends without interleaving partial lines.
#[async_trait]
pub trait AuditSink: Send + Sync {
    async fn record(&self, entry: AuditEntry);
}
