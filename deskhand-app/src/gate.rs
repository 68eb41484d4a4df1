//! Confirmation gate backed by the surface's modal.

use async_trait::async_trait;
use tokio::sync::{mpsc, oneshot};

use deskhand_core::Decision;
use deskhand_tools::ConfirmationGate;

use crate::surface::SurfaceEvent;

/// Asks the user through the surface and waits for the modal's answer.
pub struct SurfaceGate {
    events: mpsc::Sender<SurfaceEvent>,
}

impl SurfaceGate {
    pub fn new(events: mpsc::Sender<SurfaceEvent>) -> Self {
        Self { events }
    }
}

#[async_trait]
impl ConfirmationGate for SurfaceGate {
    async fn confirm(&self, description: &str) -> Decision {
        let (reply, answer) = oneshot::channel();
        let event = SurfaceEvent::Confirm {
            description: description.to_string(),
            reply,
        };
        // If the surface is gone the answer can only be no.
        if self.events.send(event).await.is_err() {
            tracing::warn!("surface closed before confirmation could be asked");
            return Decision::Denied;
        }
        match answer.await {
            Ok(decision) => decision,
            Err(_) => {
                tracing::warn!("surface dropped a pending confirmation");
                Decision::Denied
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_gate_relays_the_modal_answer() {
        let (tx, mut rx) = mpsc::channel(4);
        let gate = SurfaceGate::new(tx);

        let asked = tokio::spawn(async move { gate.confirm("Delete path: /tmp/a").await });

        match rx.recv().await.unwrap() {
            SurfaceEvent::Confirm { description, reply } => {
                assert_eq!(description, "Delete path: /tmp/a");
                reply.send(Decision::Approved).unwrap();
            }
            _ => panic!("expected a confirm event"),
        }

        assert_eq!(asked.await.unwrap(), Decision::Approved);
    }

    #[tokio::test]
    async fn test_closed_surface_means_denied() {
        let (tx, rx) = mpsc::channel(4);
        drop(rx);
        let gate = SurfaceGate::new(tx);
        assert_eq!(gate.confirm("Run shell command: rm -rf /").await, Decision::Denied);
    }

    #[tokio::test]
    async fn test_dropped_reply_means_denied() {
        let (tx, mut rx) = mpsc::channel(4);
        let gate = SurfaceGate::new(tx);

        let asked = tokio::spawn(async move { gate.confirm("Open app/command: xterm").await });

        match rx.recv().await.unwrap() {
            SurfaceEvent::Confirm { reply, .. } => drop(reply),
            _ => panic!("expected a confirm event"),
        }

        assert_eq!(asked.await.unwrap(), Decision::Denied);
    }
}
