//! Confirmation gate and fault barrier around actions.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::timeout;
use tracing::{error, warn};

use deskhand_core::{ActionOutcome, AuditEntry, Decision};

use crate::error::{ActionError, ActionResult};
use crate::traits::{AuditSink, ConfirmationGate};

/// Outer bound on one action. Sits above the shell's own 60s limit so
/// that limit is the one that normally fires.
pub const DEFAULT_ACTION_TIMEOUT: Duration = Duration::from_secs(120);

pub struct GuardedExecutor {
    gate: Arc<dyn ConfirmationGate>,
    audit: Arc<dyn AuditSink>,
    timeout: Duration,
}

impl GuardedExecutor {
    pub fn new(gate: Arc<dyn ConfirmationGate>, audit: Arc<dyn AuditSink>) -> Self {
        Self {
            gate,
            audit,
            timeout: DEFAULT_ACTION_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Run a privileged action. Asks the surface first; on denial the
    /// action future is dropped unpolled. Writes one audit entry per
    /// invocation regardless of outcome.
    pub async fn run<Fut>(&self, description: &str, action: Fut) -> ActionOutcome
    where
        Fut: Future<Output = ActionResult<String>> + Send + 'static,
    {
        let decision = self.gate.confirm(description).await;
        let outcome = match decision {
            Decision::Denied => ActionOutcome::Cancelled,
            Decision::Approved => self.execute_isolated(action).await,
        };

        self.audit
            .record(AuditEntry::user(description, decision, &outcome))
            .await;
        outcome
    }

    /// Run a read-only action: no confirmation, still audited.
    pub async fn run_unguarded<Fut>(&self, description: &str, action: Fut) -> ActionOutcome
    where
        Fut: Future<Output = ActionResult<String>> + Send + 'static,
    {
        let outcome = self.execute_isolated(action).await;
        self.audit
            .record(AuditEntry::system(description, &outcome))
            .await;
        outcome
    }

    async fn execute_isolated<Fut>(&self, action: Fut) -> ActionOutcome
    where
        Fut: Future<Output = ActionResult<String>> + Send + 'static,
    {
        // Spawn so a panicking action cannot take the caller down.
        let handle = tokio::spawn(action);

        let result: ActionResult<String> = match timeout(self.timeout, handle).await {
            Ok(Ok(result)) => result,
            Ok(Err(join_err)) => {
                if join_err.is_panic() {
                    error!("action task panicked");
                } else {
                    error!("action task cancelled");
                }
                Err(ActionError::Internal)
            }
            Err(_) => {
                warn!("action timed out after {:?}", self.timeout);
                Err(ActionError::Timeout)
            }
        };

        match result {
            Ok(text) => ActionOutcome::Success(text),
            Err(err) => ActionOutcome::Failed(format!("Action error: {err}")),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use deskhand_core::{Actor, AuditLevel};
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use std::sync::Mutex;

    struct StaticGate {
        decision: Decision,
        calls: AtomicUsize,
    }

    impl StaticGate {
        fn new(decision: Decision) -> Arc<Self> {
            Arc::new(Self {
                decision,
                calls: AtomicUsize::new(0),
            })
        }
    }

    #[async_trait]
    impl ConfirmationGate for StaticGate {
        async fn confirm(&self, _description: &str) -> Decision {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.decision
        }
    }

    #[derive(Default)]
    struct RecordingSink {
        entries: Mutex<Vec<AuditEntry>>,
    }

    #[async_trait]
    impl AuditSink for RecordingSink {
        async fn record(&self, entry: AuditEntry) {
            self.entries.lock().unwrap().push(entry);
        }
    }

    fn executor(
        decision: Decision,
    ) -> (GuardedExecutor, Arc<StaticGate>, Arc<RecordingSink>) {
        let gate = StaticGate::new(decision);
        let sink = Arc::new(RecordingSink::default());
        let executor = GuardedExecutor::new(gate.clone(), sink.clone());
        (executor, gate, sink)
    }

    #[tokio::test]
    async fn test_denied_never_polls_action() {
        let (executor, _gate, sink) = executor(Decision::Denied);
        let ran = Arc::new(AtomicBool::new(false));
        let flag = ran.clone();

        let outcome = executor
            .run("Delete path: /tmp/x", async move {
                flag.store(true, Ordering::SeqCst);
                Ok("should not happen".to_string())
            })
            .await;

        assert_eq!(outcome, ActionOutcome::Cancelled);
        assert!(!ran.load(Ordering::SeqCst));

        let entries = sink.entries.lock().unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].actor, Actor::User);
        assert_eq!(entries[0].decision, Some(Decision::Denied));
    }

    #[tokio::test]
    async fn test_approved_runs_exactly_once() {
        let (executor, gate, sink) = executor(Decision::Approved);
        let runs = Arc::new(AtomicUsize::new(0));
        let counter = runs.clone();

        let outcome = executor
            .run("Run shell command: echo hi", async move {
                counter.fetch_add(1, Ordering::SeqCst);
                Ok("done".to_string())
            })
            .await;

        assert_eq!(outcome, ActionOutcome::Success("done".to_string()));
        assert_eq!(runs.load(Ordering::SeqCst), 1);
        assert_eq!(gate.calls.load(Ordering::SeqCst), 1);
        assert_eq!(sink.entries.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_action_fault_becomes_failed_outcome() {
        let (executor, _gate, sink) = executor(Decision::Approved);

        let outcome = executor
            .run("Open app/command: nope", async {
                Err(ActionError::OperationFailed("boom".to_string()))
            })
            .await;

        assert_eq!(
            outcome,
            ActionOutcome::Failed("Action error: Operation failed: boom".to_string())
        );
        assert_eq!(sink.entries.lock().unwrap()[0].level, AuditLevel::Error);
    }

    #[tokio::test]
    async fn test_panicking_action_is_isolated() {
        let (executor, _gate, _sink) = executor(Decision::Approved);

        let outcome = executor
            .run("Run shell command: panic", async {
                panic!("deliberate test panic");
            })
            .await;

        assert!(matches!(outcome, ActionOutcome::Failed(msg) if msg.contains("Internal error")));
    }

    #[tokio::test(start_paused = true)]
    async fn test_slow_action_times_out() {
        let (executor, _gate, _sink) = executor(Decision::Approved);
        let executor = executor.with_timeout(Duration::from_millis(50));

        let outcome = executor
            .run("Run shell command: sleep", async {
                tokio::time::sleep(Duration::from_secs(600)).await;
                Ok("too late".to_string())
            })
            .await;

        assert!(matches!(outcome, ActionOutcome::Failed(msg) if msg.contains("timed out")));
    }

    #[tokio::test]
    async fn test_unguarded_skips_gate_but_audits() {
        let (executor, gate, sink) = executor(Decision::Denied);

        let outcome = executor
            .run_unguarded("List top 10 processes", async {
                Ok("1. init (pid=1)".to_string())
            })
            .await;

        assert!(outcome.is_success());
        assert_eq!(gate.calls.load(Ordering::SeqCst), 0);

        let entries = sink.entries.lock().unwrap();
        assert_eq!(entries[0].actor, Actor::System);
        assert_eq!(entries[0].decision, None);
    }
}
