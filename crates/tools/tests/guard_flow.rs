#[cfg(test)]
mod guard_flow_tests {
    use async_trait::async_trait;
    use std::sync::Arc;
    use std::sync::Mutex;
    use tokio::fs;

    use deskhand_core::{ActionOutcome, Actor, AuditEntry, Decision};
    use deskhand_tools::actions::{files, launch, process, shell};
    use deskhand_tools::{AuditSink, ConfirmationGate, GuardedExecutor};

    // Mock implementations for testing
    struct FixedGate(Decision);
    #[derive(Default)]
    struct CapturingSink(Mutex<Vec<AuditEntry>>);

    #[async_trait]
    impl ConfirmationGate for FixedGate {
        async fn confirm(&self, _description: &str) -> Decision {
            self.0
        }
    }

    #[async_trait]
    impl AuditSink for CapturingSink {
        async fn record(&self, entry: AuditEntry) {
            self.0.lock().unwrap().push(entry);
        }
    }

    fn approved() -> (GuardedExecutor, Arc<CapturingSink>) {
        let sink = Arc::new(CapturingSink::default());
        (
            GuardedExecutor::new(Arc::new(FixedGate(Decision::Approved)), sink.clone()),
            sink,
        )
    }

    fn denied() -> (GuardedExecutor, Arc<CapturingSink>) {
        let sink = Arc::new(CapturingSink::default());
        (
            GuardedExecutor::new(Arc::new(FixedGate(Decision::Denied)), sink.clone()),
            sink,
        )
    }

    #[tokio::test]
    async fn test_approved_shell_command_reports_stdout() {
        let (executor, sink) = approved();

        let outcome = executor
            .run(
                "Run shell command: echo hi",
                async { shell::run_shell("echo hi", shell::SHELL_TIMEOUT).await },
            )
            .await;

        match outcome {
            ActionOutcome::Success(report) => {
                assert!(report.contains("Return code: 0"));
                assert!(report.contains("STDOUT:\nhi\n"));
            }
            other => panic!("expected success, got {other:?}"),
        }

        let entries = sink.0.lock().unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].decision, Some(Decision::Approved));
    }

    #[tokio::test]
    async fn test_denied_delete_leaves_file_alone() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("precious.txt");
        fs::write(&file, "keep me").await.unwrap();

        let (executor, sink) = denied();
        let path = file.to_str().unwrap().to_string();

        let outcome = executor
            .run(
                &format!("Delete path: {path}"),
                async move { files::delete_path(&path).await },
            )
            .await;

        assert_eq!(outcome, ActionOutcome::Cancelled);
        assert!(file.exists(), "denied delete must not touch the file");

        let entries = sink.0.lock().unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].decision, Some(Decision::Denied));
        assert_eq!(entries[0].actor, Actor::User);
    }

    #[tokio::test]
    async fn test_approved_delete_removes_file_and_audits() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("scratch.txt");
        fs::write(&file, "bye").await.unwrap();

        let (executor, sink) = approved();
        let path = file.to_str().unwrap().to_string();

        let outcome = executor
            .run(
                &format!("Delete path: {path}"),
                async move { files::delete_path(&path).await },
            )
            .await;

        assert!(matches!(outcome, ActionOutcome::Success(msg) if msg.starts_with("File removed:")));
        assert!(!file.exists());
        assert_eq!(sink.0.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_failed_launch_is_reported_not_raised() {
        let (executor, _sink) = approved();

        let outcome = executor
            .run(
                "Open app/command: no-such-binary-183a",
                async { launch::open_target("no-such-binary-183a").await },
            )
            .await;

        assert!(
            matches!(outcome, ActionOutcome::Failed(msg) if msg.starts_with("Action error:")),
        );
    }

    #[tokio::test]
    async fn test_process_listing_is_numbered() {
        let (executor, sink) = approved();

        let outcome = executor
            .run_unguarded("List top 5 processes", async {
                process::list_top_processes(5).await
            })
            .await;

        match outcome {
            ActionOutcome::Success(listing) => {
                assert!(listing.starts_with("1. "));
                assert!(listing.contains("pid="));
                assert!(listing.lines().count() <= 5);
            }
            other => panic!("expected success, got {other:?}"),
        }

        assert_eq!(sink.0.lock().unwrap()[0].actor, Actor::System);
    }
}
