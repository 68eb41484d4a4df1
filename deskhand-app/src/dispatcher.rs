//! Turns classified commands into running work.
//!
//! Every submission becomes one worker task holding one semaphore permit,
//! so a burst of inputs queues instead of spawning without bound. Workers
//! report back to the surface only through [`SurfaceEvent`] messages.

use std::path::PathBuf;
use std::sync::Arc;

use tokio::sync::{mpsc, oneshot, Semaphore};
use tracing::debug;

use deskhand_core::{classify, ActionOutcome, AuditEntry, Command};
use deskhand_memory::{TranscriptError, TranscriptStore};
use deskhand_providers::GenerationGateway;
use deskhand_tools::actions::{clipboard, files, launch, process, screen, shell, system};
use deskhand_tools::{AuditSink, GuardedExecutor};

use crate::surface::{Role, SurfaceEvent};

pub struct Dispatcher {
    executor: GuardedExecutor,
    gateway: GenerationGateway,
    transcripts: Arc<TranscriptStore>,
    audit: Arc<dyn AuditSink>,
    events: mpsc::Sender<SurfaceEvent>,
    permits: Arc<Semaphore>,
    search_root: PathBuf,
}

impl Dispatcher {
    pub fn new(
        executor: GuardedExecutor,
        gateway: GenerationGateway,
        transcripts: Arc<TranscriptStore>,
        audit: Arc<dyn AuditSink>,
        events: mpsc::Sender<SurfaceEvent>,
        max_concurrent: usize,
        search_root: PathBuf,
    ) -> Arc<Self> {
        Arc::new(Self {
            executor,
            gateway,
            transcripts,
            audit,
            events,
            permits: Arc::new(Semaphore::new(max_concurrent.max(1))),
            search_root,
        })
    }

    /// Accept one submitted line. Returns immediately; the work runs on its
    /// own task so the surface keeps reading input.
    pub fn submit(self: &Arc<Self>, text: String) {
        let dispatcher = self.clone();
        tokio::spawn(async move {
            let _permit = match dispatcher.permits.clone().acquire_owned().await {
                Ok(permit) => permit,
                // Closed only at shutdown; nothing left to run against.
                Err(_) => return,
            };
            let command = classify(&text);
            debug!(?command, "dispatching");
            dispatcher.run_command(command).await;
        });
    }

    async fn run_command(&self, command: Command) {
        let description = command.describe();
        match command {
            Command::OpenTarget(target) => {
                self.guarded(&description, async move { launch::open_target(&target).await })
                    .await;
            }
            Command::RunShell(line) => {
                self.guarded(&description, async move {
                    shell::run_shell(&line, shell::SHELL_TIMEOUT).await
                })
                .await;
            }
            Command::DeletePath(path) => {
                self.guarded(&description, async move { files::delete_path(&path).await })
                    .await;
            }
            Command::ListProcesses(count) => {
                self.unguarded(&description, process::list_top_processes(count))
                    .await;
            }
            Command::SystemInfo => {
                self.unguarded(&description, system::system_info()).await;
            }
            Command::HealthStatus => {
                self.unguarded(&description, system::health_status()).await;
            }
            Command::SearchFiles(pattern) => {
                let root = self.search_root.clone();
                self.unguarded(&description, async move {
                    files::search_files(&pattern, root, files::SEARCH_RESULT_LIMIT).await
                })
                .await;
            }
            Command::ReadClipboard => {
                self.unguarded(&description, clipboard::read_clipboard()).await;
            }
            Command::WriteClipboard(text) => {
                self.unguarded(&description, clipboard::write_clipboard(text))
                    .await;
            }
            Command::ClearClipboard => {
                self.unguarded(&description, clipboard::clear_clipboard()).await;
            }
            Command::Screenshot(mode) => {
                self.unguarded(&description, screen::capture_screen(mode)).await;
            }
            Command::ToggleTheme => self.toggle_theme(&description).await,
            Command::SaveTranscript(name) => self.save_transcript(&description, name).await,
            Command::LoadTranscript(name) => self.load_transcript(&description, &name).await,
            Command::ListTranscripts => self.list_transcripts(&description).await,
            Command::FreeformPrompt(prompt) => self.generate_reply(&description, &prompt).await,
        }
    }

    async fn guarded<Fut>(&self, description: &str, action: Fut)
    where
        Fut: std::future::Future<Output = deskhand_tools::ActionResult<String>> + Send + 'static,
    {
        let outcome = self.executor.run(description, action).await;
        self.show(outcome.display_text().to_string()).await;
    }

    async fn unguarded<Fut>(&self, description: &str, action: Fut)
    where
        Fut: std::future::Future<Output = deskhand_tools::ActionResult<String>> + Send + 'static,
    {
        let outcome = self.executor.run_unguarded(description, action).await;
        self.show(outcome.display_text().to_string()).await;
    }

    async fn toggle_theme(&self, description: &str) {
        let (reply, answer) = oneshot::channel();
        if self.events.send(SurfaceEvent::ToggleTheme { reply }).await.is_err() {
            return;
        }
        let Ok(theme) = answer.await else { return };
        let outcome = ActionOutcome::Success(format!("Theme switched to {theme}."));
        self.finish(description, outcome).await;
    }

    async fn save_transcript(&self, description: &str, name: Option<String>) {
        let (reply, answer) = oneshot::channel();
        if self.events.send(SurfaceEvent::Snapshot { reply }).await.is_err() {
            return;
        }
        let Ok(lines) = answer.await else { return };

        let outcome = if lines.is_empty() {
            ActionOutcome::Success("Nothing to save yet.".to_string())
        } else {
            let name = name.unwrap_or_else(TranscriptStore::default_name);
            match self.transcripts.save(&name, &lines).await {
                Ok(saved) => ActionOutcome::Success(format!("Chat saved as '{saved}'.")),
                Err(err) => ActionOutcome::Failed(format!("Action error: {err}")),
            }
        };
        self.finish(description, outcome).await;
    }

    async fn load_transcript(&self, description: &str, name: &str) {
        let outcome = match self.transcripts.load(name).await {
            Ok(lines) => ActionOutcome::Success(format!(
                "Loaded chat '{name}' ({} line(s)):\n{}",
                lines.len(),
                lines.join("\n")
            )),
            // An unknown name is a normal answer, same as a missing path.
            Err(TranscriptError::NotFound(_)) => {
                ActionOutcome::Success(format!("Chat '{name}' not found."))
            }
            Err(err) => ActionOutcome::Failed(format!("Action error: {err}")),
        };
        self.finish(description, outcome).await;
    }

    async fn list_transcripts(&self, description: &str) {
        let outcome = match self.transcripts.list().await {
            Ok(names) if names.is_empty() => {
                ActionOutcome::Success("No saved chats.".to_string())
            }
            Ok(names) => {
                let mut out = String::from("Saved chats:");
                for name in names {
                    out.push_str("\n  ");
                    out.push_str(&name);
                }
                ActionOutcome::Success(out)
            }
            Err(err) => ActionOutcome::Failed(format!("Action error: {err}")),
        };
        self.finish(description, outcome).await;
    }

    /// Freeform text goes to the model. The gateway owns retry timing, so
    /// this path deliberately skips the executor's action timeout.
    async fn generate_reply(&self, description: &str, prompt: &str) {
        self.show("Thinking...".to_string()).await;

        let outcome = match self.gateway.generate(prompt).await {
            Ok(reply) => ActionOutcome::Success(reply),
            Err(err) => ActionOutcome::Failed(format!("[LLM error] {err}")),
        };
        self.finish(description, outcome).await;
    }

    /// Shared tail of every non-executor command: one audit entry, one
    /// transcript line.
    async fn finish(&self, description: &str, outcome: ActionOutcome) {
        self.audit
            .record(AuditEntry::system(description, &outcome))
            .await;
        self.show(outcome.display_text().to_string()).await;
    }

    async fn show(&self, text: String) {
        let event = SurfaceEvent::Display {
            role: Role::Assistant,
            text,
        };
        // A closed surface means shutdown; drop the line.
        let _ = self.events.send(event).await;
    }
}
