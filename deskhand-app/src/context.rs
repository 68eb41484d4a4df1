//! Startup wiring for the assistant.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use tokio::sync::mpsc;

use deskhand_memory::TranscriptStore;
use deskhand_providers::{GeminiClient, GenerationGateway, RetryPolicy};
use deskhand_tools::{AuditSink, ConfirmationGate, GuardedExecutor};

use crate::audit::FileAuditSink;
use crate::config::{Config, API_KEY_VAR};
use crate::dispatcher::Dispatcher;
use crate::gate::SurfaceGate;
use crate::surface::{Surface, SurfaceEvent};

/// Events the surface loop can buffer before worker tasks start waiting.
const EVENT_CHANNEL_CAPACITY: usize = 64;

/// Everything main needs after startup: the surface and its event feed on
/// one side, the dispatcher feeding them on the other.
pub struct App {
    pub config: Config,
    pub surface: Surface,
    pub events: mpsc::Receiver<SurfaceEvent>,
    pub dispatcher: Arc<Dispatcher>,
}

impl App {
    pub async fn initialize(config: Config) -> Result<Self> {
        let (events_tx, events_rx) = mpsc::channel(EVENT_CHANNEL_CAPACITY);

        let audit: Arc<dyn AuditSink> = Arc::new(
            FileAuditSink::new(&config.audit_log).with_context(|| {
                format!("Failed to open audit log {}", config.audit_log.display())
            })?,
        );
        let gate: Arc<dyn ConfirmationGate> = Arc::new(SurfaceGate::new(events_tx.clone()));
        let executor = GuardedExecutor::new(gate, audit.clone());

        let api_key = Config::api_key().unwrap_or_default();
        if api_key.is_empty() {
            tracing::warn!("{API_KEY_VAR} is not set; freeform prompts will fail");
        }
        let backend = Arc::new(GeminiClient::new(api_key, config.model.clone()));
        let gateway = GenerationGateway::new(
            backend,
            RetryPolicy {
                max_attempts: config.max_retries,
                base_delay: Duration::from_secs(config.retry_delay_secs),
            },
        );

        let transcripts = Arc::new(TranscriptStore::new(&config.transcripts_dir));
        transcripts.initialize().await.with_context(|| {
            format!(
                "Failed to create transcripts directory {}",
                config.transcripts_dir.display()
            )
        })?;

        let search_root = config.search_root();

        let dispatcher = Dispatcher::new(
            executor,
            gateway,
            transcripts,
            audit,
            events_tx,
            config.max_concurrent_actions,
            search_root,
        );

        Ok(Self {
            config,
            surface: Surface::new(),
            events: events_rx,
            dispatcher,
        })
    }
}
