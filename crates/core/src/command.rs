use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Processes shown by a listing when the user gives no count.
pub const DEFAULT_PROCESS_COUNT: usize = 10;

/// Longest outcome text copied into an audit line before truncation.
pub const AUDIT_SNIPPET_CHARS: usize = 200;

/// What a screenshot request covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CaptureMode {
    Full,
    Region,
}

/// One classified user submission. Built exactly once per input line by
/// [`crate::router::classify`] and immutable from then on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    OpenTarget(String),
    ListProcesses(usize),
    RunShell(String),
    DeletePath(String),
    SystemInfo,
    HealthStatus,
    SearchFiles(String),
    ReadClipboard,
    WriteClipboard(String),
    ClearClipboard,
    Screenshot(CaptureMode),
    ToggleTheme,
    SaveTranscript(Option<String>),
    LoadTranscript(String),
    ListTranscripts,
    FreeformPrompt(String),
}

impl Command {
    /// Privileged commands must pass through the confirmation gate before
    /// anything side-effecting runs.
    pub fn is_guarded(&self) -> bool {
        matches!(
            self,
            Command::OpenTarget(_) | Command::RunShell(_) | Command::DeletePath(_)
        )
    }

    /// Short human label used in confirmation prompts and audit lines.
    pub fn describe(&self) -> String {
        match self {
            Command::OpenTarget(target) => format!("Open app/command: {target}"),
            Command::ListProcesses(count) => format!("List top {count} processes"),
            Command::RunShell(line) => format!("Run shell command: {line}"),
            Command::DeletePath(path) => format!("Delete path: {path}"),
            Command::SystemInfo => "Show system info".to_string(),
            Command::HealthStatus => "Show health status".to_string(),
            Command::SearchFiles(pattern) => format!("Search files: {pattern}"),
            Command::ReadClipboard => "Read clipboard".to_string(),
            Command::WriteClipboard(_) => "Write clipboard".to_string(),
            Command::ClearClipboard => "Clear clipboard".to_string(),
            Command::Screenshot(CaptureMode::Full) => "Capture screen".to_string(),
            Command::Screenshot(CaptureMode::Region) => "Capture screen region".to_string(),
            Command::ToggleTheme => "Toggle theme".to_string(),
            Command::SaveTranscript(_) => "Save chat transcript".to_string(),
            Command::LoadTranscript(name) => format!("Load chat transcript: {name}"),
            Command::ListTranscripts => "List chat transcripts".to_string(),
            Command::FreeformPrompt(_) => "Generate reply".to_string(),
        }
    }
}

/// Uniform result of executing one command. Every fault is folded into
/// `Failed` by the component that raised it; no panic crosses this boundary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActionOutcome {
    Success(String),
    Cancelled,
    Failed(String),
}

impl ActionOutcome {
    /// The transcript line shown to the user for this outcome.
    pub fn display_text(&self) -> &str {
        match self {
            ActionOutcome::Success(text) => text,
            ActionOutcome::Cancelled => "Action cancelled by user.",
            ActionOutcome::Failed(message) => message,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, ActionOutcome::Success(_))
    }
}

/// Answer collected from the confirmation modal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Decision {
    Approved,
    Denied,
}

/// Who an audit line is attributed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Actor {
    User,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AuditLevel {
    Info,
    Error,
}

impl AuditLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            AuditLevel::Info => "INFO",
            AuditLevel::Error => "ERROR",
        }
    }
}

/// One append-only audit record. Rendered as a single line:
/// timestamp, level, then the attributed message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditEntry {
    pub timestamp: DateTime<Utc>,
    pub level: AuditLevel,
    pub actor: Actor,
    pub description: String,
    pub decision: Option<Decision>,
    pub outcome: String,
}

impl AuditEntry {
    /// Record for a guarded command: carries the user's decision and the
    /// outcome that followed it.
    pub fn user(description: impl Into<String>, decision: Decision, outcome: &ActionOutcome) -> Self {
        Self {
            timestamp: Utc::now(),
            level: level_for(outcome),
            actor: Actor::User,
            description: description.into(),
            decision: Some(decision),
            outcome: summarize(outcome),
        }
    }

    /// Record for a non-guarded command executed on the user's behalf.
    pub fn system(description: impl Into<String>, outcome: &ActionOutcome) -> Self {
        Self {
            timestamp: Utc::now(),
            level: level_for(outcome),
            actor: Actor::System,
            description: description.into(),
            decision: None,
            outcome: summarize(outcome),
        }
    }

    /// Render the entry in the on-disk line format.
    pub fn line(&self) -> String {
        format!(
            "{} - {} - {}",
            self.timestamp.to_rfc3339(),
            self.level.as_str(),
            self.message()
        )
    }

    fn message(&self) -> String {
        match (self.actor, self.decision) {
            (Actor::User, Some(Decision::Approved)) => {
                format!("user approved: {} -> {}", self.description, self.outcome)
            }
            (Actor::User, Some(Decision::Denied)) => {
                format!("user denied: {}", self.description)
            }
            _ => format!("system: {} -> {}", self.description, self.outcome),
        }
    }
}

fn level_for(outcome: &ActionOutcome) -> AuditLevel {
    match outcome {
        ActionOutcome::Failed(_) => AuditLevel::Error,
        _ => AuditLevel::Info,
    }
}

fn summarize(outcome: &ActionOutcome) -> String {
    match outcome {
        ActionOutcome::Success(text) => format!("ok: {}", snippet(text)),
        ActionOutcome::Cancelled => "cancelled".to_string(),
        ActionOutcome::Failed(message) => format!("failed: {}", snippet(message)),
    }
}

fn snippet(text: &str) -> String {
    let flat = text.replace('\n', " ");
    if flat.chars().count() <= AUDIT_SNIPPET_CHARS {
        flat
    } else {
        let cut: String = flat.chars().take(AUDIT_SNIPPET_CHARS).collect();
        format!("{cut}...")
    }
}
