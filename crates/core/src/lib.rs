pub mod command;
pub mod router;

pub use command::{
    ActionOutcome, Actor, AuditEntry, AuditLevel, CaptureMode, Command, Decision,
    AUDIT_SNIPPET_CHARS, DEFAULT_PROCESS_COUNT,
};
pub use router::classify;
