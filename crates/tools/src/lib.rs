pub mod actions;
pub mod error;
pub mod guard;
pub mod registry;
pub mod traits;

pub use error::{ActionError, ActionResult};
pub use guard::{GuardedExecutor, DEFAULT_ACTION_TIMEOUT};
pub use registry::{help_text, ActionSpec, ACTION_SPECS};
pub use traits::{AuditSink, ConfirmationGate};
