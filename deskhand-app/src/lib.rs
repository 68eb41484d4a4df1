pub mod audit;
pub mod config;
pub mod context;
pub mod dispatcher;
pub mod gate;
pub mod surface;

pub use audit::FileAuditSink;
pub use config::Config;
pub use context::App;
pub use dispatcher::Dispatcher;
pub use gate::SurfaceGate;
pub use surface::{InputDisposition, Role, Surface, SurfaceEvent, Theme};
