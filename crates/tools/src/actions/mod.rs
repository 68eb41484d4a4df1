//! Local actions the dispatcher can run, privileged and read-only alike.

pub mod clipboard;
pub mod files;
pub mod launch;
pub mod process;
pub mod screen;
pub mod shell;
pub mod system;
