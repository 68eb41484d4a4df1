//! Append-only audit log on disk, one line per entry.

use async_trait::async_trait;
use parking_lot::Mutex;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::Path;

use deskhand_core::AuditEntry;
use deskhand_tools::AuditSink;

pub struct FileAuditSink {
    file: Mutex<File>,
}

impl FileAuditSink {
    pub fn new<P: AsRef<Path>>(log_path: P) -> std::io::Result<Self> {
        let log_path = log_path.as_ref();

        if let Some(parent) = log_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(log_path)?;

        Ok(Self {
            file: Mutex::new(file),
        })
    }
}

#[async_trait]
impl AuditSink for FileAuditSink {
    async fn record(&self, entry: AuditEntry) {
        let line = entry.line();
        let mut file = self.file.lock();
        // Recording must never fail the operation it describes.
        if let Err(e) = writeln!(file, "{line}").and_then(|_| file.sync_all()) {
            tracing::error!("failed to write audit entry: {e}");
        }
    }
}
