//! Process listing.

use std::cmp::Ordering;
use sysinfo::System;
use tokio::task;

use crate::error::{ActionError, ActionResult};

struct ProcessRow {
    pid: u32,
    name: String,
    cpu_percent: f32,
    memory_percent: f64,
}

/// Top `count` processes by CPU usage, one numbered line each.
pub async fn list_top_processes(count: usize) -> ActionResult<String> {
    task::spawn_blocking(move || {
        let mut system = System::new_all();
        system.refresh_all();
        // CPU usage needs two samples spaced apart.
        std::thread::sleep(sysinfo::MINIMUM_CPU_UPDATE_INTERVAL);
        system.refresh_all();

        let total_memory = system.total_memory().max(1) as f64;
        let mut rows: Vec<ProcessRow> = system
            .processes()
            .iter()
            .map(|(pid, process)| ProcessRow {
                pid: pid.as_u32(),
                name: process.name().to_string(),
                cpu_percent: process.cpu_usage(),
                memory_percent: process.memory() as f64 / total_memory * 100.0,
            })
            .collect();

        rows.sort_by(|a, b| {
            b.cpu_percent
                .partial_cmp(&a.cpu_percent)
                .unwrap_or(Ordering::Equal)
        });

        let lines: Vec<String> = rows
            .iter()
            .take(count)
            .enumerate()
            .map(|(index, row)| {
                format!(
                    "{}. {} (pid={}) CPU%={:.1} MEM%={:.2}",
                    index + 1,
                    row.name,
                    row.pid,
                    row.cpu_percent,
                    row.memory_percent
                )
            })
            .collect();

        Ok(lines.join("\n"))
    })
    .await
    .map_err(|e| ActionError::OperationFailed(e.to_string()))?
}
