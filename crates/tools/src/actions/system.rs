//! System information and health reporting.

use sysinfo::{Disks, System};
use tokio::task;

use crate::error::{ActionError, ActionResult};

pub const CPU_WARN_PERCENT: f32 = 80.0;
pub const MEMORY_WARN_PERCENT: f64 = 85.0;
pub const DISK_CRITICAL_PERCENT: f64 = 90.0;

const GIB: f64 = 1024.0 * 1024.0 * 1024.0;

/// One sample of host state. Captured once, rendered by pure functions.
#[derive(Debug, Clone)]
pub struct SystemSnapshot {
    pub os_name: String,
    pub kernel_version: String,
    pub arch: String,
    pub processor: String,
    pub cpu_count: usize,
    pub cpu_percent: f32,
    pub memory_total: u64,
    pub memory_used: u64,
    pub memory_available: u64,
    pub disk_total: u64,
    pub disk_used: u64,
    pub boot_time: u64,
}

impl SystemSnapshot {
    pub fn memory_percent(&self) -> f64 {
        percent(self.memory_used, self.memory_total)
    }

    pub fn disk_percent(&self) -> f64 {
        percent(self.disk_used, self.disk_total)
    }

    pub fn disk_free(&self) -> u64 {
        self.disk_total.saturating_sub(self.disk_used)
    }
}

fn percent(part: u64, whole: u64) -> f64 {
    part as f64 / whole.max(1) as f64 * 100.0
}

pub async fn system_info() -> ActionResult<String> {
    let snapshot = capture_snapshot().await?;
    Ok(render_system_info(&snapshot))
}

pub async fn health_status() -> ActionResult<String> {
    let snapshot = capture_snapshot().await?;
    Ok(render_health(&snapshot))
}

async fn capture_snapshot() -> ActionResult<SystemSnapshot> {
    task::spawn_blocking(|| {
        let mut system = System::new_all();
        system.refresh_all();
        // CPU usage needs two samples spaced apart.
        std::thread::sleep(sysinfo::MINIMUM_CPU_UPDATE_INTERVAL);
        system.refresh_all();

        let disks = Disks::new_with_refreshed_list();
        // The root mount is what the user thinks of as "the disk".
        let (disk_total, disk_available) = disks
            .iter()
            .find(|disk| disk.mount_point() == std::path::Path::new("/"))
            .or_else(|| disks.iter().next())
            .map(|disk| (disk.total_space(), disk.available_space()))
            .unwrap_or((0, 0));

        Ok(SystemSnapshot {
            os_name: System::name().unwrap_or_else(|| "Unknown".to_string()),
            kernel_version: System::kernel_version().unwrap_or_else(|| "?".to_string()),
            arch: System::cpu_arch().unwrap_or_else(|| "unknown".to_string()),
            processor: system
                .cpus()
                .first()
                .map(|cpu| cpu.brand().to_string())
                .unwrap_or_else(|| "unknown".to_string()),
            cpu_count: system.cpus().len(),
            cpu_percent: system.global_cpu_info().cpu_usage(),
            memory_total: system.total_memory(),
            memory_used: system.used_memory(),
            memory_available: system.available_memory(),
            disk_total,
            disk_used: disk_total.saturating_sub(disk_available),
            boot_time: System::boot_time(),
        })
    })
    .await
    .map_err(|e| ActionError::OperationFailed(e.to_string()))?
}

pub fn render_system_info(snapshot: &SystemSnapshot) -> String {
    format!(
        "╔══════════════════════════════════════════╗\n\
         ║           SYSTEM INFORMATION             ║\n\
         ╚══════════════════════════════════════════╝\n\
         Platform: {} {}\n\
         Machine: {}\n\
         Processor: {}\n\
         CPU Cores: {}\n\
         CPU Usage: {:.1}%\n\
         RAM Total: {:.2} GB\n\
         RAM Used: {:.2} GB ({:.1}%)\n\
         RAM Available: {:.2} GB\n\
         Disk Total: {:.2} GB\n\
         Disk Used: {:.2} GB ({:.1}%)\n\
         Disk Free: {:.2} GB\n\
         Boot Time: {}",
        snapshot.os_name,
        snapshot.kernel_version,
        snapshot.arch,
        snapshot.processor,
        snapshot.cpu_count,
        snapshot.cpu_percent,
        snapshot.memory_total as f64 / GIB,
        snapshot.memory_used as f64 / GIB,
        snapshot.memory_percent(),
        snapshot.memory_available as f64 / GIB,
        snapshot.disk_total as f64 / GIB,
        snapshot.disk_used as f64 / GIB,
        snapshot.disk_percent(),
        snapshot.disk_free() as f64 / GIB,
        format_boot_time(snapshot.boot_time),
    )
}

pub fn render_health(snapshot: &SystemSnapshot) -> String {
    let mut status = "🟢 HEALTHY";
    let mut alerts = Vec::new();

    if snapshot.cpu_percent > CPU_WARN_PERCENT {
        alerts.push(format!("⚠️ High CPU usage: {:.1}%", snapshot.cpu_percent));
        status = "🟡 WARNING";
    }
    if snapshot.memory_percent() > MEMORY_WARN_PERCENT {
        alerts.push(format!(
            "⚠️ High memory usage: {:.1}%",
            snapshot.memory_percent()
        ));
        status = "🟡 WARNING";
    }
    if snapshot.disk_percent() > DISK_CRITICAL_PERCENT {
        alerts.push(format!(
            "⚠️ Low disk space: {:.1}% used",
            snapshot.disk_percent()
        ));
        status = "🔴 CRITICAL";
    }

    let mut report = format!("System Health Status: {status}\n");
    if alerts.is_empty() {
        report.push_str("All systems operating normally");
    } else {
        report.push_str("\nAlerts:\n");
        report.push_str(&alerts.join("\n"));
    }
    report
}

fn format_boot_time(epoch_secs: u64) -> String {
    chrono::DateTime::from_timestamp(epoch_secs as i64, 0)
        .map(|dt| dt.format("%a %b %e %H:%M:%S %Y").to_string())
        .unwrap_or_else(|| "unknown".to_string())
}
