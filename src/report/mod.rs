use crate::constants::TIMESTAMP_FORMAT;
use crate::error::Result;
use chrono::Local;
use serde::{Deserialize, Serialize};
use std::fs::{self, OpenOptions};
use std::path::Path;
use std::thread;
use sysinfo::{Disks, Networks, System, MINIMUM_CPU_UPDATE_INTERVAL};
use tracing::debug;

/// One row of the periodic system report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SystemSample {
    pub timestamp: String,
    pub cpu_percent: f32,
    pub ram_percent: f32,
    pub disk_percent: f32,
    pub network_upload_bytes: u64,
    pub network_download_bytes: u64,
    /// Percentage as text; "N/A" on machines without a battery
    pub battery_percent: String,
}

/// Collect a single metrics sample.
///
/// CPU usage needs two refreshes separated by the minimum sysinfo interval
/// to produce a usable delta, so this call blocks briefly.
pub fn collect_sample() -> SystemSample {
    let mut sys = System::new();
    sys.refresh_cpu_usage();
    thread::sleep(MINIMUM_CPU_UPDATE_INTERVAL);
    sys.refresh_cpu_usage();
    sys.refresh_memory();

    let cpu_percent = sys.global_cpu_usage();
    let ram_percent = if sys.total_memory() == 0 {
        0.0
    } else {
        sys.used_memory() as f32 / sys.total_memory() as f32 * 100.0
    };

    let disks = Disks::new_with_refreshed_list();
    let (used_bytes, total_bytes) = disks.list().iter().fold((0u64, 0u64), |(used, total), disk| {
        (
            used + disk.total_space().saturating_sub(disk.available_space()),
            total + disk.total_space(),
        )
    });
    let disk_percent = if total_bytes == 0 {
        0.0
    } else {
        used_bytes as f32 / total_bytes as f32 * 100.0
    };

    let networks = Networks::new_with_refreshed_list();
    let (upload, download) = networks
        .list()
        .iter()
        .fold((0u64, 0u64), |(up, down), (_name, data)| {
            (up + data.total_transmitted(), down + data.total_received())
        });

    let battery_percent = read_battery_percent()
        .map(|p| format!("{p:.0}"))
        .unwrap_or_else(|| "N/A".to_string());

    debug!(
        cpu = cpu_percent,
        ram = ram_percent,
        disk = disk_percent,
        "Collected system sample"
    );

    SystemSample {
        timestamp: Local::now().format(TIMESTAMP_FORMAT).to_string(),
        cpu_percent,
        ram_percent,
        disk_percent,
        network_upload_bytes: upload,
        network_download_bytes: download,
        battery_percent,
    }
}

/// Read battery charge from /sys/class/power_supply; desktops report none.
fn read_battery_percent() -> Option<f32> {
    let entries = fs::read_dir("/sys/class/power_supply").ok()?;
    for entry in entries.flatten() {
        let path = entry.path();
        let name = path.file_name().and_then(|n| n.to_str()).unwrap_or("");
        if !name.starts_with("BAT") {
            continue;
        }
        if let Ok(capacity) = fs::read_to_string(path.join("capacity")) {
            if let Ok(percent) = capacity.trim().parse::<f32>() {
                return Some(percent);
            }
        }
    }
    None
}

/// Append one sample to the report CSV, writing the header row only when the
/// file is created for the first time.
pub fn append_sample(path: &Path, sample: &SystemSample) -> Result<()> {
    let new_file = !path.exists();
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let file = OpenOptions::new().create(true).append(true).open(path)?;
    let mut writer = csv::WriterBuilder::new()
        .has_headers(new_file)
        .from_writer(file);
    writer.serialize(sample)?;
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn sample(ts: &str) -> SystemSample {
        SystemSample {
            timestamp: ts.to_string(),
            cpu_percent: 12.5,
            ram_percent: 48.0,
            disk_percent: 73.2,
            network_upload_bytes: 100,
            network_download_bytes: 200,
            battery_percent: "N/A".to_string(),
        }
    }

    #[test]
    fn test_header_written_once_across_appends() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("report.csv");

        append_sample(&path, &sample("2026-01-01 00:00:00")).unwrap();
        append_sample(&path, &sample("2026-01-01 00:01:00")).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("timestamp,cpu_percent,ram_percent"));
        assert!(lines[1].starts_with("2026-01-01 00:00:00"));
        assert!(lines[2].starts_with("2026-01-01 00:01:00"));
    }

    #[test]
    fn test_missing_parent_directory_created() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("report.csv");

        append_sample(&path, &sample("2026-01-01 00:00:00")).unwrap();
        assert!(path.exists());
    }
}
