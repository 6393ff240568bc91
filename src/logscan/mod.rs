use crate::constants::{LOG_EXTENSION, TIMESTAMP_FORMAT};
use crate::error::Result;
use chrono::Local;
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// A single exported log record. Field names are renamed to match the
/// report's established CSV header, which downstream summaries key on.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogEntry {
    #[serde(rename = "LogType")]
    pub log_type: String,
    #[serde(rename = "EventID")]
    pub event_id: u32,
    #[serde(rename = "Source")]
    pub source: String,
    #[serde(rename = "Time")]
    pub time: String,
    #[serde(rename = "Message")]
    pub message: String,
}

/// A provider of error-level log records.
///
/// The live Windows Event Log subsystem sits behind this boundary on
/// Windows hosts; `FileLogSource` covers test mode and non-Windows runs.
pub trait LogSource {
    /// Name recorded in the LogType column of exported entries.
    fn source_name(&self) -> &'static str;

    /// Return every error entry the source currently holds.
    fn collect_errors(&self) -> Result<Vec<LogEntry>>;
}

/// Test-mode source: scans a folder of plain-text `.log` files and exports
/// every line containing "ERROR", case-insensitive.
pub struct FileLogSource {
    root: PathBuf,
}

impl FileLogSource {
    pub fn new<P: Into<PathBuf>>(root: P) -> Self {
        Self { root: root.into() }
    }

    fn log_files(&self) -> Result<Vec<PathBuf>> {
        let mut files = Vec::new();
        if !self.root.is_dir() {
            return Ok(files);
        }
        for entry in fs::read_dir(&self.root)? {
            let path = entry?.path();
            let is_log = path
                .extension()
                .and_then(|ext| ext.to_str())
                .map(|ext| ext.eq_ignore_ascii_case(LOG_EXTENSION))
                .unwrap_or(false);
            if path.is_file() && is_log {
                files.push(path);
            }
        }
        files.sort();
        Ok(files)
    }
}

impl LogSource for FileLogSource {
    fn source_name(&self) -> &'static str {
        "TestLog"
    }

    fn collect_errors(&self) -> Result<Vec<LogEntry>> {
        let mut entries = Vec::new();
        for file in self.log_files()? {
            debug!("Scanning log file: {}", file.display());
            let reader = BufReader::new(File::open(&file)?);
            for line in reader.lines() {
                let line = line?;
                if !line.to_uppercase().contains("ERROR") {
                    continue;
                }
                entries.push(LogEntry {
                    log_type: self.source_name().to_string(),
                    event_id: 0,
                    source: "TestScript".to_string(),
                    time: Local::now().format(TIMESTAMP_FORMAT).to_string(),
                    message: line.trim().to_string(),
                });
            }
        }
        info!("Collected {} error entries", entries.len());
        Ok(entries)
    }
}

/// Write collected entries to a CSV report, creating the output directory
/// first if it does not exist.
pub fn write_report(entries: &[LogEntry], report_file: &Path) -> Result<()> {
    if let Some(parent) = report_file.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let mut writer = csv::Writer::from_path(report_file)?;
    for entry in entries {
        writer.serialize(entry)?;
    }
    writer.flush()?;
    info!("CSV report generated: {}", report_file.display());
    Ok(())
}
