use crate::error::Result;
use crate::logscan::LogEntry;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use std::path::Path;

// Substring matches, not word boundaries: the exporter's report keys on the
// same contains-style check.
static ERROR_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)error").unwrap());
static WARNING_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)warn").unwrap());

/// How many entries per level the summary retains.
const RECENT_LIMIT: usize = 10;

/// Per-level counts plus the most recent entries, shaped for the status page.
#[derive(Debug, Clone, Default, Serialize)]
pub struct LogSummary {
    pub error_count: usize,
    pub warning_count: usize,
    pub info_count: usize,
    pub recent_errors: Vec<LogEntry>,
    pub recent_warnings: Vec<LogEntry>,
    pub recent_info: Vec<LogEntry>,
}

enum Level {
    Error,
    Warning,
    Info,
}

/// Classify every entry in the report CSV, keeping the last ten per level.
pub fn parse_report(report_file: &Path) -> Result<LogSummary> {
    let mut reader = csv::Reader::from_path(report_file)?;
    let mut summary = LogSummary::default();

    for record in reader.deserialize::<LogEntry>() {
        let entry = record?;
        match classify(&entry) {
            Level::Error => {
                summary.error_count += 1;
                push_recent(&mut summary.recent_errors, entry);
            }
            Level::Warning => {
                summary.warning_count += 1;
                push_recent(&mut summary.recent_warnings, entry);
            }
            Level::Info => {
                summary.info_count += 1;
                push_recent(&mut summary.recent_info, entry);
            }
        }
    }

    Ok(summary)
}

/// Event IDs whose decimal form starts with 2 mark errors in the exporter's
/// numbering, independent of the message text.
fn classify(entry: &LogEntry) -> Level {
    if ERROR_RE.is_match(&entry.message) || entry.event_id.to_string().starts_with('2') {
        Level::Error
    } else if WARNING_RE.is_match(&entry.message) {
        Level::Warning
    } else {
        Level::Info
    }
}

fn push_recent(recent: &mut Vec<LogEntry>, entry: LogEntry) {
    recent.push(entry);
    if recent.len() > RECENT_LIMIT {
        recent.remove(0);
    }
}

/// Render the summary as a minimal static status page.
pub fn render_html(summary: &LogSummary) -> String {
    let mut html = String::new();
    html.push_str("<!DOCTYPE html>\n<html>\n<head><meta charset=\"utf-8\"><title>Log Summary</title></head>\n<body>\n");
    html.push_str("<h1>Log Summary</h1>\n<ul>\n");
    html.push_str(&format!("<li>Errors: {}</li>\n", summary.error_count));
    html.push_str(&format!("<li>Warnings: {}</li>\n", summary.warning_count));
    html.push_str(&format!("<li>Info: {}</li>\n", summary.info_count));
    html.push_str("</ul>\n");

    let sections = [
        ("Recent errors", &summary.recent_errors),
        ("Recent warnings", &summary.recent_warnings),
        ("Recent info", &summary.recent_info),
    ];
    for (title, entries) in sections {
        html.push_str(&format!("<h2>{title}</h2>\n<ul>\n"));
        for entry in entries.iter() {
            html.push_str(&format!(
                "<li>[{}] {}: {}</li>\n",
                escape(&entry.time),
                escape(&entry.source),
                escape(&entry.message)
            ));
        }
        html.push_str("</ul>\n");
    }

    html.push_str("</body>\n</html>\n");
    html
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}
