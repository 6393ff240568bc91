/// Shared defaults and naming constants used across the toolkit.

/// Placeholder substituted for missing cell values during cleaning.
pub const MISSING_VALUE_FILL: &str = "0";

/// File extension the merge pipeline discovers.
pub const CSV_EXTENSION: &str = "csv";

/// File extension the log exporter scans in test mode.
pub const LOG_EXTENSION: &str = "log";

/// Default number of rows per processing chunk.
pub const DEFAULT_CHUNK_SIZE: usize = 100_000;

/// Default folder scanned for input CSV files.
pub const DEFAULT_DATA_FOLDER: &str = "data";

/// Default output path for the merged, cleaned CSV.
pub const DEFAULT_MERGE_OUTPUT: &str = "merged_cleaned_large.csv";

/// Default output path for the periodic system report.
pub const DEFAULT_REPORT_OUTPUT: &str = "daily_system_report.csv";

/// Default folder scanned for plain-text logs by the exporter.
pub const DEFAULT_LOG_FOLDER: &str = "sample_logs";

/// Default path of the error report produced by the log exporter.
pub const DEFAULT_ERROR_REPORT: &str = "output/error_file.csv";

/// Timestamp format used in report rows and exported log entries.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
