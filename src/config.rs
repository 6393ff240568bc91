use crate::constants;
use crate::error::{OpsError, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Toolkit configuration, one table per utility. Every field has a default so
/// a partial (or absent) config file still yields a usable configuration.
#[derive(Debug, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub merge: MergeConfig,
    #[serde(default)]
    pub report: ReportConfig,
    #[serde(default)]
    pub logscan: LogscanConfig,
}

/// Settings for the CSV cleaning/merge pipeline.
#[derive(Debug, Deserialize)]
pub struct MergeConfig {
    /// Folder scanned for input CSV files
    #[serde(default = "default_data_folder")]
    pub data_folder: String,
    /// Path of the merged output file
    #[serde(default = "default_merge_output")]
    pub output_file: String,
    /// Maximum number of rows per processing chunk
    #[serde(default = "default_chunk_size")]
    pub chunk_size: usize,
}

/// Settings for the periodic system report.
#[derive(Debug, Deserialize)]
pub struct ReportConfig {
    /// CSV file system samples are appended to
    #[serde(default = "default_report_output")]
    pub output_file: String,
}

/// Settings for the log exporter.
#[derive(Debug, Deserialize)]
pub struct LogscanConfig {
    /// Folder scanned for plain-text .log files
    #[serde(default = "default_log_folder")]
    pub log_folder: String,
    /// Path of the generated error report
    #[serde(default = "default_error_report")]
    pub report_file: String,
}

fn default_data_folder() -> String {
    constants::DEFAULT_DATA_FOLDER.to_string()
}

fn default_merge_output() -> String {
    constants::DEFAULT_MERGE_OUTPUT.to_string()
}

fn default_chunk_size() -> usize {
    constants::DEFAULT_CHUNK_SIZE
}

fn default_report_output() -> String {
    constants::DEFAULT_REPORT_OUTPUT.to_string()
}

fn default_log_folder() -> String {
    constants::DEFAULT_LOG_FOLDER.to_string()
}

fn default_error_report() -> String {
    constants::DEFAULT_ERROR_REPORT.to_string()
}

impl Default for MergeConfig {
    fn default() -> Self {
        Self {
            data_folder: default_data_folder(),
            output_file: default_merge_output(),
            chunk_size: default_chunk_size(),
        }
    }
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            output_file: default_report_output(),
        }
    }
}

impl Default for LogscanConfig {
    fn default() -> Self {
        Self {
            log_folder: default_log_folder(),
            report_file: default_error_report(),
        }
    }
}

impl Config {
    /// Load config.toml from the working directory, falling back to defaults
    /// when the file does not exist.
    pub fn load() -> Result<Self> {
        Self::load_from(Path::new("config.toml"))
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path).map_err(|e| {
            OpsError::Config(format!(
                "Failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_applied_to_partial_config() {
        let config: Config = toml::from_str(
            r#"
            [merge]
            chunk_size = 500
            "#,
        )
        .unwrap();

        assert_eq!(config.merge.chunk_size, 500);
        assert_eq!(config.merge.data_folder, constants::DEFAULT_DATA_FOLDER);
        assert_eq!(config.report.output_file, constants::DEFAULT_REPORT_OUTPUT);
        assert_eq!(config.logscan.log_folder, constants::DEFAULT_LOG_FOLDER);
    }

    #[test]
    fn test_missing_file_falls_back_to_defaults() {
        let config = Config::load_from(Path::new("does_not_exist.toml")).unwrap();
        assert_eq!(config.merge.chunk_size, constants::DEFAULT_CHUNK_SIZE);
        assert_eq!(config.merge.output_file, constants::DEFAULT_MERGE_OUTPUT);
    }
}
