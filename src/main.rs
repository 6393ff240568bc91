use clap::{Parser, Subcommand};
use tracing::{error, info};

use opsbatch::config::Config;
use opsbatch::logging;
use opsbatch::logscan::{self, FileLogSource, LogSource};
use opsbatch::pipeline::MergePipeline;
use opsbatch::report;
use opsbatch::summary;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "opsbatch")]
#[command(about = "Batch ops utilities: CSV merge/clean, system reports, and log exports")]
#[command(version = "0.1.0")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Clean and merge every CSV file in the data folder
    Merge {
        /// Folder scanned for input CSV files
        #[arg(long)]
        data_dir: Option<PathBuf>,
        /// Path of the merged output file
        #[arg(long)]
        output: Option<PathBuf>,
        /// Maximum rows per processing chunk
        #[arg(long)]
        chunk_size: Option<usize>,
    },
    /// Append one system metrics sample to the daily report
    Report {
        /// Path of the report CSV
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Export error entries from plain-text logs to a CSV report
    Logscan {
        /// Folder scanned for .log files
        #[arg(long)]
        log_dir: Option<PathBuf>,
        /// Path of the error report CSV
        #[arg(long)]
        report: Option<PathBuf>,
    },
    /// Summarize an error report and render the status page
    Summary {
        /// Path of the error report CSV to summarize
        #[arg(long)]
        report: Option<PathBuf>,
        /// Where to write the rendered HTML page
        #[arg(long)]
        html_out: Option<PathBuf>,
        /// Print the summary as JSON instead of plain text
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    logging::init_logging();

    let cli = Cli::parse();
    let config = Config::load()?;

    match cli.command {
        Commands::Merge {
            data_dir,
            output,
            chunk_size,
        } => {
            let data_dir = data_dir.unwrap_or_else(|| PathBuf::from(&config.merge.data_folder));
            let output = output.unwrap_or_else(|| PathBuf::from(&config.merge.output_file));
            let chunk_size = chunk_size.unwrap_or(config.merge.chunk_size);
            run_merge(&data_dir, &output, chunk_size)?;
        }
        Commands::Report { output } => {
            let output = output.unwrap_or_else(|| PathBuf::from(&config.report.output_file));
            run_report(&output)?;
        }
        Commands::Logscan { log_dir, report } => {
            let log_dir = log_dir.unwrap_or_else(|| PathBuf::from(&config.logscan.log_folder));
            let report = report.unwrap_or_else(|| PathBuf::from(&config.logscan.report_file));
            run_logscan(&log_dir, &report)?;
        }
        Commands::Summary {
            report,
            html_out,
            json,
        } => {
            let report = report.unwrap_or_else(|| PathBuf::from(&config.logscan.report_file));
            run_summary(&report, html_out.as_deref(), json)?;
        }
    }
    Ok(())
}

fn run_merge(
    data_dir: &Path,
    output: &Path,
    chunk_size: usize,
) -> Result<(), Box<dyn std::error::Error>> {
    println!("🔄 Running merge pipeline...");
    let pipeline = MergePipeline::new(chunk_size);

    match pipeline.run(data_dir, output) {
        Ok(Some(outcome)) => {
            println!("Cleaned merged data saved to {}", output.display());
            println!("\n📊 Merge results:");
            println!("   Files processed: {}", outcome.files_processed);
            println!("   Chunks written: {}", outcome.chunks_written);
            println!("   Rows written: {}", outcome.rows_written);
            println!("   Duplicates dropped: {}", outcome.duplicates_dropped);

            println!("\n--- Numeric Summary ---");
            for (column, stats) in outcome.numeric_summary.columns() {
                println!(
                    "Column: {} (count={}, mean={:.2}, min={}, max={})",
                    column,
                    stats.count,
                    stats.mean(),
                    stats.min,
                    stats.max
                );
            }

            println!("\n--- Categorical Counts ---");
            for (column, counts) in outcome.categorical_counts.columns() {
                println!("\nColumn: {column}");
                for (value, count) in counts {
                    println!("   {value}: {count}");
                }
            }
        }
        Ok(None) => {
            println!("No CSV files found in folder: {}", data_dir.display());
        }
        Err(e) => {
            error!("Merge pipeline failed: {}", e);
            println!("❌ Merge pipeline failed: {}", e);
            return Err(e.into());
        }
    }
    Ok(())
}

fn run_report(output: &Path) -> Result<(), Box<dyn std::error::Error>> {
    println!("🖥️  Collecting system sample...");
    let sample = report::collect_sample();
    report::append_sample(output, &sample)?;
    info!("Appended system sample to {}", output.display());
    println!("Daily system report saved to {}", output.display());
    Ok(())
}

fn run_logscan(log_dir: &Path, report_file: &Path) -> Result<(), Box<dyn std::error::Error>> {
    println!("🔍 Scanning logs in {}...", log_dir.display());
    let source = FileLogSource::new(log_dir);
    let entries = source.collect_errors()?;

    if entries.is_empty() {
        println!("No errors found in the logs.");
        return Ok(());
    }

    logscan::write_report(&entries, report_file)?;
    println!(
        "CSV report generated: {} ({} entries)",
        report_file.display(),
        entries.len()
    );
    Ok(())
}

fn run_summary(
    report_file: &Path,
    html_out: Option<&Path>,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let summary = summary::parse_report(report_file)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        println!("Error count: {}", summary.error_count);
        println!("Warning count: {}", summary.warning_count);
        println!("Info count: {}", summary.info_count);
        for entry in &summary.recent_errors {
            println!("   [{}] {}", entry.time, entry.message);
        }
    }

    if let Some(path) = html_out {
        std::fs::write(path, summary::render_html(&summary))?;
        info!("Status page written to {}", path.display());
        println!("Status page written to {}", path.display());
    }
    Ok(())
}
