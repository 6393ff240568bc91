pub mod chunk;
pub mod clean;
pub mod discovery;
pub mod numeric;
pub mod tally;
pub mod writer;

use crate::constants::MISSING_VALUE_FILL;
use crate::error::{OpsError, Result};
use crate::pipeline::chunk::ChunkReader;
use crate::pipeline::numeric::NumericSummary;
use crate::pipeline::tally::CategoricalTally;
use crate::pipeline::writer::ChunkWriter;
use serde::Serialize;
use std::path::Path;
use tracing::{debug, info, instrument};

/// Result of a complete merge run.
#[derive(Debug, Serialize)]
pub struct MergeOutcome {
    pub files_processed: usize,
    pub chunks_written: usize,
    pub rows_written: usize,
    pub duplicates_dropped: usize,
    pub output_file: String,
    pub numeric_summary: NumericSummary,
    pub categorical_counts: CategoricalTally,
}

/// One file's cleaned contribution to a merge run.
#[derive(Debug, Default)]
struct FileResult {
    chunks: usize,
    rows: usize,
    duplicates: usize,
    tally: CategoricalTally,
    summary: NumericSummary,
}

/// The CSV ingestion & cleaning pipeline: discover, clean chunk-by-chunk,
/// stream to one merged output, and aggregate tallies across files.
pub struct MergePipeline {
    chunk_size: usize,
    fill: String,
}

impl MergePipeline {
    pub fn new(chunk_size: usize) -> Self {
        Self {
            chunk_size,
            fill: MISSING_VALUE_FILL.to_string(),
        }
    }

    /// Run the full discover/clean/merge pass over `data_dir`, streaming
    /// cleaned chunks into `output_file` as they are produced.
    ///
    /// Returns `Ok(None)` when the folder holds no CSV files; that is a clean
    /// no-op, not an error, and no output file is created. Chunks flushed
    /// before a mid-file failure are not rolled back.
    #[instrument(skip(self))]
    pub fn run(&self, data_dir: &Path, output_file: &Path) -> Result<Option<MergeOutcome>> {
        if self.chunk_size == 0 {
            return Err(OpsError::Config(
                "chunk_size must be greater than zero".to_string(),
            ));
        }

        let files = discovery::find_csv_files(data_dir)?;
        if files.is_empty() {
            info!("No CSV files found in folder: {}", data_dir.display());
            return Ok(None);
        }

        let mut writer = ChunkWriter::create(output_file)?;
        let mut categorical_counts = CategoricalTally::new();
        let mut numeric_summary = NumericSummary::new();
        let mut chunks_written = 0;
        let mut rows_written = 0;
        let mut duplicates_dropped = 0;

        for file in &files {
            info!("Processing file: {}", file.display());
            println!("Processing file: {}", file.display());

            let result = self.process_file(file, &mut writer)?;
            debug!(
                "Cleaned {} rows in {} chunks ({} duplicates dropped)",
                result.rows, result.chunks, result.duplicates
            );

            chunks_written += result.chunks;
            rows_written += result.rows;
            duplicates_dropped += result.duplicates;
            categorical_counts.merge(result.tally);
            numeric_summary.merge(result.summary);
        }

        writer.finish()?;
        info!(
            "Merged {} files into {} ({} rows)",
            files.len(),
            output_file.display(),
            rows_written
        );

        Ok(Some(MergeOutcome {
            files_processed: files.len(),
            chunks_written,
            rows_written,
            duplicates_dropped,
            output_file: output_file.to_string_lossy().to_string(),
            numeric_summary,
            categorical_counts,
        }))
    }

    /// Clean one file chunk-by-chunk, streaming each cleaned chunk straight
    /// to the writer and returning the file's own fold accumulators.
    fn process_file(&self, path: &Path, writer: &mut ChunkWriter) -> Result<FileResult> {
        let reader = ChunkReader::open(path, self.chunk_size)?;
        let mut result = FileResult::default();

        for chunk in reader {
            let chunk = chunk?;
            let raw_rows = chunk.rows.len();

            let cleaned = clean::clean_chunk(chunk, &self.fill);
            clean::tally_chunk(&cleaned, &mut result.tally);
            clean::summarize_chunk(&cleaned, &mut result.summary);
            writer.write_chunk(&cleaned)?;

            result.chunks += 1;
            result.rows += cleaned.rows.len();
            result.duplicates += raw_rows - cleaned.rows.len();
        }

        Ok(result)
    }
}
