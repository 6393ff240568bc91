use crate::error::Result;
use crate::pipeline::clean::CleanedChunk;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

/// Streams cleaned chunks into the merged output file.
///
/// The header is taken from the first chunk written and never re-emitted;
/// later chunks are assumed column-compatible and are not re-validated.
pub struct ChunkWriter {
    writer: csv::Writer<BufWriter<File>>,
    header_written: bool,
}

impl ChunkWriter {
    /// Create the output file, truncating any previous run's contents.
    pub fn create(path: &Path) -> Result<Self> {
        let file = File::create(path)?;
        let writer = csv::WriterBuilder::new()
            .flexible(true)
            .from_writer(BufWriter::new(file));
        Ok(Self {
            writer,
            header_written: false,
        })
    }

    /// Append one cleaned chunk, emitting the header first if this is the
    /// first chunk of the run.
    pub fn write_chunk(&mut self, chunk: &CleanedChunk) -> Result<()> {
        if !self.header_written {
            self.writer.write_record(&chunk.headers)?;
            self.header_written = true;
        }
        for row in &chunk.rows {
            self.writer.write_record(row)?;
        }
        Ok(())
    }

    pub fn header_written(&self) -> bool {
        self.header_written
    }

    /// Flush buffered rows and close the writer.
    pub fn finish(mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}
