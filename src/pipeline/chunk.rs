use crate::error::Result;
use std::fs::File;
use std::path::Path;

/// A bounded slice of one file's rows, read and cleaned as a unit.
///
/// Cells are `None` when the source field was empty; the cleaning step
/// substitutes the configured fill value for those.
#[derive(Debug, Clone)]
pub struct Chunk {
    /// Column names, in file order
    pub headers: Vec<String>,
    /// Raw cell values, one `Vec` per row
    pub rows: Vec<Vec<Option<String>>>,
}

/// Reads a CSV file as a sequence of chunks of at most `chunk_size` rows,
/// preserving row order. A parse error surfaces as an `Err` item so the run
/// fails loudly instead of silently skipping the rest of the file.
pub struct ChunkReader {
    headers: Vec<String>,
    records: csv::StringRecordsIntoIter<File>,
    chunk_size: usize,
    done: bool,
}

impl ChunkReader {
    /// Open `path` for chunked reading. Fails if the file cannot be opened or
    /// its header row cannot be parsed.
    pub fn open(path: &Path, chunk_size: usize) -> Result<Self> {
        let mut reader = csv::Reader::from_path(path)?;
        let headers = reader.headers()?.iter().map(|h| h.to_string()).collect();
        Ok(Self {
            headers,
            records: reader.into_records(),
            chunk_size,
            done: false,
        })
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }
}

impl Iterator for ChunkReader {
    type Item = Result<Chunk>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        let mut rows: Vec<Vec<Option<String>>> = Vec::new();
        while rows.len() < self.chunk_size {
            match self.records.next() {
                Some(Ok(record)) => {
                    rows.push(
                        record
                            .iter()
                            .map(|cell| {
                                if cell.is_empty() {
                                    None
                                } else {
                                    Some(cell.to_string())
                                }
                            })
                            .collect(),
                    );
                }
                Some(Err(e)) => {
                    self.done = true;
                    return Some(Err(e.into()));
                }
                None => {
                    self.done = true;
                    break;
                }
            }
        }

        if rows.is_empty() {
            return None;
        }
        Some(Ok(Chunk {
            headers: self.headers.clone(),
            rows,
        }))
    }
}
