use crate::pipeline::chunk::Chunk;
use crate::pipeline::numeric::NumericSummary;
use crate::pipeline::tally::CategoricalTally;
use std::collections::HashSet;

/// Per-chunk column classification.
///
/// A column is `Numeric` only when every cell in the chunk is present and
/// parses as a float. A missing cell forces `Text` because the fill value is
/// the string `"0"`, which turns the whole column into text for this chunk
/// (and its values, fill included, then count toward the categorical tally).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    Numeric,
    Text,
}

/// A chunk after dedup, fill, and trim, ready to stream to the writer.
#[derive(Debug, Clone)]
pub struct CleanedChunk {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
    /// Column kinds decided for this chunk only; later chunks of the same
    /// file may classify differently
    pub kinds: Vec<ColumnKind>,
}

/// Clean one chunk: drop exact-duplicate rows within the chunk, substitute
/// `fill` for missing cells, and trim whitespace from text-column values.
///
/// Duplicates that span two different chunks are not detected; within-chunk
/// dedup is the documented boundary of this pipeline.
pub fn clean_chunk(chunk: Chunk, fill: &str) -> CleanedChunk {
    let Chunk { headers, mut rows } = chunk;

    // Dedup on the raw values, before fill, preserving first-seen order
    let mut seen: HashSet<Vec<Option<String>>> = HashSet::new();
    rows.retain(|row| seen.insert(row.clone()));

    let kinds = classify_columns(headers.len(), &rows);

    let rows = rows
        .into_iter()
        .map(|row| {
            row.into_iter()
                .enumerate()
                .map(|(col, cell)| match cell {
                    Some(value) => match kinds.get(col) {
                        Some(ColumnKind::Text) => value.trim().to_string(),
                        _ => value,
                    },
                    None => fill.to_string(),
                })
                .collect()
        })
        .collect();

    CleanedChunk {
        headers,
        rows,
        kinds,
    }
}

/// Fold every text-column value of `chunk` into `tally`.
pub fn tally_chunk(chunk: &CleanedChunk, tally: &mut CategoricalTally) {
    for (col, kind) in chunk.kinds.iter().enumerate() {
        if *kind != ColumnKind::Text {
            continue;
        }
        let column = &chunk.headers[col];
        for row in &chunk.rows {
            if let Some(value) = row.get(col) {
                tally.record(column, value);
            }
        }
    }
}

/// Fold every numeric-column value of `chunk` into `summary`.
pub fn summarize_chunk(chunk: &CleanedChunk, summary: &mut NumericSummary) {
    for (col, kind) in chunk.kinds.iter().enumerate() {
        if *kind != ColumnKind::Numeric {
            continue;
        }
        let column = &chunk.headers[col];
        for row in &chunk.rows {
            if let Some(value) = row.get(col).and_then(|v| v.parse::<f64>().ok()) {
                summary.record(column, value);
            }
        }
    }
}

fn classify_columns(width: usize, rows: &[Vec<Option<String>>]) -> Vec<ColumnKind> {
    (0..width)
        .map(|col| {
            let numeric = rows.iter().all(|row| {
                row.get(col)
                    .and_then(|cell| cell.as_deref())
                    .map(|value| value.parse::<f64>().is_ok())
                    .unwrap_or(false)
            });
            if numeric {
                ColumnKind::Numeric
            } else {
                ColumnKind::Text
            }
        })
        .collect()
}
