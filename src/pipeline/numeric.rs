use serde::Serialize;
use std::collections::BTreeMap;

/// Aggregate statistics for one numeric column.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnStats {
    pub count: u64,
    pub sum: f64,
    pub min: f64,
    pub max: f64,
}

impl ColumnStats {
    pub fn mean(&self) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            self.sum / self.count as f64
        }
    }
}

/// Per-numeric-column count/mean/min/max, accumulated across all chunks of
/// all files. Columns only contribute from chunks that classified them as
/// numeric; a column that degrades to text in one chunk still keeps the
/// stats gathered from its numeric chunks.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct NumericSummary {
    columns: BTreeMap<String, ColumnStats>,
}

impl NumericSummary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one observation of `value` under `column`.
    pub fn record(&mut self, column: &str, value: f64) {
        match self.columns.get_mut(column) {
            Some(stats) => {
                stats.count += 1;
                stats.sum += value;
                if value < stats.min {
                    stats.min = value;
                }
                if value > stats.max {
                    stats.max = value;
                }
            }
            None => {
                self.columns.insert(
                    column.to_string(),
                    ColumnStats {
                        count: 1,
                        sum: value,
                        min: value,
                        max: value,
                    },
                );
            }
        }
    }

    /// Fold another summary into this one.
    pub fn merge(&mut self, other: NumericSummary) {
        for (column, stats) in other.columns {
            match self.columns.get_mut(&column) {
                Some(existing) => {
                    existing.count += stats.count;
                    existing.sum += stats.sum;
                    if stats.min < existing.min {
                        existing.min = stats.min;
                    }
                    if stats.max > existing.max {
                        existing.max = stats.max;
                    }
                }
                None => {
                    self.columns.insert(column, stats);
                }
            }
        }
    }

    pub fn column(&self, column: &str) -> Option<&ColumnStats> {
        self.columns.get(column)
    }

    pub fn columns(&self) -> impl Iterator<Item = (&String, &ColumnStats)> {
        self.columns.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}
