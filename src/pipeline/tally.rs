use serde::Serialize;
use std::collections::BTreeMap;

/// Accumulated value-frequency counts for string-typed columns.
///
/// Tallies are built per file and folded into a run-wide accumulator, so the
/// merge is an explicit, order-independent fold rather than shared state.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CategoricalTally {
    columns: BTreeMap<String, BTreeMap<String, u64>>,
}

impl CategoricalTally {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one observation of `value` under `column`.
    pub fn record(&mut self, column: &str, value: &str) {
        *self
            .columns
            .entry(column.to_string())
            .or_default()
            .entry(value.to_string())
            .or_insert(0) += 1;
    }

    /// Fold another tally into this one: counts for matching (column, value)
    /// pairs are added, new pairs are inserted. Columns present in only some
    /// inputs keep their observed counts; there is no zero-fill.
    pub fn merge(&mut self, other: CategoricalTally) {
        for (column, counts) in other.columns {
            let entry = self.columns.entry(column).or_default();
            for (value, count) in counts {
                *entry.entry(value).or_insert(0) += count;
            }
        }
    }

    /// Value counts for one column, if any string-typed values were seen.
    pub fn column(&self, column: &str) -> Option<&BTreeMap<String, u64>> {
        self.columns.get(column)
    }

    /// Total observations recorded under `column`.
    pub fn column_total(&self, column: &str) -> u64 {
        self.columns
            .get(column)
            .map(|counts| counts.values().sum())
            .unwrap_or(0)
    }

    pub fn columns(&self) -> impl Iterator<Item = (&String, &BTreeMap<String, u64>)> {
        self.columns.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}
