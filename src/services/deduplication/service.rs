//! Deduplication service.

use crate::Result;
use crate::models::Table;
use std::collections::HashSet;
use std::time::Instant;
use tracing::instrument;

use super::codec::{parse_table, write_table};
use super::hasher::RowHasher;
use super::types::DedupOutcome;

/// Removes exact duplicate data rows from CSV documents.
///
/// The service holds no state; one instance can be shared by every request.
#[derive(Debug, Clone, Copy, Default)]
pub struct DeduplicationService;

impl DeduplicationService {
    /// Creates a new deduplication service.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Parses `csv`, drops repeated data rows, and writes the result.
    ///
    /// The first occurrence of each row is kept and survivors stay in their
    /// original order. The header is written unchanged and is never compared
    /// against data rows.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::MalformedCsv`] if the text cannot be parsed,
    /// or [`crate::Error::OperationFailed`] if re-serialization fails.
    #[instrument(name = "dedup.remove_duplicates", skip_all, fields(input_bytes = csv.len()))]
    pub fn remove_duplicates(&self, csv: &str) -> Result<DedupOutcome> {
        let start = Instant::now();

        let table = parse_table(csv)?;
        let rows_in = table.len();
        let table = Self::dedup_table(table);
        let rows_out = table.len();
        let cleaned = write_table(&table)?;

        let outcome = DedupOutcome {
            csv: cleaned,
            rows_in,
            rows_out,
        };

        metrics::counter!("dedup_rows_processed_total").increment(rows_in as u64);
        metrics::counter!("dedup_rows_removed_total")
            .increment(outcome.duplicates_removed() as u64);
        tracing::debug!(
            columns = table.width(),
            rows_in,
            rows_out,
            duplicates_removed = outcome.duplicates_removed(),
            elapsed_us = start.elapsed().as_micros(),
            "Deduplicated CSV"
        );

        Ok(outcome)
    }

    /// Drops repeated data rows from a table, keeping its header and layout.
    #[must_use]
    pub fn dedup_table(table: Table) -> Table {
        let Table {
            headers,
            rows,
            layout,
        } = table;
        Table {
            headers,
            rows: Self::dedup_rows(rows),
            layout,
        }
    }

    /// Keeps the first occurrence of each distinct row, preserving order.
    #[must_use]
    pub fn dedup_rows(rows: Vec<Vec<String>>) -> Vec<Vec<String>> {
        let mut seen = HashSet::with_capacity(rows.len());
        rows.into_iter()
            .filter(|row| seen.insert(RowHasher::digest(row)))
            .collect()
    }
}

/// Removes duplicate rows from CSV text with a default service.
///
/// # Errors
///
/// See [`DeduplicationService::remove_duplicates`].
pub fn remove_duplicates(csv: &str) -> Result<String> {
    DeduplicationService::new()
        .remove_duplicates(csv)
        .map(|outcome| outcome.csv)
}
