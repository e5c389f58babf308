//! Deduplication result types.

/// Result of deduplicating a CSV document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DedupOutcome {
    /// The cleaned CSV text.
    pub csv: String,
    /// Data rows before deduplication (header excluded).
    pub rows_in: usize,
    /// Data rows after deduplication (header excluded).
    pub rows_out: usize,
}

impl DedupOutcome {
    /// Number of rows dropped as duplicates.
    #[must_use]
    pub const fn duplicates_removed(&self) -> usize {
        self.rows_in.saturating_sub(self.rows_out)
    }
}
