//! Business logic services.

pub mod deduplication;

pub use deduplication::{DedupOutcome, DeduplicationService, remove_duplicates};
