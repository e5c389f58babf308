//! Exact-match row deduplication for CSV documents.
//!
//! The pipeline is parse, filter, write:
//!
//! ```text
//! csv text ──► parse_table ──► Table ──► RowHasher seen-set ──► Table ──► write_table ──► csv text
//!              (first record               (first occurrence              (same line ending,
//!               is the header)              wins, order kept)              same trailing newline)
//! ```
//!
//! Rows are compared by a SHA-256 digest over their length-prefixed cells,
//! so only cell-for-cell identical rows collapse. The header never takes
//! part in the comparison.
//!
//! # Example
//!
//! ```rust
//! use csv_dedup::services::DeduplicationService;
//!
//! let service = DeduplicationService::new();
//! let outcome = service.remove_duplicates("id,name\n1,a\n1,a\n2,b\n").unwrap();
//!
//! assert_eq!(outcome.csv, "id,name\n1,a\n2,b\n");
//! assert_eq!(outcome.duplicates_removed(), 1);
//! ```

mod codec;
mod hasher;
mod service;
mod types;

pub use codec::{parse_table, write_table};
pub use hasher::{RowDigest, RowHasher};
pub use service::{DeduplicationService, remove_duplicates};
pub use types::DedupOutcome;
