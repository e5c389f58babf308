//! # csv-dedup
//!
//! An HTTP service that removes duplicate rows from CSV payloads.
//!
//! The service accepts CSV text wrapped in a JSON body, drops every data row
//! that exactly repeats an earlier one, and returns the cleaned CSV. The
//! header row is always kept, surviving rows keep their original order, and
//! the input's line-ending convention is reproduced on output.
//!
//! ## Features
//!
//! - `POST /remove_duplicates` endpoint (axum)
//! - Offline `dedup` CLI command running the same routine on files
//! - Structured logging with per-request correlation IDs
//! - Optional Prometheus metrics
//!
//! ## Example
//!
//! ```rust
//! use csv_dedup::remove_duplicates;
//!
//! let cleaned = remove_duplicates("a,b\n1,2\n1,2\n3,4\n").unwrap();
//! assert_eq!(cleaned, "a,b\n1,2\n3,4\n");
//! ```

#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![warn(missing_docs)]
#![forbid(unsafe_code)]
#![allow(clippy::multiple_crate_versions)]

use thiserror::Error as ThisError;

pub mod cli;
pub mod config;
pub mod models;
pub mod observability;
pub mod server;
pub mod services;

pub use config::DedupConfig;
pub use models::{
    ErrorResponse, LineEnding, RemoveDuplicatesRequest, RemoveDuplicatesResponse, Table,
};
pub use server::HttpServer;
pub use services::{DedupOutcome, DeduplicationService, remove_duplicates};

/// Error type for csv-dedup operations.
///
/// # Error Variant Triggers
///
/// | Variant | Raised When | HTTP status |
/// |---------|-------------|-------------|
/// | `MissingInput` | `file_contents` absent or `null` | 400 |
/// | `InvalidInput` | Body is not a JSON object, `file_contents` is not a string | 400 |
/// | `MalformedCsv` | No header row, a row longer than the header | 400 |
/// | `OperationFailed` | CSV writer, filesystem or socket failures | 500 |
#[derive(Debug, ThisError)]
pub enum Error {
    /// A required input field was not supplied.
    #[error("{0}")]
    MissingInput(String),

    /// The request could not be interpreted.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The CSV payload could not be parsed into a table.
    #[error("malformed CSV{}: {cause}", line.map(|l| format!(" at line {l}")).unwrap_or_default())]
    MalformedCsv {
        /// 1-based line number of the offending record, when known.
        line: Option<u64>,
        /// Parser diagnostic.
        cause: String,
    },

    /// An operation failed.
    #[error("operation '{operation}' failed: {cause}")]
    OperationFailed {
        /// The operation that failed.
        operation: String,
        /// The underlying cause.
        cause: String,
    },
}

/// Result type alias for csv-dedup operations.
pub type Result<T> = std::result::Result<T, Error>;
