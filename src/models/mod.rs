//! Data models for csv-dedup.
//!
//! Tabular data parsed from CSV, plus the JSON payloads exchanged over HTTP.

mod payload;
mod table;

pub use payload::{
    ErrorResponse, MISSING_FILE_CONTENTS, RemoveDuplicatesRequest, RemoveDuplicatesResponse,
    SUCCESS_MESSAGE,
};
pub use table::{Layout, LineEnding, Table};
