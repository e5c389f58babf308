//! CLI command implementations.
//!
//! The binary parses arguments with clap and hands off to the command
//! structs defined here.
//!
//! # Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `serve` | Run the HTTP deduplication service |
//! | `dedup` | Deduplicate a CSV file or stdin |
//! | `config` | Show the effective configuration |
//!
//! # Example Usage
//!
//! ```bash
//! # Serve on all interfaces
//! csv-dedup serve --host 0.0.0.0 --port 8080
//!
//! # Deduplicate a file in place of a pipeline stage
//! cat contacts.csv | csv-dedup dedup > contacts.clean.csv
//! ```

mod config;
mod dedup;
mod serve;

pub use config::ConfigCommand;
pub use dedup::{DedupCommand, STDIO_MARKER};
pub use serve::ServeCommand;
