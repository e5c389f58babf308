//! Dedup CLI command.
//!
//! Runs the same deduplication as `POST /remove_duplicates` over a local
//! file or stdin, writing the cleaned CSV to a file or stdout.

use crate::observability::{RequestContext, enter_request_context};
use crate::services::{DedupOutcome, DeduplicationService};
use crate::{Error, Result};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

/// Path value meaning stdin (for input) or stdout (for output).
pub const STDIO_MARKER: &str = "-";

/// Dedup command handler.
#[derive(Debug, Clone, Default)]
pub struct DedupCommand {
    input: Option<PathBuf>,
    output: Option<PathBuf>,
    service: DeduplicationService,
}

impl DedupCommand {
    /// Creates a command reading stdin and writing stdout.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads from `path`; `-` means stdin.
    #[must_use]
    pub fn with_input(mut self, path: Option<PathBuf>) -> Self {
        self.input = path.filter(|p| !is_stdio(p));
        self
    }

    /// Writes to `path`; `-` means stdout.
    #[must_use]
    pub fn with_output(mut self, path: Option<PathBuf>) -> Self {
        self.output = path.filter(|p| !is_stdio(p));
        self
    }

    /// Reads the input, removes duplicate rows and writes the result.
    ///
    /// # Errors
    ///
    /// Returns an error if the input cannot be read or is not valid UTF-8,
    /// if the CSV is malformed, or if the output cannot be written.
    pub fn run(&self) -> Result<DedupOutcome> {
        let _context = enter_request_context(RequestContext::new());

        let contents = match &self.input {
            Some(path) => read_file(path)?,
            None => read_to_string(std::io::stdin().lock(), "stdin")?,
        };

        let outcome = self.service.remove_duplicates(&contents)?;

        match &self.output {
            Some(path) => std::fs::write(path, &outcome.csv).map_err(|e| Error::OperationFailed {
                operation: "write_output".to_string(),
                cause: format!("{}: {e}", path.display()),
            })?,
            None => write_all(std::io::stdout().lock(), &outcome.csv)?,
        }

        tracing::info!(
            input = %describe(self.input.as_deref(), "stdin"),
            output = %describe(self.output.as_deref(), "stdout"),
            rows_in = outcome.rows_in,
            rows_out = outcome.rows_out,
            duplicates_removed = outcome.duplicates_removed(),
            "Duplicates removed"
        );

        Ok(outcome)
    }

    /// Same as [`Self::run`] over explicit streams; configured paths are
    /// ignored.
    ///
    /// # Errors
    ///
    /// Returns an error if the reader fails or yields invalid UTF-8, if the
    /// CSV is malformed, or if the writer fails.
    pub fn run_with<R: Read, W: Write>(&self, reader: R, writer: W) -> Result<DedupOutcome> {
        let contents = read_to_string(reader, "input")?;
        let outcome = self.service.remove_duplicates(&contents)?;
        write_all(writer, &outcome.csv)?;
        Ok(outcome)
    }
}

fn is_stdio(path: &Path) -> bool {
    path.as_os_str() == STDIO_MARKER
}

fn describe(path: Option<&Path>, fallback: &str) -> String {
    path.map_or_else(|| fallback.to_string(), |p| p.display().to_string())
}

fn read_file(path: &Path) -> Result<String> {
    let bytes = std::fs::read(path).map_err(|e| Error::OperationFailed {
        operation: "read_input".to_string(),
        cause: format!("{}: {e}", path.display()),
    })?;
    String::from_utf8(bytes)
        .map_err(|e| Error::InvalidInput(format!("{} is not valid UTF-8: {e}", path.display())))
}

fn read_to_string<R: Read>(mut reader: R, name: &str) -> Result<String> {
    let mut bytes = Vec::new();
    reader
        .read_to_end(&mut bytes)
        .map_err(|e| Error::OperationFailed {
            operation: "read_input".to_string(),
            cause: format!("{name}: {e}"),
        })?;
    String::from_utf8(bytes).map_err(|e| Error::InvalidInput(format!("{name} is not valid UTF-8: {e}")))
}

fn write_all<W: Write>(mut writer: W, csv: &str) -> Result<()> {
    writer
        .write_all(csv.as_bytes())
        .and_then(|()| writer.flush())
        .map_err(|e| Error::OperationFailed {
            operation: "write_output".to_string(),
            cause: e.to_string(),
        })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_run_with_streams() {
        let mut out = Vec::new();
        let outcome = DedupCommand::new()
            .run_with("a,b\n1,2\n1,2\n3,4\n".as_bytes(), &mut out)
            .unwrap();

        assert_eq!(String::from_utf8(out).unwrap(), "a,b\n1,2\n3,4\n");
        assert_eq!(outcome.rows_in, 3);
        assert_eq!(outcome.rows_out, 2);
    }

    #[test]
    fn test_run_with_rejects_invalid_utf8() {
        let err = DedupCommand::new()
            .run_with(&[0xff, 0xfe, b'\n'][..], Vec::new())
            .unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
    }

    #[test]
    fn test_dash_means_stdio() {
        let cmd = DedupCommand::new()
            .with_input(Some(PathBuf::from("-")))
            .with_output(Some(PathBuf::from("-")));
        assert!(cmd.input.is_none());
        assert!(cmd.output.is_none());
    }

    #[test]
    fn test_run_files() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in.csv");
        let output = dir.path().join("out.csv");
        std::fs::write(&input, "id,name\n1,ann\n2,bob\n1,ann\n").unwrap();

        let outcome = DedupCommand::new()
            .with_input(Some(input))
            .with_output(Some(output.clone()))
            .run()
            .unwrap();

        assert_eq!(outcome.duplicates_removed(), 1);
        assert_eq!(
            std::fs::read_to_string(output).unwrap(),
            "id,name\n1,ann\n2,bob\n"
        );
    }

    #[test]
    fn test_run_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = DedupCommand::new()
            .with_input(Some(dir.path().join("absent.csv")))
            .run()
            .unwrap_err();
        assert!(err.to_string().contains("read_input"));
    }
}
