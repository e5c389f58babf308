//! CSV text to [`Table`] and back.

use crate::models::{Layout, Table};
use crate::{Error, Result};

/// Parses CSV text into a table, treating the first record as the header.
///
/// Blank lines are skipped. Cells are kept verbatim (no trimming, no type
/// inference), so `1` and `1.0` are different values. Records shorter than
/// the header are padded with empty cells.
///
/// # Errors
///
/// Returns [`Error::MalformedCsv`] when the text has no records at all or
/// when a record has more fields than the header.
pub fn parse_table(text: &str) -> Result<Table> {
    let layout = Layout::detect(text);
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(text.as_bytes());

    let mut records = reader.records();
    let headers = match records.next() {
        Some(record) => record_cells(&record.map_err(|e| malformed(&e))?),
        None => {
            return Err(Error::MalformedCsv {
                line: None,
                cause: "no header row".to_string(),
            });
        },
    };

    let width = headers.len();
    let rows = records
        .map(|record| {
            let record = record.map_err(|e| malformed(&e))?;
            if record.len() > width {
                return Err(Error::MalformedCsv {
                    line: record.position().map(csv::Position::line),
                    cause: too_many_fields(record.len(), width),
                });
            }
            let mut cells = record_cells(&record);
            cells.resize(width, String::new());
            Ok(cells)
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(Table {
        headers,
        rows,
        layout,
    })
}

/// Serializes a table back to CSV text.
///
/// Fields are quoted only when necessary. The table's layout decides the
/// line terminator and whether the final record is terminated.
///
/// # Errors
///
/// Returns [`Error::OperationFailed`] if the CSV writer fails.
pub fn write_table(table: &Table) -> Result<String> {
    let line_ending = table.layout.line_ending;
    let mut writer = csv::WriterBuilder::new()
        .terminator(line_ending.to_terminator())
        .quote_style(csv::QuoteStyle::Necessary)
        .from_writer(Vec::new());

    writer
        .write_record(&table.headers)
        .map_err(|e| write_failed("write_csv_headers", &e))?;
    for row in &table.rows {
        writer
            .write_record(row)
            .map_err(|e| write_failed("write_csv_record", &e))?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| write_failed("flush_csv", &e))?;
    let mut text = String::from_utf8(bytes).map_err(|e| write_failed("encode_csv", &e))?;

    if !table.layout.trailing_newline && text.ends_with(line_ending.as_str()) {
        text.truncate(text.len() - line_ending.as_str().len());
    }

    Ok(text)
}

fn record_cells(record: &csv::StringRecord) -> Vec<String> {
    record.iter().map(String::from).collect()
}

/// Maps a reader error to [`Error::MalformedCsv`], keeping the position out
/// of the message since it is carried in `line`.
fn malformed(e: &csv::Error) -> Error {
    let (pos, cause) = match e.kind() {
        csv::ErrorKind::UnequalLengths {
            pos,
            expected_len,
            len,
        } => (pos.as_ref(), too_many_fields(*len, *expected_len)),
        csv::ErrorKind::Utf8 { pos, err } => (pos.as_ref(), err.to_string()),
        _ => (e.position(), e.to_string()),
    };
    Error::MalformedCsv {
        line: pos.map(csv::Position::line),
        cause,
    }
}

fn too_many_fields(len: impl std::fmt::Display, expected: impl std::fmt::Display) -> String {
    format!("found record with {len} fields, expected {expected}")
}

fn write_failed(operation: &str, e: &impl std::fmt::Display) -> Error {
    Error::OperationFailed {
        operation: operation.to_string(),
        cause: e.to_string(),
    }
}
