//! Property-based tests for CSV deduplication.
//!
//! Uses proptest to verify invariants across random tables:
//! - Tables without repeated rows come back unchanged
//! - Output row count equals the number of distinct rows
//! - Survivors are the first occurrences, in input order
//! - Deduplication is idempotent
//! - Line endings are preserved, regardless of line breaks inside quoted cells

// Property tests use expect/unwrap for simplicity - panics are acceptable in tests
#![allow(clippy::expect_used, clippy::unwrap_used)]

use csv_dedup::remove_duplicates;
use proptest::prelude::*;
use std::collections::HashSet;

/// Random table: header plus rows of a fixed width drawn from a small
/// alphabet so that repeats are common.
fn table() -> impl Strategy<Value = (Vec<String>, Vec<Vec<String>>)> {
    (2usize..4).prop_flat_map(|width| {
        let header = (0..width).map(|i| format!("h{i}")).collect::<Vec<_>>();
        (
            Just(header),
            prop::collection::vec(prop::collection::vec("[a-c]{1,2}", width), 0..30),
        )
    })
}

/// Random table whose cells need quoting on output, including embedded
/// line breaks of either style.
fn quoted_table() -> impl Strategy<Value = (Vec<String>, Vec<Vec<String>>)> {
    (2usize..4).prop_flat_map(|width| {
        let header = (0..width).map(|i| format!("col {i}")).collect::<Vec<_>>();
        (
            Just(header),
            prop::collection::vec(prop::collection::vec("[ab,\" \r\n]{1,3}", width), 0..20),
        )
    })
}

/// Joins unquoted cells into CSV text.
fn join(header: &[String], rows: &[Vec<String>], terminator: &str) -> String {
    std::iter::once(header)
        .chain(rows.iter().map(Vec::as_slice))
        .map(|row| format!("{}{terminator}", row.join(",")))
        .collect()
}

/// Serializes cells with the csv crate so quoting is applied where needed.
fn write_csv(header: &[String], rows: &[Vec<String>]) -> String {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(header).unwrap();
    for row in rows {
        writer.write_record(row).unwrap();
    }
    String::from_utf8(writer.into_inner().unwrap()).unwrap()
}

fn first_occurrences(rows: &[Vec<String>]) -> Vec<Vec<String>> {
    let mut seen = HashSet::new();
    rows.iter()
        .filter(|row| seen.insert((*row).clone()))
        .cloned()
        .collect()
}

proptest! {
    /// Property: input without repeated rows is returned byte-for-byte.
    #[test]
    fn prop_distinct_rows_unchanged((header, rows) in table()) {
        let rows = first_occurrences(&rows);
        let input = join(&header, &rows, "\n");
        prop_assert_eq!(remove_duplicates(&input).unwrap(), input);
    }

    /// Property: output keeps the header and one row per distinct row.
    #[test]
    fn prop_row_count_equals_distinct((header, rows) in table()) {
        let input = join(&header, &rows, "\n");
        let output = remove_duplicates(&input).unwrap();

        let lines: Vec<&str> = output.lines().collect();
        let distinct: HashSet<&Vec<String>> = rows.iter().collect();
        prop_assert_eq!(lines[0], header.join(","));
        prop_assert_eq!(lines.len() - 1, distinct.len());
    }

    /// Property: survivors are first occurrences in original order.
    #[test]
    fn prop_first_occurrence_order((header, rows) in table()) {
        let input = join(&header, &rows, "\n");
        let expected = join(&header, &first_occurrences(&rows), "\n");
        prop_assert_eq!(remove_duplicates(&input).unwrap(), expected);
    }

    /// Property: running deduplication twice changes nothing further.
    #[test]
    fn prop_idempotent((header, rows) in quoted_table()) {
        let input = write_csv(&header, &rows);
        let once = remove_duplicates(&input).unwrap();
        let twice = remove_duplicates(&once).unwrap();
        prop_assert_eq!(&twice, &once);
    }

    /// Property: quoted cells survive with the same quoting.
    #[test]
    fn prop_quoting_preserved((header, rows) in quoted_table()) {
        let input = write_csv(&header, &rows);
        let expected = write_csv(&header, &first_occurrences(&rows));
        prop_assert_eq!(remove_duplicates(&input).unwrap(), expected);
    }

    /// Property: bare CR input yields bare CR output.
    #[test]
    fn prop_cr_preserved((header, rows) in table()) {
        let input = join(&header, &rows, "\r");
        let expected = join(&header, &first_occurrences(&rows), "\r");
        prop_assert_eq!(remove_duplicates(&input).unwrap(), expected);
    }

    /// Property: CRLF input yields CRLF output.
    #[test]
    fn prop_crlf_preserved((header, rows) in table()) {
        let input = join(&header, &rows, "\r\n");
        let expected = join(&header, &first_occurrences(&rows), "\r\n");
        prop_assert_eq!(remove_duplicates(&input).unwrap(), expected);
    }
}
