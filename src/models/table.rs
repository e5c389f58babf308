//! In-memory table parsed from CSV text.

/// Line terminator used by a CSV document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineEnding {
    /// Unix-style `\n`.
    #[default]
    Lf,
    /// Windows-style `\r\n`.
    CrLf,
    /// Classic Mac-style bare `\r`.
    Cr,
}

impl LineEnding {
    /// Detects the line terminator of a document from its first record
    /// terminator outside a quoted field.
    ///
    /// Line breaks embedded in quoted cells do not count. A document with a
    /// single unterminated record is treated as [`LineEnding::Lf`].
    #[must_use]
    pub fn detect(text: &str) -> Self {
        let bytes = text.as_bytes();
        let mut in_quotes = false;
        for (i, &b) in bytes.iter().enumerate() {
            match b {
                // A doubled quote toggles twice, leaving the state unchanged.
                b'"' => in_quotes = !in_quotes,
                b'\n' if !in_quotes => return Self::Lf,
                b'\r' if !in_quotes => {
                    return if bytes.get(i + 1) == Some(&b'\n') {
                        Self::CrLf
                    } else {
                        Self::Cr
                    };
                },
                _ => {},
            }
        }
        Self::default()
    }

    /// Returns the terminator as a string slice.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Lf => "\n",
            Self::CrLf => "\r\n",
            Self::Cr => "\r",
        }
    }

    /// Converts to the `csv` crate's terminator setting.
    #[must_use]
    pub const fn to_terminator(self) -> csv::Terminator {
        match self {
            Self::Lf => csv::Terminator::Any(b'\n'),
            Self::CrLf => csv::Terminator::CRLF,
            Self::Cr => csv::Terminator::Any(b'\r'),
        }
    }
}

/// Formatting convention of the source document, reproduced on output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    /// Line terminator between records.
    pub line_ending: LineEnding,
    /// Whether the last record is followed by a terminator.
    pub trailing_newline: bool,
}

impl Default for Layout {
    fn default() -> Self {
        Self {
            line_ending: LineEnding::Lf,
            trailing_newline: true,
        }
    }
}

impl Layout {
    /// Captures the layout of a CSV document.
    #[must_use]
    pub fn detect(text: &str) -> Self {
        Self {
            line_ending: LineEnding::detect(text),
            trailing_newline: text.ends_with(['\n', '\r']),
        }
    }
}

/// An ordered table of string cells with a header row.
///
/// Every row has exactly `headers.len()` cells; the CSV codec pads short
/// records with empty cells and rejects long ones.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Table {
    /// Column names from the first record.
    pub headers: Vec<String>,
    /// Data rows in document order.
    pub rows: Vec<Vec<String>>,
    /// Formatting of the source document.
    pub layout: Layout,
}

impl Table {
    /// Creates a table from headers and rows with the default layout.
    #[must_use]
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self {
            headers,
            rows,
            layout: Layout::default(),
        }
    }

    /// Number of columns.
    #[must_use]
    pub fn width(&self) -> usize {
        self.headers.len()
    }

    /// Number of data rows, excluding the header.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns true when the table has no data rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("a,b\n1,2\n", LineEnding::Lf, true ; "lf with trailing")]
    #[test_case("a,b\n1,2", LineEnding::Lf, false ; "lf without trailing")]
    #[test_case("a,b\r\n1,2\r\n", LineEnding::CrLf, true ; "crlf with trailing")]
    #[test_case("a,b\r\n1,2", LineEnding::CrLf, false ; "crlf without trailing")]
    #[test_case("a,b\r1,2\r", LineEnding::Cr, true ; "cr with trailing")]
    #[test_case("a,b\r1,2", LineEnding::Cr, false ; "cr without trailing")]
    #[test_case("a,b", LineEnding::Lf, false ; "header only")]
    #[test_case("a,b\n\"x\r\ny\",1\n", LineEnding::Lf, true ; "crlf inside quoted cell")]
    #[test_case("\"multi\nline\",b\r\n1,2\r\n", LineEnding::CrLf, true ; "lf inside quoted header")]
    #[test_case("\"a \"\"q\"\"\",b\r1,2", LineEnding::Cr, false ; "escaped quotes in header")]
    fn test_layout_detect(text: &str, line_ending: LineEnding, trailing_newline: bool) {
        let layout = Layout::detect(text);
        assert_eq!(layout.line_ending, line_ending);
        assert_eq!(layout.trailing_newline, trailing_newline);
    }

    #[test]
    fn test_line_ending_as_str() {
        assert_eq!(LineEnding::Lf.as_str(), "\n");
        assert_eq!(LineEnding::CrLf.as_str(), "\r\n");
        assert_eq!(LineEnding::Cr.as_str(), "\r");
    }

    #[test]
    fn test_table_dimensions() {
        let table = Table::new(
            vec!["a".to_string(), "b".to_string()],
            vec![vec!["1".to_string(), "2".to_string()]],
        );
        assert_eq!(table.width(), 2);
        assert_eq!(table.len(), 1);
        assert!(!table.is_empty());
        assert_eq!(table.layout, Layout::default());
    }
}
