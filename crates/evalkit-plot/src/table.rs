//! Whitespace-delimited score table loading.
//!
//! Lines that are empty or start with `#` are skipped (a `#` anywhere starts
//! a comment). Every other line must hold the same number of numeric
//! columns, at least two. Only the first two columns are kept.

use std::path::Path;

use tracing::debug;

use crate::error::{PlotError, PlotResult};

/// An (original, rescored) evaluation pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScorePair {
    pub original: f64,
    pub rescored: f64,
}

impl ScorePair {
    pub const fn new(original: f64, rescored: f64) -> Self {
        Self { original, rescored }
    }

    /// True when both coordinates are finite numbers.
    pub const fn is_finite(&self) -> bool {
        self.original.is_finite() && self.rescored.is_finite()
    }
}

/// Rows of score pairs in file order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScoreTable {
    rows: Vec<ScorePair>,
}

impl ScoreTable {
    pub const fn new(rows: Vec<ScorePair>) -> Self {
        Self { rows }
    }

    /// Read and parse a table from disk.
    ///
    /// Bytes that are not UTF-8 are a data error naming their line, not an
    /// I/O error.
    pub fn load(path: &Path) -> PlotResult<Self> {
        let bytes = std::fs::read(path).map_err(|e| PlotError::io(path, e))?;
        let content = String::from_utf8(bytes).map_err(|e| {
            let valid = &e.as_bytes()[..e.utf8_error().valid_up_to()];
            PlotError::NotUtf8 {
                line: valid.iter().filter(|&&b| b == b'\n').count() + 1,
            }
        })?;
        let table = Self::parse(&content)?;
        debug!(path = %path.display(), rows = table.len(), "loaded score table");
        Ok(table)
    }

    /// Parse table text.
    pub fn parse(content: &str) -> PlotResult<Self> {
        let mut rows = Vec::new();
        let mut columns: Option<usize> = None;

        for (index, raw) in content.lines().enumerate() {
            let line = index + 1;
            let data = raw.split('#').next().unwrap_or_default();
            let fields: Vec<&str> = data.split_ascii_whitespace().collect();
            if fields.is_empty() {
                continue;
            }

            match columns {
                None => {
                    if fields.len() < 2 {
                        return Err(PlotError::TooFewColumns {
                            line,
                            found: fields.len(),
                        });
                    }
                    columns = Some(fields.len());
                }
                Some(expected) if expected != fields.len() => {
                    return Err(PlotError::RaggedRow {
                        line,
                        expected,
                        found: fields.len(),
                    });
                }
                Some(_) => {}
            }

            let values = fields
                .iter()
                .map(|field| parse_value(field, line))
                .collect::<PlotResult<Vec<f64>>>()?;
            rows.push(ScorePair::new(values[0], values[1]));
        }

        Ok(Self { rows })
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn rows(&self) -> &[ScorePair] {
        &self.rows
    }

    /// Number of rows with both values finite.
    pub fn finite_len(&self) -> usize {
        self.rows.iter().filter(|row| row.is_finite()).count()
    }
}

fn parse_value(field: &str, line: usize) -> PlotResult<f64> {
    field.parse::<f64>().map_err(|_| PlotError::InvalidNumber {
        line,
        value: field.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_two_columns() {
        let table = ScoreTable::parse("10 12\n-50\t-48\n20000   19500\n").unwrap();
        assert_eq!(
            table.rows(),
            &[
                ScorePair::new(10.0, 12.0),
                ScorePair::new(-50.0, -48.0),
                ScorePair::new(20000.0, 19500.0),
            ]
        );
    }

    #[test]
    fn test_extra_columns_are_ignored() {
        let table = ScoreTable::parse("1 2 3\n4 5 6\n").unwrap();
        assert_eq!(table.rows()[1], ScorePair::new(4.0, 5.0));
    }

    #[test]
    fn test_blank_lines_and_comments_are_skipped() {
        let table = ScoreTable::parse("# original rescored\n\n1 2\n   \n3 4 # note\n").unwrap();
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_empty_input_is_valid() {
        assert!(ScoreTable::parse("").unwrap().is_empty());
        assert!(ScoreTable::parse("\n# nothing here\n").unwrap().is_empty());
    }

    #[test]
    fn test_special_floats_are_accepted() {
        let table = ScoreTable::parse("nan 1\ninf -inf\n1e3 2.5E2\n").unwrap();
        assert_eq!(table.len(), 3);
        assert_eq!(table.finite_len(), 1);
        assert_eq!(table.rows()[2], ScorePair::new(1000.0, 250.0));
    }

    #[test]
    fn test_single_column_is_rejected() {
        let err = ScoreTable::parse("\n42\n43\n").unwrap_err();
        assert!(matches!(err, PlotError::TooFewColumns { line: 2, found: 1 }));
    }

    #[test]
    fn test_ragged_rows_are_rejected() {
        let err = ScoreTable::parse("1 2\n3 4 5\n").unwrap_err();
        assert!(matches!(
            err,
            PlotError::RaggedRow {
                line: 2,
                expected: 2,
                found: 3
            }
        ));
    }

    #[test]
    fn test_non_numeric_value_is_rejected() {
        let err = ScoreTable::parse("1 2\n3 mate\n").unwrap_err();
        match err {
            PlotError::InvalidNumber { line, value } => {
                assert_eq!(line, 2);
                assert_eq!(value, "mate");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_non_utf8_file_is_a_data_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("score_pairs.txt");
        std::fs::write(&path, b"1 2\n3 4\n\xff\xfe 1\n").unwrap();

        let err = ScoreTable::load(&path).unwrap_err();

        assert!(matches!(err, PlotError::NotUtf8 { line: 3 }));
        assert!(err.is_data_error());
    }

    #[test]
    fn test_missing_file() {
        let err = ScoreTable::load(Path::new("/nonexistent/score_pairs.txt")).unwrap_err();
        assert!(matches!(err, PlotError::Io { .. }));
    }
}
