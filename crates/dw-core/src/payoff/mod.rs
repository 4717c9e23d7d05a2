//! Payoff-table ingestion and normalization.
//!
//! A payoff table is always laid out the same way regardless of source:
//!
//! ```text
//!               State_1     State_2  ...  State_n
//!  Alt_1        payoff_11   payoff_12 ... payoff_1n
//!  ...
//!  Alt_m        payoff_m1   payoff_m2 ... payoff_mn
//!  Probability  p(State_1)  p(State_2) .. p(State_n)
//! ```
//!
//! The last row of any tabular source is always the probability row, never
//! an alternative; the first column always holds alternative labels, never
//! a state. Raw numeric grids carry no labels, so integer indices are
//! synthesized.
//!
//! Only shape is validated here. Non-numeric payoff or probability cells
//! are not rejected: they decode to `f64::NAN` and surface downstream as
//! arithmetic anomalies, matching the documented non-goal of numeric
//! content validation. Probabilities are assumed to sum to 1 and are not
//! checked.

use std::path::Path;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use dw_common::{Error, Result};

/// A row or column label: a string name from a labeled source, or a
/// synthesized integer index for raw grids.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum Label {
    Index(usize),
    Name(String),
}

impl std::fmt::Display for Label {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Label::Index(i) => write!(f, "{i}"),
            Label::Name(s) => write!(f, "{s}"),
        }
    }
}

impl From<&str> for Label {
    fn from(name: &str) -> Self {
        Label::Name(name.to_string())
    }
}

impl From<usize> for Label {
    fn from(index: usize) -> Self {
        Label::Index(index)
    }
}

/// A decoded tabular structure: one header row and string cells.
///
/// This is the common denominator the labeled ingestion paths reduce to
/// before normalization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableFrame {
    /// Column headers; the first names the alternative column.
    pub headers: Vec<String>,
    /// Data rows, alternative rows first, probability row last.
    pub rows: Vec<Vec<String>>,
}

/// Canonical in-memory payoff table.
#[derive(Debug, Clone, PartialEq, Serialize, JsonSchema)]
pub struct PayoffTable {
    /// Alternative labels, one per matrix row.
    pub alternatives: Vec<Label>,
    /// State labels, one per matrix column.
    pub states: Vec<Label>,
    /// State probabilities, one per matrix column.
    pub probabilities: Vec<f64>,
    /// Row-major payoff matrix, `values[alternative][state]`.
    pub values: Vec<Vec<f64>>,
}

impl PayoffTable {
    /// Number of alternatives (matrix rows).
    pub fn n_alternatives(&self) -> usize {
        self.alternatives.len()
    }

    /// Number of states (matrix columns).
    pub fn n_states(&self) -> usize {
        self.states.len()
    }

    /// Ingest a delimited-text table from a file path.
    ///
    /// The first line is the header row; decoding failures surface as
    /// [`Error::Ingestion`].
    pub fn from_csv_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .from_path(path)
            .map_err(|e| {
                Error::Ingestion(format!(
                    "{} is not a readable delimited table: {e}",
                    path.display()
                ))
            })?;

        let headers = reader
            .headers()
            .map_err(|e| Error::Ingestion(format!("{}: {e}", path.display())))?
            .iter()
            .map(str::to_string)
            .collect();

        let mut rows = Vec::new();
        for record in reader.records() {
            let record =
                record.map_err(|e| Error::Ingestion(format!("{}: {e}", path.display())))?;
            rows.push(record.iter().map(str::to_string).collect());
        }

        Self::from_frame(TableFrame { headers, rows })
    }

    /// Ingest a raw numeric grid with no labels.
    ///
    /// The last row is the probability row; alternative and state labels
    /// are synthesized as `0..m-1` and `0..n-1`.
    pub fn from_grid(grid: Vec<Vec<f64>>) -> Result<Self> {
        if grid.len() < 2 {
            return Err(Error::TableShape(format!(
                "grid has {} row(s); at least one alternative row and a probability row are required",
                grid.len()
            )));
        }
        let width = grid[0].len();
        if width == 0 {
            return Err(Error::TableShape("grid has no state columns".into()));
        }
        if let Some(bad) = grid.iter().find(|row| row.len() != width) {
            return Err(Error::TableShape(format!(
                "ragged grid: expected {width} columns, found a row with {}",
                bad.len()
            )));
        }

        let mut values = grid;
        let probabilities = values.pop().expect("len checked above");
        let alternatives = (0..values.len()).map(Label::Index).collect();
        let states = (0..width).map(Label::Index).collect();

        Ok(Self {
            alternatives,
            states,
            probabilities,
            values,
        })
    }

    /// Ingest a key-ordered mapping of column name to column cells.
    ///
    /// The first entry is the alternative-label column; remaining entries
    /// are state columns whose last cell is the state probability.
    pub fn from_columns<S: AsRef<str>>(columns: &[(S, Vec<String>)]) -> Result<Self> {
        let Some((_, first)) = columns.first() else {
            return Err(Error::TableShape("column mapping is empty".into()));
        };
        let height = first.len();
        if let Some((name, bad)) = columns.iter().find(|(_, cells)| cells.len() != height) {
            return Err(Error::TableShape(format!(
                "column '{}' has {} cell(s); expected {height}",
                name.as_ref(),
                bad.len()
            )));
        }

        let headers = columns.iter().map(|(name, _)| name.as_ref().to_string()).collect();
        let rows = (0..height)
            .map(|r| columns.iter().map(|(_, cells)| cells[r].clone()).collect())
            .collect();

        Self::from_frame(TableFrame { headers, rows })
    }

    /// Normalize a pre-built tabular structure.
    pub fn from_frame(frame: TableFrame) -> Result<Self> {
        if frame.rows.len() < 2 {
            return Err(Error::TableShape(format!(
                "table has {} data row(s); at least one alternative row and a probability row are required",
                frame.rows.len()
            )));
        }
        if frame.headers.len() < 2 {
            return Err(Error::TableShape(format!(
                "table has {} column(s); a label column and at least one state column are required",
                frame.headers.len()
            )));
        }
        let width = frame.headers.len();
        if let Some(bad) = frame.rows.iter().find(|row| row.len() != width) {
            return Err(Error::TableShape(format!(
                "ragged table: header has {width} columns, found a row with {}",
                bad.len()
            )));
        }

        let states = frame.headers[1..].iter().map(|h| Label::from(h.as_str())).collect();

        let (prob_row, alt_rows) = frame.rows.split_last().expect("len checked above");
        let probabilities = prob_row[1..].iter().map(|c| parse_cell(c)).collect();

        let alternatives = alt_rows
            .iter()
            .map(|row| Label::from(row[0].as_str()))
            .collect();
        let values = alt_rows
            .iter()
            .map(|row| row[1..].iter().map(|c| parse_cell(c)).collect())
            .collect();

        Ok(Self {
            alternatives,
            states,
            probabilities,
            values,
        })
    }
}

/// Decode a numeric cell, letting malformed content flow through as NaN.
fn parse_cell(cell: &str) -> f64 {
    cell.trim().parse().unwrap_or(f64::NAN)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn labeled_frame() -> TableFrame {
        TableFrame {
            headers: vec!["Decision".into(), "Low".into(), "High".into()],
            rows: vec![
                vec!["buy".into(), "10".into(), "40".into()],
                vec!["lease".into(), "20".into(), "30".into()],
                vec!["Prob".into(), "0.6".into(), "0.4".into()],
            ],
        }
    }

    #[test]
    fn frame_splits_labels_and_probabilities() {
        let table = PayoffTable::from_frame(labeled_frame()).unwrap();
        assert_eq!(table.alternatives, vec![Label::from("buy"), Label::from("lease")]);
        assert_eq!(table.states, vec![Label::from("Low"), Label::from("High")]);
        assert_eq!(table.probabilities, vec![0.6, 0.4]);
        assert_eq!(table.values, vec![vec![10.0, 40.0], vec![20.0, 30.0]]);
    }

    #[test]
    fn grid_synthesizes_integer_labels() {
        let table = PayoffTable::from_grid(vec![
            vec![1.0, 2.0],
            vec![3.0, 4.0],
            vec![0.5, 0.5],
        ])
        .unwrap();
        assert_eq!(table.alternatives, vec![Label::Index(0), Label::Index(1)]);
        assert_eq!(table.states, vec![Label::Index(0), Label::Index(1)]);
        assert_eq!(table.probabilities, vec![0.5, 0.5]);
    }

    #[test]
    fn columns_transpose_to_frame() {
        let columns = vec![
            ("Decision", vec!["buy".to_string(), "lease".into(), "Prob".into()]),
            ("Low", vec!["10".to_string(), "20".into(), "0.6".into()]),
            ("High", vec!["40".to_string(), "30".into(), "0.4".into()]),
        ];
        let table = PayoffTable::from_columns(&columns).unwrap();
        assert_eq!(table, PayoffTable::from_frame(labeled_frame()).unwrap());
    }

    #[test]
    fn csv_path_round_trip() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "Decision,Low,High").unwrap();
        writeln!(file, "buy,10,40").unwrap();
        writeln!(file, "lease,20,30").unwrap();
        writeln!(file, "Prob,0.6,0.4").unwrap();

        let table = PayoffTable::from_csv_path(file.path()).unwrap();
        assert_eq!(table, PayoffTable::from_frame(labeled_frame()).unwrap());
    }

    #[test]
    fn missing_file_is_an_ingestion_error() {
        let err = PayoffTable::from_csv_path("/no/such/payoff.csv").unwrap_err();
        assert!(matches!(err, Error::Ingestion(_)), "got {err:?}");
    }

    #[test]
    fn single_row_table_is_a_shape_error() {
        let frame = TableFrame {
            headers: vec!["Decision".into(), "Low".into()],
            rows: vec![vec!["Prob".into(), "1.0".into()]],
        };
        let err = PayoffTable::from_frame(frame).unwrap_err();
        assert!(matches!(err, Error::TableShape(_)), "got {err:?}");
    }

    #[test]
    fn ragged_rows_are_a_shape_error() {
        let mut frame = labeled_frame();
        frame.rows[1].pop();
        let err = PayoffTable::from_frame(frame).unwrap_err();
        assert!(matches!(err, Error::TableShape(_)), "got {err:?}");
    }

    #[test]
    fn short_grid_is_a_shape_error() {
        let err = PayoffTable::from_grid(vec![vec![0.5, 0.5]]).unwrap_err();
        assert!(matches!(err, Error::TableShape(_)), "got {err:?}");
    }

    #[test]
    fn non_numeric_cells_decode_to_nan() {
        let mut frame = labeled_frame();
        frame.rows[0][1] = "n/a".into();
        let table = PayoffTable::from_frame(frame).unwrap();
        assert!(table.values[0][0].is_nan());
        // Shape was still fine, so construction succeeded.
        assert_eq!(table.n_alternatives(), 2);
        assert_eq!(table.n_states(), 2);
    }

    #[test]
    fn labels_serialize_transparently() {
        let named = serde_json::to_string(&Label::from("buy")).unwrap();
        assert_eq!(named, "\"buy\"");
        let indexed = serde_json::to_string(&Label::Index(3)).unwrap();
        assert_eq!(indexed, "3");
    }
}
