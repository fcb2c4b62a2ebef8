//! In-memory tabular datasets handed to the engine by its I/O shell.
//!
//! A table is an ordered header plus rows of string cells. Column lookup is
//! case-insensitive on the trimmed header, so "Fund ID" and " fund id " name
//! the same column.

use crate::{
    error::{ReconError, ReconResult},
    types::{RowIndex, TableKind},
};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Table {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

/// Either supported JSON layout for a table.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum TableJson {
    Records(Vec<Map<String, Value>>),
    Grid {
        columns: Vec<String>,
        #[serde(default)]
        rows: Vec<Vec<Value>>,
    },
}

impl Table {
    pub fn new<S: Into<String>>(columns: impl IntoIterator<Item = S>) -> Self {
        Self {
            columns: columns.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    /// Append a row. Short rows are padded with blanks; extra cells are kept
    /// so that `check_shape` can report them.
    pub fn push_row<S: Into<String>>(&mut self, cells: impl IntoIterator<Item = S>) {
        let mut row: Vec<String> = cells.into_iter().map(Into::into).collect();
        if row.len() < self.columns.len() {
            row.resize(self.columns.len(), String::new());
        }
        self.rows.push(row);
    }

    /// Build a table from field-keyed records. The header is the union of all
    /// keys in first-seen order; a record missing a key gets a blank cell.
    pub fn from_records(records: &[Map<String, Value>]) -> Self {
        let mut columns: Vec<String> = Vec::new();
        for record in records {
            for key in record.keys() {
                if !columns.iter().any(|c| c == key) {
                    columns.push(key.clone());
                }
            }
        }

        let rows = records
            .iter()
            .map(|record| {
                columns
                    .iter()
                    .map(|c| record.get(c).map(cell_text).unwrap_or_default())
                    .collect()
            })
            .collect();

        Self { columns, rows }
    }

    /// Parse either an array of objects or a `{ "columns", "rows" }` grid.
    pub fn from_json_str(raw: &str) -> ReconResult<Self> {
        let parsed: TableJson = serde_json::from_str(raw)?;
        Ok(match parsed {
            TableJson::Records(records) => Table::from_records(&records),
            TableJson::Grid { columns, rows } => {
                let mut table = Table::new(columns);
                for row in rows {
                    table.push_row(row.iter().map(cell_text));
                }
                table
            }
        })
    }

    /// Render rows back into field-keyed records, preserving column order.
    pub fn to_records(&self) -> Vec<Map<String, Value>> {
        self.rows
            .iter()
            .map(|row| {
                self.columns
                    .iter()
                    .zip(row.iter())
                    .map(|(c, v)| (c.clone(), Value::String(v.clone())))
                    .collect()
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Position of a column, matched case-insensitively on the trimmed name.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        let wanted = name.trim();
        self.columns
            .iter()
            .position(|c| c.trim().eq_ignore_ascii_case(wanted))
    }

    /// Cell text for `(row, col)`; blank when the row is short.
    pub fn cell(&self, row: RowIndex, col: usize) -> &str {
        self.rows
            .get(row)
            .and_then(|r| r.get(col))
            .map(String::as_str)
            .unwrap_or("")
    }

    /// Materialize the given rows, in the given order, under the same header.
    pub fn select(&self, indices: &[RowIndex]) -> Table {
        Table {
            columns: self.columns.clone(),
            rows: indices
                .iter()
                .filter_map(|&i| self.rows.get(i).cloned())
                .collect(),
        }
    }

    /// Reject rows wider than the header. Short rows are tolerated.
    pub fn check_shape(&self, kind: TableKind) -> ReconResult<()> {
        let expected = self.columns.len();
        match self.rows.iter().position(|r| r.len() > expected) {
            Some(row) => Err(ReconError::RaggedRow {
                table: kind,
                row,
                expected,
                actual: self.rows[row].len(),
            }),
            None => Ok(()),
        }
    }
}

/// JSON cell as text. Whole-valued floats render without a fraction, so a
/// spreadsheet export's `1.0` tier reads as `"1"`.
fn cell_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Number(n) => match n.as_f64() {
            Some(f) if n.is_f64() && f.fract() == 0.0 && f.abs() < 1e15 => {
                format!("{}", f as i64)
            }
            _ => n.to_string(),
        },
        other => other.to_string(),
    }
}
