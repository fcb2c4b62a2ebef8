//! Non-fatal anomalies found during a run.
//!
//! The engine does not log these as warnings itself; it hands them back so
//! the caller decides how to surface them.

use crate::{table::Table, types::TableKind};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Diagnostic {
    MissingColumn {
        table: TableKind,
        column: String,
        effect: String,
    },
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Diagnostic::MissingColumn {
                table,
                column,
                effect,
            } => write!(f, "{table} table has no '{column}' column: {effect}"),
        }
    }
}

/// Collects diagnostics, reporting each missing (table, column) pair once.
#[derive(Debug, Default)]
pub struct Diagnostics {
    items: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn missing_column(&mut self, table: TableKind, column: &str, effect: &str) {
        let seen = self.items.iter().any(|d| match d {
            Diagnostic::MissingColumn {
                table: t, column: c, ..
            } => *t == table && c.trim().eq_ignore_ascii_case(column.trim()),
        });
        if !seen {
            self.items.push(Diagnostic::MissingColumn {
                table,
                column: column.to_string(),
                effect: effect.to_string(),
            });
        }
    }

    /// Resolve `column` in `table`, recording a diagnostic when it is absent.
    pub fn require(
        &mut self,
        table: &Table,
        kind: TableKind,
        column: &str,
        effect: &str,
    ) -> Option<usize> {
        let found = table.column_index(column);
        if found.is_none() {
            self.missing_column(kind, column, effect);
        }
        found
    }

    pub fn into_vec(self) -> Vec<Diagnostic> {
        self.items
    }
}
