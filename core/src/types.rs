//! Shared primitive types used across the reconciliation engine.

/// A normalized join key: trimmed, case-folded, never blank.
pub type FundKey = String;

/// Index of a row within its source table.
pub type RowIndex = usize;

/// Which input table a column or diagnostic refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TableKind {
    Authoritative,
    Tracking,
    OfficerDirectory,
}

impl TableKind {
    pub fn label(self) -> &'static str {
        match self {
            TableKind::Authoritative => "authoritative",
            TableKind::Tracking => "tracking",
            TableKind::OfficerDirectory => "officer_directory",
        }
    }
}

impl std::fmt::Display for TableKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}
