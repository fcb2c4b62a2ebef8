use crate::types::TableKind;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReconError {
    #[error("Invalid configuration for '{field}': {reason}")]
    InvalidConfig { field: String, reason: String },

    #[error("Cutoff date '{raw}' is not a valid YYYY-MM-DD date")]
    InvalidCutoff { raw: String },

    #[error("Row {row} of the {table} table has {actual} cells, header has {expected}")]
    RaggedRow {
        table: TableKind,
        row: usize,
        expected: usize,
        actual: usize,
    },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ReconError {
    pub(crate) fn config(field: impl Into<String>, reason: impl Into<String>) -> Self {
        ReconError::InvalidConfig {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

pub type ReconResult<T> = Result<T, ReconError>;
