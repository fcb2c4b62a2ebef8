//! Set-difference classification.
//!
//! New funds: filtered authoritative rows whose fund_id is not tracked.
//! Inactive funds: tracking rows whose fund_id is not in the unfiltered registry.
//! Both preserve source row order. Neither deduplicates by default.

use crate::{
    config::ColumnConfig,
    filter::FilteredView,
    key::{fund_key, normalize},
    lookup::LookupSnapshot,
    table::Table,
    types::RowIndex,
};
use std::collections::HashSet;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    /// Row in the source table the candidate came from.
    pub row: RowIndex,
    /// fund_id as written in the source, trimmed.
    pub fund_id: String,
}

/// Walk the filtered view in order and emit every row whose fund_id is
/// absent from the tracking index. With `dedupe`, only the first row per
/// normalized fund_id is emitted.
pub fn classify_new_funds(
    authoritative: &Table,
    filtered: &FilteredView,
    lookups: &LookupSnapshot,
    columns: &ColumnConfig,
    dedupe: bool,
) -> Vec<Candidate> {
    let Some(id) = authoritative.column_index(&columns.authoritative.fund_id) else {
        return Vec::new();
    };

    let mut seen = HashSet::new();
    let mut out = Vec::new();
    for &row in &filtered.indices {
        let raw = authoritative.cell(row, id);
        let Some(key) = fund_key(raw) else {
            continue;
        };
        if lookups.tracking_index.contains(raw) {
            continue;
        }
        if dedupe && !seen.insert(key) {
            log::trace!("duplicate new fund '{raw}' at row {row} dropped");
            continue;
        }
        out.push(Candidate {
            row,
            fund_id: normalize(raw),
        });
    }

    log::debug!("classified {} new fund(s)", out.len());
    out
}

/// Walk the tracking table in order and emit every row whose fund_id is
/// absent from the registry index.
pub fn classify_inactive_funds(
    tracking: &Table,
    lookups: &LookupSnapshot,
    columns: &ColumnConfig,
) -> Vec<Candidate> {
    let Some(id) = tracking.column_index(&columns.tracking.fund_id) else {
        return Vec::new();
    };

    let out: Vec<Candidate> = (0..tracking.len())
        .filter_map(|row| {
            let raw = tracking.cell(row, id);
            fund_key(raw)?;
            (!lookups.registry_index.contains(raw)).then(|| Candidate {
                row,
                fund_id: normalize(raw),
            })
        })
        .collect();

    log::debug!("classified {} inactive fund(s)", out.len());
    out
}
