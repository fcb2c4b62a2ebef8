//! Result assembly: fixed-shape output tables in classification order.

use crate::{
    diagnostic::Diagnostic,
    enrich::{InactiveFundRecord, NewFundRecord},
    filter::FilterReport,
    table::Table,
};
use serde::Serialize;

pub const NEW_FUND_COLUMNS: [&str; 13] = [
    "fund_id",
    "fund_name",
    "im_id",
    "im_name",
    "credit_officer",
    "tier",
    "status",
    "region",
    "nav_source",
    "frequency",
    "ad_hoc_reporting",
    "parent_flagship_flag",
    "days_to_report",
];

pub const INACTIVE_FUND_COLUMNS: [&str; 4] = ["fund_id", "status", "comments", "tier"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct RunSummary {
    pub authoritative_rows: usize,
    pub filtered_rows: usize,
    pub tracking_rows: usize,
    pub new_funds: usize,
    pub inactive_funds: usize,
    pub officer_hits: usize,
    pub officer_misses: usize,
    pub im_default_hits: usize,
    pub days_hits: usize,
}

/// Everything a run hands back to its caller.
#[derive(Debug, Clone, Serialize)]
pub struct ReconOutput {
    pub new_funds: Vec<NewFundRecord>,
    pub inactive_funds: Vec<InactiveFundRecord>,
    /// The authoritative rows that survived the filter pipeline, unmodified.
    pub filtered_view: Table,
    pub filter_report: FilterReport,
    pub summary: RunSummary,
    pub diagnostics: Vec<Diagnostic>,
}

impl ReconOutput {
    /// New funds as a table, columns in `NEW_FUND_COLUMNS` order.
    pub fn new_funds_table(&self) -> Table {
        new_funds_table(&self.new_funds)
    }

    /// Inactive funds as a table, columns in `INACTIVE_FUND_COLUMNS` order.
    pub fn inactive_funds_table(&self) -> Table {
        inactive_funds_table(&self.inactive_funds)
    }
}

pub fn new_funds_table(records: &[NewFundRecord]) -> Table {
    let mut table = Table::new(NEW_FUND_COLUMNS);
    for r in records {
        table.push_row([
            r.fund_id.as_str(),
            r.fund_name.as_str(),
            r.im_id.as_str(),
            r.im_name.as_str(),
            r.credit_officer.as_str(),
            r.tier.as_str(),
            r.status.as_str(),
            r.region.as_str(),
            r.nav_source.as_str(),
            r.frequency.as_str(),
            r.ad_hoc_reporting.as_str(),
            r.parent_flagship_flag.as_str(),
            r.days_to_report.as_str(),
        ]);
    }
    table
}

pub fn inactive_funds_table(records: &[InactiveFundRecord]) -> Table {
    let mut table = Table::new(INACTIVE_FUND_COLUMNS);
    for r in records {
        table.push_row([
            r.fund_id.as_str(),
            r.status.as_str(),
            r.comments.as_str(),
            r.tier.as_str(),
        ]);
    }
    table
}
