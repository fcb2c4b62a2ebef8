//! Enrichment joins for classified candidates.
//!
//! Officer enrichment is asymmetric: on a directory hit the credit_officer
//! field is overwritten with the officer's email and region is filled; on a
//! miss the officer name stays and region stays blank.

use crate::{
    classify::Candidate,
    config::{AuthoritativeColumns, TrackingColumns},
    lookup::{FirstSeenMap, LookupSnapshot, OfficerEntry},
    table::Table,
    types::RowIndex,
};
use serde::{Deserialize, Serialize};

/// A fund to onboard into tracking.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct NewFundRecord {
    pub fund_id: String,
    pub fund_name: String,
    pub im_id: String,
    pub im_name: String,
    /// Officer email after a directory hit, otherwise the officer name.
    pub credit_officer: String,
    pub tier: String,
    pub status: String,
    pub region: String,
    pub nav_source: String,
    pub frequency: String,
    pub ad_hoc_reporting: String,
    pub parent_flagship_flag: String,
    pub days_to_report: String,
}

/// A tracked fund no longer present in the registry.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct InactiveFundRecord {
    pub fund_id: String,
    pub status: String,
    pub comments: String,
    pub tier: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct EnrichmentStats {
    pub officer_hits: usize,
    pub officer_misses: usize,
    pub im_default_hits: usize,
    pub days_hits: usize,
}

/// Overwrite the officer field with the directory email on a match, else
/// leave the record unchanged. Returns whether the directory matched.
pub fn apply_officer_email_policy(
    record: &mut NewFundRecord,
    directory: &FirstSeenMap<OfficerEntry>,
) -> bool {
    match directory.get(&record.credit_officer) {
        Some(entry) => {
            record.credit_officer = entry.email.clone();
            record.region = entry.region.clone();
            true
        }
        None => false,
    }
}

pub struct Enricher<'a> {
    lookups: &'a LookupSnapshot,
    stats: EnrichmentStats,
}

impl<'a> Enricher<'a> {
    pub fn new(lookups: &'a LookupSnapshot) -> Self {
        Self {
            lookups,
            stats: EnrichmentStats::default(),
        }
    }

    pub fn stats(&self) -> EnrichmentStats {
        self.stats
    }

    /// Build and enrich one new-fund record from its authoritative row.
    pub fn new_fund(
        &mut self,
        authoritative: &Table,
        columns: &AuthoritativeColumns,
        candidate: &Candidate,
        status: &str,
    ) -> NewFundRecord {
        let cell = |name: &str| field(authoritative, candidate.row, name);

        let mut record = NewFundRecord {
            fund_id: candidate.fund_id.clone(),
            fund_name: cell(&columns.fund_name),
            im_id: cell(&columns.im_id),
            im_name: cell(&columns.im_name),
            credit_officer: cell(&columns.credit_officer),
            tier: self
                .lookups
                .tier_by_fund
                .get(&candidate.fund_id)
                .cloned()
                .unwrap_or_default(),
            status: status.to_string(),
            ..NewFundRecord::default()
        };

        if apply_officer_email_policy(&mut record, &self.lookups.officer_directory) {
            self.stats.officer_hits += 1;
        } else {
            self.stats.officer_misses += 1;
        }

        if let Some(defaults) = self.lookups.im_defaults.get(&record.im_id) {
            record.nav_source = defaults.nav_source.clone();
            record.frequency = defaults.frequency.clone();
            record.ad_hoc_reporting = defaults.ad_hoc_reporting.clone();
            record.parent_flagship_flag = defaults.parent_flagship_flag.clone();
            self.stats.im_default_hits += 1;
        }

        if let Some(days) = self.lookups.days_by_fund.get(&record.fund_id) {
            record.days_to_report = days.clone();
            self.stats.days_hits += 1;
        }

        record
    }

    /// Build one inactive-fund record from its tracking row. Tier is usually
    /// blank: the fund is gone from the registry.
    pub fn inactive_fund(
        &self,
        tracking: &Table,
        columns: &TrackingColumns,
        candidate: &Candidate,
    ) -> InactiveFundRecord {
        InactiveFundRecord {
            fund_id: candidate.fund_id.clone(),
            status: field(tracking, candidate.row, &columns.status),
            comments: field(tracking, candidate.row, &columns.comments),
            tier: self
                .lookups
                .tier_by_fund
                .get(&candidate.fund_id)
                .cloned()
                .unwrap_or_default(),
        }
    }
}

/// Trimmed cell of a named column, blank when the column is absent.
fn field(table: &Table, row: RowIndex, name: &str) -> String {
    table
        .column_index(name)
        .map(|c| table.cell(row, c).trim().to_string())
        .unwrap_or_default()
}
