//! Lookup builders.
//!
//! Every map is built by one linear scan with first-seen-wins semantics on the
//! normalized key: a later row with the same key is ignored. Blank keys are
//! never inserted. Maps are immutable once built; a run reads all of them from
//! one `LookupSnapshot`.

use crate::{
    config::ColumnConfig,
    diagnostic::Diagnostics,
    filter::FilteredView,
    key::fund_key,
    table::Table,
    types::{FundKey, RowIndex, TableKind},
};
use std::collections::HashMap;

/// Insertion-ordered map keyed by normalized key, first entry wins.
#[derive(Debug, Clone)]
pub struct FirstSeenMap<V> {
    index: HashMap<FundKey, usize>,
    entries: Vec<(FundKey, V)>,
}

impl<V> Default for FirstSeenMap<V> {
    fn default() -> Self {
        Self {
            index: HashMap::new(),
            entries: Vec::new(),
        }
    }
}

impl<V> FirstSeenMap<V> {
    /// Build from `(raw key, value)` pairs in scan order.
    pub fn build<K: AsRef<str>>(pairs: impl IntoIterator<Item = (K, V)>) -> Self {
        let mut map = Self::default();
        for (raw, value) in pairs {
            let Some(key) = fund_key(raw.as_ref()) else {
                continue;
            };
            if map.index.contains_key(&key) {
                log::trace!("duplicate key '{key}' ignored");
                continue;
            }
            map.index.insert(key.clone(), map.entries.len());
            map.entries.push((key, value));
        }
        map
    }

    /// Look up by raw key; the key is normalized first.
    pub fn get(&self, raw: &str) -> Option<&V> {
        let key = fund_key(raw)?;
        self.index.get(&key).map(|&i| &self.entries[i].1)
    }

    pub fn contains(&self, raw: &str) -> bool {
        self.get(raw).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &V)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }
}

/// Membership-only index.
pub type KeyIndex = FirstSeenMap<()>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OfficerEntry {
    pub region: String,
    pub email: String,
}

/// Settings a newly onboarded fund inherits from its investment manager.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ImDefaults {
    pub nav_source: String,
    pub frequency: String,
    pub ad_hoc_reporting: String,
    pub parent_flagship_flag: String,
}

/// Inputs the lookup builders read from.
pub struct LookupSources<'a> {
    pub authoritative: &'a Table,
    pub filtered: &'a FilteredView,
    pub tracking: &'a Table,
    pub directory: &'a Table,
}

/// One consistent set of maps for a single run.
#[derive(Debug, Clone, Default)]
pub struct LookupSnapshot {
    /// fund_id membership over the unfiltered authoritative table.
    pub registry_index: KeyIndex,
    /// fund_id membership over the tracking table.
    pub tracking_index: KeyIndex,
    /// fund_id -> tier, from the filtered view only.
    pub tier_by_fund: FirstSeenMap<String>,
    /// fund_id -> days_to_report, from the unfiltered authoritative table.
    pub days_by_fund: FirstSeenMap<String>,
    /// officer_name -> (region, email).
    pub officer_directory: FirstSeenMap<OfficerEntry>,
    /// im_id -> settings of the first tracking row seen for that IM.
    pub im_defaults: FirstSeenMap<ImDefaults>,
}

impl LookupSnapshot {
    pub fn build(src: &LookupSources<'_>, columns: &ColumnConfig, diags: &mut Diagnostics) -> Self {
        let snapshot = Self {
            registry_index: build_registry_index(src.authoritative, columns, diags),
            tracking_index: build_tracking_index(src.tracking, columns, diags),
            tier_by_fund: build_tier_by_fund(src.authoritative, src.filtered, columns, diags),
            days_by_fund: build_days_by_fund(src.authoritative, columns, diags),
            officer_directory: build_officer_directory(src.directory, columns, diags),
            im_defaults: build_im_defaults(src.tracking, columns, diags),
        };

        log::debug!(
            "lookups: registry={} tracking={} tiers={} days={} officers={} im_defaults={}",
            snapshot.registry_index.len(),
            snapshot.tracking_index.len(),
            snapshot.tier_by_fund.len(),
            snapshot.days_by_fund.len(),
            snapshot.officer_directory.len(),
            snapshot.im_defaults.len(),
        );
        snapshot
    }
}

pub fn build_registry_index(
    authoritative: &Table,
    columns: &ColumnConfig,
    diags: &mut Diagnostics,
) -> KeyIndex {
    let name = &columns.authoritative.fund_id;
    let Some(col) = diags.require(
        authoritative,
        TableKind::Authoritative,
        name,
        "registry is empty; no fund can be new and every tracked fund is inactive",
    ) else {
        return KeyIndex::default();
    };
    KeyIndex::build((0..authoritative.len()).map(|row| (authoritative.cell(row, col), ())))
}

pub fn build_tracking_index(
    tracking: &Table,
    columns: &ColumnConfig,
    diags: &mut Diagnostics,
) -> KeyIndex {
    let name = &columns.tracking.fund_id;
    let Some(col) = diags.require(
        tracking,
        TableKind::Tracking,
        name,
        "tracking index is empty; every filtered fund is new and none is inactive",
    ) else {
        return KeyIndex::default();
    };
    KeyIndex::build((0..tracking.len()).map(|row| (tracking.cell(row, col), ())))
}

pub fn build_tier_by_fund(
    authoritative: &Table,
    filtered: &FilteredView,
    columns: &ColumnConfig,
    diags: &mut Diagnostics,
) -> FirstSeenMap<String> {
    let cols = &columns.authoritative;
    let id = authoritative.column_index(&cols.fund_id);
    let tier = diags.require(
        authoritative,
        TableKind::Authoritative,
        &cols.transparency_tier,
        "tiers are left blank",
    );
    let (Some(id), Some(tier)) = (id, tier) else {
        return FirstSeenMap::default();
    };
    FirstSeenMap::build(filtered.indices.iter().map(|&row| {
        (
            authoritative.cell(row, id),
            authoritative.cell(row, tier).trim().to_string(),
        )
    }))
}

pub fn build_days_by_fund(
    authoritative: &Table,
    columns: &ColumnConfig,
    diags: &mut Diagnostics,
) -> FirstSeenMap<String> {
    let cols = &columns.authoritative;
    let id = authoritative.column_index(&cols.fund_id);
    let days = diags.require(
        authoritative,
        TableKind::Authoritative,
        &cols.days_to_report,
        "days_to_report is left blank",
    );
    let (Some(id), Some(days)) = (id, days) else {
        return FirstSeenMap::default();
    };
    FirstSeenMap::build((0..authoritative.len()).map(|row| {
        (
            authoritative.cell(row, id),
            authoritative.cell(row, days).trim().to_string(),
        )
    }))
}

/// Requires the name and email columns; a missing region column yields blank
/// regions.
pub fn build_officer_directory(
    directory: &Table,
    columns: &ColumnConfig,
    diags: &mut Diagnostics,
) -> FirstSeenMap<OfficerEntry> {
    let cols = &columns.directory;
    let disabled = "officer names are passed through unchanged";
    let name = diags.require(directory, TableKind::OfficerDirectory, &cols.officer_name, disabled);
    let email = diags.require(directory, TableKind::OfficerDirectory, &cols.email, disabled);
    let region = diags.require(
        directory,
        TableKind::OfficerDirectory,
        &cols.region,
        "regions are left blank",
    );
    let (Some(name), Some(email)) = (name, email) else {
        return FirstSeenMap::default();
    };

    FirstSeenMap::build((0..directory.len()).map(|row| {
        let entry = OfficerEntry {
            region: optional_cell(directory, row, region),
            email: directory.cell(row, email).trim().to_string(),
        };
        (directory.cell(row, name), entry)
    }))
}

/// Tracking rows with a blank fund_id are skipped. Without a fund_id column
/// every row contributes.
pub fn build_im_defaults(
    tracking: &Table,
    columns: &ColumnConfig,
    diags: &mut Diagnostics,
) -> FirstSeenMap<ImDefaults> {
    let cols = &columns.tracking;
    let Some(im) = diags.require(
        tracking,
        TableKind::Tracking,
        &cols.im_id,
        "IM default settings are left blank",
    ) else {
        return FirstSeenMap::default();
    };

    let blank = "this IM default is left blank";
    let nav = diags.require(tracking, TableKind::Tracking, &cols.nav_source, blank);
    let freq = diags.require(tracking, TableKind::Tracking, &cols.frequency, blank);
    let ad_hoc = diags.require(tracking, TableKind::Tracking, &cols.ad_hoc_reporting, blank);
    let flagship = diags.require(tracking, TableKind::Tracking, &cols.parent_flagship_flag, blank);

    let fund_id = tracking.column_index(&cols.fund_id);
    let keyed = (0..tracking.len())
        .filter(|&row| fund_id.map_or(true, |id| fund_key(tracking.cell(row, id)).is_some()));

    FirstSeenMap::build(keyed.map(|row| {
        let defaults = ImDefaults {
            nav_source: optional_cell(tracking, row, nav),
            frequency: optional_cell(tracking, row, freq),
            ad_hoc_reporting: optional_cell(tracking, row, ad_hoc),
            parent_flagship_flag: optional_cell(tracking, row, flagship),
        };
        (tracking.cell(row, im), defaults)
    }))
}

fn optional_cell(table: &Table, row: RowIndex, col: Option<usize>) -> String {
    col.map(|c| table.cell(row, c).trim().to_string())
        .unwrap_or_default()
}
