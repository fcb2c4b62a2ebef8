use crate::{
    date::parse_iso_date,
    error::{ReconError, ReconResult},
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Parameters of the filter pipeline applied to the authoritative table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilterConfig {
    /// Inclusive lower bound on `last_update_date`, as `YYYY-MM-DD`.
    pub cutoff_date: String,
    pub allowed_tiers: Vec<String>,
    #[serde(default)]
    pub excluded_strategies: Vec<String>,
    #[serde(default)]
    pub excluded_entity_types: Vec<String>,
}

// ── Column headers per input table ────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthoritativeColumns {
    pub fund_id: String,
    pub fund_name: String,
    pub im_id: String,
    pub im_name: String,
    pub credit_officer: String,
    pub transparency_tier: String,
    pub last_update_date: String,
    pub strategy: String,
    pub entity_type: String,
    pub days_to_report: String,
}

impl Default for AuthoritativeColumns {
    fn default() -> Self {
        Self {
            fund_id: "fund_id".into(),
            fund_name: "fund_name".into(),
            im_id: "im_id".into(),
            im_name: "im_name".into(),
            credit_officer: "credit_officer".into(),
            transparency_tier: "transparency_tier".into(),
            last_update_date: "last_update_date".into(),
            strategy: "strategy".into(),
            entity_type: "entity_type".into(),
            days_to_report: "days_to_report".into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackingColumns {
    pub fund_id: String,
    pub status: String,
    pub comments: String,
    pub im_id: String,
    pub nav_source: String,
    pub frequency: String,
    pub ad_hoc_reporting: String,
    pub parent_flagship_flag: String,
}

impl Default for TrackingColumns {
    fn default() -> Self {
        Self {
            fund_id: "fund_id".into(),
            status: "status".into(),
            comments: "comments".into(),
            im_id: "im_id".into(),
            nav_source: "nav_source".into(),
            frequency: "frequency".into(),
            ad_hoc_reporting: "ad_hoc_reporting".into(),
            parent_flagship_flag: "parent_flagship_flag".into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DirectoryColumns {
    pub officer_name: String,
    pub region: String,
    pub email: String,
}

impl Default for DirectoryColumns {
    fn default() -> Self {
        Self {
            officer_name: "officer_name".into(),
            region: "region".into(),
            email: "email".into(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnConfig {
    pub authoritative: AuthoritativeColumns,
    pub tracking: TrackingColumns,
    pub directory: DirectoryColumns,
}

impl ColumnConfig {
    fn all_names(&self) -> Vec<(&'static str, &str)> {
        let a = &self.authoritative;
        let t = &self.tracking;
        let d = &self.directory;
        vec![
            ("columns.authoritative.fund_id", a.fund_id.as_str()),
            ("columns.authoritative.fund_name", a.fund_name.as_str()),
            ("columns.authoritative.im_id", a.im_id.as_str()),
            ("columns.authoritative.im_name", a.im_name.as_str()),
            ("columns.authoritative.credit_officer", a.credit_officer.as_str()),
            ("columns.authoritative.transparency_tier", a.transparency_tier.as_str()),
            ("columns.authoritative.last_update_date", a.last_update_date.as_str()),
            ("columns.authoritative.strategy", a.strategy.as_str()),
            ("columns.authoritative.entity_type", a.entity_type.as_str()),
            ("columns.authoritative.days_to_report", a.days_to_report.as_str()),
            ("columns.tracking.fund_id", t.fund_id.as_str()),
            ("columns.tracking.status", t.status.as_str()),
            ("columns.tracking.comments", t.comments.as_str()),
            ("columns.tracking.im_id", t.im_id.as_str()),
            ("columns.tracking.nav_source", t.nav_source.as_str()),
            ("columns.tracking.frequency", t.frequency.as_str()),
            ("columns.tracking.ad_hoc_reporting", t.ad_hoc_reporting.as_str()),
            ("columns.tracking.parent_flagship_flag", t.parent_flagship_flag.as_str()),
            ("columns.directory.officer_name", d.officer_name.as_str()),
            ("columns.directory.region", d.region.as_str()),
            ("columns.directory.email", d.email.as_str()),
        ]
    }
}

// ── Top-level run configuration ───────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReconConfig {
    pub filters: FilterConfig,
    #[serde(default)]
    pub columns: ColumnConfig,
    /// Status written on every new-fund row.
    #[serde(default = "default_new_fund_status")]
    pub new_fund_status: String,
    /// Emit only the first candidate per fund_id from the filtered view.
    #[serde(default)]
    pub dedupe_new_funds: bool,
}

fn default_new_fund_status() -> String {
    "Active".into()
}

/// Filter parameters after validation: cutoff parsed, lists trimmed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedFilters {
    pub cutoff: NaiveDate,
    pub allowed_tiers: Vec<String>,
    pub excluded_strategies: Vec<String>,
    pub excluded_entity_types: Vec<String>,
}

impl ReconConfig {
    /// Load from a JSON file.
    /// In tests, use ReconConfig::default_test().
    pub fn load(path: impl AsRef<Path>) -> ReconResult<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: ReconConfig = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Config with hardcoded defaults for use in unit tests.
    pub fn default_test() -> Self {
        Self {
            filters: FilterConfig {
                cutoff_date: "2023-01-01".into(),
                allowed_tiers: vec!["1".into(), "2".into()],
                excluded_strategies: vec!["Fund of Funds".into()],
                excluded_entity_types: vec!["Managed Account".into()],
            },
            columns: ColumnConfig::default(),
            new_fund_status: default_new_fund_status(),
            dedupe_new_funds: false,
        }
    }

    /// Check the whole configuration before any table is scanned.
    pub fn validate(&self) -> ReconResult<ValidatedFilters> {
        let f = &self.filters;

        if f.cutoff_date.trim().is_empty() {
            return Err(ReconError::config("filters.cutoff_date", "must not be blank"));
        }
        let cutoff = parse_iso_date(&f.cutoff_date).ok_or_else(|| ReconError::InvalidCutoff {
            raw: f.cutoff_date.clone(),
        })?;

        if f.allowed_tiers.is_empty() {
            return Err(ReconError::config(
                "filters.allowed_tiers",
                "at least one tier must be allowed",
            ));
        }
        let allowed_tiers = clean_list("filters.allowed_tiers", &f.allowed_tiers)?;
        let excluded_strategies = clean_list("filters.excluded_strategies", &f.excluded_strategies)?;
        let excluded_entity_types =
            clean_list("filters.excluded_entity_types", &f.excluded_entity_types)?;

        for (field, name) in self.columns.all_names() {
            if name.trim().is_empty() {
                return Err(ReconError::config(field, "column name must not be blank"));
            }
        }

        if self.new_fund_status.trim().is_empty() {
            return Err(ReconError::config("new_fund_status", "must not be blank"));
        }

        Ok(ValidatedFilters {
            cutoff,
            allowed_tiers,
            excluded_strategies,
            excluded_entity_types,
        })
    }
}

fn clean_list(field: &str, values: &[String]) -> ReconResult<Vec<String>> {
    values
        .iter()
        .map(|v| {
            let trimmed = v.trim();
            if trimmed.is_empty() {
                Err(ReconError::config(field, "list entries must not be blank"))
            } else {
                Ok(trimmed.to_string())
            }
        })
        .collect()
}
