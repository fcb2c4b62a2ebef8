//! Table builders shared by the integration tests.
#![allow(dead_code)]

use fundrecon_core::Table;

pub const REGISTRY_COLUMNS: [&str; 10] = [
    "fund_id",
    "fund_name",
    "im_id",
    "im_name",
    "credit_officer",
    "transparency_tier",
    "last_update_date",
    "strategy",
    "entity_type",
    "days_to_report",
];

pub const TRACKING_COLUMNS: [&str; 8] = [
    "fund_id",
    "status",
    "comments",
    "im_id",
    "nav_source",
    "frequency",
    "ad_hoc_reporting",
    "parent_flagship_flag",
];

pub const DIRECTORY_COLUMNS: [&str; 3] = ["officer_name", "region", "email"];

/// One authoritative-table row. Defaults pass every filter of
/// `ReconConfig::default_test()`.
#[derive(Debug, Clone)]
pub struct Fund {
    pub fund_id: String,
    pub fund_name: String,
    pub im_id: String,
    pub im_name: String,
    pub credit_officer: String,
    pub tier: String,
    pub date: String,
    pub strategy: String,
    pub entity_type: String,
    pub days: String,
}

impl Fund {
    pub fn new(fund_id: &str) -> Self {
        Self {
            fund_id: fund_id.into(),
            fund_name: format!("{} Fund", fund_id.trim()),
            im_id: "IM1".into(),
            im_name: "Manager One".into(),
            credit_officer: "Jane Doe".into(),
            tier: "1".into(),
            date: "2024-01-01".into(),
            strategy: "Global Macro".into(),
            entity_type: "Fund".into(),
            days: "30".into(),
        }
    }

    pub fn tier(mut self, tier: &str) -> Self {
        self.tier = tier.into();
        self
    }

    pub fn date(mut self, date: &str) -> Self {
        self.date = date.into();
        self
    }

    pub fn strategy(mut self, strategy: &str) -> Self {
        self.strategy = strategy.into();
        self
    }

    pub fn entity_type(mut self, entity_type: &str) -> Self {
        self.entity_type = entity_type.into();
        self
    }

    pub fn officer(mut self, officer: &str) -> Self {
        self.credit_officer = officer.into();
        self
    }

    pub fn im(mut self, im_id: &str) -> Self {
        self.im_id = im_id.into();
        self
    }

    pub fn days(mut self, days: &str) -> Self {
        self.days = days.into();
        self
    }
}

/// One tracking-table row.
#[derive(Debug, Clone)]
pub struct Tracked {
    pub fund_id: String,
    pub status: String,
    pub comments: String,
    pub im_id: String,
    pub nav_source: String,
    pub frequency: String,
    pub ad_hoc_reporting: String,
    pub parent_flagship_flag: String,
}

impl Tracked {
    pub fn new(fund_id: &str) -> Self {
        Self {
            fund_id: fund_id.into(),
            status: "Active".into(),
            comments: String::new(),
            im_id: "IM1".into(),
            nav_source: "Administrator".into(),
            frequency: "Monthly".into(),
            ad_hoc_reporting: "No".into(),
            parent_flagship_flag: "N".into(),
        }
    }

    pub fn status(mut self, status: &str) -> Self {
        self.status = status.into();
        self
    }

    pub fn comments(mut self, comments: &str) -> Self {
        self.comments = comments.into();
        self
    }

    pub fn im(mut self, im_id: &str) -> Self {
        self.im_id = im_id.into();
        self
    }

    pub fn settings(mut self, nav: &str, freq: &str, ad_hoc: &str, flagship: &str) -> Self {
        self.nav_source = nav.into();
        self.frequency = freq.into();
        self.ad_hoc_reporting = ad_hoc.into();
        self.parent_flagship_flag = flagship.into();
        self
    }
}

pub fn registry(funds: &[Fund]) -> Table {
    let mut table = Table::new(REGISTRY_COLUMNS);
    for f in funds {
        table.push_row([
            f.fund_id.as_str(),
            f.fund_name.as_str(),
            f.im_id.as_str(),
            f.im_name.as_str(),
            f.credit_officer.as_str(),
            f.tier.as_str(),
            f.date.as_str(),
            f.strategy.as_str(),
            f.entity_type.as_str(),
            f.days.as_str(),
        ]);
    }
    table
}

pub fn tracking(rows: &[Tracked]) -> Table {
    let mut table = Table::new(TRACKING_COLUMNS);
    for t in rows {
        table.push_row([
            t.fund_id.as_str(),
            t.status.as_str(),
            t.comments.as_str(),
            t.im_id.as_str(),
            t.nav_source.as_str(),
            t.frequency.as_str(),
            t.ad_hoc_reporting.as_str(),
            t.parent_flagship_flag.as_str(),
        ]);
    }
    table
}

/// `(officer_name, region, email)` rows.
pub fn directory(entries: &[(&str, &str, &str)]) -> Table {
    let mut table = Table::new(DIRECTORY_COLUMNS);
    for (name, region, email) in entries {
        table.push_row([*name, *region, *email]);
    }
    table
}

/// Copy of `table` with one column dropped.
pub fn without_column(table: &Table, column: &str) -> Table {
    let Some(col) = table.column_index(column) else {
        return table.clone();
    };
    let mut out = Table::new(
        table
            .columns
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != col)
            .map(|(_, c)| c.clone()),
    );
    for row in &table.rows {
        out.push_row(
            row.iter()
                .enumerate()
                .filter(|(i, _)| *i != col)
                .map(|(_, v)| v.clone()),
        );
    }
    out
}

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}
