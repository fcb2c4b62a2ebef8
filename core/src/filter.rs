//! Filter pipeline over the authoritative table.
//!
//! Stages run as a logical AND, in fixed order:
//!   1. last_update_date >= cutoff (missing or unparseable dates fail)
//!   2. transparency_tier in the allowed tiers
//!   3. strategy in (distinct strategies - excluded strategies)
//!   4. entity_type in (distinct entity types - excluded entity types)
//!
//! A stage whose column is absent is skipped. Stages 3 and 4 are also skipped
//! when their computed allow-set is empty. The source table is never mutated;
//! the result is a list of surviving row indices in table order.

use crate::{
    config::{AuthoritativeColumns, ValidatedFilters},
    date::parse_cell_date,
    table::Table,
    types::RowIndex,
};
use serde::Serialize;
use std::collections::HashSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterStage {
    Cutoff,
    Tier,
    Strategy,
    EntityType,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum StageOutcome {
    Applied { removed: usize },
    SkippedMissingColumn,
    SkippedEmptyAllowSet,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StageReport {
    pub stage: FilterStage,
    pub column: String,
    #[serde(flatten)]
    pub outcome: StageOutcome,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilterReport {
    pub input_rows: usize,
    pub output_rows: usize,
    pub stages: Vec<StageReport>,
}

/// Row indices of the authoritative table that survived every stage.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FilteredView {
    pub indices: Vec<RowIndex>,
}

impl FilteredView {
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }
}

/// Distinct values of `col` minus `excluded`, or `None` when that set is empty.
/// Cell values are compared trimmed and case-sensitively.
pub fn dynamic_allow_set(table: &Table, col: usize, excluded: &[String]) -> Option<HashSet<String>> {
    let allowed: HashSet<String> = (0..table.len())
        .map(|row| table.cell(row, col).trim().to_string())
        .filter(|v| !excluded.iter().any(|e| e == v))
        .collect();

    if allowed.is_empty() {
        None
    } else {
        Some(allowed)
    }
}

pub struct FilterPipeline<'a> {
    columns: &'a AuthoritativeColumns,
    filters: &'a ValidatedFilters,
}

impl<'a> FilterPipeline<'a> {
    pub fn new(columns: &'a AuthoritativeColumns, filters: &'a ValidatedFilters) -> Self {
        Self { columns, filters }
    }

    /// Apply every stage to `table`. Pure: the same table always yields the
    /// same view and report.
    pub fn apply(&self, table: &Table) -> (FilteredView, FilterReport) {
        let mut survivors: Vec<RowIndex> = (0..table.len()).collect();
        let mut stages = Vec::with_capacity(4);

        // Stage 1: cutoff date
        let cutoff = self.filters.cutoff;
        stages.push(self.run_stage(
            table,
            FilterStage::Cutoff,
            &self.columns.last_update_date,
            &mut survivors,
            |raw| parse_cell_date(raw).map_or(false, |d| d >= cutoff),
        ));

        // Stage 2: tier allow-list
        let tiers = &self.filters.allowed_tiers;
        stages.push(self.run_stage(
            table,
            FilterStage::Tier,
            &self.columns.transparency_tier,
            &mut survivors,
            |raw| tiers.iter().any(|t| t == raw.trim()),
        ));

        // Stages 3-4: dynamic allow-sets
        stages.push(self.run_exclusion_stage(
            table,
            FilterStage::Strategy,
            &self.columns.strategy,
            &self.filters.excluded_strategies,
            &mut survivors,
        ));
        stages.push(self.run_exclusion_stage(
            table,
            FilterStage::EntityType,
            &self.columns.entity_type,
            &self.filters.excluded_entity_types,
            &mut survivors,
        ));

        log::debug!(
            "filter pipeline: {} -> {} rows",
            table.len(),
            survivors.len()
        );

        let report = FilterReport {
            input_rows: table.len(),
            output_rows: survivors.len(),
            stages,
        };
        (FilteredView { indices: survivors }, report)
    }

    fn run_stage(
        &self,
        table: &Table,
        stage: FilterStage,
        column: &str,
        survivors: &mut Vec<RowIndex>,
        keep: impl Fn(&str) -> bool,
    ) -> StageReport {
        let Some(col) = table.column_index(column) else {
            log::debug!("filter stage {stage:?} skipped: column '{column}' absent");
            return skipped(stage, column, StageOutcome::SkippedMissingColumn);
        };

        let before = survivors.len();
        survivors.retain(|&row| {
            let kept = keep(table.cell(row, col));
            if !kept {
                log::trace!("row {row} rejected at {stage:?}");
            }
            kept
        });

        StageReport {
            stage,
            column: column.to_string(),
            outcome: StageOutcome::Applied {
                removed: before - survivors.len(),
            },
        }
    }

    fn run_exclusion_stage(
        &self,
        table: &Table,
        stage: FilterStage,
        column: &str,
        excluded: &[String],
        survivors: &mut Vec<RowIndex>,
    ) -> StageReport {
        let Some(col) = table.column_index(column) else {
            log::debug!("filter stage {stage:?} skipped: column '{column}' absent");
            return skipped(stage, column, StageOutcome::SkippedMissingColumn);
        };

        match dynamic_allow_set(table, col, excluded) {
            Some(allowed) => self.run_stage(table, stage, column, survivors, |raw| {
                allowed.contains(raw.trim())
            }),
            None => {
                log::debug!("filter stage {stage:?} skipped: every '{column}' value is excluded");
                skipped(stage, column, StageOutcome::SkippedEmptyAllowSet)
            }
        }
    }
}

fn skipped(stage: FilterStage, column: &str, outcome: StageOutcome) -> StageReport {
    StageReport {
        stage,
        column: column.to_string(),
        outcome,
    }
}
