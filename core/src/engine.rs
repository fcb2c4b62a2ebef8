//! The reconciliation engine.
//!
//! PIPELINE (fixed order, each stage reads only earlier stages' output):
//!   1. Validate configuration     (fatal on error, before any scan)
//!   2. Check input table shapes   (fatal on ragged rows)
//!   3. Filter pipeline            -> filtered view of the authoritative table
//!   4. Lookup builders            -> one immutable LookupSnapshot
//!   5. Set-difference classifier  -> new / inactive candidates
//!   6. Enrichment joiner          -> NewFundRecord / InactiveFundRecord
//!   7. Result assembler           -> ReconOutput
//!
//! RULES:
//!   - Input tables are never mutated.
//!   - Per-row anomalies fall back locally and never abort the run.
//!   - A run returns every result table or an error, never a partial result.

use crate::{
    assemble::{ReconOutput, RunSummary},
    classify::{classify_inactive_funds, classify_new_funds},
    config::{ReconConfig, ValidatedFilters},
    diagnostic::Diagnostics,
    enrich::Enricher,
    error::ReconResult,
    filter::{FilterPipeline, StageOutcome},
    lookup::{LookupSnapshot, LookupSources},
    table::Table,
    types::TableKind,
};

/// The three collaborator-provided datasets for one run.
#[derive(Debug, Clone, Copy)]
pub struct ReconInputs<'a> {
    pub authoritative: &'a Table,
    pub tracking: &'a Table,
    pub directory: &'a Table,
}

pub struct ReconEngine {
    config: ReconConfig,
    filters: ValidatedFilters,
}

impl ReconEngine {
    /// Validate `config` up front. A malformed config never reaches a scan.
    pub fn new(config: ReconConfig) -> ReconResult<Self> {
        let filters = config.validate()?;
        Ok(Self { config, filters })
    }

    pub fn filters(&self) -> &ValidatedFilters {
        &self.filters
    }

    /// Run the full pipeline over one set of inputs.
    pub fn run(&self, inputs: ReconInputs<'_>) -> ReconResult<ReconOutput> {
        let ReconInputs {
            authoritative,
            tracking,
            directory,
        } = inputs;
        authoritative.check_shape(TableKind::Authoritative)?;
        tracking.check_shape(TableKind::Tracking)?;
        directory.check_shape(TableKind::OfficerDirectory)?;

        let columns = &self.config.columns;
        let mut diags = Diagnostics::new();
        self.note_output_columns(inputs, &mut diags);

        // Filter
        let (filtered, filter_report) =
            FilterPipeline::new(&columns.authoritative, &self.filters).apply(authoritative);
        for stage in &filter_report.stages {
            if stage.outcome == StageOutcome::SkippedMissingColumn {
                diags.missing_column(
                    TableKind::Authoritative,
                    &stage.column,
                    "filter stage skipped",
                );
            }
        }

        // Lookups
        let lookups = LookupSnapshot::build(
            &LookupSources {
                authoritative,
                filtered: &filtered,
                tracking,
                directory,
            },
            columns,
            &mut diags,
        );

        // Classify
        let new_candidates = classify_new_funds(
            authoritative,
            &filtered,
            &lookups,
            columns,
            self.config.dedupe_new_funds,
        );
        let inactive_candidates = classify_inactive_funds(tracking, &lookups, columns);

        // Enrich
        let mut enricher = Enricher::new(&lookups);
        let new_funds: Vec<_> = new_candidates
            .iter()
            .map(|c| {
                enricher.new_fund(
                    authoritative,
                    &columns.authoritative,
                    c,
                    &self.config.new_fund_status,
                )
            })
            .collect();
        let inactive_funds: Vec<_> = inactive_candidates
            .iter()
            .map(|c| enricher.inactive_fund(tracking, &columns.tracking, c))
            .collect();
        let stats = enricher.stats();

        // Assemble
        let summary = RunSummary {
            authoritative_rows: authoritative.len(),
            filtered_rows: filtered.len(),
            tracking_rows: tracking.len(),
            new_funds: new_funds.len(),
            inactive_funds: inactive_funds.len(),
            officer_hits: stats.officer_hits,
            officer_misses: stats.officer_misses,
            im_default_hits: stats.im_default_hits,
            days_hits: stats.days_hits,
        };

        log::debug!(
            "reconcile: {} filtered of {}, {} new, {} inactive",
            summary.filtered_rows,
            summary.authoritative_rows,
            summary.new_funds,
            summary.inactive_funds
        );

        Ok(ReconOutput {
            new_funds,
            inactive_funds,
            filtered_view: authoritative.select(&filtered.indices),
            filter_report,
            summary,
            diagnostics: diags.into_vec(),
        })
    }

    /// Record diagnostics for columns that only feed output fields.
    fn note_output_columns(&self, inputs: ReconInputs<'_>, diags: &mut Diagnostics) {
        let a = &self.config.columns.authoritative;
        for name in [&a.fund_name, &a.im_id, &a.im_name, &a.credit_officer] {
            diags.require(
                inputs.authoritative,
                TableKind::Authoritative,
                name,
                "field is left blank in new-fund output",
            );
        }
        let t = &self.config.columns.tracking;
        for name in [&t.status, &t.comments] {
            diags.require(
                inputs.tracking,
                TableKind::Tracking,
                name,
                "field is left blank in inactive-fund output",
            );
        }
    }
}

/// One-shot convenience: validate `config`, then run.
pub fn reconcile(
    authoritative: &Table,
    tracking: &Table,
    directory: &Table,
    config: &ReconConfig,
) -> ReconResult<ReconOutput> {
    ReconEngine::new(config.clone())?.run(ReconInputs {
        authoritative,
        tracking,
        directory,
    })
}
