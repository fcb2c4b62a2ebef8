//! recon-runner: headless shell around the fund reconciliation engine.
//!
//! Usage:
//!   recon-runner --authoritative registry.json --tracking tracking.json \
//!                --directory officers.json [--config recon.json] [--out ./out] [--dry-run]
//!
//! Tables are JSON arrays of objects, or `{ "columns": [...], "rows": [[...]] }`.

use anyhow::{bail, Context, Result};
use fundrecon_core::{ReconConfig, ReconEngine, ReconInputs, ReconOutput, Table};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(serde::Serialize)]
struct RunManifest<'a> {
    run_id: &'a str,
    version: &'a str,
    summary: &'a fundrecon_core::RunSummary,
    filter_report: &'a fundrecon_core::filter::FilterReport,
    diagnostics: &'a [fundrecon_core::diagnostic::Diagnostic],
}

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let (Some(auth_path), Some(tracking_path), Some(directory_path)) = (
        arg_value(&args, "--authoritative"),
        arg_value(&args, "--tracking"),
        arg_value(&args, "--directory"),
    ) else {
        bail!("usage: recon-runner --authoritative <file> --tracking <file> --directory <file> [--config <file>] [--out <dir>] [--dry-run]");
    };
    let out_dir = arg_value(&args, "--out").unwrap_or("./out");
    let dry_run = args.iter().any(|a| a == "--dry-run");

    let config = match arg_value(&args, "--config") {
        Some(path) => {
            ReconConfig::load(path).with_context(|| format!("Cannot load config {path}"))?
        }
        None => ReconConfig::default_test(),
    };
    // Fail before any table file is read.
    let engine = ReconEngine::new(config)?;

    let authoritative = load_table(auth_path)?;
    let tracking = load_table(tracking_path)?;
    let directory = load_table(directory_path)?;

    let run_id = uuid::Uuid::new_v4().to_string();
    println!("Fund reconciliation: recon-runner");
    println!("  run_id:        {run_id}");
    println!("  authoritative: {auth_path}");
    println!("  tracking:      {tracking_path}");
    println!("  directory:     {directory_path}");
    println!("  cutoff:        {}", engine.filters().cutoff);
    println!();

    let output = engine.run(ReconInputs {
        authoritative: &authoritative,
        tracking: &tracking,
        directory: &directory,
    })?;

    for d in &output.diagnostics {
        log::warn!("{d}");
    }

    if dry_run {
        log::info!("dry run: nothing written");
    } else {
        let dir = write_outputs(Path::new(out_dir), &run_id, &output)?;
        println!("  written to:    {}", dir.display());
        println!();
    }

    print_summary(&run_id, &output);
    Ok(())
}

fn load_table(path: &str) -> Result<Table> {
    let raw = fs::read_to_string(path).with_context(|| format!("Cannot read {path}"))?;
    Table::from_json_str(&raw).with_context(|| format!("Cannot parse table {path}"))
}

fn write_outputs(out_dir: &Path, run_id: &str, output: &ReconOutput) -> Result<PathBuf> {
    let dir = out_dir.join(run_id);
    fs::create_dir_all(&dir).with_context(|| format!("Cannot create {}", dir.display()))?;

    write_json(&dir.join("new_funds.json"), &output.new_funds_table().to_records())?;
    write_json(
        &dir.join("inactive_funds.json"),
        &output.inactive_funds_table().to_records(),
    )?;
    write_json(&dir.join("filtered_view.json"), &output.filtered_view.to_records())?;
    write_json(
        &dir.join("summary.json"),
        &RunManifest {
            run_id,
            version: env!("CARGO_PKG_VERSION"),
            summary: &output.summary,
            filter_report: &output.filter_report,
            diagnostics: &output.diagnostics,
        },
    )?;
    Ok(dir)
}

fn write_json<T: serde::Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    let body = serde_json::to_string_pretty(value)?;
    fs::write(path, body).with_context(|| format!("Cannot write {}", path.display()))
}

fn print_summary(run_id: &str, output: &ReconOutput) {
    let s = &output.summary;
    println!("=== RUN SUMMARY ===");
    println!("  run_id:          {run_id}");
    println!("  registry rows:   {}", s.authoritative_rows);
    println!("  filtered rows:   {}", s.filtered_rows);
    println!("  tracking rows:   {}", s.tracking_rows);
    println!("  new funds:       {}", s.new_funds);
    println!("  inactive funds:  {}", s.inactive_funds);
    println!();
    println!("=== ENRICHMENT ===");
    println!("  officer hits:    {}", s.officer_hits);
    println!("  officer misses:  {}", s.officer_misses);
    println!("  IM defaults:     {}", s.im_default_hits);
    println!("  days to report:  {}", s.days_hits);

    if !output.diagnostics.is_empty() {
        println!();
        println!("=== DIAGNOSTICS ===");
        for d in &output.diagnostics {
            println!("  {d}");
        }
    }
}

fn arg_value<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.windows(2)
        .find(|w| w[0] == flag)
        .map(|w| w[1].as_str())
}
