//! Command-line interface for sheetstamp

use anyhow::{bail, Context, Result};
use clap::Parser;
use indexmap::IndexMap;
use sheetstamp::archive;
use sheetstamp::batch::{self, FileEntry, FileOutcome};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

/// Batch-stamp sheet numbers, continuation references and titles into DXF
/// drawings named after the `..._<letter>_<three digits>...` convention.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Cli {
    /// Input DXF files and/or ZIP archives of DXF files
    #[arg(required = true, value_hint = clap::ValueHint::FilePath)]
    inputs: Vec<PathBuf>,

    /// Output target: a .zip archive, or a directory for loose files
    #[arg(short, long, default_value = "stamped.zip", value_hint = clap::ValueHint::AnyPath)]
    output: PathBuf,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let cli = Cli::parse();

    let entries = collect_entries(&cli.inputs)?;
    if entries.is_empty() {
        bail!("no .dxf files found in the given inputs");
    }

    let report = batch::process(&entries);
    for outcome in &report.files {
        let line = batch::describe(outcome);
        match outcome {
            FileOutcome::Processed { .. } => info!("{}", line),
            FileOutcome::Skipped { .. } => warn!("{}", line),
            FileOutcome::Failed { .. } => error!("{}", line),
        }
    }

    if report.nothing_to_process() {
        bail!("no filename matched the sheet naming convention; nothing to process");
    }
    if report.outputs().next().is_none() {
        bail!("every matching file failed to process");
    }

    write_output(&report, &cli.output)?;

    info!(
        "{} of {} files written to {}",
        report.outputs().count(),
        report.files.len(),
        cli.output.display()
    );
    Ok(())
}

/// Gather (filename, bytes) entries from loose files and archives.
///
/// Duplicate filenames across inputs de-duplicate last-wins; the final
/// list is sorted by filename so sheet linking is deterministic.
fn collect_entries(inputs: &[PathBuf]) -> Result<Vec<FileEntry>> {
    let mut by_name: IndexMap<String, FileEntry> = IndexMap::new();

    for path in inputs {
        let bytes =
            fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;

        if has_extension(path, "zip") {
            for entry in archive::extract_entries(&bytes)
                .with_context(|| format!("failed to extract {}", path.display()))?
            {
                if is_dxf_name(&entry.name) {
                    by_name.insert(entry.name.clone(), entry);
                } else {
                    warn!("ignoring non-DXF archive member: {}", entry.name);
                }
            }
        } else if has_extension(path, "dxf") {
            let name = path
                .file_name()
                .and_then(|n| n.to_str())
                .map(str::to_string)
                .with_context(|| format!("invalid filename: {}", path.display()))?;
            by_name.insert(name.clone(), FileEntry::new(name, bytes));
        } else {
            bail!(
                "unsupported input type: {} (expected .dxf or .zip)",
                path.display()
            );
        }
    }

    let mut entries: Vec<FileEntry> = by_name.into_values().collect();
    entries.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(entries)
}

fn write_output(report: &batch::BatchReport, output: &Path) -> Result<()> {
    if has_extension(output, "zip") {
        let archive = archive::bundle_entries(report.outputs())?;
        fs::write(output, archive)
            .with_context(|| format!("failed to write {}", output.display()))?;
    } else {
        fs::create_dir_all(output)
            .with_context(|| format!("failed to create {}", output.display()))?;
        for (name, bytes) in report.outputs() {
            let path = output.join(name);
            fs::write(&path, bytes)
                .with_context(|| format!("failed to write {}", path.display()))?;
        }
    }
    Ok(())
}

fn has_extension(path: &Path, extension: &str) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.eq_ignore_ascii_case(extension))
        .unwrap_or(false)
}

fn is_dxf_name(name: &str) -> bool {
    Path::new(name)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.eq_ignore_ascii_case("dxf"))
        .unwrap_or(false)
}
