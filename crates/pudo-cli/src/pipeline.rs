//! Ingest → join → output stages behind the `join` command.

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use pudo_core::{JoinObserver, JoinStats, join_with_observer};
use pudo_ingest::{DropCounts, load_sources_csv, load_targets_csv};
use pudo_model::JoinOptions;
use pudo_output::{joined_frame, write_csv};
use tracing::{info, info_span};

/// File name used when no output path is given.
pub const DEFAULT_OUTPUT_FILE: &str = "distancia_pudo_vendedor.csv";

/// Everything a join run needs.
#[derive(Debug, Clone)]
pub struct JoinRequest {
    pub vendors: PathBuf,
    pub pudos: PathBuf,
    pub output: PathBuf,
    pub options: JoinOptions,
    /// Skip writing the output file.
    pub dry_run: bool,
}

/// Row counts for one loaded input table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TableCounts {
    pub rows_read: usize,
    pub kept: usize,
    pub dropped: DropCounts,
}

/// Outcome of a join run.
#[derive(Debug, Clone)]
pub struct JoinRunResult {
    pub vendors: TableCounts,
    pub pudos: TableCounts,
    pub stats: JoinStats,
    pub threshold_km: f64,
    /// Written file, `None` on a dry run.
    pub output: Option<PathBuf>,
}

/// Output path next to the vendor file.
pub fn default_output_path(vendors: &Path) -> PathBuf {
    vendors
        .parent()
        .map(|dir| dir.join(DEFAULT_OUTPUT_FILE))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_FILE))
}

/// Load both tables, join them and write the result.
pub fn run_join<O>(request: &JoinRequest, observer: &mut O) -> Result<JoinRunResult>
where
    O: JoinObserver + ?Sized,
{
    let run_span = info_span!(
        "run",
        vendors = %request.vendors.display(),
        pudos = %request.pudos.display()
    );
    let _run_guard = run_span.enter();

    let ingest_start = Instant::now();
    let vendors = load_sources_csv(&request.vendors)
        .with_context(|| format!("load vendors: {}", request.vendors.display()))?;
    let pudos = load_targets_csv(&request.pudos)
        .with_context(|| format!("load pudos: {}", request.pudos.display()))?;
    info!(
        vendor_count = vendors.records.len(),
        pudo_count = pudos.records.len(),
        duration_ms = ingest_start.elapsed().as_millis(),
        "ingest complete"
    );

    let join_start = Instant::now();
    let joined = join_with_observer(&vendors.records, &pudos.records, &request.options, observer)
        .context("join vendors to pudos")?;
    info!(
        matched = joined.stats.matched,
        discarded = joined.stats.discarded,
        threshold_km = request.options.threshold_km,
        duration_ms = join_start.elapsed().as_millis(),
        "join complete"
    );

    let mut frame = joined_frame(&joined.records).context("build output table")?;
    let output = if request.dry_run {
        info!("dry run, output not written");
        None
    } else {
        write_csv(&mut frame, &request.output)
            .with_context(|| format!("write output: {}", request.output.display()))?;
        Some(request.output.clone())
    };

    Ok(JoinRunResult {
        vendors: TableCounts {
            rows_read: vendors.rows_read,
            kept: vendors.records.len(),
            dropped: vendors.dropped,
        },
        pudos: TableCounts {
            rows_read: pudos.rows_read,
            kept: pudos.records.len(),
            dropped: pudos.dropped,
        },
        stats: joined.stats,
        threshold_km: request.options.threshold_km,
        output,
    })
}
