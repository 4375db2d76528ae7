//! The two runs the binary offers: the full combine pipeline and a
//! report-only pass over an existing canonical table.

use std::io::Write;
use std::path::Path;

use anyhow::Context;
use gsdb_core::{Brand, RawRow, ReferenceData};
use gsdb_normalize::{load_raw_table, normalizer_for, CityResolver, NormalizedBatch};

use crate::aggregate::{self, Aggregate};
use crate::report::{self, Report, ReportOptions};

#[derive(Debug, Clone, Copy)]
pub(crate) struct CombineOptions<'a> {
    pub data_dir: &'a Path,
    pub output_path: &'a Path,
    pub report: ReportOptions,
}

/// Load every brand's raw export from `data_dir`, in pipeline order.
///
/// All tables are read before any normalization starts, so one missing
/// file aborts the run before anything is written.
///
/// # Errors
///
/// Returns an error naming the first file that cannot be read or parsed.
pub(crate) fn load_raw_tables(data_dir: &Path) -> anyhow::Result<Vec<(Brand, Vec<RawRow>)>> {
    Brand::ALL
        .into_iter()
        .map(|brand| {
            let path = data_dir.join(brand.raw_file_name());
            let rows = load_raw_table(&path)
                .with_context(|| format!("loading {brand} raw table"))?;
            tracing::info!(%brand, path = %path.display(), rows = rows.len(), "loaded raw table");
            Ok((brand, rows))
        })
        .collect()
}

/// Run each table through its brand's normalizer.
pub(crate) fn normalize_tables(
    tables: Vec<(Brand, Vec<RawRow>)>,
    reference: &ReferenceData,
) -> Vec<NormalizedBatch> {
    let resolver = CityResolver::new(reference);
    tables
        .into_iter()
        .map(|(brand, rows)| normalizer_for(brand, &resolver).normalize(rows))
        .collect()
}

/// Load, normalize, aggregate, write the canonical table, then print the
/// audit and report to `out`.
///
/// # Errors
///
/// Returns an error if a raw table cannot be loaded, the output cannot be
/// written, or writing to `out` fails.
pub(crate) fn run_combine<W: Write>(
    options: &CombineOptions<'_>,
    reference: &ReferenceData,
    out: &mut W,
) -> anyhow::Result<Aggregate> {
    tracing::info!(data_dir = %options.data_dir.display(), "starting combine run");

    let tables = load_raw_tables(options.data_dir)?;
    let batches = normalize_tables(tables, reference);
    let aggregate = aggregate::aggregate(batches);

    aggregate::write_canonical_table(options.output_path, &aggregate.stations)?;

    report::render_run_summary(out, &aggregate, options.output_path)
        .context("writing run summary")?;
    let report = Report::build(&aggregate.stations, options.report);
    report::render_report(out, &report).context("writing report")?;

    tracing::info!(
        stations = aggregate.stations.len(),
        excluded = aggregate.total_excluded(),
        "combine run complete"
    );
    Ok(aggregate)
}

/// Print the report for a previously written canonical table.
///
/// # Errors
///
/// Returns an error if the table cannot be read or writing to `out` fails.
pub(crate) fn run_report<W: Write>(
    input: &Path,
    options: ReportOptions,
    out: &mut W,
) -> anyhow::Result<Report> {
    let stations = aggregate::read_canonical_table(input)?;
    tracing::info!(path = %input.display(), stations = stations.len(), "loaded canonical table");

    let report = Report::build(&stations, options);
    report::render_report(out, &report).context("writing report")?;
    Ok(report)
}

#[cfg(test)]
#[path = "pipeline_test.rs"]
mod tests;
