//! Merge per-brand batches into the canonical table.
//!
//! Station ids are namespaced per brand, so merging is a plain
//! concatenation; the only ordering guarantee is the final stable sort.

use std::io::{Read, Write};
use std::path::Path;

use anyhow::Context;
use gsdb_core::{Brand, CanonicalStation, ExclusionRecord};
use gsdb_normalize::NormalizedBatch;

/// Per-brand counts and exclusions kept for the console audit.
#[derive(Debug, Clone)]
pub(crate) struct BrandSummary {
    pub brand: Brand,
    pub loaded: usize,
    pub kept: usize,
    pub excluded: Vec<ExclusionRecord>,
}

#[derive(Debug, Clone)]
pub(crate) struct Aggregate {
    /// Sorted by `(brand, name)`, ties in encounter order.
    pub stations: Vec<CanonicalStation>,
    /// One entry per batch, in the order the batches were given.
    pub summaries: Vec<BrandSummary>,
}

impl Aggregate {
    pub(crate) fn total_excluded(&self) -> usize {
        self.summaries.iter().map(|s| s.excluded.len()).sum()
    }
}

/// Take ownership of every batch and build the sorted canonical table.
pub(crate) fn aggregate(batches: Vec<NormalizedBatch>) -> Aggregate {
    let mut stations = Vec::with_capacity(batches.iter().map(|b| b.kept.len()).sum());
    let mut summaries = Vec::with_capacity(batches.len());

    for batch in batches {
        summaries.push(BrandSummary {
            brand: batch.brand,
            loaded: batch.loaded,
            kept: batch.kept.len(),
            excluded: batch.excluded,
        });
        stations.extend(batch.kept);
    }

    sort_stations(&mut stations);

    Aggregate {
        stations,
        summaries,
    }
}

/// Stable sort by brand display name, then station name, byte-wise.
pub(crate) fn sort_stations(stations: &mut [CanonicalStation]) {
    stations.sort_by(|a, b| {
        (a.brand.as_str(), a.name.as_str()).cmp(&(b.brand.as_str(), b.name.as_str()))
    });
}

/// Serialize stations as canonical CSV into `writer`.
///
/// # Errors
///
/// Returns an error if serialization or the underlying write fails.
pub(crate) fn write_stations<W: Write>(
    writer: W,
    stations: &[CanonicalStation],
) -> anyhow::Result<()> {
    let mut wtr = csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(writer);

    if stations.is_empty() {
        wtr.write_record(gsdb_core::CANONICAL_COLUMNS)?;
    }
    for station in stations {
        wtr.serialize(station)
            .with_context(|| format!("serializing station {}", station.station_id))?;
    }
    wtr.flush()?;
    Ok(())
}

/// Write the canonical table to `path` in a single write, creating the
/// parent directory if needed.
///
/// # Errors
///
/// Returns an error if the directory cannot be created or the file written.
pub(crate) fn write_canonical_table(path: &Path, stations: &[CanonicalStation]) -> anyhow::Result<()> {
    let mut buf = Vec::new();
    write_stations(&mut buf, stations)?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("creating output directory {}", parent.display()))?;
    }
    std::fs::write(path, buf).with_context(|| format!("writing {}", path.display()))?;

    tracing::info!(path = %path.display(), stations = stations.len(), "wrote canonical table");
    Ok(())
}

/// Read stations back from canonical CSV.
///
/// # Errors
///
/// Returns an error if a record does not match the canonical schema.
pub(crate) fn read_stations<R: Read>(reader: R) -> anyhow::Result<Vec<CanonicalStation>> {
    let mut rdr = csv::Reader::from_reader(reader);
    let mut stations = Vec::new();
    for (idx, record) in rdr.deserialize::<CanonicalStation>().enumerate() {
        let station = record.with_context(|| format!("canonical table row {}", idx + 1))?;
        stations.push(station);
    }
    Ok(stations)
}

/// Load a previously written canonical table.
///
/// # Errors
///
/// Returns an error if the file is missing or malformed.
pub(crate) fn read_canonical_table(path: &Path) -> anyhow::Result<Vec<CanonicalStation>> {
    let file =
        std::fs::File::open(path).with_context(|| format!("opening {}", path.display()))?;
    read_stations(file).with_context(|| format!("reading {}", path.display()))
}

#[cfg(test)]
#[path = "aggregate_test.rs"]
mod tests;
