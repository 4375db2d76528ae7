//! Per-brand normalizers.
//!
//! Each brand maps its own raw schema into [`CanonicalStation`] and decides
//! which rows are not stations at all. Every raw row ends up in exactly one
//! of `kept` or `excluded`.

mod gulf;
mod lukoil;
mod rompetrol;
mod sgp;
#[cfg(test)]
mod test_support;
mod wissol;

pub use gulf::GulfNormalizer;
pub use lukoil::LukoilNormalizer;
pub use rompetrol::RompetrolNormalizer;
pub use sgp::SgpNormalizer;
pub use wissol::WissolNormalizer;

use gsdb_core::{Brand, CanonicalStation, ExclusionRecord, RawRow};

use crate::city::CityResolver;

/// What a normalizer decided for one raw row.
#[derive(Debug, Clone, PartialEq)]
pub enum RowOutcome {
    Kept(CanonicalStation),
    Excluded(ExclusionRecord),
}

/// One brand's normalized output, owned by the caller.
#[derive(Debug, Clone)]
pub struct NormalizedBatch {
    pub brand: Brand,
    /// Raw rows consumed; always `kept.len() + excluded.len()`.
    pub loaded: usize,
    pub kept: Vec<CanonicalStation>,
    pub excluded: Vec<ExclusionRecord>,
}

pub trait BrandNormalizer {
    fn brand(&self) -> Brand;

    /// Map one raw row, or explain why it is not a station.
    fn normalize_row(&self, row: &RawRow) -> RowOutcome;

    /// Normalize a whole raw table, preserving row order within each side.
    fn normalize(&self, rows: Vec<RawRow>) -> NormalizedBatch {
        let brand = self.brand();
        let loaded = rows.len();
        let mut kept = Vec::with_capacity(loaded);
        let mut excluded = Vec::new();

        for row in &rows {
            if row.trimmed("id").is_empty() {
                tracing::warn!(%brand, "raw row without id");
            }

            match self.normalize_row(row) {
                RowOutcome::Kept(station) => kept.push(station),
                RowOutcome::Excluded(record) => {
                    tracing::debug!(
                        %brand,
                        source_id = %record.source_id,
                        reason = %record.reason,
                        "excluded raw row"
                    );
                    excluded.push(record);
                }
            }
        }

        tracing::info!(
            %brand,
            loaded,
            kept = kept.len(),
            excluded = excluded.len(),
            "normalized brand"
        );

        NormalizedBatch {
            brand,
            loaded,
            kept,
            excluded,
        }
    }
}

/// The normalizer for `brand`, sharing one resolver and its reference data.
#[must_use]
pub fn normalizer_for<'a>(
    brand: Brand,
    resolver: &'a CityResolver<'a>,
) -> Box<dyn BrandNormalizer + 'a> {
    match brand {
        Brand::Gulf => Box::new(GulfNormalizer::new(resolver)),
        Brand::Rompetrol => Box::new(RompetrolNormalizer::new(resolver.reference())),
        Brand::Lukoil => Box::new(LukoilNormalizer),
        Brand::Wissol => Box::new(WissolNormalizer::new(resolver)),
        Brand::Sgp => Box::new(SgpNormalizer::new(resolver.reference())),
    }
}

/// Split a `", "`-separated label list. Empty input yields no labels.
fn split_labels(list: &str) -> impl Iterator<Item = &str> {
    (!list.is_empty())
        .then(|| list.split(", "))
        .into_iter()
        .flatten()
}

#[cfg(test)]
mod tests {
    use gsdb_core::ReferenceData;

    use super::*;

    #[test]
    fn split_labels_keeps_order() {
        let labels: Vec<_> = split_labels("Coffee, Hot Dog, WC").collect();
        assert_eq!(labels, ["Coffee", "Hot Dog", "WC"]);
    }

    #[test]
    fn split_labels_empty_input() {
        assert_eq!(split_labels("").count(), 0);
    }

    #[test]
    fn normalizer_for_matches_brand() {
        let reference = ReferenceData::default();
        let resolver = CityResolver::new(&reference);
        for brand in Brand::ALL {
            assert_eq!(normalizer_for(brand, &resolver).brand(), brand);
        }
    }

    #[test]
    fn normalize_accounts_for_every_row() {
        let reference = ReferenceData::default();
        let resolver = CityResolver::new(&reference);
        let rows: Vec<RawRow> = vec![
            [("id", "1"), ("fuel_types", "Euro Regular"), ("services", "")]
                .into_iter()
                .collect(),
            [("id", "2"), ("fuel_types", ""), ("services", "")]
                .into_iter()
                .collect(),
            [("id", "3"), ("fuel_types", ""), ("services", "Car Wash")]
                .into_iter()
                .collect(),
        ];
        let batch = normalizer_for(Brand::Rompetrol, &resolver).normalize(rows);
        assert_eq!(batch.loaded, 3);
        assert_eq!(batch.kept.len() + batch.excluded.len(), batch.loaded);
        assert_eq!(batch.excluded[0].source_id, "2");
        assert_eq!(batch.kept[1].station_id, "ROMPETROL_3");
    }
}
