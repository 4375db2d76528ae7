//! Gulf: POI-typed export with separate food labels and multi-line addresses.

use gsdb_core::{Brand, CanonicalStation, ExclusionRecord, RawRow};

use super::{split_labels, BrandNormalizer, RowOutcome};
use crate::city::CityResolver;

pub struct GulfNormalizer<'a> {
    resolver: &'a CityResolver<'a>,
}

impl<'a> GulfNormalizer<'a> {
    #[must_use]
    pub fn new(resolver: &'a CityResolver<'a>) -> Self {
        Self { resolver }
    }

    /// Oil terminals and fuel-less service centers are not stations.
    fn is_excluded(&self, fuel: &str, poi: &str) -> bool {
        fuel.is_empty()
            && self
                .resolver
                .reference()
                .gulf_excluded_poi_types
                .iter()
                .any(|t| t == poi)
    }

    /// `poi_types` minus generic labels, followed by `food_types`.
    fn services(&self, poi: &str, food: &str) -> String {
        let dropped = &self.resolver.reference().gulf_dropped_service_labels;
        split_labels(poi)
            .filter(|p| !p.is_empty() && !dropped.iter().any(|d| d == p))
            .chain(split_labels(food))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl BrandNormalizer for GulfNormalizer<'_> {
    fn brand(&self) -> Brand {
        Brand::Gulf
    }

    fn normalize_row(&self, row: &RawRow) -> RowOutcome {
        let id = row.get("id");
        let fuel = row.trimmed("fuel_types");
        let poi = row.trimmed("poi_types");

        if self.is_excluded(fuel, poi) {
            return RowOutcome::Excluded(ExclusionRecord::new(
                id,
                row.get("name"),
                format!("No fuel, poi_types={poi}"),
            ));
        }

        let address = clean_address(row.get("address"));
        let city = self
            .resolver
            .resolve(&address, row.get("latitude"), row.get("longitude"))
            .into_city();

        let mut station = CanonicalStation::new(Brand::Gulf, id).with_coordinates(row);
        station.name = row.get("name").to_string();
        station.services = self.services(poi, row.trimmed("food_types"));
        station.fuel_types = fuel.to_string();
        station.address = address;
        station.city = city;
        RowOutcome::Kept(station)
    }
}

/// Flatten line breaks and collapse runs of whitespace.
fn clean_address(raw: &str) -> String {
    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}
