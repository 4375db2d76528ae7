//! Rompetrol: flat export with its own `city` column.

use gsdb_core::{Brand, CanonicalStation, ExclusionRecord, RawRow, ReferenceData};

use super::{BrandNormalizer, RowOutcome};

pub struct RompetrolNormalizer<'a> {
    reference: &'a ReferenceData,
}

impl<'a> RompetrolNormalizer<'a> {
    #[must_use]
    pub fn new(reference: &'a ReferenceData) -> Self {
        Self { reference }
    }
}

impl BrandNormalizer for RompetrolNormalizer<'_> {
    fn brand(&self) -> Brand {
        Brand::Rompetrol
    }

    fn normalize_row(&self, row: &RawRow) -> RowOutcome {
        let id = row.get("id");
        let fuel = row.trimmed("fuel_types");
        let services = row.trimmed("services");

        // Head office and similar entries carry neither.
        if fuel.is_empty() && services.is_empty() {
            return RowOutcome::Excluded(ExclusionRecord::new(
                id,
                row.get("name"),
                "No fuel_types and no services",
            ));
        }

        let mut station = CanonicalStation::new(Brand::Rompetrol, id).with_coordinates(row);
        station.name = row.get("name").to_string();
        station.address = row.get("address").to_string();
        station.city = row.get("city").to_string();
        station.fuel_types = fuel.to_string();
        station.services = services.to_string();
        station.working_hours.clone_from(&self.reference.rompetrol_working_hours);
        station.phone = row.get("phone").to_string();
        RowOutcome::Kept(station)
    }
}
