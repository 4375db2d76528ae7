//! Wissol: address-only export; the address doubles as the station name.

use gsdb_core::{Brand, CanonicalStation, ExclusionRecord, RawRow};

use super::{BrandNormalizer, RowOutcome};
use crate::city::CityResolver;

pub struct WissolNormalizer<'a> {
    resolver: &'a CityResolver<'a>,
}

impl<'a> WissolNormalizer<'a> {
    #[must_use]
    pub fn new(resolver: &'a CityResolver<'a>) -> Self {
        Self { resolver }
    }
}

impl BrandNormalizer for WissolNormalizer<'_> {
    fn brand(&self) -> Brand {
        Brand::Wissol
    }

    fn normalize_row(&self, row: &RawRow) -> RowOutcome {
        let id = row.get("id");
        let services = row.trimmed("services");

        if services == self.resolver.reference().wissol_excluded_service {
            return RowOutcome::Excluded(ExclusionRecord::new(
                id,
                row.get("address"),
                format!("{services} (no fuel)"),
            ));
        }

        let address = row.trimmed("address");
        let city = self
            .resolver
            .resolve(address, row.get("latitude"), row.get("longitude"))
            .into_city();

        let mut station = CanonicalStation::new(Brand::Wissol, id).with_coordinates(row);
        station.name = if address.is_empty() {
            city.clone()
        } else {
            address.to_string()
        };
        station.address = address.to_string();
        station.city = city;
        station.services = services.to_string();
        station.working_hours = row.get("working_hours").to_string();
        station.phone = row.get("phone").to_string();
        RowOutcome::Kept(station)
    }
}
