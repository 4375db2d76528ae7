//! Lukoil: no fuel or service data; names are synthesized from city and address.

use gsdb_core::{Brand, CanonicalStation, RawRow};

use super::{BrandNormalizer, RowOutcome};

pub struct LukoilNormalizer;

impl BrandNormalizer for LukoilNormalizer {
    fn brand(&self) -> Brand {
        Brand::Lukoil
    }

    fn normalize_row(&self, row: &RawRow) -> RowOutcome {
        let city = row.get("city");
        let address = row.get("address");

        let mut station = CanonicalStation::new(Brand::Lukoil, row.get("id")).with_coordinates(row);
        station.name = if city.is_empty() {
            address.to_string()
        } else {
            format!("{city}, {address}")
        };
        station.address = address.to_string();
        station.city = city.to_string();
        station.station_type = row.get("type").to_string();
        RowOutcome::Kept(station)
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{kept, raw_row};
    use super::*;

    const BASE: &[(&str, &str)] = &[
        ("id", "21"),
        ("city", "Gori"),
        ("address", "Stalin Ave 2"),
        ("latitude", "41.98"),
        ("longitude", "44.11"),
        ("type", "AZS"),
    ];

    #[test]
    fn name_combines_city_and_address() {
        let station = kept(LukoilNormalizer.normalize_row(&raw_row(BASE, &[])));
        assert_eq!(station.station_id, "LUKOIL_21");
        assert_eq!(station.name, "Gori, Stalin Ave 2");
        assert_eq!(station.city, "Gori");
        assert_eq!(station.station_type, "AZS");
    }

    #[test]
    fn name_is_address_when_city_missing() {
        let row = raw_row(BASE, &[("city", "")]);
        let station = kept(LukoilNormalizer.normalize_row(&row));
        assert_eq!(station.name, "Stalin Ave 2");
        assert_eq!(station.city, "");
    }

    #[test]
    fn fuel_and_services_are_never_populated() {
        let row = raw_row(BASE, &[("fuel_types", "Ecto 95"), ("services", "Shop")]);
        let station = kept(LukoilNormalizer.normalize_row(&row));
        assert_eq!(station.fuel_types, "");
        assert_eq!(station.services, "");
    }

    #[test]
    fn every_row_is_kept() {
        let rows = vec![raw_row(BASE, &[]), raw_row(BASE, &[("id", "22"), ("address", "")])];
        let batch = LukoilNormalizer.normalize(rows);
        assert_eq!(batch.loaded, 2);
        assert_eq!(batch.kept.len(), 2);
        assert!(batch.excluded.is_empty());
    }
}
