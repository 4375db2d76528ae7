//! SGP (SOCAR Georgia Petroleum): district-level locality with a brand alias table.

use gsdb_core::{Brand, CanonicalStation, ExclusionRecord, RawRow, ReferenceData};

use super::{BrandNormalizer, RowOutcome};

pub struct SgpNormalizer<'a> {
    reference: &'a ReferenceData,
}

impl<'a> SgpNormalizer<'a> {
    #[must_use]
    pub fn new(reference: &'a ReferenceData) -> Self {
        Self { reference }
    }

    /// Canonical locality for a source `district` value.
    ///
    /// Aliases map sub-districts and misspellings; anything unmapped passes
    /// through, title-cased when it starts lowercase.
    #[must_use]
    pub fn district_city(&self, district: &str) -> String {
        let district = district.trim();
        let city = self
            .reference
            .sgp_district_aliases
            .get(district)
            .map_or(district, String::as_str);

        if city.chars().next().is_some_and(char::is_lowercase) {
            title_case(city)
        } else {
            city.to_string()
        }
    }
}

impl BrandNormalizer for SgpNormalizer<'_> {
    fn brand(&self) -> Brand {
        Brand::Sgp
    }

    fn normalize_row(&self, row: &RawRow) -> RowOutcome {
        let id = row.get("id");
        let fuel = row.trimmed("fuel_types");
        let services = row.trimmed("services");

        if fuel.is_empty() && services.contains(self.reference.sgp_charger_marker.as_str()) {
            return RowOutcome::Excluded(ExclusionRecord::new(
                id,
                row.get("name"),
                "EV Charger only (no fuel)",
            ));
        }

        let mut station = CanonicalStation::new(Brand::Sgp, id).with_coordinates(row);
        station.name = row.get("name").to_string();
        station.address = row.get("address").to_string();
        station.city = self.district_city(row.get("district"));
        station.fuel_types = fuel.to_string();
        station.services = services.to_string();
        RowOutcome::Kept(station)
    }
}

/// Titlecase the first letter of every alphabetic run, lowercase the rest.
fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut in_word = false;
    for c in s.chars() {
        if c.is_alphabetic() {
            if in_word {
                out.extend(c.to_lowercase());
            } else {
                push_titlecase(&mut out, c);
            }
            in_word = true;
        } else {
            out.push(c);
            in_word = false;
        }
    }
    out
}

/// Unicode titlecase mapping where it differs from uppercase.
///
/// Mkhedruli letters titlecase to themselves; their uppercase is Mtavruli.
fn push_titlecase(out: &mut String, c: char) {
    match c {
        '\u{10D0}'..='\u{10FA}' | '\u{10FD}'..='\u{10FF}' => out.push(c),
        '\u{01C4}'..='\u{01C6}' => out.push('\u{01C5}'),
        '\u{01C7}'..='\u{01C9}' => out.push('\u{01C8}'),
        '\u{01CA}'..='\u{01CC}' => out.push('\u{01CB}'),
        '\u{01F1}'..='\u{01F3}' => out.push('\u{01F2}'),
        _ => out.extend(c.to_uppercase()),
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{excluded, kept, raw_row};
    use super::*;

    const BASE: &[(&str, &str)] = &[
        ("id", "55"),
        ("name", "SGP Gldani"),
        ("address", "Gldani, Khizanishvili St"),
        ("district", "Tbilisi"),
        ("region", "Tbilisi"),
        ("latitude", "41.80"),
        ("longitude", "44.82"),
        ("fuel_types", "Nano Diesel, CNG"),
        ("services", "Way-Mart, WC"),
    ];

    #[test]
    fn maps_source_fields() {
        let reference = ReferenceData::default();
        let normalizer = SgpNormalizer::new(&reference);
        let station = kept(normalizer.normalize_row(&raw_row(BASE, &[])));
        assert_eq!(station.station_id, "SGP_55");
        assert_eq!(station.brand, Brand::Sgp);
        assert_eq!(station.city, "Tbilisi");
        assert_eq!(station.fuel_types, "Nano Diesel, CNG");
        assert_eq!(station.services, "Way-Mart, WC");
    }

    #[test]
    fn district_alias_is_applied() {
        let reference = ReferenceData::default();
        let normalizer = SgpNormalizer::new(&reference);
        let row = raw_row(BASE, &[("district", "D.Tskharo")]);
        let station = kept(normalizer.normalize_row(&row));
        assert_eq!(station.city, "Dedoplistskaro");
    }

    #[test]
    fn lowercase_district_is_title_cased() {
        let reference = ReferenceData::default();
        let normalizer = SgpNormalizer::new(&reference);
        assert_eq!(normalizer.district_city("telavi"), "Telavi");
        assert_eq!(normalizer.district_city("khulo"), "Khulo");
        assert_eq!(normalizer.district_city("tsalka-ii"), "Tsalka-Ii");
    }

    #[test]
    fn georgian_script_district_is_left_as_is() {
        let reference = ReferenceData::default();
        let normalizer = SgpNormalizer::new(&reference);
        assert_eq!(normalizer.district_city("თელავი"), "თელავი");
        assert_eq!(normalizer.district_city("ქუთაისი 2"), "ქუთაისი 2");
        assert_eq!(title_case("ბათუმი-ჩაქვი"), "ბათუმი-ჩაქვი");
    }

    #[test]
    fn title_case_uses_titlecase_for_digraphs() {
        assert_eq!(title_case("\u{01C6}ak"), "\u{01C5}ak");
        assert_eq!(title_case("\u{01C9}ubljana"), "\u{01C8}ubljana");
    }

    #[test]
    fn unmapped_district_passes_through() {
        let reference = ReferenceData::default();
        let normalizer = SgpNormalizer::new(&reference);
        assert_eq!(normalizer.district_city(" Akhmeta "), "Akhmeta");
        assert_eq!(normalizer.district_city("თელავი"), "თელავი");
        assert_eq!(normalizer.district_city(""), "");
    }

    #[test]
    fn charger_without_fuel_is_excluded() {
        let reference = ReferenceData::default();
        let normalizer = SgpNormalizer::new(&reference);
        let row = raw_row(
            BASE,
            &[("name", "SGP EV Vake"), ("fuel_types", ""), ("services", "Fast Charger")],
        );
        let record = excluded(normalizer.normalize_row(&row));
        assert_eq!(record.source_id, "55");
        assert_eq!(record.display_name, "SGP EV Vake");
        assert_eq!(record.reason, "EV Charger only (no fuel)");
    }

    #[test]
    fn charger_with_fuel_is_kept() {
        let reference = ReferenceData::default();
        let normalizer = SgpNormalizer::new(&reference);
        let row = raw_row(BASE, &[("services", "Power Charger, WC")]);
        let station = kept(normalizer.normalize_row(&row));
        assert_eq!(station.services, "Power Charger, WC");
    }

    #[test]
    fn fuel_less_without_charger_is_kept() {
        let reference = ReferenceData::default();
        let normalizer = SgpNormalizer::new(&reference);
        let row = raw_row(BASE, &[("fuel_types", ""), ("services", "Way-Mart")]);
        let station = kept(normalizer.normalize_row(&row));
        assert_eq!(station.fuel_types, "");
    }
}
