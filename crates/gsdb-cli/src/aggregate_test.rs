use gsdb_core::{Brand, CanonicalStation, ExclusionRecord, CANONICAL_COLUMNS};
use gsdb_normalize::NormalizedBatch;

use super::*;

fn named(brand: Brand, id: &str, name: &str) -> CanonicalStation {
    let mut s = CanonicalStation::new(brand, id);
    s.name = name.to_string();
    s
}

fn batch(brand: Brand, kept: Vec<CanonicalStation>, excluded: usize) -> NormalizedBatch {
    let excluded: Vec<ExclusionRecord> = (0..excluded)
        .map(|i| ExclusionRecord::new(format!("x{i}"), "", "test"))
        .collect();
    NormalizedBatch {
        brand,
        loaded: kept.len() + excluded.len(),
        kept,
        excluded,
    }
}

#[test]
fn aggregate_sorts_by_brand_then_name() {
    let batches = vec![
        batch(
            Brand::Gulf,
            vec![named(Brand::Gulf, "2", "Zestafoni"), named(Brand::Gulf, "1", "Batumi")],
            1,
        ),
        batch(Brand::Sgp, vec![named(Brand::Sgp, "9", "Agara")], 0),
        batch(Brand::Lukoil, vec![named(Brand::Lukoil, "4", "Gori")], 2),
    ];
    let aggregate = aggregate(batches);
    let ids: Vec<&str> = aggregate
        .stations
        .iter()
        .map(|s| s.station_id.as_str())
        .collect();
    assert_eq!(ids, ["GULF_1", "GULF_2", "LUKOIL_4", "SGP_9"]);
    assert_eq!(aggregate.total_excluded(), 3);
    assert_eq!(aggregate.summaries[0].kept, 2);
    assert_eq!(aggregate.summaries[0].loaded, 3);
}

#[test]
fn sort_is_stable_for_equal_keys() {
    let mut stations = vec![
        named(Brand::Wissol, "b", "Same"),
        named(Brand::Wissol, "a", "Same"),
        named(Brand::Wissol, "c", "Same"),
    ];
    sort_stations(&mut stations);
    let ids: Vec<&str> = stations.iter().map(|s| s.station_id.as_str()).collect();
    assert_eq!(ids, ["WISSOL_b", "WISSOL_a", "WISSOL_c"]);
}

#[test]
fn sort_uses_display_name_byte_order() {
    // "SGP" sorts before "Wissol" but after "Rompetrol" byte-wise.
    let mut stations = vec![
        named(Brand::Wissol, "1", "a"),
        named(Brand::Sgp, "2", "a"),
        named(Brand::Rompetrol, "3", "a"),
    ];
    sort_stations(&mut stations);
    let brands: Vec<Brand> = stations.iter().map(|s| s.brand).collect();
    assert_eq!(brands, [Brand::Rompetrol, Brand::Sgp, Brand::Wissol]);
}

#[test]
fn written_table_has_canonical_header_and_lf_endings() {
    let mut station = named(Brand::Gulf, "7", "Gulf Batumi");
    station.address = "Batumi, Chavchavadze Ave 10".to_string();
    station.latitude = "41.640".to_string();

    let mut buf = Vec::new();
    write_stations(&mut buf, &[station]).expect("write");
    let text = String::from_utf8(buf).expect("utf-8");

    let mut lines = text.split('\n');
    assert_eq!(lines.next(), Some(CANONICAL_COLUMNS.join(",").as_str()));
    assert_eq!(
        lines.next(),
        Some("GULF_7,Gulf,Gulf Batumi,\"Batumi, Chavchavadze Ave 10\",,41.640,,,,,,")
    );
    assert!(!text.contains('\r'));
}

#[test]
fn empty_table_still_has_header() {
    let mut buf = Vec::new();
    write_stations(&mut buf, &[]).expect("write");
    assert_eq!(
        String::from_utf8(buf).expect("utf-8"),
        format!("{}\n", CANONICAL_COLUMNS.join(","))
    );
}

#[test]
fn read_back_preserves_stations() {
    let mut sgp = named(Brand::Sgp, "50", "SGP Dedoplistskaro");
    sgp.city = "Dedoplistskaro".to_string();
    sgp.fuel_types = "Nano Diesel".to_string();
    let stations = vec![named(Brand::Lukoil, "3", "Rustavi, Gagarin St 1"), sgp];

    let mut buf = Vec::new();
    write_stations(&mut buf, &stations).expect("write");
    let read = read_stations(buf.as_slice()).expect("read");
    assert_eq!(read, stations);
}

#[test]
fn read_rejects_unknown_brand() {
    let text = format!(
        "{}\nSHELL_1,Shell,x,,,,,,,,,\n",
        CANONICAL_COLUMNS.join(",")
    );
    assert!(read_stations(text.as_bytes()).is_err());
}

#[test]
fn write_canonical_table_creates_parent_dir() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("out").join("final.csv");
    write_canonical_table(&path, &[named(Brand::Gulf, "1", "A")]).expect("write");
    let text = std::fs::read_to_string(&path).expect("read back");
    assert!(text.starts_with("station_id,brand,"));
}
