use super::*;

const MINIMAL_YAML: &str = r"
gazetteer:
  - { name: Alpha, latitude: 1.0, longitude: 1.0 }
  - { name: Beta, latitude: 2.0, longitude: 2.0 }
max_city_distance: 0.5
not_city_keywords: [street]
sgp_district_aliases:
  Alfa: Alpha
sgp_charger_marker: Charger
gulf_excluded_poi_types: [Oil Terminal]
gulf_dropped_service_labels: [Shop]
wissol_excluded_service: Truck Service Center
rompetrol_working_hours: 24/7
";

#[test]
fn default_gazetteer_has_unique_cities() {
    let reference = ReferenceData::default();
    assert_eq!(reference.gazetteer.len(), 36);
    validate_reference_data(&reference).expect("built-in tables must validate");
}

#[test]
fn default_gazetteer_starts_with_capital() {
    let reference = ReferenceData::default();
    assert_eq!(reference.gazetteer[0].name, "Tbilisi");
    assert!(reference.gazetteer.iter().any(|c| c.name == "Batumi"));
}

#[test]
fn default_aliases_cover_known_misspellings() {
    let reference = ReferenceData::default();
    assert_eq!(
        reference.sgp_district_aliases.get("D.Tskharo").map(String::as_str),
        Some("Dedoplistskaro")
    );
    assert_eq!(
        reference.sgp_district_aliases.get("telavi").map(String::as_str),
        Some("Telavi")
    );
}

#[test]
fn parse_minimal_yaml() {
    let reference = parse_reference_data(MINIMAL_YAML).unwrap();
    assert_eq!(reference.gazetteer.len(), 2);
    assert_eq!(reference.gazetteer[1].name, "Beta");
    assert!((reference.max_city_distance - 0.5).abs() < f64::EPSILON);
    assert_eq!(reference.rompetrol_working_hours, "24/7");
}

#[test]
fn parse_rejects_empty_gazetteer() {
    let start = MINIMAL_YAML.find("gazetteer:").unwrap();
    let end = MINIMAL_YAML.find("max_city_distance").unwrap();
    let yaml = format!(
        "{}gazetteer: []\n{}",
        &MINIMAL_YAML[..start],
        &MINIMAL_YAML[end..]
    );
    let err = parse_reference_data(&yaml).unwrap_err();
    assert!(
        matches!(err, ConfigError::Validation(ref msg) if msg.contains("at least one")),
        "got: {err:?}"
    );
}

#[test]
fn parse_rejects_duplicate_city_case_insensitive() {
    let yaml = MINIMAL_YAML.replace("name: Beta", "name: ALPHA");
    let err = parse_reference_data(&yaml).unwrap_err();
    assert!(
        matches!(err, ConfigError::Validation(ref msg) if msg.contains("duplicate")),
        "got: {err:?}"
    );
}

#[test]
fn parse_rejects_non_positive_distance() {
    let yaml = MINIMAL_YAML.replace("max_city_distance: 0.5", "max_city_distance: 0");
    let err = parse_reference_data(&yaml).unwrap_err();
    assert!(matches!(err, ConfigError::Validation(_)), "got: {err:?}");
}

#[test]
fn parse_rejects_missing_field() {
    let yaml = MINIMAL_YAML.replace("rompetrol_working_hours: 24/7\n", "");
    let err = parse_reference_data(&yaml).unwrap_err();
    assert!(matches!(err, ConfigError::ReferenceFileParse(_)), "got: {err:?}");
}

#[test]
fn load_missing_file_is_io_error() {
    let err = load_reference_data(Path::new("/nonexistent/reference.yaml")).unwrap_err();
    assert!(
        matches!(err, ConfigError::ReferenceFileIo { ref path, .. } if path.contains("reference.yaml"))
    );
}
