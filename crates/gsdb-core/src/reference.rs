//! Lookup tables used by city resolution and brand normalization.
//!
//! The tables are plain data handed to the resolver and normalizers at
//! construction time. [`ReferenceData::default`] carries the built-in
//! tables for Georgia; [`load_reference_data`] replaces them from YAML.

use std::collections::{BTreeMap, HashSet};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// A gazetteer entry: a locality and the coordinates of its center.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CityCenter {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl CityCenter {
    fn new(name: &str, latitude: f64, longitude: f64) -> Self {
        Self {
            name: name.to_string(),
            latitude,
            longitude,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReferenceData {
    /// Ordered; on equal distance the earlier entry wins.
    pub gazetteer: Vec<CityCenter>,
    /// Maximum plane distance, in decimal degrees, for a coordinate match.
    pub max_city_distance: f64,
    /// Lowercase substrings marking an address fragment rather than a city.
    pub not_city_keywords: Vec<String>,
    /// Misspelled or sub-district SGP names mapped to canonical localities.
    pub sgp_district_aliases: BTreeMap<String, String>,
    /// SGP service label marking an EV charger.
    pub sgp_charger_marker: String,
    /// Gulf `poi_types` values that are not stations when no fuel is sold.
    pub gulf_excluded_poi_types: Vec<String>,
    /// Gulf `poi_types` labels too generic to count as a service.
    pub gulf_dropped_service_labels: Vec<String>,
    /// Wissol `services` value of repair-only sites.
    pub wissol_excluded_service: String,
    /// Opening hours assumed for every Rompetrol station.
    pub rompetrol_working_hours: String,
}

impl Default for ReferenceData {
    fn default() -> Self {
        let gazetteer = vec![
            CityCenter::new("Tbilisi", 41.7151, 44.8271),
            CityCenter::new("Batumi", 41.6168, 41.6367),
            CityCenter::new("Kutaisi", 42.2679, 42.6946),
            CityCenter::new("Rustavi", 41.5549, 44.9900),
            CityCenter::new("Gori", 41.9815, 44.1135),
            CityCenter::new("Zugdidi", 42.5088, 41.8709),
            CityCenter::new("Poti", 42.1462, 41.6717),
            CityCenter::new("Kobuleti", 41.8217, 41.7810),
            CityCenter::new("Ozurgeti", 42.0081, 42.0183),
            CityCenter::new("Telavi", 41.9198, 45.4736),
            CityCenter::new("Akhaltsikhe", 41.6399, 42.9877),
            CityCenter::new("Borjomi", 41.8409, 43.4271),
            CityCenter::new("Mtskheta", 41.8437, 44.7185),
            CityCenter::new("Samtredia", 42.1569, 42.3403),
            CityCenter::new("Zestafoni", 42.1170, 43.0489),
            CityCenter::new("Terjola", 42.1700, 42.9340),
            CityCenter::new("Marneuli", 41.4717, 44.8081),
            CityCenter::new("Sagarejo", 41.7340, 45.3316),
            CityCenter::new("Khashuri", 41.9978, 43.5900),
            CityCenter::new("Senaki", 42.2691, 42.0655),
            CityCenter::new("Chiatura", 42.2897, 43.2884),
            CityCenter::new("Sighnaghi", 41.6192, 45.9226),
            CityCenter::new("Mestia", 43.0083, 42.7272),
            CityCenter::new("Lanchkhuti", 42.0863, 42.0189),
            CityCenter::new("Chokhatauri", 42.0206, 42.2434),
            CityCenter::new("Kaspi", 41.9200, 44.4300),
            CityCenter::new("Sachkhere", 42.3450, 43.4070),
            CityCenter::new("Lagodekhi", 41.8263, 46.2849),
            CityCenter::new("Kvareli", 41.9519, 45.8213),
            CityCenter::new("Dedoplistskaro", 41.4618, 46.0976),
            CityCenter::new("Gurjaani", 41.7451, 45.8008),
            CityCenter::new("Bolnisi", 41.4472, 44.5443),
            CityCenter::new("Khelvachauri", 41.6101, 41.6300),
            CityCenter::new("Tsalenjikha", 42.6077, 42.0334),
            CityCenter::new("Tkibuli", 42.3320, 42.9730),
            CityCenter::new("Ambrolauri", 42.5175, 43.1535),
        ];

        let not_city_keywords = [
            "street",
            "str.",
            "avenue",
            "ave.",
            "highway",
            "hwy",
            "beach",
            "square",
            "alley",
            "lane",
            "bridge",
            "village",
            "opposite",
            "near ",
            "next to",
            "adjacent",
            "gulf +",
            "right bank",
            "left bank",
            "cosmonauts",
            "monument",
            "metro",
            "airport",
            "winery",
        ]
        .map(str::to_string)
        .to_vec();

        let sgp_district_aliases = [
            ("D.Tskharo", "Dedoplistskaro"),
            ("Keda/Tskhemna", "Keda"),
            ("Lanchkhti", "Lanchkhuti"),
            ("Dafnari", "Samtredia"),
            ("Kizilajlo", "Marneuli"),
            ("Parkhalo", "Bolnisi"),
            ("Sadakhlo", "Marneuli"),
            ("Shulaveri", "Marneuli"),
            ("Tsalaskuri", "Gardabani"),
            ("Urbnisi", "Kareli"),
            ("Martkopi", "Gardabani"),
            ("Ianeti", "Samtredia"),
            ("Agara", "Kareli"),
            ("Kakheti", "Kakheti"),
            ("telavi", "Telavi"),
        ]
        .into_iter()
        .map(|(from, to)| (from.to_string(), to.to_string()))
        .collect();

        Self {
            gazetteer,
            max_city_distance: 0.15,
            not_city_keywords,
            sgp_district_aliases,
            sgp_charger_marker: "Charger".to_string(),
            gulf_excluded_poi_types: vec!["Oil Terminal".to_string(), "Service Center".to_string()],
            gulf_dropped_service_labels: vec!["Gas Station".to_string(), "Shop".to_string()],
            wissol_excluded_service: "Truck Service Center".to_string(),
            rompetrol_working_hours: "24/7".to_string(),
        }
    }
}

/// Load and validate reference data from a YAML file.
///
/// The file replaces the built-in tables wholesale; every field is required.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_reference_data(path: &Path) -> Result<ReferenceData, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReferenceFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    parse_reference_data(&content)
}

/// Parse and validate reference data from a YAML string.
///
/// # Errors
///
/// Returns `ConfigError` if the YAML is malformed or fails validation.
pub fn parse_reference_data(yaml: &str) -> Result<ReferenceData, ConfigError> {
    let reference: ReferenceData = serde_yaml::from_str(yaml)?;
    validate_reference_data(&reference)?;
    Ok(reference)
}

fn validate_reference_data(reference: &ReferenceData) -> Result<(), ConfigError> {
    if reference.gazetteer.is_empty() {
        return Err(ConfigError::Validation(
            "gazetteer must contain at least one city".to_string(),
        ));
    }

    if !reference.max_city_distance.is_finite() || reference.max_city_distance <= 0.0 {
        return Err(ConfigError::Validation(format!(
            "max_city_distance must be a positive number, got {}",
            reference.max_city_distance
        )));
    }

    let mut seen = HashSet::new();
    for city in &reference.gazetteer {
        if city.name.trim().is_empty() {
            return Err(ConfigError::Validation(
                "gazetteer city name must be non-empty".to_string(),
            ));
        }

        if !city.latitude.is_finite() || !city.longitude.is_finite() {
            return Err(ConfigError::Validation(format!(
                "gazetteer city '{}' has non-finite coordinates",
                city.name
            )));
        }

        if !seen.insert(city.name.to_lowercase()) {
            return Err(ConfigError::Validation(format!(
                "duplicate gazetteer city: '{}'",
                city.name
            )));
        }
    }

    if reference.not_city_keywords.iter().any(String::is_empty) {
        return Err(ConfigError::Validation(
            "not_city_keywords must not contain empty entries".to_string(),
        ));
    }

    Ok(())
}

#[cfg(test)]
#[path = "reference_test.rs"]
mod tests;
