//! City inference from free-text addresses and coordinates.
//!
//! Resolution order: the address prefix before the first comma, if it passes
//! the validity heuristic; otherwise the nearest gazetteer city within
//! `max_city_distance`; otherwise unresolved.

use std::sync::LazyLock;

use gsdb_core::ReferenceData;
use regex::Regex;

/// Highway markers such as "N64" or "N 9" that precede the first comma.
static HIGHWAY_MARKER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bN\s*\d").expect("valid regex"));

/// A parsed coordinate pair in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

impl GeoPoint {
    /// Parse source coordinate text. `None` when either value is missing,
    /// non-numeric or not finite.
    #[must_use]
    pub fn parse(latitude: &str, longitude: &str) -> Option<Self> {
        let lat = parse_degrees(latitude)?;
        let lng = parse_degrees(longitude)?;
        Some(Self { lat, lng })
    }

    /// Plane distance in degrees. Good enough for nearest-city matching at
    /// country scale.
    #[must_use]
    pub fn distance_to(self, lat: f64, lng: f64) -> f64 {
        (self.lat - lat).hypot(self.lng - lng)
    }
}

fn parse_degrees(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Outcome of resolving a station's city.
#[derive(Debug, Clone, PartialEq)]
pub enum CityResolution {
    FromAddress(String),
    FromCoordinates { city: String, distance: f64 },
    Unresolved,
}

impl CityResolution {
    #[must_use]
    pub fn city(&self) -> &str {
        match self {
            CityResolution::FromAddress(city) | CityResolution::FromCoordinates { city, .. } => {
                city
            }
            CityResolution::Unresolved => "",
        }
    }

    /// Collapse to the canonical column value; unresolved becomes `""`.
    #[must_use]
    pub fn into_city(self) -> String {
        match self {
            CityResolution::FromAddress(city) | CityResolution::FromCoordinates { city, .. } => {
                city
            }
            CityResolution::Unresolved => String::new(),
        }
    }
}

pub struct CityResolver<'a> {
    reference: &'a ReferenceData,
    /// `not_city_keywords`, lowercased once.
    keywords: Vec<String>,
}

impl<'a> CityResolver<'a> {
    #[must_use]
    pub fn new(reference: &'a ReferenceData) -> Self {
        let keywords = reference
            .not_city_keywords
            .iter()
            .map(|k| k.to_lowercase())
            .collect();
        Self {
            reference,
            keywords,
        }
    }

    #[must_use]
    pub fn reference(&self) -> &'a ReferenceData {
        self.reference
    }

    /// Resolve a city from an address and source coordinate text.
    #[must_use]
    pub fn resolve(&self, address: &str, latitude: &str, longitude: &str) -> CityResolution {
        if let Some(city) = self.city_from_address(address) {
            return CityResolution::FromAddress(city.to_string());
        }

        let Some(point) = GeoPoint::parse(latitude, longitude) else {
            tracing::debug!(latitude, longitude, "no usable coordinates for city fallback");
            return CityResolution::Unresolved;
        };

        match self.nearest_city(point) {
            Some((city, distance)) => CityResolution::FromCoordinates {
                city: city.to_string(),
                distance,
            },
            None => CityResolution::Unresolved,
        }
    }

    /// The text before the first comma, if it looks like a locality.
    #[must_use]
    pub fn city_from_address<'s>(&self, address: &'s str) -> Option<&'s str> {
        let (prefix, _) = address.split_once(',')?;
        let candidate = prefix.trim();
        self.is_valid_city(candidate).then_some(candidate)
    }

    /// Reject empty candidates, denylisted address fragments and highway
    /// markers.
    #[must_use]
    pub fn is_valid_city(&self, candidate: &str) -> bool {
        if candidate.is_empty() {
            return false;
        }

        let lower = candidate.to_lowercase();
        if self.keywords.iter().any(|kw| lower.contains(kw.as_str())) {
            return false;
        }

        !HIGHWAY_MARKER_RE.is_match(candidate)
    }

    /// Closest gazetteer city within `max_city_distance`.
    ///
    /// Equidistant cities resolve to the one listed first.
    #[must_use]
    pub fn nearest_city(&self, point: GeoPoint) -> Option<(&'a str, f64)> {
        let reference = self.reference;
        let mut best: Option<(&'a str, f64)> = None;
        for center in &reference.gazetteer {
            let d = point.distance_to(center.latitude, center.longitude);
            if best.is_none_or(|(_, best_d)| d < best_d) {
                best = Some((center.name.as_str(), d));
            }
        }

        best.filter(|&(_, d)| d <= reference.max_city_distance)
    }
}

#[cfg(test)]
#[path = "city_test.rs"]
mod tests;
