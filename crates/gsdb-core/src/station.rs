//! Row and record types shared by the loader, normalizers and aggregator.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::Brand;

/// Column order of the canonical table.
pub const CANONICAL_COLUMNS: [&str; 12] = [
    "station_id",
    "brand",
    "name",
    "address",
    "city",
    "latitude",
    "longitude",
    "fuel_types",
    "services",
    "working_hours",
    "phone",
    "station_type",
];

/// One row of a brand's raw export, keyed by that brand's own column names.
///
/// Nothing about the schema is assumed; absent columns read as `""`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawRow {
    fields: HashMap<String, String>,
}

impl RawRow {
    /// Value of `key`, or the empty string when the column is absent.
    #[must_use]
    pub fn get(&self, key: &str) -> &str {
        self.fields.get(key).map_or("", String::as_str)
    }

    /// Like [`RawRow::get`] with surrounding whitespace removed.
    #[must_use]
    pub fn trimmed(&self, key: &str) -> &str {
        self.get(key).trim()
    }
}

impl<K, V> FromIterator<(K, V)> for RawRow
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            fields: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// A gas station in the unified schema.
///
/// Field order is the canonical column order; every field is a string and
/// unknown values are `""`, never absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CanonicalStation {
    pub station_id: String,
    pub brand: Brand,
    pub name: String,
    pub address: String,
    pub city: String,
    /// Source text, precision preserved.
    pub latitude: String,
    pub longitude: String,
    /// `", "`-joined labels in source order.
    pub fuel_types: String,
    pub services: String,
    pub working_hours: String,
    pub phone: String,
    pub station_type: String,
}

impl CanonicalStation {
    /// An otherwise empty station carrying its namespaced id and brand.
    #[must_use]
    pub fn new(brand: Brand, source_id: &str) -> Self {
        Self {
            station_id: brand.station_id(source_id),
            brand,
            name: String::new(),
            address: String::new(),
            city: String::new(),
            latitude: String::new(),
            longitude: String::new(),
            fuel_types: String::new(),
            services: String::new(),
            working_hours: String::new(),
            phone: String::new(),
            station_type: String::new(),
        }
    }

    /// Copy the source coordinate text verbatim.
    #[must_use]
    pub fn with_coordinates(mut self, row: &RawRow) -> Self {
        self.latitude = row.get("latitude").to_string();
        self.longitude = row.get("longitude").to_string();
        self
    }
}

/// A raw row dropped by a brand's exclusion rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExclusionRecord {
    pub source_id: String,
    pub display_name: String,
    pub reason: String,
}

impl ExclusionRecord {
    #[must_use]
    pub fn new(
        source_id: impl Into<String>,
        display_name: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self {
            source_id: source_id.into(),
            display_name: display_name.into(),
            reason: reason.into(),
        }
    }
}
