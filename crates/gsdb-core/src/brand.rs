use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::CoreError;

/// A fuel retail brand with its own raw export.
///
/// The set is closed: every canonical station belongs to exactly one of
/// these, and each variant owns a disjoint `station_id` prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Brand {
    Gulf,
    Rompetrol,
    Lukoil,
    Wissol,
    #[serde(rename = "SGP")]
    Sgp,
}

impl Brand {
    /// Pipeline order. Console output follows this order; the canonical
    /// table does not depend on it.
    pub const ALL: [Brand; 5] = [
        Brand::Gulf,
        Brand::Rompetrol,
        Brand::Lukoil,
        Brand::Wissol,
        Brand::Sgp,
    ];

    /// Display name written to the `brand` column.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Brand::Gulf => "Gulf",
            Brand::Rompetrol => "Rompetrol",
            Brand::Lukoil => "Lukoil",
            Brand::Wissol => "Wissol",
            Brand::Sgp => "SGP",
        }
    }

    /// Namespace prepended to source ids to form `station_id`.
    #[must_use]
    pub fn id_prefix(self) -> &'static str {
        match self {
            Brand::Gulf => "GULF",
            Brand::Rompetrol => "ROMPETROL",
            Brand::Lukoil => "LUKOIL",
            Brand::Wissol => "WISSOL",
            Brand::Sgp => "SGP",
        }
    }

    /// File name of the brand's raw export inside the data directory.
    #[must_use]
    pub fn raw_file_name(self) -> &'static str {
        match self {
            Brand::Gulf => "gulf.csv",
            Brand::Rompetrol => "rompetrol.csv",
            Brand::Lukoil => "lukoil.csv",
            Brand::Wissol => "wissol.csv",
            Brand::Sgp => "sgp.csv",
        }
    }

    /// Build the namespaced station id for a source record.
    #[must_use]
    pub fn station_id(self, source_id: &str) -> String {
        format!("{}_{source_id}", self.id_prefix())
    }
}

impl std::fmt::Display for Brand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Brand {
    type Err = CoreError;

    /// Accepts either the display name or the id prefix, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        Brand::ALL
            .into_iter()
            .find(|b| {
                b.as_str().eq_ignore_ascii_case(needle) || b.id_prefix().eq_ignore_ascii_case(needle)
            })
            .ok_or_else(|| CoreError::UnknownBrand(s.to_string()))
    }
}

#[cfg(test)]
#[path = "brand_test.rs"]
mod tests;
