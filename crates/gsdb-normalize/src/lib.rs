pub mod city;
pub mod error;
pub mod normalizers;
pub mod raw;

pub use city::{CityResolution, CityResolver, GeoPoint};
pub use error::NormalizeError;
pub use normalizers::{normalizer_for, BrandNormalizer, NormalizedBatch, RowOutcome};
pub use raw::{load_raw_table, read_raw_rows};
