pub mod app_config;
pub mod brand;
pub mod config;
pub mod reference;
pub mod station;

use thiserror::Error;

pub use app_config::AppConfig;
pub use brand::Brand;
pub use config::{load_app_config, load_app_config_from_env};
pub use reference::{load_reference_data, CityCenter, ReferenceData};
pub use station::{CanonicalStation, ExclusionRecord, RawRow, CANONICAL_COLUMNS};

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("unknown brand: {0}")]
    UnknownBrand(String),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read reference data file {path}: {source}")]
    ReferenceFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse reference data file: {0}")]
    ReferenceFileParse(#[from] serde_yaml::Error),

    #[error("reference data validation failed: {0}")]
    Validation(String),
}
