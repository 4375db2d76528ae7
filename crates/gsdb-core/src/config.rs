use std::path::PathBuf;

use crate::app_config::AppConfig;
use crate::{Brand, ConfigError};

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Every setting has a default, so an empty environment yields a usable
/// config pointing at `./data`.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<usize>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let log_level = or_default("GSDB_LOG_LEVEL", "info");

    let data_dir = PathBuf::from(or_default("GSDB_DATA_DIR", "./data"));
    let output_path = lookup("GSDB_OUTPUT_PATH")
        .map_or_else(|_| data_dir.join("final.csv"), PathBuf::from);
    let reference_path = lookup("GSDB_REFERENCE_PATH")
        .ok()
        .filter(|s| !s.trim().is_empty())
        .map(PathBuf::from);

    let top_cities = parse_usize("GSDB_TOP_CITIES", "15")?;
    if top_cities == 0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "GSDB_TOP_CITIES".to_string(),
            reason: "must be at least 1".to_string(),
        });
    }

    let focus_raw = or_default("GSDB_FOCUS_BRAND", "SGP");
    let focus_brand = focus_raw
        .parse::<Brand>()
        .map_err(|e| ConfigError::InvalidEnvVar {
            var: "GSDB_FOCUS_BRAND".to_string(),
            reason: e.to_string(),
        })?;

    Ok(AppConfig {
        log_level,
        data_dir,
        output_path,
        reference_path,
        top_cities,
        focus_brand,
    })
}
