use std::path::PathBuf;

use crate::Brand;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub log_level: String,
    /// Directory holding the five raw brand exports.
    pub data_dir: PathBuf,
    /// Destination of the canonical table.
    pub output_path: PathBuf,
    /// Optional YAML replacing the built-in reference tables.
    pub reference_path: Option<PathBuf>,
    /// How many cities the report lists.
    pub top_cities: usize,
    /// Brand whose coverage gaps the report computes.
    pub focus_brand: Brand,
}
