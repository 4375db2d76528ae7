mod aggregate;
mod pipeline;
mod report;

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use gsdb_core::{AppConfig, Brand, ReferenceData};

use crate::pipeline::CombineOptions;
use crate::report::ReportOptions;

/// Output file name used when only a data directory is given.
const DEFAULT_OUTPUT_FILE: &str = "final.csv";

#[derive(Debug, Parser)]
#[command(name = "gsdb")]
#[command(about = "Combine Georgian gas station exports into one canonical table")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Normalize all raw exports, write the canonical table and print the report (default)
    Combine {
        /// Directory holding the five raw brand CSVs
        #[arg(long)]
        data_dir: Option<PathBuf>,
        /// Canonical table destination
        #[arg(long)]
        output: Option<PathBuf>,
        /// Number of cities in the top-cities section
        #[arg(long)]
        top_cities: Option<usize>,
    },
    /// Print the report for an existing canonical table
    Report {
        /// Canonical table to read
        #[arg(long)]
        input: Option<PathBuf>,
        #[arg(long)]
        top_cities: Option<usize>,
        /// Brand whose coverage gaps are listed
        #[arg(long)]
        focus_brand: Option<Brand>,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = gsdb_core::load_app_config()?;
    init_tracing(&config)?;
    tracing::debug!(
        data_dir = %config.data_dir.display(),
        output = %config.output_path.display(),
        "configuration loaded"
    );

    let reference = load_reference(&config)?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        Some(Commands::Combine {
            data_dir,
            output,
            top_cities,
        }) => run_combine(&config, &reference, data_dir, output, top_cities, &mut out)?,
        Some(Commands::Report {
            input,
            top_cities,
            focus_brand,
        }) => {
            let input = input.unwrap_or_else(|| config.output_path.clone());
            let options = report_options(&config, top_cities, focus_brand)?;
            pipeline::run_report(&input, options, &mut out)?;
        }
        None => run_combine(&config, &reference, None, None, None, &mut out)?,
    }

    out.flush().context("flushing stdout")?;
    Ok(())
}

fn init_tracing(config: &AppConfig) -> anyhow::Result<()> {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .or_else(|_| tracing_subscriber::EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
    Ok(())
}

fn load_reference(config: &AppConfig) -> anyhow::Result<ReferenceData> {
    match config.reference_path.as_deref() {
        Some(path) => {
            let reference = gsdb_core::load_reference_data(path)?;
            tracing::info!(
                path = %path.display(),
                cities = reference.gazetteer.len(),
                "loaded reference data"
            );
            Ok(reference)
        }
        None => Ok(ReferenceData::default()),
    }
}

fn run_combine<W: Write>(
    config: &AppConfig,
    reference: &ReferenceData,
    data_dir: Option<PathBuf>,
    output: Option<PathBuf>,
    top_cities: Option<usize>,
    out: &mut W,
) -> anyhow::Result<()> {
    let (data_dir, output_path) = combine_paths(config, data_dir, output);
    let options = CombineOptions {
        data_dir: &data_dir,
        output_path: &output_path,
        report: report_options(config, top_cities, None)?,
    };
    pipeline::run_combine(&options, reference, out)?;
    Ok(())
}

/// Resolve input directory and output file, flags over config.
///
/// A `--data-dir` without `--output` writes next to the inputs rather than
/// to the configured output path.
fn combine_paths(
    config: &AppConfig,
    data_dir: Option<PathBuf>,
    output: Option<PathBuf>,
) -> (PathBuf, PathBuf) {
    match (data_dir, output) {
        (Some(dir), Some(output)) => (dir, output),
        (Some(dir), None) => {
            let output = default_output(&dir);
            (dir, output)
        }
        (None, Some(output)) => (config.data_dir.clone(), output),
        (None, None) => (config.data_dir.clone(), config.output_path.clone()),
    }
}

fn default_output(data_dir: &Path) -> PathBuf {
    data_dir.join(DEFAULT_OUTPUT_FILE)
}

fn report_options(
    config: &AppConfig,
    top_cities: Option<usize>,
    focus_brand: Option<Brand>,
) -> anyhow::Result<ReportOptions> {
    let top_cities = top_cities.unwrap_or(config.top_cities);
    if top_cities == 0 {
        anyhow::bail!("--top-cities must be at least 1");
    }
    Ok(ReportOptions {
        top_cities,
        focus_brand: focus_brand.unwrap_or(config.focus_brand),
    })
}
