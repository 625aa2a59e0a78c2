//! loanfeat - Contract Feature Batch
//!
//! Reads applications from CSV, computes the contract features of every row,
//! and writes them back out as CSV.

use std::path::{Path, PathBuf};

use clap::Parser;
use loanfeat_core::{ContractProcessor, FeatureConfig};
use loanfeat_io::{load_applications, save_features};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "loanfeat", version, about = "Compute credit-risk features from contract history")]
struct Cli {
    /// Input CSV with id, application_date and contracts columns
    #[arg(short = 'i', long = "input", default_value = "data/data.csv")]
    input: PathBuf,

    /// Output CSV (parent directories are created)
    #[arg(short = 'o', long = "output", default_value = "data/contract_features.csv")]
    output: PathBuf,

    /// Business-rule overrides (TOML, or JSON by extension)
    #[arg(short = 'c', long = "config")]
    config: Option<PathBuf>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Setup logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(&cli) {
        tracing::error!("Error in main process: {}", e);
        return Err(e);
    }
    Ok(())
}

fn run(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = match &cli.config {
        Some(path) => load_config(path)?,
        None => FeatureConfig::default(),
    };

    let rows = load_applications(&cli.input)?;
    let features = ContractProcessor::new(&config).process_rows(&rows);
    save_features(&cli.output, &features, &config)?;
    Ok(())
}

fn load_config(path: &Path) -> Result<FeatureConfig, Box<dyn std::error::Error>> {
    let text = std::fs::read_to_string(path)?;
    let config = match path.extension().and_then(|e| e.to_str()) {
        Some("json") => FeatureConfig::from_json(&text)?,
        _ => FeatureConfig::from_toml(&text)?,
    };
    tracing::info!("Loaded configuration from {}", path.display());
    Ok(config)
}
