use std::io;
use std::path::Path;

use anyhow::{bail, Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use climb_mapping::analysis::detect_climbs;
use climb_mapping::config::AppConfig;
use climb_mapping::data::NameLexicon;
use climb_mapping::loader::{load_profile, validate_profile};
use climb_mapping::output::{write_report, ProfileSummary};

fn init_logging(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_directive()));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}

fn main() -> Result<()> {
    let config = AppConfig::parse();
    init_logging(&config);
    run(&config)
}

fn run(config: &AppConfig) -> Result<()> {
    let input_path = &config.input_path;
    if !Path::new(input_path).exists() {
        bail!("input file {:?} does not exist", input_path);
    }

    let samples = load_profile(input_path, config.input_format)
        .with_context(|| format!("failed to load profile from {:?}", input_path))?;
    validate_profile(&samples)?;
    info!(samples = samples.len(), "profile loaded");

    let params = config.detection_params();
    let climbs = detect_climbs(&samples, &params, &NameLexicon::default())?;
    info!(climbs = climbs.len(), "climb detection complete");

    let summary = ProfileSummary::from_samples(&samples);
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    write_report(&mut handle, config.format, &climbs, &summary)
}
