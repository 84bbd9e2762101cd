use clap::{ArgAction, Parser, ValueEnum};

use crate::data::DetectionParams;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum InputFormat {
    Csv,
    Gpx,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
    Csv,
}

/// Command-line configuration for the climb detection tool.
#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct AppConfig {
    /// Input file: a GPX track or a CSV of distance_km,elevation_m rows.
    #[arg(short = 'i', long = "input", value_name = "FILE")]
    pub input_path: String,

    /// Force the input format instead of inferring it from the file extension.
    #[arg(long, value_enum)]
    pub input_format: Option<InputFormat>,

    /// Gradient (percent) that opens and closes a climb.
    #[arg(long, default_value_t = 3.0)]
    pub gradient_threshold: f64,

    /// Minimum climb length in kilometers.
    #[arg(long, default_value_t = 0.5)]
    pub min_climb_length: f64,

    /// Minimum elevation gain in meters.
    #[arg(long, default_value_t = 30.0)]
    pub min_elevation_gain: f64,

    /// Half-width of the elevation moving average, in samples.
    #[arg(long, default_value_t = 3)]
    pub smoothing_window: usize,

    /// Samples scanned past a climb's end to locate its true summit.
    #[arg(long, default_value_t = 20)]
    pub peak_lookahead: usize,

    /// Drop in meters below the running summit that stops the peak scan.
    #[arg(long, default_value_t = 10.0)]
    pub peak_drop: f64,

    /// Minimum gap in kilometers between consecutive climbs before they are merged.
    #[arg(long, default_value_t = 2.0)]
    pub min_distance_between_climbs: f64,

    /// Report format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,

    /// Increase log verbosity (-v debug, -vv trace). RUST_LOG takes precedence.
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count)]
    pub verbose: u8,
}

impl AppConfig {
    pub fn detection_params(&self) -> DetectionParams {
        DetectionParams {
            gradient_threshold: self.gradient_threshold,
            min_climb_length: self.min_climb_length,
            min_elevation_gain: self.min_elevation_gain,
            smoothing_window: self.smoothing_window,
            peak_lookahead: self.peak_lookahead,
            peak_drop: self.peak_drop,
            min_distance_between_climbs: self.min_distance_between_climbs,
        }
    }

    pub fn log_directive(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "debug",
            _ => "trace",
        }
    }
}
