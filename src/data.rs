use std::fmt;

use serde::Serialize;

/// Single profile point: cumulative distance along the track and elevation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ElevationSample {
    /// Cumulative distance in kilometers.
    pub distance: f64,
    /// Elevation in meters.
    pub elevation: f64,
}

impl ElevationSample {
    pub fn new(distance: f64, elevation: f64) -> Self {
        Self {
            distance,
            elevation,
        }
    }
}

/// Difficulty tier, HC being the hardest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ClimbCategory {
    #[serde(rename = "HC")]
    Hc,
    #[serde(rename = "1")]
    One,
    #[serde(rename = "2")]
    Two,
    #[serde(rename = "3")]
    Three,
    #[serde(rename = "4")]
    Four,
    #[serde(rename = "none")]
    Uncategorized,
}

impl ClimbCategory {
    pub fn label(self) -> &'static str {
        match self {
            ClimbCategory::Hc => "HC",
            ClimbCategory::One => "1",
            ClimbCategory::Two => "2",
            ClimbCategory::Three => "3",
            ClimbCategory::Four => "4",
            ClimbCategory::Uncategorized => "none",
        }
    }
}

impl fmt::Display for ClimbCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Detected climb with its score, category and refined peak.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClimbSegment {
    pub start_distance: f64,
    pub end_distance: f64,
    pub start_elevation: f64,
    pub end_elevation: f64,
    /// Kilometers.
    pub length: f64,
    /// Meters, measured between the nominal boundaries.
    pub elevation_gain: f64,
    /// Percent.
    pub average_gradient: f64,
    pub score: f64,
    pub category: ClimbCategory,
    pub peak_distance: f64,
    pub peak_elevation: f64,
    pub name: String,
}

/// Thresholds governing smoothing, segmentation and merging.
#[derive(Debug, Clone, PartialEq)]
pub struct DetectionParams {
    /// Percent grade that opens and closes a climb window.
    pub gradient_threshold: f64,
    /// Kilometers.
    pub min_climb_length: f64,
    /// Meters.
    pub min_elevation_gain: f64,
    /// Half-width of the centered moving average, in samples.
    pub smoothing_window: usize,
    /// Extra samples scanned past a climb's end when refining the peak.
    pub peak_lookahead: usize,
    /// Meters below the running maximum that end the peak scan.
    pub peak_drop: f64,
    /// Kilometers between one climb's end and the next one's start.
    pub min_distance_between_climbs: f64,
}

impl Default for DetectionParams {
    fn default() -> Self {
        Self {
            gradient_threshold: 3.0,
            min_climb_length: 0.5,
            min_elevation_gain: 30.0,
            smoothing_window: 3,
            peak_lookahead: 20,
            peak_drop: 10.0,
            min_distance_between_climbs: 2.0,
        }
    }
}

/// Words used when naming climbs. Purely cosmetic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameLexicon {
    /// Peak above 1500 m.
    pub high_pass: String,
    /// Peak above 1000 m.
    pub high_hill: String,
    /// Average gradient above 10 %.
    pub steep_wall: String,
    /// Longer than 10 km.
    pub long_climb: String,
    pub default: String,
}

impl Default for NameLexicon {
    fn default() -> Self {
        Self {
            high_pass: "Col".to_string(),
            high_hill: "Côte".to_string(),
            steep_wall: "Mur".to_string(),
            long_climb: "Montée".to_string(),
            default: "Bosse".to_string(),
        }
    }
}
