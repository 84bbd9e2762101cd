use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use anyhow::{anyhow, Context, Result};
use csv::StringRecord;
use itertools::Itertools;
use thiserror::Error;
use tracing::debug;

use crate::config::InputFormat;
use crate::data::ElevationSample;

const EARTH_RADIUS_KM: f64 = 6371.0;

#[derive(Debug, Error)]
pub enum LoaderError {
    #[error("input contains no usable profile points")]
    Empty,

    #[error("line {line}: failed to parse numeric field '{field}' from value '{value}'")]
    ParseNumber {
        line: u64,
        field: &'static str,
        value: String,
    },

    #[error("GPX track has points but none of them carry an elevation")]
    NoElevation,

    #[error("GPX parsing error: {0}")]
    Gpx(String),

    #[error("sample {index} has a non-finite value")]
    NonFinite { index: usize },

    #[error("distance decreases at sample {index} ({previous} km -> {current} km)")]
    DistanceDecreased {
        index: usize,
        previous: f64,
        current: f64,
    },
}

/// Load a profile, choosing the parser from `format` or the file extension.
pub fn load_profile<P: AsRef<Path>>(
    path: P,
    format: Option<InputFormat>,
) -> Result<Vec<ElevationSample>> {
    let path_ref = path.as_ref();
    let format = format.unwrap_or_else(|| infer_format(path_ref));
    match format {
        InputFormat::Csv => load_profile_from_csv(path_ref),
        InputFormat::Gpx => load_profile_from_gpx(path_ref),
    }
}

pub fn infer_format(path: &Path) -> InputFormat {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("gpx") => InputFormat::Gpx,
        _ => InputFormat::Csv,
    }
}

pub fn load_profile_from_csv<P: AsRef<Path>>(path: P) -> Result<Vec<ElevationSample>> {
    let path_ref = path.as_ref();
    let file = File::open(path_ref).with_context(|| format!("failed to open {:?}", path_ref))?;
    parse_profile_csv(file)
}

/// Read `distance_km, elevation_m` rows. Header and blank rows are skipped.
pub fn parse_profile_csv<R: Read>(reader: R) -> Result<Vec<ElevationSample>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);

    let mut samples = Vec::new();
    for record in reader.records() {
        let record = record?;
        if record.iter().all(|field| field.trim().is_empty()) {
            continue;
        }
        if let Some(sample) = parse_record(&record)? {
            samples.push(sample);
        }
    }

    if samples.is_empty() {
        return Err(LoaderError::Empty.into());
    }
    debug!(samples = samples.len(), "loaded CSV profile");
    Ok(samples)
}

fn parse_record(record: &StringRecord) -> Result<Option<ElevationSample>> {
    let line = record.position().map_or(0, |pos| pos.line());
    let distance_field = record.get(0).unwrap_or("");

    // Header rows have a non-numeric first column.
    if distance_field.replace(',', "").parse::<f64>().is_err()
        && distance_field.chars().any(|c| c.is_ascii_alphabetic())
    {
        return Ok(None);
    }

    let distance = parse_number(record.get(0), "distance", line)?;
    let elevation = parse_number(record.get(1), "elevation", line)?;
    Ok(Some(ElevationSample::new(distance, elevation)))
}

fn parse_number(value: Option<&str>, field: &'static str, line: u64) -> Result<f64> {
    let value = match value {
        Some(value) if !value.is_empty() => value,
        _ => "<missing>",
    };
    value
        .replace(',', "")
        .parse::<f64>()
        .map_err(|_| LoaderError::ParseNumber {
            line,
            field,
            value: value.to_string(),
        })
        .map_err(anyhow::Error::from)
}

pub fn load_profile_from_gpx<P: AsRef<Path>>(path: P) -> Result<Vec<ElevationSample>> {
    let path_ref = path.as_ref();
    let file = File::open(path_ref).with_context(|| format!("failed to open {:?}", path_ref))?;
    parse_profile_gpx(BufReader::new(file))
}

/// Flatten every track segment into one profile with cumulative
/// great-circle distance. Points without elevation are skipped but still
/// advance the distance.
pub fn parse_profile_gpx<R: Read>(reader: R) -> Result<Vec<ElevationSample>> {
    let gpx = gpx::read(reader).map_err(|e| LoaderError::Gpx(e.to_string()))?;

    let waypoints: Vec<_> = gpx
        .tracks
        .iter()
        .flat_map(|track| track.segments.iter())
        .flat_map(|segment| segment.points.iter())
        .collect();
    if waypoints.is_empty() {
        return Err(LoaderError::Empty.into());
    }

    let mut samples = Vec::with_capacity(waypoints.len());
    let mut distance = 0.0;
    let mut skipped = 0usize;
    let mut previous: Option<(f64, f64)> = None;

    for waypoint in waypoints {
        let point = waypoint.point();
        let (lat, lon) = (point.y(), point.x());
        if let Some((prev_lat, prev_lon)) = previous {
            distance += haversine_km(prev_lat, prev_lon, lat, lon);
        }
        previous = Some((lat, lon));

        match waypoint.elevation {
            Some(elevation) => samples.push(ElevationSample::new(distance, elevation)),
            None => skipped += 1,
        }
    }

    if samples.is_empty() {
        return Err(LoaderError::NoElevation.into());
    }
    debug!(
        samples = samples.len(),
        skipped,
        total_km = distance,
        "loaded GPX profile"
    );
    Ok(samples)
}

/// Great-circle distance in kilometers between two WGS84 coordinates.
pub fn haversine_km(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let d_lat = (lat2 - lat1).to_radians();
    let d_lon = (lon2 - lon1).to_radians();
    let a = (d_lat / 2.0).sin().powi(2)
        + lat1.to_radians().cos() * lat2.to_radians().cos() * (d_lon / 2.0).sin().powi(2);
    2.0 * EARTH_RADIUS_KM * a.sqrt().atan2((1.0 - a).sqrt())
}

pub fn validate_profile(samples: &[ElevationSample]) -> Result<()> {
    if samples.is_empty() {
        return Err(LoaderError::Empty.into());
    }

    if let Some(index) = samples
        .iter()
        .position(|s| !s.distance.is_finite() || !s.elevation.is_finite())
    {
        return Err(LoaderError::NonFinite { index }.into());
    }

    if let Some((index, (prev, curr))) = samples
        .iter()
        .tuple_windows()
        .enumerate()
        .find(|(_, (prev, curr))| curr.distance < prev.distance)
    {
        return Err(anyhow!(LoaderError::DistanceDecreased {
            index: index + 1,
            previous: prev.distance,
            current: curr.distance,
        }));
    }

    Ok(())
}
