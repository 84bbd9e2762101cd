use std::io::Write;

use anyhow::Result;
use tabled::{settings::Style, Table, Tabled};

use crate::config::OutputFormat;
use crate::data::{ClimbSegment, ElevationSample};

/// Whole-track figures printed above the climb table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProfileSummary {
    pub samples: usize,
    pub total_distance: f64,
    pub min_elevation: f64,
    pub max_elevation: f64,
}

impl ProfileSummary {
    pub fn from_samples(samples: &[ElevationSample]) -> Self {
        let total_distance = match (samples.first(), samples.last()) {
            (Some(first), Some(last)) => last.distance - first.distance,
            _ => 0.0,
        };
        let (min_elevation, max_elevation) = samples.iter().fold(
            (f64::INFINITY, f64::NEG_INFINITY),
            |(lo, hi), s| (lo.min(s.elevation), hi.max(s.elevation)),
        );
        Self {
            samples: samples.len(),
            total_distance,
            min_elevation,
            max_elevation,
        }
    }
}

#[derive(Tabled)]
struct ClimbRow {
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Cat")]
    category: &'static str,
    #[tabled(rename = "Start km")]
    start: String,
    #[tabled(rename = "End km")]
    end: String,
    #[tabled(rename = "Length")]
    length: String,
    #[tabled(rename = "Gain")]
    gain: String,
    #[tabled(rename = "Avg %")]
    gradient: String,
    #[tabled(rename = "Score")]
    score: String,
    #[tabled(rename = "Summit")]
    summit: String,
}

impl From<&ClimbSegment> for ClimbRow {
    fn from(climb: &ClimbSegment) -> Self {
        Self {
            name: climb.name.clone(),
            category: climb.category.label(),
            start: format!("{:.2}", climb.start_distance),
            end: format!("{:.2}", climb.end_distance),
            length: format!("{:.2} km", climb.length),
            gain: format!("{:.0} m", climb.elevation_gain),
            gradient: format!("{:.1}", climb.average_gradient),
            score: format!("{:.1}", climb.score),
            summit: format!(
                "{:.0} m @ {:.2} km",
                climb.peak_elevation, climb.peak_distance
            ),
        }
    }
}

pub fn write_report<W: Write>(
    out: &mut W,
    format: OutputFormat,
    climbs: &[ClimbSegment],
    summary: &ProfileSummary,
) -> Result<()> {
    match format {
        OutputFormat::Table => write_table(out, climbs, summary),
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, climbs)?;
            writeln!(out)?;
            Ok(())
        }
        OutputFormat::Csv => {
            let mut writer = csv::Writer::from_writer(out);
            for climb in climbs {
                writer.serialize(climb)?;
            }
            writer.flush()?;
            Ok(())
        }
    }
}

fn write_table<W: Write>(
    out: &mut W,
    climbs: &[ClimbSegment],
    summary: &ProfileSummary,
) -> Result<()> {
    writeln!(out, "\n=== Climb Recon ===\n")?;
    writeln!(
        out,
        "Track: {:.2} km over {} points | Elevation {:.0} m to {:.0} m",
        summary.total_distance, summary.samples, summary.min_elevation, summary.max_elevation
    )?;

    if climbs.is_empty() {
        writeln!(out, "No categorized climbs detected.")?;
        return Ok(());
    }

    let total_gain: f64 = climbs.iter().map(|c| c.elevation_gain).sum();
    writeln!(
        out,
        "Climbs: {} | Climbing gain {:.0} m",
        climbs.len(),
        total_gain
    )?;

    let rows: Vec<ClimbRow> = climbs.iter().map(ClimbRow::from).collect();
    let mut table = Table::new(rows);
    table.with(Style::rounded());
    writeln!(out, "\n{table}\n")?;
    Ok(())
}
