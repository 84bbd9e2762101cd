pub mod merging;
pub mod naming;
pub mod scoring;
pub mod segmentation;
pub mod smoothing;

pub use merging::merge_climbs;
pub use naming::climb_name;
pub use scoring::{average_gradient, categorize, climb_score, step_gradient};
pub use segmentation::{find_peak, segment_climbs};
pub use smoothing::smooth_profile;

use thiserror::Error;
use tracing::debug;

use crate::data::{ClimbSegment, DetectionParams, ElevationSample, NameLexicon};

/// Profiles with fewer samples than this yield no climbs.
pub const MIN_PROFILE_SAMPLES: usize = 10;

#[derive(Debug, Error, PartialEq)]
pub enum ProfileError {
    #[error("sample {index} is not finite (distance {distance}, elevation {elevation})")]
    NonFiniteSample {
        index: usize,
        distance: f64,
        elevation: f64,
    },
}

/// Run the full pipeline: smooth, segment, then merge neighbouring climbs.
///
/// Short profiles are not an error and simply produce nothing; non-finite
/// coordinates are rejected before any analysis happens.
pub fn detect_climbs(
    samples: &[ElevationSample],
    params: &DetectionParams,
    lexicon: &NameLexicon,
) -> Result<Vec<ClimbSegment>, ProfileError> {
    if let Some((index, sample)) = samples
        .iter()
        .enumerate()
        .find(|(_, s)| !s.distance.is_finite() || !s.elevation.is_finite())
    {
        return Err(ProfileError::NonFiniteSample {
            index,
            distance: sample.distance,
            elevation: sample.elevation,
        });
    }

    if samples.len() < MIN_PROFILE_SAMPLES {
        debug!(samples = samples.len(), "profile too short for climb detection");
        return Ok(Vec::new());
    }

    let smoothed = smooth_profile(samples, params.smoothing_window);
    let candidates = segment_climbs(&smoothed, params, lexicon);
    let candidate_count = candidates.len();
    let climbs = merge_climbs(candidates, params.min_distance_between_climbs);
    debug!(
        samples = samples.len(),
        candidates = candidate_count,
        kept = climbs.len(),
        "climb detection finished"
    );

    Ok(climbs)
}
