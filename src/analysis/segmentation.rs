use tracing::trace;

use crate::analysis::naming::climb_name;
use crate::analysis::scoring::{average_gradient, categorize, climb_score, step_gradient};
use crate::data::{ClimbSegment, DetectionParams, ElevationSample, NameLexicon};

#[derive(Debug, Clone, Copy, PartialEq)]
enum ScanState {
    Idle,
    InClimb { start: usize },
}

/// Hysteresis scan over consecutive sample pairs.
///
/// A climb opens on the first pair steeper than the threshold and closes on
/// the first pair below it (or at the last sample). Closed windows that are
/// too short, gain too little or average too flat are discarded. Expects an
/// already smoothed profile; segments come out ordered by start distance.
pub fn segment_climbs(
    samples: &[ElevationSample],
    params: &DetectionParams,
    lexicon: &NameLexicon,
) -> Vec<ClimbSegment> {
    let mut climbs = Vec::new();
    if samples.len() < 2 {
        return climbs;
    }

    let last = samples.len() - 1;
    let mut state = ScanState::Idle;

    for idx in 1..samples.len() {
        let prev = &samples[idx - 1];
        let curr = &samples[idx];
        let gradient = step_gradient(
            curr.distance - prev.distance,
            curr.elevation - prev.elevation,
        );

        state = match state {
            ScanState::Idle if gradient > params.gradient_threshold => {
                ScanState::InClimb { start: idx - 1 }
            }
            ScanState::InClimb { start }
                if gradient < params.gradient_threshold || idx == last =>
            {
                if let Some(climb) = close_climb(samples, start, idx, params, lexicon) {
                    climbs.push(climb);
                }
                ScanState::Idle
            }
            other => other,
        };
    }

    climbs
}

fn close_climb(
    samples: &[ElevationSample],
    start: usize,
    end: usize,
    params: &DetectionParams,
    lexicon: &NameLexicon,
) -> Option<ClimbSegment> {
    let first = samples[start];
    let closing = samples[end];
    let length = closing.distance - first.distance;
    let elevation_gain = closing.elevation - first.elevation;

    if length < params.min_climb_length || elevation_gain < params.min_elevation_gain {
        trace!(
            start_km = first.distance,
            length,
            elevation_gain,
            "discarding climb below length/gain floor"
        );
        return None;
    }

    let gradient = average_gradient(elevation_gain, length);
    if gradient < params.gradient_threshold {
        trace!(
            start_km = first.distance,
            gradient,
            "discarding climb below gradient floor"
        );
        return None;
    }

    let (peak_distance, peak_elevation) =
        find_peak(samples, end, params.peak_lookahead, params.peak_drop);
    let score = climb_score(length, gradient);

    Some(ClimbSegment {
        start_distance: first.distance,
        end_distance: closing.distance,
        start_elevation: first.elevation,
        end_elevation: closing.elevation,
        length,
        elevation_gain,
        average_gradient: gradient,
        score,
        category: categorize(score),
        peak_distance,
        peak_elevation,
        name: climb_name(peak_elevation, length, gradient, lexicon),
    })
}

/// Highest point reached from `from` within the next `lookahead` samples.
///
/// The scan stops early once the profile falls more than `drop` meters below
/// the best elevation seen so far.
pub fn find_peak(
    samples: &[ElevationSample],
    from: usize,
    lookahead: usize,
    drop: f64,
) -> (f64, f64) {
    let mut peak = samples[from];
    let stop = from.saturating_add(lookahead).min(samples.len() - 1);

    for sample in &samples[from + 1..=stop] {
        if sample.elevation > peak.elevation {
            peak = *sample;
        } else if peak.elevation - sample.elevation > drop {
            break;
        }
    }

    (peak.distance, peak.elevation)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ramp(grades: &[(usize, f64)]) -> Vec<ElevationSample> {
        let mut samples = vec![ElevationSample::new(0.0, 100.0)];
        let mut elevation = 100.0;
        for &(steps, grade) in grades {
            for _ in 0..steps {
                elevation += grade / 100.0 * 100.0;
                let distance = samples.len() as f64 * 0.1;
                samples.push(ElevationSample::new(distance, elevation));
            }
        }
        samples
    }

    #[test]
    fn opens_and_closes_on_threshold() {
        let samples = ramp(&[(10, 0.0), (20, 6.0), (10, 0.0)]);
        let climbs = segment_climbs(&samples, &DetectionParams::default(), &NameLexicon::default());

        assert_eq!(climbs.len(), 1);
        let climb = &climbs[0];
        assert!((climb.start_distance - 1.0).abs() < 1e-9);
        // closes on the first flat pair, which is included in the window
        assert!((climb.end_distance - 3.1).abs() < 1e-9);
        assert!((climb.elevation_gain - 120.0).abs() < 1e-6);
        assert!((climb.length - 2.1).abs() < 1e-9);
        assert!((climb.average_gradient - 120.0 / 21.0).abs() < 1e-6);
        assert_eq!(climb.name, "Bosse 200m");
    }

    #[test]
    fn short_or_shallow_windows_are_discarded() {
        let params = DetectionParams::default();
        let lexicon = NameLexicon::default();

        // 30 m gained over a 0.4 km window
        let short = ramp(&[(5, 0.0), (3, 10.0), (5, 0.0)]);
        assert!(segment_climbs(&short, &params, &lexicon).is_empty());

        // 0.7 km window, only 24 m gained
        let small = ramp(&[(5, 0.0), (6, 4.0), (5, 0.0)]);
        assert!(segment_climbs(&small, &params, &lexicon).is_empty());
    }

    #[test]
    fn gentle_grades_never_open_a_climb() {
        let samples = ramp(&[(60, 2.5)]);
        let climbs = segment_climbs(&samples, &DetectionParams::default(), &NameLexicon::default());
        assert!(climbs.is_empty());
    }

    #[test]
    fn climb_running_to_the_last_sample_is_force_closed() {
        let samples = ramp(&[(10, 0.0), (15, 7.0)]);
        let climbs = segment_climbs(&samples, &DetectionParams::default(), &NameLexicon::default());

        assert_eq!(climbs.len(), 1);
        assert!((climbs[0].end_distance - 2.5).abs() < 1e-9);
        assert!((climbs[0].peak_distance - 2.5).abs() < 1e-9);
    }

    #[test]
    fn forced_close_still_applies_gates() {
        let samples = ramp(&[(20, 0.0), (3, 9.0)]);
        let climbs = segment_climbs(&samples, &DetectionParams::default(), &NameLexicon::default());
        assert!(climbs.is_empty());
    }

    #[test]
    fn zero_distance_steps_never_open_a_climb() {
        let mut samples: Vec<ElevationSample> = (0..12)
            .map(|idx| ElevationSample::new(1.0, 100.0 + idx as f64 * 50.0))
            .collect();
        samples.insert(0, ElevationSample::new(0.0, 100.0));
        let climbs = segment_climbs(&samples, &DetectionParams::default(), &NameLexicon::default());
        assert!(climbs.is_empty());
    }

    #[test]
    fn peak_scan_stops_after_significant_drop() {
        let samples: Vec<ElevationSample> = [500.0, 505.0, 512.0, 498.0, 530.0, 540.0]
            .iter()
            .enumerate()
            .map(|(idx, &ele)| ElevationSample::new(idx as f64 * 0.1, ele))
            .collect();
        let (distance, elevation) = find_peak(&samples, 0, 20, 10.0);
        assert!((distance - 0.2).abs() < 1e-9);
        assert_eq!(elevation, 512.0);
    }

    #[test]
    fn peak_scan_is_bounded_by_lookahead() {
        let samples = ramp(&[(40, 5.0)]);
        let (distance, _) = find_peak(&samples, 10, 20, 10.0);
        assert!((distance - 3.0).abs() < 1e-9);

        let (distance, _) = find_peak(&samples, 35, 20, 10.0);
        assert!((distance - 4.0).abs() < 1e-9);
    }

    #[test]
    fn unbounded_lookahead_stops_at_the_last_sample() {
        let samples = ramp(&[(30, 8.0)]);
        let last = samples[samples.len() - 1];
        assert_eq!(
            find_peak(&samples, 10, usize::MAX, 10.0),
            (last.distance, last.elevation)
        );

        let params = DetectionParams {
            peak_lookahead: usize::MAX,
            ..DetectionParams::default()
        };
        let climbs = segment_climbs(&samples, &params, &NameLexicon::default());
        assert_eq!(climbs.len(), 1);
    }

    /// Half-kilometer steps keep distance deltas exact so a pair can sit
    /// precisely on the threshold.
    fn stepped(rises: &[f64]) -> Vec<ElevationSample> {
        let mut samples = vec![ElevationSample::new(0.0, 100.0)];
        for (idx, rise) in rises.iter().enumerate() {
            let elevation = samples[idx].elevation + rise;
            samples.push(ElevationSample::new((idx + 1) as f64 * 0.5, elevation));
        }
        samples
    }

    #[test]
    fn pair_on_the_threshold_does_not_open_a_climb() {
        let params = DetectionParams {
            gradient_threshold: step_gradient(0.5, 15.0),
            ..DetectionParams::default()
        };
        let samples = stepped(&[15.0; 12]);
        assert!(segment_climbs(&samples, &params, &NameLexicon::default()).is_empty());
    }

    #[test]
    fn pair_on_the_threshold_does_not_close_a_climb() {
        let params = DetectionParams {
            gradient_threshold: step_gradient(0.5, 15.0),
            ..DetectionParams::default()
        };
        let samples = stepped(&[40.0, 15.0, 15.0, 15.0, 15.0, 15.0, 0.0, 0.0, 0.0]);
        let climbs = segment_climbs(&samples, &params, &NameLexicon::default());

        assert_eq!(climbs.len(), 1);
        assert_eq!(climbs[0].start_distance, 0.0);
        assert_eq!(climbs[0].end_distance, 3.5);
        assert_eq!(climbs[0].elevation_gain, 115.0);
    }

    #[test]
    fn climb_opened_by_the_final_pair_is_not_evaluated() {
        let params = DetectionParams {
            min_climb_length: 0.0,
            min_elevation_gain: 0.0,
            ..DetectionParams::default()
        };
        let samples = ramp(&[(20, 0.0), (1, 50.0)]);
        assert!(segment_climbs(&samples, &params, &NameLexicon::default()).is_empty());
    }

    #[test]
    fn peak_tolerates_small_dips() {
        let samples: Vec<ElevationSample> = [500.0, 495.0, 492.0, 510.0]
            .iter()
            .enumerate()
            .map(|(idx, &ele)| ElevationSample::new(idx as f64 * 0.1, ele))
            .collect();
        assert_eq!(find_peak(&samples, 0, 20, 10.0).1, 510.0);
    }
}
