use statrs::statistics::Statistics;

use crate::data::ElevationSample;

/// Profiles shorter than this are returned untouched.
pub const MIN_SMOOTHING_SAMPLES: usize = 5;

/// Centered moving average over elevations.
///
/// Every point with `window` neighbours on both sides gets the mean of the
/// `2 * window + 1` elevations around it. Points closer to either end keep
/// their raw elevation; there is no padding or reflection. Distances are
/// never altered.
pub fn smooth_profile(samples: &[ElevationSample], window: usize) -> Vec<ElevationSample> {
    if samples.len() < MIN_SMOOTHING_SAMPLES || window == 0 {
        return samples.to_vec();
    }

    samples
        .iter()
        .enumerate()
        .map(|(idx, sample)| {
            if idx < window || idx + window >= samples.len() {
                return *sample;
            }
            let mean = samples[idx - window..=idx + window]
                .iter()
                .map(|s| s.elevation)
                .mean();
            ElevationSample::new(sample.distance, mean)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(elevations: &[f64]) -> Vec<ElevationSample> {
        elevations
            .iter()
            .enumerate()
            .map(|(idx, &ele)| ElevationSample::new(idx as f64 * 0.1, ele))
            .collect()
    }

    #[test]
    fn short_profiles_pass_through() {
        let samples = profile(&[1.0, 50.0, 3.0, 80.0]);
        assert_eq!(smooth_profile(&samples, 3), samples);
    }

    #[test]
    fn edges_are_untouched_and_interior_is_averaged() {
        let samples = profile(&[0.0, 0.0, 0.0, 70.0, 0.0, 0.0, 0.0, 0.0, 0.0]);
        let smoothed = smooth_profile(&samples, 3);

        assert_eq!(smoothed.len(), samples.len());
        for idx in [0, 1, 2, 6, 7, 8] {
            assert_eq!(smoothed[idx], samples[idx]);
        }
        for idx in 3..=5 {
            assert!((smoothed[idx].elevation - 10.0).abs() < 1e-9);
            assert_eq!(smoothed[idx].distance, samples[idx].distance);
        }
    }

    #[test]
    fn linear_ramp_is_preserved() {
        let samples = profile(&(0..20).map(|i| i as f64 * 8.0).collect::<Vec<_>>());
        let smoothed = smooth_profile(&samples, 3);
        for (raw, smooth) in samples.iter().zip(&smoothed) {
            assert!((raw.elevation - smooth.elevation).abs() < 1e-9);
        }
    }

    #[test]
    fn alternating_noise_is_damped() {
        let samples = profile(
            &(0..30)
                .map(|i| if i % 2 == 0 { 95.0 } else { 105.0 })
                .collect::<Vec<_>>(),
        );
        let smoothed = smooth_profile(&samples, 3);
        for sample in &smoothed[3..27] {
            assert!((sample.elevation - 100.0).abs() <= 10.0 / 7.0 + 1e-9);
        }
    }
}
