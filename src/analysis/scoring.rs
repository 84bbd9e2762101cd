use crate::data::ClimbCategory;

/// Average grade in percent for a gain in meters over a length in kilometers.
pub fn average_gradient(elevation_gain: f64, length_km: f64) -> f64 {
    if length_km <= 0.0 {
        return 0.0;
    }
    elevation_gain / (length_km * 1000.0) * 100.0
}

/// Grade between two consecutive samples. Zero when the distance does not advance.
pub fn step_gradient(distance_delta_km: f64, elevation_delta_m: f64) -> f64 {
    let run = distance_delta_km.max(0.0);
    if run == 0.0 {
        return 0.0;
    }
    elevation_delta_m / (run * 1000.0) * 100.0
}

/// Difficulty score: length times squared average gradient.
pub fn climb_score(length_km: f64, average_gradient: f64) -> f64 {
    length_km * average_gradient * average_gradient
}

pub fn categorize(score: f64) -> ClimbCategory {
    if score >= 600.0 {
        ClimbCategory::Hc
    } else if score >= 300.0 {
        ClimbCategory::One
    } else if score >= 150.0 {
        ClimbCategory::Two
    } else if score >= 75.0 {
        ClimbCategory::Three
    } else if score > 0.0 {
        ClimbCategory::Four
    } else {
        ClimbCategory::Uncategorized
    }
}
