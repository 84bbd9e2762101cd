use tracing::trace;

use crate::data::ClimbSegment;

/// Collapse climbs that sit too close together.
///
/// Greedy, left to right: each candidate is compared only with the most
/// recently kept climb. If the gap between them (candidate start minus kept
/// end) is under `min_distance_km`, the strictly higher score wins the slot
/// and the loser is dropped. Earlier kept climbs are never revisited, so the
/// result is not guaranteed to be the best-scoring non-colliding set.
pub fn merge_climbs(candidates: Vec<ClimbSegment>, min_distance_km: f64) -> Vec<ClimbSegment> {
    let mut kept: Vec<ClimbSegment> = Vec::with_capacity(candidates.len());

    for candidate in candidates {
        let Some(last) = kept.last_mut() else {
            kept.push(candidate);
            continue;
        };

        let gap = candidate.start_distance - last.end_distance;
        if gap >= min_distance_km {
            kept.push(candidate);
        } else if candidate.score > last.score {
            trace!(
                replaced = %last.name,
                by = %candidate.name,
                gap,
                "colliding climb superseded"
            );
            *last = candidate;
        } else {
            trace!(dropped = %candidate.name, gap, "colliding climb dropped");
        }
    }

    kept
}
