use crate::core::distance::great_circle_distance_km;
use crate::models::{Candidate, RankedCandidate};
use geo::Point;
use std::cmp::Ordering;

/// Rank candidates by great-circle distance from `origin`
///
/// # Pipeline Stages
/// 1. Eligibility: both coordinates present and in range
/// 2. Distance from the query point (unrounded)
/// 3. Sort ascending by distance, then by user id
///
/// Rounding happens only on output, so two candidates that round to the
/// same tenth still keep their true order.
pub fn rank_candidates(origin: Point<f64>, candidates: Vec<Candidate>) -> Vec<RankedCandidate> {
    let mut ranked: Vec<RankedCandidate> = candidates
        .into_iter()
        .filter_map(|candidate| {
            let location = candidate.location()?;
            Some(RankedCandidate {
                distance_km: great_circle_distance_km(origin, location),
                candidate,
            })
        })
        .collect();

    ranked.sort_by(|a, b| {
        a.distance_km
            .partial_cmp(&b.distance_km)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.candidate.id.cmp(&b.candidate.id))
    });

    ranked
}
