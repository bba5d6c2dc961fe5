use crate::core::distance::{is_valid_coordinate, round_distance};
use crate::core::pagination::{PageLimits, PageRequest};
use crate::error::PeopleError;
use crate::models::{PagedResult, RecommendedPerson};
use crate::services::store::UserDirectory;
use geo::Point;
use std::sync::Arc;

/// Distance-ranked people recommendations around a coordinate
#[derive(Clone)]
pub struct RecommendationEngine {
    users: Arc<dyn UserDirectory>,
    limits: PageLimits,
}

impl RecommendationEngine {
    pub fn new(users: Arc<dyn UserDirectory>, limits: PageLimits) -> Self {
        Self { users, limits }
    }

    /// Recommend people nearest to (`lat`, `lng`)
    ///
    /// # Arguments
    /// * `lat` - Query latitude in degrees, within [-90, 90]
    /// * `lng` - Query longitude in degrees, within [-180, 180]
    /// * `page` - 1-based page, defaults to 1
    /// * `page_size` - Clamped to the configured bounds
    ///
    /// # Returns
    /// One page of candidates, nearest first, with distances rounded to 0.1 km
    pub async fn recommend(
        &self,
        lat: f64,
        lng: f64,
        page: Option<i64>,
        page_size: Option<i64>,
    ) -> Result<PagedResult<RecommendedPerson>, PeopleError> {
        if !is_valid_coordinate(lat, lng) {
            return Err(PeopleError::InvalidArgument(format!(
                "Coordinates out of range: lat={}, lng={}",
                lat, lng
            )));
        }

        let request = PageRequest::clamp(page, page_size, &self.limits);

        let nearest = self
            .users
            .load_candidates(Point::new(lng, lat), request.limit(), request.offset())
            .await
            .map_err(|e| {
                tracing::error!(lat, lng, page = request.page, "Failed to load candidates: {}", e);
                e
            })?;
        let total = nearest.total;

        let items: Vec<RecommendedPerson> = nearest
            .items
            .into_iter()
            .map(|ranked| RecommendedPerson {
                id: ranked.candidate.id,
                name: ranked.candidate.name,
                age: ranked.candidate.age,
                pictures: ranked.candidate.pictures,
                distance_km: round_distance(ranked.distance_km),
            })
            .collect();

        tracing::info!(
            "Returning {} of {} recommendations near ({}, {}) (page {})",
            items.len(),
            total,
            lat,
            lng,
            request.page
        );

        Ok(request.into_result(items, total))
    }
}
