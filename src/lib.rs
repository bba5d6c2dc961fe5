//! Lume People - recommendation and like/dislike service for the Lume app
//!
//! Ranks nearby users by great-circle distance and keeps exactly one
//! like/dislike state per ordered user pair.

pub mod config;
pub mod core;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use crate::core::{great_circle_distance_km, rank_candidates, PageLimits, PageRequest};
pub use error::PeopleError;
pub use models::{PagedResult, LikedPerson, RecommendedPerson, PreferenceKind, PairState};
pub use services::{MemoryStore, PostgresStore, PreferenceService, RecommendationEngine};
