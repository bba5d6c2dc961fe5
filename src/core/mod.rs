// Core algorithm exports
pub mod distance;
pub mod pagination;
pub mod ranking;
pub mod transition;

pub use distance::{great_circle_distance_km, round_distance, is_valid_coordinate};
pub use pagination::{PageLimits, PageRequest};
pub use ranking::rank_candidates;
pub use transition::{plan_transition, Transition};
