// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{User, Picture, PreferenceKind, PairState, Candidate, CandidatePage, RankedCandidate, ReceivedLike, LikeCount};
pub use requests::{RecommendedQuery, PageQuery};
pub use responses::{PagedResult, LikedPerson, RecommendedPerson, MessageResponse, HealthResponse, ErrorResponse};
