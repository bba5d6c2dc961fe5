use crate::models::{CandidatePage, LikeCount, PairState, PreferenceKind, ReceivedLike, User};
use async_trait::async_trait;
use geo::Point;
use thiserror::Error;

/// Errors that can occur when talking to the backing store
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("SQLx error: {0}")]
    SqlxError(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    MigrateError(#[from] sqlx::migrate::MigrateError),

    #[error("Constraint violation: {0}")]
    Constraint(String),
}

/// Read access to users and their pictures
#[async_trait]
pub trait UserDirectory: Send + Sync {
    async fn find_user(&self, id: i64) -> Result<Option<User>, StoreError>;

    async fn find_user_by_device(&self, device_id: &str) -> Result<Option<User>, StoreError>;

    /// One page of users nearest to `origin`, plus the count of all eligible users
    ///
    /// Eligible users have both coordinates present and in range. The page is
    /// ordered by unrounded distance, then user id, and each entry carries its
    /// pictures ordered by sort order then picture id.
    async fn load_candidates(
        &self,
        origin: Point<f64>,
        limit: u64,
        offset: u64,
    ) -> Result<CandidatePage, StoreError>;

    async fn health_check(&self) -> Result<bool, StoreError>;
}

/// Directed like/dislike relationships between users
#[async_trait]
pub trait PreferenceStore: Send + Sync {
    /// Move the pair into `kind` as one atomic step
    ///
    /// Returns `false` when the pair already held `kind`. A pair never ends up
    /// with both kinds, or with none after a successful call.
    async fn apply_preference(
        &self,
        actor_id: i64,
        target_id: i64,
        kind: PreferenceKind,
    ) -> Result<bool, StoreError>;

    async fn pair_state(&self, actor_id: i64, target_id: i64) -> Result<PairState, StoreError>;

    async fn count_likes_received(&self, target_id: i64) -> Result<u64, StoreError>;

    /// Likes received by `target_id`, most recent first (row id breaks ties)
    async fn likes_received(
        &self,
        target_id: i64,
        limit: u64,
        offset: u64,
    ) -> Result<Vec<ReceivedLike>, StoreError>;

    /// Targets with strictly more than `min_exclusive` likes, highest count first
    async fn like_counts(&self, min_exclusive: i64) -> Result<Vec<LikeCount>, StoreError>;
}
