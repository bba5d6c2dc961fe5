use crate::core::pagination::{PageLimits, PageRequest};
use crate::error::PeopleError;
use crate::models::{LikeCount, LikedPerson, PagedResult, PairState, PreferenceKind};
use crate::services::store::{PreferenceStore, UserDirectory};
use std::sync::Arc;

/// Format used for `likedAt` on the wire
const LIKED_AT_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Like/dislike operations and the "who liked me" listing
#[derive(Clone)]
pub struct PreferenceService {
    users: Arc<dyn UserDirectory>,
    preferences: Arc<dyn PreferenceStore>,
    limits: PageLimits,
}

impl PreferenceService {
    pub fn new(
        users: Arc<dyn UserDirectory>,
        preferences: Arc<dyn PreferenceStore>,
        limits: PageLimits,
    ) -> Self {
        Self {
            users,
            preferences,
            limits,
        }
    }

    pub async fn like_user(&self, actor_id: i64, target_id: i64) -> Result<(), PeopleError> {
        self.set_preference(actor_id, target_id, PreferenceKind::Like).await
    }

    pub async fn dislike_user(&self, actor_id: i64, target_id: i64) -> Result<(), PeopleError> {
        self.set_preference(actor_id, target_id, PreferenceKind::Dislike).await
    }

    /// Validate the pair, then hand the whole transition to the store
    async fn set_preference(
        &self,
        actor_id: i64,
        target_id: i64,
        kind: PreferenceKind,
    ) -> Result<(), PeopleError> {
        if actor_id == target_id {
            let verb = match kind {
                PreferenceKind::Like => "like",
                PreferenceKind::Dislike => "dislike",
            };
            return Err(PeopleError::InvalidOperation(format!("Cannot {} yourself.", verb)));
        }

        let target = self.users.find_user(target_id).await.map_err(|e| {
            tracing::error!(actor_id, target_id, "Failed to look up target user: {}", e);
            e
        })?;
        if target.is_none() {
            return Err(PeopleError::user_not_found());
        }

        let changed = self
            .preferences
            .apply_preference(actor_id, target_id, kind)
            .await
            .map_err(|e| {
                tracing::error!(actor_id, target_id, ?kind, "Failed to apply preference: {}", e);
                e
            })?;

        if changed {
            tracing::debug!("User {} set {:?} on user {}", actor_id, kind, target_id);
        } else {
            tracing::debug!("User {} already set {:?} on user {}", actor_id, kind, target_id);
        }

        Ok(())
    }

    /// Current state of the ordered pair
    pub async fn pair_state(&self, actor_id: i64, target_id: i64) -> Result<PairState, PeopleError> {
        Ok(self.preferences.pair_state(actor_id, target_id).await?)
    }

    /// Users who liked `target_id`, most recent like first
    pub async fn list_liked_by(
        &self,
        target_id: i64,
        page: Option<i64>,
        page_size: Option<i64>,
    ) -> Result<PagedResult<LikedPerson>, PeopleError> {
        if self.users.find_user(target_id).await?.is_none() {
            return Err(PeopleError::user_not_found());
        }

        let request = PageRequest::clamp(page, page_size, &self.limits);

        let total = self.preferences.count_likes_received(target_id).await.map_err(|e| {
            tracing::error!(target_id, "Failed to count received likes: {}", e);
            e
        })?;

        let likes = self
            .preferences
            .likes_received(target_id, request.limit(), request.offset())
            .await
            .map_err(|e| {
                tracing::error!(target_id, page = request.page, "Failed to list received likes: {}", e);
                e
            })?;

        let items: Vec<LikedPerson> = likes
            .into_iter()
            .map(|like| LikedPerson {
                person_id: like.liker_id,
                name: like.liker_name,
                age: like.liker_age,
                pictures: like.pictures,
                liked_at: like.liked_at.format(LIKED_AT_FORMAT).to_string(),
            })
            .collect();

        tracing::info!(
            "Returning {} of {} likes for user {} (page {})",
            items.len(),
            total,
            target_id,
            request.page
        );

        Ok(request.into_result(items, total))
    }

    /// Like totals above `threshold`, read by the popularity report job
    pub async fn popular_targets(&self, threshold: i64) -> Result<Vec<LikeCount>, PeopleError> {
        Ok(self.preferences.like_counts(threshold).await?)
    }
}
