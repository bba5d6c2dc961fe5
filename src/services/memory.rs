use crate::core::ranking::rank_candidates;
use crate::core::transition::plan_transition;
use crate::models::{Candidate, CandidatePage, LikeCount, PairState, Picture, PreferenceKind, ReceivedLike, User};
use crate::services::store::{PreferenceStore, StoreError, UserDirectory};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use geo::Point;
use std::collections::{BTreeMap, HashMap};
use tokio::sync::RwLock;

/// Fields needed to register a user
#[derive(Debug, Clone, Default)]
pub struct NewUser {
    pub device_id: String,
    pub name: String,
    pub age: Option<i32>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

#[derive(Debug, Clone)]
struct PreferenceRow {
    id: i64,
    kind: PreferenceKind,
    created_at: DateTime<Utc>,
}

#[derive(Debug, Default)]
struct MemoryState {
    users: BTreeMap<i64, User>,
    pictures: Vec<Picture>,
    preferences: HashMap<(i64, i64), PreferenceRow>,
    next_user_id: i64,
    next_picture_id: i64,
    next_preference_id: i64,
}

impl MemoryState {
    fn pictures_of(&self, user_id: i64) -> Vec<String> {
        let mut owned: Vec<&Picture> = self.pictures.iter().filter(|p| p.user_id == user_id).collect();
        owned.sort_by_key(|p| (p.sort_order, p.id));
        owned.into_iter().map(|p| p.url.clone()).collect()
    }
}

/// In-process store backing tests and local runs
///
/// Each preference transition holds the write lock for its whole
/// read-decide-write sequence, which gives the same per-pair atomicity the
/// PostgreSQL upsert provides.
#[derive(Debug, Default)]
pub struct MemoryStore {
    state: RwLock<MemoryState>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a user; device ids are unique
    pub async fn insert_user(&self, new_user: NewUser) -> Result<User, StoreError> {
        let mut state = self.state.write().await;

        if state.users.values().any(|u| u.device_id == new_user.device_id) {
            return Err(StoreError::Constraint(format!(
                "device id {} already registered",
                new_user.device_id
            )));
        }

        state.next_user_id += 1;
        let user = User {
            id: state.next_user_id,
            device_id: new_user.device_id,
            name: new_user.name,
            age: new_user.age,
            latitude: new_user.latitude,
            longitude: new_user.longitude,
        };
        state.users.insert(user.id, user.clone());

        Ok(user)
    }

    pub async fn add_picture(&self, user_id: i64, url: &str, sort_order: i32) -> Result<Picture, StoreError> {
        let mut state = self.state.write().await;

        if !state.users.contains_key(&user_id) {
            return Err(StoreError::Constraint(format!("picture owner {} does not exist", user_id)));
        }

        state.next_picture_id += 1;
        let picture = Picture {
            id: state.next_picture_id,
            user_id,
            url: url.to_string(),
            sort_order,
        };
        state.pictures.push(picture.clone());

        Ok(picture)
    }

    /// Update stored coordinates; `None` clears them
    pub async fn set_location(
        &self,
        user_id: i64,
        latitude: Option<f64>,
        longitude: Option<f64>,
    ) -> Result<(), StoreError> {
        let mut state = self.state.write().await;
        let user = state
            .users
            .get_mut(&user_id)
            .ok_or_else(|| StoreError::Constraint(format!("user {} does not exist", user_id)))?;

        user.latitude = latitude;
        user.longitude = longitude;
        Ok(())
    }

    /// Number of stored rows of `kind` for the pair (0 or 1)
    pub async fn preference_rows(&self, actor_id: i64, target_id: i64, kind: PreferenceKind) -> usize {
        let state = self.state.read().await;
        state
            .preferences
            .get(&(actor_id, target_id))
            .filter(|row| row.kind == kind)
            .map_or(0, |_| 1)
    }
}

#[async_trait]
impl UserDirectory for MemoryStore {
    async fn find_user(&self, id: i64) -> Result<Option<User>, StoreError> {
        Ok(self.state.read().await.users.get(&id).cloned())
    }

    async fn find_user_by_device(&self, device_id: &str) -> Result<Option<User>, StoreError> {
        let state = self.state.read().await;
        Ok(state.users.values().find(|u| u.device_id == device_id).cloned())
    }

    async fn load_candidates(
        &self,
        origin: Point<f64>,
        limit: u64,
        offset: u64,
    ) -> Result<CandidatePage, StoreError> {
        let state = self.state.read().await;

        let ranked = rank_candidates(origin, state.users.values().cloned().map(Candidate::from).collect());
        let total = ranked.len() as u64;

        let items = ranked
            .into_iter()
            .skip(usize::try_from(offset).unwrap_or(usize::MAX))
            .take(usize::try_from(limit).unwrap_or(usize::MAX))
            .map(|mut ranked| {
                ranked.candidate.pictures = state.pictures_of(ranked.candidate.id);
                ranked
            })
            .collect();

        Ok(CandidatePage { items, total })
    }

    async fn health_check(&self) -> Result<bool, StoreError> {
        Ok(true)
    }
}

#[async_trait]
impl PreferenceStore for MemoryStore {
    async fn apply_preference(
        &self,
        actor_id: i64,
        target_id: i64,
        kind: PreferenceKind,
    ) -> Result<bool, StoreError> {
        if actor_id == target_id {
            return Err(StoreError::Constraint("preference pair must not be a self pair".to_string()));
        }

        let mut state = self.state.write().await;

        for id in [actor_id, target_id] {
            if !state.users.contains_key(&id) {
                return Err(StoreError::Constraint(format!("user {} does not exist", id)));
            }
        }

        let current = PairState::from(state.preferences.get(&(actor_id, target_id)).map(|row| row.kind));

        if !plan_transition(current, kind).changes_state() {
            return Ok(false);
        }

        state.next_preference_id += 1;
        let row = PreferenceRow {
            id: state.next_preference_id,
            kind,
            created_at: Utc::now(),
        };
        // Keyed by pair: inserting drops any row of the other kind
        state.preferences.insert((actor_id, target_id), row);
        Ok(true)
    }

    async fn pair_state(&self, actor_id: i64, target_id: i64) -> Result<PairState, StoreError> {
        let state = self.state.read().await;
        Ok(PairState::from(state.preferences.get(&(actor_id, target_id)).map(|row| row.kind)))
    }

    async fn count_likes_received(&self, target_id: i64) -> Result<u64, StoreError> {
        let state = self.state.read().await;
        Ok(state
            .preferences
            .iter()
            .filter(|((_, target), row)| *target == target_id && row.kind == PreferenceKind::Like)
            .count() as u64)
    }

    async fn likes_received(
        &self,
        target_id: i64,
        limit: u64,
        offset: u64,
    ) -> Result<Vec<ReceivedLike>, StoreError> {
        let state = self.state.read().await;

        let mut likes: Vec<(i64, &PreferenceRow)> = state
            .preferences
            .iter()
            .filter(|((_, target), row)| *target == target_id && row.kind == PreferenceKind::Like)
            .map(|((actor, _), row)| (*actor, row))
            .collect();

        likes.sort_by(|(_, a), (_, b)| b.created_at.cmp(&a.created_at).then_with(|| b.id.cmp(&a.id)));

        let page = likes
            .into_iter()
            .skip(usize::try_from(offset).unwrap_or(usize::MAX))
            .take(usize::try_from(limit).unwrap_or(usize::MAX))
            .filter_map(|(actor_id, row)| {
                let liker = state.users.get(&actor_id)?;
                Some(ReceivedLike {
                    like_id: row.id,
                    liker_id: liker.id,
                    liker_name: liker.name.clone(),
                    liker_age: liker.age,
                    pictures: state.pictures_of(liker.id),
                    liked_at: row.created_at,
                })
            })
            .collect();

        Ok(page)
    }

    async fn like_counts(&self, min_exclusive: i64) -> Result<Vec<LikeCount>, StoreError> {
        let state = self.state.read().await;

        let mut totals: HashMap<i64, i64> = HashMap::new();
        for ((_, target), row) in &state.preferences {
            if row.kind == PreferenceKind::Like {
                *totals.entry(*target).or_default() += 1;
            }
        }

        let mut counts: Vec<LikeCount> = totals
            .into_iter()
            .filter(|(_, total)| *total > min_exclusive)
            .map(|(user_id, total_likes)| LikeCount { user_id, total_likes })
            .collect();
        counts.sort_by(|a, b| b.total_likes.cmp(&a.total_likes).then_with(|| a.user_id.cmp(&b.user_id)));

        Ok(counts)
    }
}
