use chrono::{DateTime, Utc};
use geo::Point;
use serde::{Deserialize, Serialize};

/// A registered user of the app
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    #[serde(rename = "deviceId")]
    pub device_id: String,
    pub name: String,
    #[serde(default)]
    pub age: Option<i32>,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
}

/// Image owned by a user, displayed in ascending `sort_order`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Picture {
    pub id: i64,
    #[serde(rename = "userId")]
    pub user_id: i64,
    pub url: String,
    #[serde(rename = "sortOrder")]
    pub sort_order: i32,
}

/// Kind of a directed preference between two users
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "preference_kind", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum PreferenceKind {
    Like,
    Dislike,
}

/// Current relationship of an ordered (actor, target) pair
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PairState {
    None,
    Liked,
    Disliked,
}

impl From<PreferenceKind> for PairState {
    fn from(kind: PreferenceKind) -> Self {
        match kind {
            PreferenceKind::Like => PairState::Liked,
            PreferenceKind::Dislike => PairState::Disliked,
        }
    }
}

impl From<Option<PreferenceKind>> for PairState {
    fn from(kind: Option<PreferenceKind>) -> Self {
        kind.map(PairState::from).unwrap_or(PairState::None)
    }
}

/// User row eligible for ranking, as loaded from storage
///
/// `pictures` is filled only for candidates on the returned page.
#[derive(Debug, Clone, Default)]
pub struct Candidate {
    pub id: i64,
    pub name: String,
    pub age: Option<i32>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub pictures: Vec<String>,
}

impl Candidate {
    /// Stored location, present only when both coordinates exist and are in range
    pub fn location(&self) -> Option<Point<f64>> {
        match (self.latitude, self.longitude) {
            (Some(lat), Some(lng)) if crate::core::distance::is_valid_coordinate(lat, lng) => {
                Some(Point::new(lng, lat))
            }
            _ => None,
        }
    }
}

impl From<User> for Candidate {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            age: user.age,
            latitude: user.latitude,
            longitude: user.longitude,
            pictures: Vec::new(),
        }
    }
}

/// Candidate with its unrounded distance from the query point
#[derive(Debug, Clone)]
pub struct RankedCandidate {
    pub candidate: Candidate,
    pub distance_km: f64,
}

/// One page of ranked candidates and the count of all eligible users
#[derive(Debug, Clone, Default)]
pub struct CandidatePage {
    pub items: Vec<RankedCandidate>,
    pub total: u64,
}

/// A like received by a user, joined to the liker and their pictures
#[derive(Debug, Clone)]
pub struct ReceivedLike {
    pub like_id: i64,
    pub liker_id: i64,
    pub liker_name: String,
    pub liker_age: Option<i32>,
    pub pictures: Vec<String>,
    pub liked_at: DateTime<Utc>,
}

/// Aggregate like count for one target user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LikeCount {
    #[serde(rename = "userId")]
    pub user_id: i64,
    #[serde(rename = "totalLikes")]
    pub total_likes: i64,
}
