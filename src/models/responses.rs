use serde::{Deserialize, Serialize};

/// One page of results plus the metadata needed to fetch the others
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PagedResult<T> {
    pub items: Vec<T>,
    pub page: u32,
    #[serde(rename = "pageSize")]
    pub page_size: u32,
    pub total: u64,
    #[serde(rename = "totalPages")]
    pub total_pages: u32,
}

/// A user who liked the requested person
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LikedPerson {
    #[serde(rename = "personId")]
    pub person_id: i64,
    pub name: String,
    pub age: Option<i32>,
    pub pictures: Vec<String>,
    #[serde(rename = "likedAt")]
    pub liked_at: String,
}

/// A nearby user, annotated with distance from the query point
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendedPerson {
    pub id: i64,
    pub name: String,
    pub age: Option<i32>,
    pub pictures: Vec<String>,
    #[serde(rename = "distanceKm")]
    pub distance_km: f64,
}

/// Plain acknowledgement body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
    #[serde(rename = "errorId", skip_serializing_if = "Option::is_none", default)]
    pub error_id: Option<String>,
}
