use serde::{Deserialize, Serialize};
use validator::Validate;

/// Query string for the recommended people endpoint
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RecommendedQuery {
    #[validate(range(min = -90.0, max = 90.0, message = "Latitude must be between -90 and 90."))]
    pub lat: f64,
    #[validate(range(min = -180.0, max = 180.0, message = "Longitude must be between -180 and 180."))]
    pub lng: f64,
    #[serde(default)]
    pub page: Option<i64>,
    #[serde(default)]
    pub limit: Option<i64>,
}

/// Page selection for list endpoints
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PageQuery {
    #[serde(default)]
    pub page: Option<i64>,
    #[serde(default)]
    pub limit: Option<i64>,
}
