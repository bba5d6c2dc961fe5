use actix_web::{dev::Payload, web, FromRequest, HttpRequest, HttpResponse};
use std::future::{ready, Ready};
use std::sync::Arc;
use validator::Validate;
use crate::core::pagination::PageLimits;
use crate::error::PeopleError;
use crate::models::{HealthResponse, MessageResponse, PageQuery, RecommendedQuery, User};
use crate::services::{PreferenceService, PreferenceStore, RecommendationEngine, UserDirectory};

/// Header identifying the calling installation
pub const DEVICE_ID_HEADER: &str = "X-Device-ID";

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserDirectory>,
    pub preferences: PreferenceService,
    pub recommendations: RecommendationEngine,
}

impl AppState {
    /// Wire both components onto one store
    pub fn from_store<S>(store: Arc<S>, limits: PageLimits) -> Self
    where
        S: UserDirectory + PreferenceStore + 'static,
    {
        let users: Arc<dyn UserDirectory> = store.clone();
        let preferences: Arc<dyn PreferenceStore> = store;

        Self {
            preferences: PreferenceService::new(users.clone(), preferences, limits),
            recommendations: RecommendationEngine::new(users.clone(), limits),
            users,
        }
    }
}

/// Device id taken from the `X-Device-ID` header
#[derive(Debug, Clone)]
pub struct DeviceId(pub String);

impl FromRequest for DeviceId {
    type Error = PeopleError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let device_id = req
            .headers()
            .get(DEVICE_ID_HEADER)
            .and_then(|value| value.to_str().ok())
            .map(str::trim)
            .filter(|value| !value.is_empty());

        ready(match device_id {
            Some(id) => Ok(DeviceId(id.to_string())),
            None => Err(PeopleError::InvalidArgument(format!("{} header is required.", DEVICE_ID_HEADER))),
        })
    }
}

/// Configure all people routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/health", web::get().to(health_check))
        .route("/people/recommended", web::get().to(recommended))
        .route("/people/{user_id}/liked-list", web::get().to(liked_list))
        .route("/people/{user_id}/like", web::post().to(like))
        .route("/people/{user_id}/dislike", web::post().to(dislike));
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> HttpResponse {
    let healthy = state.users.health_check().await.unwrap_or(false);

    let status = if healthy { "healthy" } else { "degraded" };

    HttpResponse::Ok().json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

async fn resolve_actor(state: &AppState, device: &DeviceId) -> Result<User, PeopleError> {
    state
        .users
        .find_user_by_device(&device.0)
        .await?
        .ok_or_else(|| {
            tracing::info!("Unknown device id: {}", device.0);
            PeopleError::user_not_found()
        })
}

/// Recommended people endpoint
///
/// GET /api/v1/people/recommended?lat={lat}&lng={lng}&page={page}&limit={limit}
async fn recommended(
    state: web::Data<AppState>,
    query: web::Query<RecommendedQuery>,
) -> Result<HttpResponse, PeopleError> {
    if let Err(errors) = query.validate() {
        tracing::info!("Validation failed for recommended request: {:?}", errors);
        return Err(PeopleError::InvalidArgument(errors.to_string()));
    }

    let result = state
        .recommendations
        .recommend(query.lat, query.lng, query.page, query.limit)
        .await?;

    Ok(HttpResponse::Ok().json(result))
}

/// Liked list endpoint
///
/// GET /api/v1/people/{user_id}/liked-list?page={page}&limit={limit}
async fn liked_list(
    state: web::Data<AppState>,
    path: web::Path<i64>,
    query: web::Query<PageQuery>,
) -> Result<HttpResponse, PeopleError> {
    let result = state
        .preferences
        .list_liked_by(path.into_inner(), query.page, query.limit)
        .await?;

    Ok(HttpResponse::Ok().json(result))
}

/// Like endpoint
///
/// POST /api/v1/people/{user_id}/like (requires `X-Device-ID`)
async fn like(
    state: web::Data<AppState>,
    path: web::Path<i64>,
    device: DeviceId,
) -> Result<HttpResponse, PeopleError> {
    let actor = resolve_actor(&state, &device).await?;
    state.preferences.like_user(actor.id, path.into_inner()).await?;

    Ok(HttpResponse::Ok().json(MessageResponse::new("Person liked.")))
}

/// Dislike endpoint
///
/// POST /api/v1/people/{user_id}/dislike (requires `X-Device-ID`)
async fn dislike(
    state: web::Data<AppState>,
    path: web::Path<i64>,
    device: DeviceId,
) -> Result<HttpResponse, PeopleError> {
    let actor = resolve_actor(&state, &device).await?;
    state.preferences.dislike_user(actor.id, path.into_inner()).await?;

    Ok(HttpResponse::Ok().json(MessageResponse::new("Person disliked.")))
}
