use crate::models::ErrorResponse;
use crate::services::StoreError;
use actix_web::{error, http::StatusCode, HttpRequest, HttpResponse};
use thiserror::Error;

/// Errors surfaced by the preference and recommendation components
#[derive(Debug, Error)]
pub enum PeopleError {
    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    InvalidOperation(String),

    #[error("{0}")]
    InvalidArgument(String),

    #[error("Storage error: {0}")]
    Internal(#[from] StoreError),
}

impl PeopleError {
    pub fn user_not_found() -> Self {
        PeopleError::NotFound("User not found.".to_string())
    }

    fn code(&self) -> &'static str {
        match self {
            PeopleError::NotFound(_) => "not_found",
            PeopleError::InvalidOperation(_) => "invalid_operation",
            PeopleError::InvalidArgument(_) => "invalid_argument",
            PeopleError::Internal(_) => "internal_error",
        }
    }
}

impl error::ResponseError for PeopleError {
    fn status_code(&self) -> StatusCode {
        match self {
            PeopleError::NotFound(_) => StatusCode::NOT_FOUND,
            PeopleError::InvalidOperation(_) | PeopleError::InvalidArgument(_) => StatusCode::BAD_REQUEST,
            PeopleError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();

        // Storage details stay in the logs; the caller only gets an id to quote
        let (message, error_id) = match self {
            PeopleError::Internal(e) => {
                let error_id = uuid::Uuid::new_v4().to_string();
                tracing::error!(error_id = %error_id, "Internal error: {}", e);
                (
                    "An error occurred while processing your request.".to_string(),
                    Some(error_id),
                )
            }
            other => (other.to_string(), None),
        };

        HttpResponse::build(status).json(ErrorResponse {
            error: self.code().to_string(),
            message,
            status_code: status.as_u16(),
            error_id,
        })
    }
}

/// Handle query payload errors
pub fn handle_query_payload_error(err: error::QueryPayloadError, req: &HttpRequest) -> actix_web::Error {
    tracing::info!("Query error on {}: {}", req.path(), err);
    PeopleError::InvalidArgument(format!("Invalid query: {}", err)).into()
}

/// Handle path parameter errors
pub fn handle_path_error(err: error::PathError, req: &HttpRequest) -> actix_web::Error {
    tracing::info!("Path error on {}: {}", req.path(), err);
    PeopleError::InvalidArgument(format!("Invalid path: {}", err)).into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::to_bytes;
    use actix_web::ResponseError;

    #[test]
    fn test_status_mapping() {
        assert_eq!(PeopleError::user_not_found().status_code(), StatusCode::NOT_FOUND);
        assert_eq!(
            PeopleError::InvalidOperation("Cannot like yourself.".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            PeopleError::InvalidArgument("bad".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            PeopleError::Internal(StoreError::Constraint("boom".into())).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[actix_web::test]
    async fn test_internal_error_hides_details() {
        let err = PeopleError::Internal(StoreError::Constraint("secret table name".into()));
        let body = to_bytes(err.error_response().into_body()).await.unwrap();
        let body: ErrorResponse = serde_json::from_slice(&body).unwrap();

        assert_eq!(body.status_code, 500);
        assert!(!body.message.contains("secret"));
        assert!(body.error_id.is_some());
    }
}
