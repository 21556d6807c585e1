//! Typed errors and HTTP mapping.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid value for {name}: '{value}'")]
    Invalid { name: &'static str, value: String },
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("{0}")]
    NotFound(String),
    #[error("bad request: {0}")]
    BadRequest(String),
    #[error("payload too large: {0}")]
    PayloadTooLarge(String),
    #[error("database: {0}")]
    Db(#[from] sqlx::Error),
}

/// Message sent in place of internal failure details.
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal Server Error";

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            AppError::Config(_) | AppError::Db(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// True for unique, not-null, foreign-key and check violations reported by the store.
    pub fn is_constraint_violation(&self) -> bool {
        use sqlx::error::ErrorKind;
        match self {
            AppError::Db(sqlx::Error::Database(db)) => matches!(
                db.kind(),
                ErrorKind::UniqueViolation
                    | ErrorKind::ForeignKeyViolation
                    | ErrorKind::NotNullViolation
                    | ErrorKind::CheckViolation
            ),
            _ => false,
        }
    }
}

#[derive(Serialize)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

#[derive(Serialize)]
pub struct ErrorDetail {
    pub message: String,
    pub status: u16,
}

impl ErrorBody {
    pub fn new(message: impl Into<String>, status: StatusCode) -> Self {
        ErrorBody {
            error: ErrorDetail {
                message: message.into(),
                status: status.as_u16(),
            },
        }
    }
}

/// Text of a server-side failure, attached to the response so the router can
/// decide whether to expose it (development) or keep the generic message.
#[derive(Clone, Debug)]
pub struct InternalErrorDetail(pub String);

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(
                error = %self,
                constraint_violation = self.is_constraint_violation(),
                "request failed"
            );
            let mut response = (status, Json(ErrorBody::new(INTERNAL_ERROR_MESSAGE, status))).into_response();
            response
                .extensions_mut()
                .insert(InternalErrorDetail(self.to_string()));
            return response;
        }
        (status, Json(ErrorBody::new(self.to_string(), status))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_maps_to_404_with_message() {
        let err = AppError::NotFound("Can't find company with code of nope".into());
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
        assert_eq!(err.to_string(), "Can't find company with code of nope");
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert!(response.extensions().get::<InternalErrorDetail>().is_none());
    }

    #[test]
    fn store_failures_are_server_errors() {
        let err = AppError::Db(sqlx::Error::PoolTimedOut);
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!err.is_constraint_violation());
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let detail = response.extensions().get::<InternalErrorDetail>().unwrap();
        assert!(detail.0.starts_with("database:"));
    }

    #[test]
    fn config_errors_are_server_errors() {
        let err: AppError = ConfigError::Invalid {
            name: "BIND_ADDR",
            value: "nowhere".into(),
        }
        .into();
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.to_string(), "invalid value for BIND_ADDR: 'nowhere'");
    }

    #[test]
    fn error_body_shape() {
        let body = serde_json::to_value(ErrorBody::new("Not Found", StatusCode::NOT_FOUND)).unwrap();
        assert_eq!(body, serde_json::json!({ "error": { "message": "Not Found", "status": 404 } }));
    }
}
