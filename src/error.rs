//! Unified error types for the gateway.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use strum::Display;
use thiserror::Error;
use tracing::error;

use crate::metrics;

/// Startup and process-level errors.
#[derive(Error, Debug)]
pub enum GatewayError {
    /// Configuration loading error.
    #[error("configuration error: {0}")]
    Config(#[from] envy::Error),

    /// Configuration loaded but failed validation.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Pool construction or connectivity error.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Failures raised by a [`Store`](crate::store::Store) statement.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Driver-level failure: connectivity, constraint violation, malformed query.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Statement rejected by a non-SQL store.
    #[error("statement rejected: {0}")]
    Rejected(String),
}

/// Entity kinds served by the router.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum Entity {
    /// A row in `users`.
    #[strum(to_string = "User")]
    User,
    /// A row in `user_profiles`.
    #[strum(to_string = "User profile")]
    UserProfile,
}

/// Request-level errors. Each variant maps to exactly one status code.
#[derive(Error, Debug)]
pub enum ApiError {
    /// The `:id` path segment is not a base-10 integer.
    #[error("Requested with an invalid ID!")]
    InvalidId,

    /// The request body is missing or is not the entity's JSON shape.
    #[error("Requested with an invalid body!")]
    InvalidBody,

    /// No row matched the requested id.
    #[error("{0} not found!")]
    NotFound(Entity),

    /// No route matches the request path.
    #[error("Route not found!")]
    RouteNotFound,

    /// The path exists but not for this method.
    #[error("Method not allowed!")]
    MethodNotAllowed,

    /// The store failed; details are logged, never returned.
    #[error("An internal server error occured!")]
    Store(#[from] StoreError),
}

/// JSON body for every 4xx/5xx response.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    /// Human-readable message.
    pub error: String,
}

impl ApiError {
    /// HTTP status for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::InvalidId | ApiError::InvalidBody => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) | ApiError::RouteNotFound => StatusCode::NOT_FOUND,
            ApiError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            ApiError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let ApiError::Store(e) = &self {
            error!("Store statement failed: {}", e);
            metrics::inc_store_failures();
        }

        let body = ErrorBody {
            error: self.to_string(),
        };
        (self.status_code(), Json(body)).into_response()
    }
}

/// Convenient Result type alias.
pub type Result<T> = std::result::Result<T, GatewayError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes_are_distinct_per_kind() {
        assert_eq!(ApiError::InvalidId.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(ApiError::InvalidBody.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(
            ApiError::NotFound(Entity::User).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(ApiError::RouteNotFound.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(
            ApiError::MethodNotAllowed.status_code(),
            StatusCode::METHOD_NOT_ALLOWED
        );
        assert_eq!(
            ApiError::Store(StoreError::Rejected("boom".into())).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn not_found_names_the_entity() {
        assert_eq!(
            ApiError::NotFound(Entity::User).to_string(),
            "User not found!"
        );
        assert_eq!(
            ApiError::NotFound(Entity::UserProfile).to_string(),
            "User profile not found!"
        );
    }

    #[test]
    fn store_error_message_is_generic() {
        let err = ApiError::Store(StoreError::Rejected("duplicate key value".into()));
        assert_eq!(err.to_string(), "An internal server error occured!");
    }
}
