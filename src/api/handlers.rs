//! Shared HTTP API handlers and request helpers.

use std::sync::Arc;
use std::time::Instant;

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        MatchedPath, Path, Request, State,
    },
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use metrics_exporter_prometheus::PrometheusHandle;
use serde::Serialize;
use tracing::debug;

use crate::error::ApiError;
use crate::metrics;
use crate::store::Store;

/// Application state shared with handlers.
#[derive(Clone)]
pub struct AppState {
    /// Store every handler executes its one statement against.
    pub store: Arc<dyn Store>,
    /// Prometheus handle, when a recorder is installed.
    pub metrics: Option<PrometheusHandle>,
}

impl AppState {
    /// Create new app state around a store.
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self {
            store,
            metrics: None,
        }
    }

    /// Attach a Prometheus handle for `/metrics`.
    pub fn with_metrics(mut self, handle: PrometheusHandle) -> Self {
        self.metrics = Some(handle);
        self
    }
}

/// Greeting response.
#[derive(Debug, Serialize)]
pub struct HelloResponse {
    /// Fixed greeting.
    pub message: &'static str,
}

/// Liveness handler - always returns 200.
pub async fn hello() -> impl IntoResponse {
    Json(HelloResponse {
        message: "Hello world!",
    })
}

/// Metrics handler - Prometheus text, or 404 when no recorder is installed.
pub async fn metrics_text(State(state): State<AppState>) -> Response {
    match state.metrics {
        Some(handle) => handle.render().into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

/// Parse an `:id` path segment as a base-10 integer.
pub fn parse_id(raw: &str) -> Result<i32, ApiError> {
    raw.parse::<i32>().map_err(|_| {
        debug!("Rejected id path segment {:?}", raw);
        ApiError::InvalidId
    })
}

/// Extract and parse the `:id` segment. A segment axum cannot decode
/// (e.g. `%FF`) is an invalid id like any other.
pub fn path_id(path: Result<Path<String>, PathRejection>) -> Result<i32, ApiError> {
    match path {
        Ok(Path(raw)) => parse_id(&raw),
        Err(rejection) => {
            debug!("Rejected id path segment: {}", rejection.body_text());
            Err(ApiError::InvalidId)
        }
    }
}

/// Fallback for paths no route matches.
pub async fn route_not_found() -> ApiError {
    ApiError::RouteNotFound
}

/// Fallback for a known path with an unsupported method.
pub async fn method_not_allowed() -> ApiError {
    ApiError::MethodNotAllowed
}

/// Unwrap a JSON body, turning any rejection into a 400.
pub fn json_body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, ApiError> {
    match payload {
        Ok(Json(body)) => Ok(body),
        Err(rejection) => {
            debug!("Rejected request body: {}", rejection.body_text());
            Err(ApiError::InvalidBody)
        }
    }
}

/// Middleware recording request count and latency per matched route.
pub async fn track_metrics(req: Request, next: Next) -> Response {
    let start = Instant::now();
    let route = req
        .extensions()
        .get::<MatchedPath>()
        .map(|path| path.as_str().to_owned())
        .unwrap_or_else(|| "unmatched".to_string());
    let method = req.method().to_string();

    let response = next.run(req).await;

    metrics::record_http_request(start, &method, &route, response.status().as_u16());
    response
}
