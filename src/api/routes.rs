//! HTTP API route definitions.

use axum::{middleware, routing::get, Router};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use super::handlers::{
    hello, method_not_allowed, metrics_text, route_not_found, track_metrics, AppState,
};
use super::user_profiles::{
    create_user_profile, delete_user_profile, get_user_profile, list_user_profiles,
    update_user_profile,
};
use super::users::{create_user, delete_user, get_user, list_users, update_user};

/// Create the API router.
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api", get(hello).fallback(method_not_allowed))
        // Users
        .route(
            "/api/users",
            get(list_users)
                .post(create_user)
                .fallback(method_not_allowed),
        )
        .route(
            "/api/users/:id",
            get(get_user)
                .put(update_user)
                .delete(delete_user)
                .fallback(method_not_allowed),
        )
        // User profiles
        .route(
            "/api/user_profiles",
            get(list_user_profiles)
                .post(create_user_profile)
                .fallback(method_not_allowed),
        )
        .route(
            "/api/user_profiles/:id",
            get(get_user_profile)
                .put(update_user_profile)
                .delete(delete_user_profile)
                .fallback(method_not_allowed),
        )
        .route("/metrics", get(metrics_text).fallback(method_not_allowed))
        .fallback(route_not_found)
        .route_layer(middleware::from_fn(track_metrics))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
