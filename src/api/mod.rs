//! HTTP API module: the request router for users and user profiles.

pub mod handlers;
pub mod routes;
pub mod user_profiles;
pub mod users;

pub use handlers::AppState;
pub use routes::create_router;
