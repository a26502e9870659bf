//! Handlers for `/api/users`.

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use tracing::info;

use crate::error::{ApiError, Entity};
use crate::models::{User, UserFields};

use super::handlers::{json_body, path_id, AppState};

/// List every user ordered by id.
pub async fn list_users(State(state): State<AppState>) -> Result<Json<Vec<User>>, ApiError> {
    let users = state.store.list_users().await?;
    Ok(Json(users))
}

/// Fetch one user, or 404.
pub async fn get_user(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
) -> Result<Json<User>, ApiError> {
    let id = path_id(path)?;
    let user = state
        .store
        .get_user(id)
        .await?
        .ok_or(ApiError::NotFound(Entity::User))?;
    Ok(Json(user))
}

/// Insert a user with the id given in the body.
pub async fn create_user(
    State(state): State<AppState>,
    payload: Result<Json<User>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let user = json_body(payload)?;
    state.store.insert_user(&user).await?;

    info!("Created user {}", user.id);
    Ok((StatusCode::CREATED, format!("User added with ID: {}", user.id)))
}

/// Replace every mutable field of the user at the path id.
pub async fn update_user(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
    payload: Result<Json<UserFields>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let id = path_id(path)?;
    let fields = json_body(payload)?;

    if state.store.update_user(id, &fields).await? == 0 {
        return Err(ApiError::NotFound(Entity::User));
    }

    info!("Updated user {}", id);
    Ok((StatusCode::OK, format!("User modified with ID: {}", id)))
}

/// Delete the user at the path id. Succeeds whether or not a row existed.
pub async fn delete_user(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let id = path_id(path)?;
    let deleted = state.store.delete_user(id).await?;

    info!("Deleted user {} ({} rows)", id, deleted);
    Ok((StatusCode::OK, format!("User deleted with ID: {}", id)))
}
