//! Handlers for `/api/user_profiles`.

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
use crate::models::{UserProfile, UserProfileFields};

use super::handlers::{json_body, path_id, AppState};

/// List every profile ordered by id.
pub async fn list_user_profiles(
    State(state): State<AppState>,
) -> Result<Json<Vec<UserProfile>>, ApiError> {
    let profiles = state.store.list_user_profiles().await?;
    Ok(Json(profiles))
}

/// Fetch one profile, or 404.
pub async fn get_user_profile(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
) -> Result<Json<UserProfile>, ApiError> {
    let id = path_id(path)?;
    let profile = state
        .store
        .get_user_profile(id)
        .await?
        .ok_or(ApiError::NotFound(Entity::UserProfile))?;
    Ok(Json(profile))
}

/// Insert a profile with the id given in the body.
pub async fn create_user_profile(
    State(state): State<AppState>,
    payload: Result<Json<UserProfile>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let profile = json_body(payload)?;
    state.store.insert_user_profile(&profile).await?;

    info!("Created user profile {}", profile.id);
    Ok((
        StatusCode::CREATED,
        format!("User profile added with ID: {}", profile.id),
    ))
}

/// Replace every mutable field of the profile at the path id.
pub async fn update_user_profile(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
    payload: Result<Json<UserProfileFields>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let id = path_id(path)?;
    let fields = json_body(payload)?;

    if state.store.update_user_profile(id, &fields).await? == 0 {
        return Err(ApiError::NotFound(Entity::UserProfile));
    }

    info!("Updated user profile {}", id);
    Ok((StatusCode::OK, format!("User profile modified with ID: {}", id)))
}

/// Delete the profile at the path id. Succeeds whether or not a row existed.
pub async fn delete_user_profile(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let id = path_id(path)?;
    let deleted = state.store.delete_user_profile(id).await?;

    info!("Deleted user profile {} ({} rows)", id, deleted);
    Ok((StatusCode::OK, format!("User profile deleted with ID: {}", id)))
}
