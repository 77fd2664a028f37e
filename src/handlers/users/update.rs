// handlers/users/update.rs - PUT /users/:id handler

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Json,
};
use serde_json::Value;
use tracing::info;

use super::USER_NOT_FOUND;
use crate::database::models::{ProfileChanges, UpdateUser, User};
use crate::error::ApiError;
use crate::handlers::parse_id;
use crate::middleware::{ApiResponse, ApiResult, AuthUser};
use crate::state::AppState;
use crate::validation::{self, user};

/// Replace name, phone and address; the image only when one is sent.
/// Email, password and role flags are not editable here.
pub async fn user_update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    auth: AuthUser,
    payload: Result<Json<Value>, JsonRejection>,
) -> ApiResult<User> {
    let Json(body) = payload?;
    let input: UpdateUser = validation::parse(user::UPDATE, body)?;

    let id = parse_id(&id, USER_NOT_FOUND)?;
    let user = state
        .repo
        .find_user(id)
        .await?
        .ok_or_else(|| ApiError::not_found(USER_NOT_FOUND))?;

    if !auth.can_manage(user.id) {
        return Err(ApiError::forbidden("Not authorized to update this user"));
    }

    let user = state
        .repo
        .update_user_profile(user.id, ProfileChanges::from(input))
        .await?
        .ok_or_else(|| ApiError::not_found(USER_NOT_FOUND))?;

    info!("User {} updated by {}", user.id, auth.id);
    Ok(ApiResponse::success(user))
}
