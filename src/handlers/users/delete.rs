// handlers/users/delete.rs - DELETE /users/:id handler

use axum::extract::{Path, State};
use tracing::info;

use super::USER_NOT_FOUND;
use crate::error::ApiError;
use crate::handlers::parse_id;
use crate::middleware::{ApiResponse, ApiResult, AuthUser, Message};
use crate::state::AppState;

/// Cards owned by the user are left in place.
pub async fn user_delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
    auth: AuthUser,
) -> ApiResult<Message> {
    let id = parse_id(&id, USER_NOT_FOUND)?;
    let user = state
        .repo
        .find_user(id)
        .await?
        .ok_or_else(|| ApiError::not_found(USER_NOT_FOUND))?;

    if !auth.can_manage(user.id) {
        return Err(ApiError::forbidden("Not authorized to delete this user"));
    }

    if !state.repo.delete_user(user.id).await? {
        return Err(ApiError::not_found(USER_NOT_FOUND));
    }

    info!("User {} removed by {}", user.id, auth.id);
    Ok(ApiResponse::success(Message::new("User removed")))
}
