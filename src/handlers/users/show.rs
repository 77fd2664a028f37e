// handlers/users/show.rs - GET /users/:id handler

use axum::extract::{Path, State};

use super::USER_NOT_FOUND;
use crate::database::models::User;
use crate::error::ApiError;
use crate::handlers::parse_id;
use crate::middleware::{ApiResponse, ApiResult, AuthUser};
use crate::state::AppState;

/// A user can read their own profile; admins can read any.
pub async fn user_show(
    State(state): State<AppState>,
    Path(id): Path<String>,
    auth: AuthUser,
) -> ApiResult<User> {
    let id = parse_id(&id, USER_NOT_FOUND)?;
    if !auth.can_manage(id) {
        return Err(ApiError::forbidden("Not authorized to view this user"));
    }

    let user = state
        .repo
        .find_user(id)
        .await?
        .ok_or_else(|| ApiError::not_found(USER_NOT_FOUND))?;

    Ok(ApiResponse::success(user))
}
