// handlers/users/list.rs - GET /users handler

use axum::extract::State;

use crate::database::models::User;
use crate::middleware::{ApiResponse, ApiResult, AuthUser};
use crate::state::AppState;

pub async fn user_list(State(state): State<AppState>, auth: AuthUser) -> ApiResult<Vec<User>> {
    auth.require_admin()?;
    let users = state.repo.list_users().await?;
    Ok(ApiResponse::success(users))
}
