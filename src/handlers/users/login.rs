// handlers/users/login.rs - POST /users/login handler

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use serde_json::Value;
use tracing::{info, warn};

use super::AuthPayload;
use crate::auth::password::verify_password;
use crate::database::models::user::normalize_email;
use crate::database::models::LoginRequest;
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult};
use crate::state::AppState;
use crate::validation::{self, user};

const INVALID_CREDENTIALS: &str = "Invalid email or password";

/// Exchange email and password for a token. Unknown emails and wrong
/// passwords are indistinguishable to the caller.
pub async fn user_login(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> ApiResult<AuthPayload> {
    let Json(body) = payload?;
    let input: LoginRequest = validation::parse(user::LOGIN, body)?;
    let email = normalize_email(&input.email);

    let Some(user) = state.repo.find_user_by_email(&email).await? else {
        warn!("Login attempt for unknown email {}", email);
        return Err(ApiError::unauthorized(INVALID_CREDENTIALS));
    };

    if !verify_password(input.password, user.password.clone()).await? {
        warn!("Failed login for user {}", user.id);
        return Err(ApiError::unauthorized(INVALID_CREDENTIALS));
    }

    info!("User {} logged in", user.id);
    Ok(ApiResponse::success(AuthPayload::issue(&state, user)?))
}
