// handlers/users/register.rs - POST /users handler

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use serde_json::Value;
use tracing::info;

use super::AuthPayload;
use crate::auth::password::hash_password;
use crate::database::models::user::normalize_email;
use crate::database::models::{Image, NewUser, RegisterUser};
use crate::database::DatabaseError;
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult};
use crate::state::AppState;
use crate::validation::{self, user};

/// Register a new account and sign the caller in.
///
/// Request:
/// ```json
/// {
///   "name": { "first": "Dana", "last": "Levi" },
///   "phone": "0501234567",
///   "email": "dana@example.com",
///   "password": "Secret@123",
///   "address": { "country": "Israel", "city": "Haifa", "street": "HaNassi", "houseNumber": 3 }
/// }
/// ```
///
/// Responds 201 with the stored user plus `token`.
pub async fn user_register(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> ApiResult<AuthPayload> {
    let Json(body) = payload?;
    let input: RegisterUser = validation::parse(user::REGISTER, body)?;

    let is_admin = input.is_admin.unwrap_or(false);
    if is_admin && !state.config.security.allow_admin_registration {
        return Err(ApiError::forbidden("Admin registration is not allowed"));
    }

    let email = normalize_email(&input.email);
    if state.repo.find_user_by_email(&email).await?.is_some() {
        return Err(ApiError::bad_request("User already exists"));
    }

    let password = hash_password(input.password).await?;
    let new_user = NewUser {
        name: input.name,
        phone: input.phone,
        email,
        password,
        image: input
            .image
            .unwrap_or_default()
            .into_image(Image::user_default()),
        address: input.address,
        is_business: input.is_business.unwrap_or(false),
        is_admin,
    };

    // A concurrent registration may win between the lookup and the insert
    let user = match state.repo.insert_user(new_user.into_user()).await {
        Ok(user) => user,
        Err(DatabaseError::Conflict(_)) => return Err(ApiError::bad_request("User already exists")),
        Err(e) => return Err(e.into()),
    };

    info!("Registered user {} ({})", user.id, user.email);
    Ok(ApiResponse::created(AuthPayload::issue(&state, user)?))
}
