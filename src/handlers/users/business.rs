// handlers/users/business.rs - PATCH /users/:id handler

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Json,
};
use serde::Serialize;
use serde_json::Value;
use tracing::info;
use uuid::Uuid;

use super::USER_NOT_FOUND;
use crate::database::models::BusinessStatus;
use crate::error::ApiError;
use crate::handlers::parse_id;
use crate::middleware::{ApiResponse, ApiResult, AuthUser};
use crate::state::AppState;
use crate::validation::{self, user};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BusinessStatusChanged {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub is_business: bool,
}

/// Users switch their own business status: `{"isBusiness": true}`.
pub async fn user_business(
    State(state): State<AppState>,
    Path(id): Path<String>,
    auth: AuthUser,
    payload: Result<Json<Value>, JsonRejection>,
) -> ApiResult<BusinessStatusChanged> {
    let Json(body) = payload?;
    let input: BusinessStatus = validation::parse(user::BUSINESS_STATUS, body)?;

    let id = parse_id(&id, USER_NOT_FOUND)?;
    let user = state
        .repo
        .find_user(id)
        .await?
        .ok_or_else(|| ApiError::not_found(USER_NOT_FOUND))?;

    if !auth.owns(user.id) {
        return Err(ApiError::forbidden("Not authorized to update this user"));
    }

    let user = state
        .repo
        .set_user_business(user.id, input.is_business)
        .await?
        .ok_or_else(|| ApiError::not_found(USER_NOT_FOUND))?;

    info!("User {} set business status to {}", user.id, user.is_business);
    Ok(ApiResponse::success(BusinessStatusChanged {
        id: user.id,
        is_business: user.is_business,
    }))
}
