// handlers/cards/update.rs - PUT /cards/:id handler

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Json,
};
use serde_json::Value;
use tracing::info;

use super::{load_card, CARD_NOT_FOUND};
use crate::database::models::{Card, CardChanges, CardInput};
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult, AuthUser};
use crate::state::AppState;
use crate::validation::{self, card};

pub async fn card_update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    auth: AuthUser,
    payload: Result<Json<Value>, JsonRejection>,
) -> ApiResult<Card> {
    let Json(body) = payload?;
    let input: CardInput = validation::parse(card::CARD, body)?;

    let card = load_card(&state, &id).await?;
    if !auth.can_manage(card.user_id) {
        return Err(ApiError::forbidden("Not authorized to update this card"));
    }

    let card = state
        .repo
        .update_card(card.id, CardChanges::from(input))
        .await?
        .ok_or_else(|| ApiError::not_found(CARD_NOT_FOUND))?;

    info!("Card {} updated by {}", card.id, auth.id);
    Ok(ApiResponse::success(card))
}
