// handlers/cards/create.rs - POST /cards handler

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use serde_json::Value;
use tracing::info;

use crate::database::models::{Card, CardInput};
use crate::middleware::{ApiResponse, ApiResult, AuthUser};
use crate::services::insert_card;
use crate::state::AppState;
use crate::validation::{self, card};

/// Create a card owned by the caller, who must be a business user.
///
/// Request:
/// ```json
/// {
///   "title": "Gabai Plumbing",
///   "subtitle": "Pipes and more",
///   "description": "Family business since 1990",
///   "phone": "0501234567",
///   "email": "office@gabai.example.com",
///   "web": "https://gabai.example.com",
///   "address": { "country": "Israel", "city": "Haifa", "street": "Herzl", "houseNumber": 12 }
/// }
/// ```
///
/// The response carries the assigned `bizNumber`.
pub async fn card_create(
    State(state): State<AppState>,
    auth: AuthUser,
    payload: Result<Json<Value>, JsonRejection>,
) -> ApiResult<Card> {
    auth.require_business()?;

    let Json(body) = payload?;
    let input: CardInput = validation::parse(card::CARD, body)?;

    let max_attempts = state.config.cards.biz_number_max_attempts;
    let card = insert_card(state.repo.as_ref(), input, auth.id, max_attempts).await?;

    info!("Card {} created by {} with bizNumber {}", card.id, auth.id, card.biz_number);
    Ok(ApiResponse::created(card))
}
