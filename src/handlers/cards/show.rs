// handlers/cards/show.rs - GET /cards/:id handler

use axum::extract::{Path, State};

use super::load_card;
use crate::database::models::Card;
use crate::middleware::{ApiResponse, ApiResult};
use crate::state::AppState;

pub async fn card_show(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<Card> {
    let card = load_card(&state, &id).await?;
    Ok(ApiResponse::success(card))
}
