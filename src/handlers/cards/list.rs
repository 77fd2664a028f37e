// handlers/cards/list.rs - GET /cards handler

use axum::extract::State;

use crate::database::models::Card;
use crate::middleware::{ApiResponse, ApiResult};
use crate::state::AppState;

pub async fn card_list(State(state): State<AppState>) -> ApiResult<Vec<Card>> {
    let cards = state.repo.list_cards().await?;
    Ok(ApiResponse::success(cards))
}
