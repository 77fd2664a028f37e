// handlers/cards/my_cards.rs - GET /cards/my-cards handler

use axum::extract::State;

use crate::database::models::Card;
use crate::middleware::{ApiResponse, ApiResult, AuthUser};
use crate::state::AppState;

pub async fn card_my_cards(State(state): State<AppState>, auth: AuthUser) -> ApiResult<Vec<Card>> {
    let cards = state.repo.list_cards_by_owner(auth.id).await?;
    Ok(ApiResponse::success(cards))
}
