// handlers/cards/delete.rs - DELETE /cards/:id handler

use axum::extract::{Path, State};
use tracing::info;

use super::{load_card, CARD_NOT_FOUND};
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult, AuthUser, Message};
use crate::state::AppState;

pub async fn card_delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
    auth: AuthUser,
) -> ApiResult<Message> {
    let card = load_card(&state, &id).await?;
    if !auth.can_manage(card.user_id) {
        return Err(ApiError::forbidden("Not authorized to delete this card"));
    }

    if !state.repo.delete_card(card.id).await? {
        return Err(ApiError::not_found(CARD_NOT_FOUND));
    }

    info!("Card {} removed by {}", card.id, auth.id);
    Ok(ApiResponse::success(Message::new("Card removed")))
}
