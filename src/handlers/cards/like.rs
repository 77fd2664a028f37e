// handlers/cards/like.rs - PATCH /cards/:id handler

use axum::extract::{Path, State};
use tracing::debug;

use super::CARD_NOT_FOUND;
use crate::database::models::Card;
use crate::error::ApiError;
use crate::handlers::parse_id;
use crate::middleware::{ApiResponse, ApiResult, AuthUser};
use crate::state::AppState;

/// Like the card, or unlike it if the caller already did.
pub async fn card_like(
    State(state): State<AppState>,
    Path(id): Path<String>,
    auth: AuthUser,
) -> ApiResult<Card> {
    let id = parse_id(&id, CARD_NOT_FOUND)?;
    let card = state
        .repo
        .toggle_like(id, auth.id)
        .await?
        .ok_or_else(|| ApiError::not_found(CARD_NOT_FOUND))?;

    let liked = card.likes.contains(&auth.id);
    debug!("User {} {} card {}", auth.id, if liked { "liked" } else { "unliked" }, card.id);
    Ok(ApiResponse::success(card))
}
