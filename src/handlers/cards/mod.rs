// handlers/cards/mod.rs - /cards routes
//
// GET    /cards            list (public)
// POST   /cards            create (business users)
// GET    /cards/my-cards   caller's cards
// GET    /cards/:id        show (public)
// PUT    /cards/:id        update (owner or admin)
// PATCH  /cards/:id        toggle like (any signed-in user)
// DELETE /cards/:id        delete (owner or admin)

pub mod create;
pub mod delete;
pub mod like;
pub mod list;
pub mod my_cards;
pub mod show;
pub mod update;

pub use create::card_create;
pub use delete::card_delete;
pub use like::card_like;
pub use list::card_list;
pub use my_cards::card_my_cards;
pub use show::card_show;
pub use update::card_update;

use uuid::Uuid;

use crate::database::models::Card;
use crate::error::ApiError;
use crate::handlers::parse_id;
use crate::state::AppState;

pub(crate) const CARD_NOT_FOUND: &str = "Card not found";

pub(crate) async fn load_card(state: &AppState, raw_id: &str) -> Result<Card, ApiError> {
    let id: Uuid = parse_id(raw_id, CARD_NOT_FOUND)?;
    state
        .repo
        .find_card(id)
        .await?
        .ok_or_else(|| ApiError::not_found(CARD_NOT_FOUND))
}
