use async_trait::async_trait;
use uuid::Uuid;

use crate::database::manager::DatabaseError;
use crate::database::models::{Card, CardChanges, ProfileChanges, User};

/// Persistence for users and cards.
///
/// Implementations must enforce the two uniqueness rules (user email, card
/// business number) and report violations as [`DatabaseError::Conflict`].
/// Lists come back in creation order.
///
/// Updates write only the columns they own, in one step, so concurrent
/// changes to other columns of the same record are never overwritten.
/// They return `None` when the record does not exist.
#[async_trait]
pub trait Repository: Send + Sync {
    async fn health_check(&self) -> Result<(), DatabaseError>;

    // Users
    async fn count_users(&self) -> Result<i64, DatabaseError>;
    async fn insert_user(&self, user: User) -> Result<User, DatabaseError>;
    async fn find_user(&self, id: Uuid) -> Result<Option<User>, DatabaseError>;
    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, DatabaseError>;
    async fn list_users(&self) -> Result<Vec<User>, DatabaseError>;
    /// Writes name, phone, address and, when present, image.
    async fn update_user_profile(
        &self,
        id: Uuid,
        changes: ProfileChanges,
    ) -> Result<Option<User>, DatabaseError>;
    async fn set_user_business(&self, id: Uuid, is_business: bool) -> Result<Option<User>, DatabaseError>;
    /// Returns false if nothing was deleted.
    async fn delete_user(&self, id: Uuid) -> Result<bool, DatabaseError>;

    // Cards
    async fn count_cards(&self) -> Result<i64, DatabaseError>;
    async fn insert_card(&self, card: Card) -> Result<Card, DatabaseError>;
    async fn find_card(&self, id: Uuid) -> Result<Option<Card>, DatabaseError>;
    async fn find_card_by_biz_number(&self, biz_number: i64) -> Result<Option<Card>, DatabaseError>;
    async fn list_cards(&self) -> Result<Vec<Card>, DatabaseError>;
    async fn list_cards_by_owner(&self, user_id: Uuid) -> Result<Vec<Card>, DatabaseError>;
    /// Writes the card's content columns; likes, owner and business number are untouched.
    async fn update_card(&self, id: Uuid, changes: CardChanges) -> Result<Option<Card>, DatabaseError>;
    /// Adds `user_id` to the likes, or removes it if already present.
    async fn toggle_like(&self, card_id: Uuid, user_id: Uuid) -> Result<Option<Card>, DatabaseError>;
    async fn delete_card(&self, id: Uuid) -> Result<bool, DatabaseError>;
}
