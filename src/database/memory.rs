use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::database::manager::DatabaseError;
use crate::database::models::{Card, CardChanges, ProfileChanges, User};
use crate::database::repository::Repository;

#[derive(Default)]
struct Tables {
    // Vec keeps creation order; both tables stay small enough for linear scans.
    users: Vec<User>,
    cards: Vec<Card>,
}

/// In-process repository used for development and tests.
#[derive(Default)]
pub struct MemoryRepository {
    tables: RwLock<Tables>,
}

impl MemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Repository for MemoryRepository {
    async fn health_check(&self) -> Result<(), DatabaseError> {
        Ok(())
    }

    async fn count_users(&self) -> Result<i64, DatabaseError> {
        Ok(self.tables.read().await.users.len() as i64)
    }

    async fn insert_user(&self, user: User) -> Result<User, DatabaseError> {
        let mut tables = self.tables.write().await;
        if tables.users.iter().any(|u| u.email == user.email) {
            return Err(DatabaseError::Conflict("users_email_key".to_string()));
        }
        if tables.users.iter().any(|u| u.id == user.id) {
            return Err(DatabaseError::Conflict("users_pkey".to_string()));
        }
        tables.users.push(user.clone());
        Ok(user)
    }

    async fn find_user(&self, id: Uuid) -> Result<Option<User>, DatabaseError> {
        let tables = self.tables.read().await;
        Ok(tables.users.iter().find(|u| u.id == id).cloned())
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, DatabaseError> {
        let tables = self.tables.read().await;
        Ok(tables.users.iter().find(|u| u.email == email).cloned())
    }

    async fn list_users(&self) -> Result<Vec<User>, DatabaseError> {
        Ok(self.tables.read().await.users.clone())
    }

    async fn update_user_profile(
        &self,
        id: Uuid,
        changes: ProfileChanges,
    ) -> Result<Option<User>, DatabaseError> {
        let mut tables = self.tables.write().await;
        Ok(tables.users.iter_mut().find(|u| u.id == id).map(|user| {
            user.apply_profile(changes);
            user.clone()
        }))
    }

    async fn set_user_business(&self, id: Uuid, is_business: bool) -> Result<Option<User>, DatabaseError> {
        let mut tables = self.tables.write().await;
        Ok(tables.users.iter_mut().find(|u| u.id == id).map(|user| {
            user.set_business(is_business);
            user.clone()
        }))
    }

    async fn delete_user(&self, id: Uuid) -> Result<bool, DatabaseError> {
        let mut tables = self.tables.write().await;
        let before = tables.users.len();
        tables.users.retain(|u| u.id != id);
        Ok(tables.users.len() != before)
    }

    async fn count_cards(&self) -> Result<i64, DatabaseError> {
        Ok(self.tables.read().await.cards.len() as i64)
    }

    async fn insert_card(&self, card: Card) -> Result<Card, DatabaseError> {
        let mut tables = self.tables.write().await;
        if tables.cards.iter().any(|c| c.biz_number == card.biz_number) {
            return Err(DatabaseError::Conflict("cards_biz_number_key".to_string()));
        }
        if tables.cards.iter().any(|c| c.id == card.id) {
            return Err(DatabaseError::Conflict("cards_pkey".to_string()));
        }
        tables.cards.push(card.clone());
        Ok(card)
    }

    async fn find_card(&self, id: Uuid) -> Result<Option<Card>, DatabaseError> {
        let tables = self.tables.read().await;
        Ok(tables.cards.iter().find(|c| c.id == id).cloned())
    }

    async fn find_card_by_biz_number(&self, biz_number: i64) -> Result<Option<Card>, DatabaseError> {
        let tables = self.tables.read().await;
        Ok(tables
            .cards
            .iter()
            .find(|c| c.biz_number == biz_number)
            .cloned())
    }

    async fn list_cards(&self) -> Result<Vec<Card>, DatabaseError> {
        Ok(self.tables.read().await.cards.clone())
    }

    async fn list_cards_by_owner(&self, user_id: Uuid) -> Result<Vec<Card>, DatabaseError> {
        let tables = self.tables.read().await;
        Ok(tables
            .cards
            .iter()
            .filter(|c| c.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn update_card(&self, id: Uuid, changes: CardChanges) -> Result<Option<Card>, DatabaseError> {
        let mut tables = self.tables.write().await;
        Ok(tables.cards.iter_mut().find(|c| c.id == id).map(|card| {
            card.apply_changes(changes);
            card.clone()
        }))
    }

    async fn toggle_like(&self, card_id: Uuid, user_id: Uuid) -> Result<Option<Card>, DatabaseError> {
        let mut tables = self.tables.write().await;
        Ok(tables.cards.iter_mut().find(|c| c.id == card_id).map(|card| {
            card.toggle_like(user_id);
            card.clone()
        }))
    }

    async fn delete_card(&self, id: Uuid) -> Result<bool, DatabaseError> {
        let mut tables = self.tables.write().await;
        let before = tables.cards.len();
        tables.cards.retain(|c| c.id != id);
        Ok(tables.cards.len() != before)
    }
}
