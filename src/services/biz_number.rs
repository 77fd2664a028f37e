use rand::Rng;
use std::ops::Range;
use thiserror::Error;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::database::models::{Card, CardInput, NewCard};
use crate::database::{DatabaseError, Repository};

/// Business numbers are seven-digit integers.
pub const BIZ_NUMBER_RANGE: Range<i64> = 1_000_000..2_000_000;

#[derive(Debug, Error)]
pub enum BizNumberError {
    #[error("No free business number found after {0} attempts")]
    Exhausted(u32),

    #[error(transparent)]
    Database(#[from] DatabaseError),
}

/// Draw random numbers until one is not used by any card.
pub async fn generate_biz_number(
    repo: &dyn Repository,
    max_attempts: u32,
) -> Result<i64, BizNumberError> {
    generate_with(repo, max_attempts, || rand::rng().random_range(BIZ_NUMBER_RANGE)).await
}

async fn generate_with<F>(
    repo: &dyn Repository,
    max_attempts: u32,
    mut draw: F,
) -> Result<i64, BizNumberError>
where
    F: FnMut() -> i64 + Send,
{
    for attempt in 1..=max_attempts {
        let candidate = draw();
        if repo.find_card_by_biz_number(candidate).await?.is_none() {
            return Ok(candidate);
        }
        debug!("Business number {} taken (attempt {})", candidate, attempt);
    }
    Err(BizNumberError::Exhausted(max_attempts))
}

/// Create a card under a fresh business number.
///
/// The lookup and the insert are not atomic, so a concurrent insert can
/// still claim the number first; the store's unique constraint catches that
/// and the whole draw is repeated.
pub async fn insert_card(
    repo: &dyn Repository,
    input: CardInput,
    user_id: Uuid,
    max_attempts: u32,
) -> Result<Card, BizNumberError> {
    for _ in 0..max_attempts {
        let biz_number = generate_biz_number(repo, max_attempts).await?;
        let card = NewCard {
            input: input.clone(),
            biz_number,
            user_id,
        }
        .into_card();

        match repo.insert_card(card).await {
            Ok(card) => return Ok(card),
            Err(DatabaseError::Conflict(constraint)) => {
                warn!("Card insert lost a race on {}; retrying", constraint);
            }
            Err(e) => return Err(e.into()),
        }
    }
    Err(BizNumberError::Exhausted(max_attempts))
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicU32, Ordering};

    use crate::database::models::{Address, CardChanges, ProfileChanges, User};
    use crate::database::MemoryRepository;

    /// Store whose first `conflicts` card inserts lose a race on the
    /// business number constraint, as if another writer got there first.
    struct RacingRepository {
        inner: MemoryRepository,
        conflicts: u32,
        inserts: AtomicU32,
    }

    impl RacingRepository {
        fn new(conflicts: u32) -> Self {
            Self {
                inner: MemoryRepository::new(),
                conflicts,
                inserts: AtomicU32::new(0),
            }
        }
    }

    #[async_trait]
    impl Repository for RacingRepository {
        async fn health_check(&self) -> Result<(), DatabaseError> {
            self.inner.health_check().await
        }
        async fn count_users(&self) -> Result<i64, DatabaseError> {
            self.inner.count_users().await
        }
        async fn insert_user(&self, user: User) -> Result<User, DatabaseError> {
            self.inner.insert_user(user).await
        }
        async fn find_user(&self, id: Uuid) -> Result<Option<User>, DatabaseError> {
            self.inner.find_user(id).await
        }
        async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, DatabaseError> {
            self.inner.find_user_by_email(email).await
        }
        async fn list_users(&self) -> Result<Vec<User>, DatabaseError> {
            self.inner.list_users().await
        }
        async fn update_user_profile(
            &self,
            id: Uuid,
            changes: ProfileChanges,
        ) -> Result<Option<User>, DatabaseError> {
            self.inner.update_user_profile(id, changes).await
        }
        async fn set_user_business(&self, id: Uuid, is_business: bool) -> Result<Option<User>, DatabaseError> {
            self.inner.set_user_business(id, is_business).await
        }
        async fn delete_user(&self, id: Uuid) -> Result<bool, DatabaseError> {
            self.inner.delete_user(id).await
        }
        async fn count_cards(&self) -> Result<i64, DatabaseError> {
            self.inner.count_cards().await
        }
        async fn insert_card(&self, card: Card) -> Result<Card, DatabaseError> {
            let attempt = self.inserts.fetch_add(1, Ordering::SeqCst);
            if attempt < self.conflicts {
                return Err(DatabaseError::Conflict("cards_biz_number_key".to_string()));
            }
            self.inner.insert_card(card).await
        }
        async fn find_card(&self, id: Uuid) -> Result<Option<Card>, DatabaseError> {
            self.inner.find_card(id).await
        }
        async fn find_card_by_biz_number(&self, biz_number: i64) -> Result<Option<Card>, DatabaseError> {
            self.inner.find_card_by_biz_number(biz_number).await
        }
        async fn list_cards(&self) -> Result<Vec<Card>, DatabaseError> {
            self.inner.list_cards().await
        }
        async fn list_cards_by_owner(&self, user_id: Uuid) -> Result<Vec<Card>, DatabaseError> {
            self.inner.list_cards_by_owner(user_id).await
        }
        async fn update_card(&self, id: Uuid, changes: CardChanges) -> Result<Option<Card>, DatabaseError> {
            self.inner.update_card(id, changes).await
        }
        async fn toggle_like(&self, card_id: Uuid, user_id: Uuid) -> Result<Option<Card>, DatabaseError> {
            self.inner.toggle_like(card_id, user_id).await
        }
        async fn delete_card(&self, id: Uuid) -> Result<bool, DatabaseError> {
            self.inner.delete_card(id).await
        }
    }

    fn input() -> CardInput {
        CardInput {
            title: "Bakery".to_string(),
            subtitle: "Sourdough".to_string(),
            description: "Open from 6am".to_string(),
            phone: "0501234567".to_string(),
            email: "bread@example.com".to_string(),
            web: None,
            image: None,
            address: Address {
                state: String::new(),
                country: "Israel".to_string(),
                city: "Nazareth".to_string(),
                street: "Paulus VI".to_string(),
                house_number: 4,
                zip: 0,
            },
        }
    }

    async fn seed_card(repo: &MemoryRepository, biz_number: i64) {
        let card = NewCard {
            input: input(),
            biz_number,
            user_id: Uuid::new_v4(),
        }
        .into_card();
        repo.insert_card(card).await.unwrap();
    }

    #[tokio::test]
    async fn skips_taken_numbers() {
        let repo = MemoryRepository::new();
        seed_card(&repo, 1_000_001).await;
        seed_card(&repo, 1_000_002).await;

        let mut draws = vec![1_000_001, 1_000_002, 1_000_003].into_iter();
        let number = generate_with(&repo, 10, || draws.next().unwrap()).await.unwrap();
        assert_eq!(number, 1_000_003);
    }

    #[tokio::test]
    async fn gives_up_after_max_attempts() {
        let repo = MemoryRepository::new();
        seed_card(&repo, 1_111_111).await;

        let mut calls = 0;
        let err = generate_with(&repo, 3, || {
            calls += 1;
            1_111_111
        })
        .await
        .unwrap_err();
        assert!(matches!(err, BizNumberError::Exhausted(3)));
        assert_eq!(calls, 3);
    }

    #[tokio::test]
    async fn random_numbers_stay_in_range() {
        let repo = MemoryRepository::new();
        for _ in 0..50 {
            let n = generate_biz_number(&repo, 5).await.unwrap();
            assert!(BIZ_NUMBER_RANGE.contains(&n));
        }
    }

    #[tokio::test]
    async fn inserted_cards_get_distinct_numbers() {
        let repo = MemoryRepository::new();
        let owner = Uuid::new_v4();
        let mut numbers = std::collections::HashSet::new();
        for _ in 0..20 {
            let card = insert_card(&repo, input(), owner, 10).await.unwrap();
            assert_eq!(card.user_id, owner);
            assert!(numbers.insert(card.biz_number));
        }
        assert_eq!(repo.count_cards().await.unwrap(), 20);
    }

    #[tokio::test]
    async fn insert_retries_after_losing_a_race() {
        let repo = RacingRepository::new(2);
        let owner = Uuid::new_v4();

        let card = insert_card(&repo, input(), owner, 5).await.unwrap();
        assert_eq!(card.user_id, owner);
        assert_eq!(repo.inserts.load(Ordering::SeqCst), 3);
        assert_eq!(repo.count_cards().await.unwrap(), 1);
        assert!(repo.find_card_by_biz_number(card.biz_number).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn insert_gives_up_when_every_attempt_conflicts() {
        let repo = RacingRepository::new(u32::MAX);

        let err = insert_card(&repo, input(), Uuid::new_v4(), 4).await.unwrap_err();
        assert!(matches!(err, BizNumberError::Exhausted(4)));
        assert_eq!(repo.inserts.load(Ordering::SeqCst), 4);
        assert_eq!(repo.count_cards().await.unwrap(), 0);
    }
}
