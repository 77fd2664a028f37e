use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{types::Json, FromRow, PgPool};
use uuid::Uuid;

use crate::database::manager::{DatabaseError, DatabaseManager};
use crate::database::models::{Address, Card, CardChanges, Image, Name, ProfileChanges, User};
use crate::database::repository::Repository;

const USER_COLUMNS: &str = "id, name, phone, email, password, image, address, \
                            is_business, is_admin, created_at, updated_at";

const CARD_COLUMNS: &str = "id, title, subtitle, description, phone, email, web, image, \
                            address, biz_number, likes, user_id, created_at, updated_at";

#[derive(Debug, FromRow)]
struct UserRow {
    id: Uuid,
    name: Json<Name>,
    phone: String,
    email: String,
    password: String,
    image: Json<Image>,
    address: Json<Address>,
    is_business: bool,
    is_admin: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        Self {
            id: row.id,
            name: row.name.0,
            phone: row.phone,
            email: row.email,
            password: row.password,
            image: row.image.0,
            address: row.address.0,
            is_business: row.is_business,
            is_admin: row.is_admin,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[derive(Debug, FromRow)]
struct CardRow {
    id: Uuid,
    title: String,
    subtitle: String,
    description: String,
    phone: String,
    email: String,
    web: Option<String>,
    image: Json<Image>,
    address: Json<Address>,
    biz_number: i64,
    likes: Vec<Uuid>,
    user_id: Uuid,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<CardRow> for Card {
    fn from(row: CardRow) -> Self {
        Self {
            id: row.id,
            title: row.title,
            subtitle: row.subtitle,
            description: row.description,
            phone: row.phone,
            email: row.email,
            web: row.web,
            image: row.image.0,
            address: row.address.0,
            biz_number: row.biz_number,
            likes: row.likes,
            user_id: row.user_id,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// PostgreSQL-backed repository
#[derive(Clone)]
pub struct PgRepository {
    pool: PgPool,
}

impl PgRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Repository for PgRepository {
    async fn health_check(&self) -> Result<(), DatabaseError> {
        DatabaseManager::health_check(&self.pool).await
    }

    async fn count_users(&self) -> Result<i64, DatabaseError> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await?;
        Ok(count.0)
    }

    async fn insert_user(&self, user: User) -> Result<User, DatabaseError> {
        let sql = format!(
            "INSERT INTO users ({USER_COLUMNS}) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11) \
             RETURNING {USER_COLUMNS}"
        );
        let row = sqlx::query_as::<_, UserRow>(&sql)
            .bind(user.id)
            .bind(Json(&user.name))
            .bind(&user.phone)
            .bind(&user.email)
            .bind(&user.password)
            .bind(Json(&user.image))
            .bind(Json(&user.address))
            .bind(user.is_business)
            .bind(user.is_admin)
            .bind(user.created_at)
            .bind(user.updated_at)
            .fetch_one(&self.pool)
            .await?;
        Ok(row.into())
    }

    async fn find_user(&self, id: Uuid) -> Result<Option<User>, DatabaseError> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1");
        let row = sqlx::query_as::<_, UserRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(User::from))
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, DatabaseError> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE email = $1");
        let row = sqlx::query_as::<_, UserRow>(&sql)
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(User::from))
    }

    async fn list_users(&self) -> Result<Vec<User>, DatabaseError> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users ORDER BY created_at, id");
        let rows = sqlx::query_as::<_, UserRow>(&sql)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.into_iter().map(User::from).collect())
    }

    async fn update_user_profile(
        &self,
        id: Uuid,
        changes: ProfileChanges,
    ) -> Result<Option<User>, DatabaseError> {
        let sql = format!(
            "UPDATE users SET name = $2, phone = $3, image = COALESCE($4, image), \
             address = $5, updated_at = now() \
             WHERE id = $1 RETURNING {USER_COLUMNS}"
        );
        let row = sqlx::query_as::<_, UserRow>(&sql)
            .bind(id)
            .bind(Json(&changes.name))
            .bind(&changes.phone)
            .bind(changes.image.as_ref().map(Json))
            .bind(Json(&changes.address))
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(User::from))
    }

    async fn set_user_business(&self, id: Uuid, is_business: bool) -> Result<Option<User>, DatabaseError> {
        let sql = format!(
            "UPDATE users SET is_business = $2, updated_at = now() \
             WHERE id = $1 RETURNING {USER_COLUMNS}"
        );
        let row = sqlx::query_as::<_, UserRow>(&sql)
            .bind(id)
            .bind(is_business)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(User::from))
    }

    async fn delete_user(&self, id: Uuid) -> Result<bool, DatabaseError> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn count_cards(&self) -> Result<i64, DatabaseError> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM cards")
            .fetch_one(&self.pool)
            .await?;
        Ok(count.0)
    }

    async fn insert_card(&self, card: Card) -> Result<Card, DatabaseError> {
        let sql = format!(
            "INSERT INTO cards ({CARD_COLUMNS}) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14) \
             RETURNING {CARD_COLUMNS}"
        );
        let row = sqlx::query_as::<_, CardRow>(&sql)
            .bind(card.id)
            .bind(&card.title)
            .bind(&card.subtitle)
            .bind(&card.description)
            .bind(&card.phone)
            .bind(&card.email)
            .bind(&card.web)
            .bind(Json(&card.image))
            .bind(Json(&card.address))
            .bind(card.biz_number)
            .bind(&card.likes)
            .bind(card.user_id)
            .bind(card.created_at)
            .bind(card.updated_at)
            .fetch_one(&self.pool)
            .await?;
        Ok(row.into())
    }

    async fn find_card(&self, id: Uuid) -> Result<Option<Card>, DatabaseError> {
        let sql = format!("SELECT {CARD_COLUMNS} FROM cards WHERE id = $1");
        let row = sqlx::query_as::<_, CardRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(Card::from))
    }

    async fn find_card_by_biz_number(&self, biz_number: i64) -> Result<Option<Card>, DatabaseError> {
        let sql = format!("SELECT {CARD_COLUMNS} FROM cards WHERE biz_number = $1");
        let row = sqlx::query_as::<_, CardRow>(&sql)
            .bind(biz_number)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(Card::from))
    }

    async fn list_cards(&self) -> Result<Vec<Card>, DatabaseError> {
        let sql = format!("SELECT {CARD_COLUMNS} FROM cards ORDER BY created_at, id");
        let rows = sqlx::query_as::<_, CardRow>(&sql)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.into_iter().map(Card::from).collect())
    }

    async fn list_cards_by_owner(&self, user_id: Uuid) -> Result<Vec<Card>, DatabaseError> {
        let sql = format!(
            "SELECT {CARD_COLUMNS} FROM cards WHERE user_id = $1 ORDER BY created_at, id"
        );
        let rows = sqlx::query_as::<_, CardRow>(&sql)
            .bind(user_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.into_iter().map(Card::from).collect())
    }

    async fn update_card(&self, id: Uuid, changes: CardChanges) -> Result<Option<Card>, DatabaseError> {
        let sql = format!(
            "UPDATE cards SET title = $2, subtitle = $3, description = $4, phone = $5, \
             email = $6, web = COALESCE($7, web), image = COALESCE($8, image), \
             address = $9, updated_at = now() \
             WHERE id = $1 RETURNING {CARD_COLUMNS}"
        );
        let row = sqlx::query_as::<_, CardRow>(&sql)
            .bind(id)
            .bind(&changes.title)
            .bind(&changes.subtitle)
            .bind(&changes.description)
            .bind(&changes.phone)
            .bind(&changes.email)
            .bind(&changes.web)
            .bind(changes.image.as_ref().map(Json))
            .bind(Json(&changes.address))
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(Card::from))
    }

    async fn toggle_like(&self, card_id: Uuid, user_id: Uuid) -> Result<Option<Card>, DatabaseError> {
        let sql = format!(
            "UPDATE cards SET likes = CASE WHEN $2::uuid = ANY(likes) \
             THEN array_remove(likes, $2::uuid) ELSE array_append(likes, $2::uuid) END, \
             updated_at = now() \
             WHERE id = $1 RETURNING {CARD_COLUMNS}"
        );
        let row = sqlx::query_as::<_, CardRow>(&sql)
            .bind(card_id)
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(Card::from))
    }

    async fn delete_card(&self, id: Uuid) -> Result<bool, DatabaseError> {
        let result = sqlx::query("DELETE FROM cards WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

// These run against a live PostgreSQL named by DATABASE_URL:
// `cargo test -- --ignored`
#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use crate::database::models::{CardInput, NewCard, NewUser};
    use crate::services::generate_biz_number;

    async fn repo() -> PgRepository {
        let mut config = AppConfig::development().database;
        config.url = std::env::var("DATABASE_URL").ok();
        let pool = DatabaseManager::connect(&config)
            .await
            .expect("DATABASE_URL must point at a reachable database");
        DatabaseManager::migrate(&pool).await.unwrap();
        PgRepository::new(pool)
    }

    fn address() -> Address {
        Address {
            state: String::new(),
            country: "Israel".to_string(),
            city: "Akko".to_string(),
            street: "HaHagana".to_string(),
            house_number: 9,
            zip: 2400000,
        }
    }

    fn user() -> User {
        NewUser {
            name: Name {
                first: "Yael".to_string(),
                middle: String::new(),
                last: "Mor".to_string(),
            },
            phone: "0501234567".to_string(),
            email: format!("yael-{}@example.com", Uuid::new_v4()),
            password: "$argon2id$v=19$stub".to_string(),
            image: Image::user_default(),
            address: address(),
            is_business: true,
            is_admin: false,
        }
        .into_user()
    }

    fn input(title: &str) -> CardInput {
        CardInput {
            title: title.to_string(),
            subtitle: "Fish market".to_string(),
            description: "Fresh every morning".to_string(),
            phone: "0501234567".to_string(),
            email: "fish@example.com".to_string(),
            web: Some("https://fish.example.com".to_string()),
            image: None,
            address: address(),
        }
    }

    #[tokio::test]
    #[ignore = "requires DATABASE_URL"]
    async fn user_round_trip_and_duplicate_email() {
        let repo = repo().await;
        let stored = repo.insert_user(user()).await.unwrap();

        let found = repo.find_user_by_email(&stored.email).await.unwrap().unwrap();
        assert_eq!(found.id, stored.id);
        assert_eq!(found.name, stored.name);
        assert_eq!(found.address, stored.address);

        let duplicate = User {
            id: Uuid::new_v4(),
            ..stored.clone()
        };
        let err = repo.insert_user(duplicate).await.unwrap_err();
        assert!(matches!(err, DatabaseError::Conflict(ref c) if c == "users_email_key"));

        let edit = ProfileChanges {
            name: stored.name.clone(),
            phone: "0527777777".to_string(),
            image: None,
            address: address(),
        };
        repo.set_user_business(stored.id, false).await.unwrap();
        let updated = repo.update_user_profile(stored.id, edit).await.unwrap().unwrap();
        assert_eq!(updated.phone, "0527777777");
        assert_eq!(updated.image, stored.image);
        assert!(!updated.is_business);

        assert!(repo.delete_user(stored.id).await.unwrap());
        assert!(repo.find_user(stored.id).await.unwrap().is_none());
    }

    #[tokio::test]
    #[ignore = "requires DATABASE_URL"]
    async fn card_round_trip_likes_and_duplicate_biz_number() {
        let repo = repo().await;
        let owner = Uuid::new_v4();
        let biz_number = generate_biz_number(&repo, 100).await.unwrap();

        let stored = repo
            .insert_card(
                NewCard {
                    input: input("Catch of the day"),
                    biz_number,
                    user_id: owner,
                }
                .into_card(),
            )
            .await
            .unwrap();
        assert!(stored.likes.is_empty());

        let clash = NewCard {
            input: input("Copycat"),
            biz_number,
            user_id: owner,
        }
        .into_card();
        let err = repo.insert_card(clash).await.unwrap_err();
        assert!(matches!(err, DatabaseError::Conflict(ref c) if c == "cards_biz_number_key"));

        let (first, second) = (Uuid::new_v4(), Uuid::new_v4());
        let (a, b) = tokio::join!(repo.toggle_like(stored.id, first), repo.toggle_like(stored.id, second));
        a.unwrap();
        b.unwrap();

        let mut changes = CardChanges::from(input("Renamed"));
        changes.web = None;
        let updated = repo.update_card(stored.id, changes).await.unwrap().unwrap();
        assert_eq!(updated.title, "Renamed");
        assert_eq!(updated.web, stored.web);
        assert_eq!(updated.likes.len(), 2);

        let unliked = repo.toggle_like(stored.id, first).await.unwrap().unwrap();
        assert_eq!(unliked.likes, vec![second]);
        assert_eq!(repo.list_cards_by_owner(owner).await.unwrap().len(), 1);

        assert!(repo.delete_card(stored.id).await.unwrap());
    }
}
