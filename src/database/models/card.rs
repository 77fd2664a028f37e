use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{Address, Image, ImageInput};

/// A business listing owned by a user.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub title: String,
    pub subtitle: String,
    pub description: String,
    pub phone: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub web: Option<String>,
    pub image: Image,
    pub address: Address,
    pub biz_number: i64,
    pub likes: Vec<Uuid>,
    #[serde(rename = "user_id")]
    pub user_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Card {
    /// Adds or removes `user_id` from the likes. Returns true if the card is now liked.
    pub fn toggle_like(&mut self, user_id: Uuid) -> bool {
        let liked = match self.likes.iter().position(|id| *id == user_id) {
            Some(index) => {
                self.likes.remove(index);
                false
            }
            None => {
                self.likes.push(user_id);
                true
            }
        };
        self.updated_at = Utc::now();
        liked
    }

    pub fn apply_changes(&mut self, changes: CardChanges) {
        self.title = changes.title;
        self.subtitle = changes.subtitle;
        self.description = changes.description;
        self.phone = changes.phone;
        self.email = changes.email;
        self.address = changes.address;
        if let Some(web) = changes.web {
            self.web = Some(web);
        }
        if let Some(image) = changes.image {
            self.image = image;
        }
        self.updated_at = Utc::now();
    }
}

/// The columns a card update writes. Business number, owner and likes are
/// never part of it; `web` and `image` are kept when `None`.
#[derive(Debug, Clone)]
pub struct CardChanges {
    pub title: String,
    pub subtitle: String,
    pub description: String,
    pub phone: String,
    pub email: String,
    pub web: Option<String>,
    pub image: Option<Image>,
    pub address: Address,
}

impl From<CardInput> for CardChanges {
    fn from(input: CardInput) -> Self {
        Self {
            title: input.title,
            subtitle: input.subtitle,
            description: input.description,
            phone: input.phone,
            email: input.email,
            web: input.web.filter(|w| !w.is_empty()),
            image: input.image.map(|image| image.into_image(Image::card_default())),
            address: input.address,
        }
    }
}

#[derive(Debug, Clone)]
pub struct NewCard {
    pub input: CardInput,
    pub biz_number: i64,
    pub user_id: Uuid,
}

impl NewCard {
    pub fn into_card(self) -> Card {
        let now = Utc::now();
        let input = self.input;
        Card {
            id: Uuid::new_v4(),
            title: input.title,
            subtitle: input.subtitle,
            description: input.description,
            phone: input.phone,
            email: input.email,
            web: input.web.filter(|w| !w.is_empty()),
            image: input
                .image
                .unwrap_or_default()
                .into_image(Image::card_default()),
            address: input.address,
            biz_number: self.biz_number,
            likes: Vec::new(),
            user_id: self.user_id,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Card body for both create and update.
#[derive(Debug, Clone, Deserialize)]
pub struct CardInput {
    pub title: String,
    pub subtitle: String,
    pub description: String,
    pub phone: String,
    pub email: String,
    pub web: Option<String>,
    pub image: Option<ImageInput>,
    pub address: Address,
}
