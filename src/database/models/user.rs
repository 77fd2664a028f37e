use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{Address, Image, ImageInput};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Name {
    pub first: String,
    #[serde(default)]
    pub middle: String,
    pub last: String,
}

/// A registered account. The password hash is never serialized.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub name: Name,
    pub phone: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password: String,
    pub image: Image,
    pub address: Address,
    pub is_business: bool,
    pub is_admin: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    pub fn apply_profile(&mut self, changes: ProfileChanges) {
        self.name = changes.name;
        self.phone = changes.phone;
        self.address = changes.address;
        if let Some(image) = changes.image {
            self.image = image;
        }
        self.updated_at = Utc::now();
    }

    pub fn set_business(&mut self, is_business: bool) {
        self.is_business = is_business;
        self.updated_at = Utc::now();
    }
}

/// Everything needed to create a user; `password` is already hashed.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: Name,
    pub phone: String,
    pub email: String,
    pub password: String,
    pub image: Image,
    pub address: Address,
    pub is_business: bool,
    pub is_admin: bool,
}

impl NewUser {
    pub fn into_user(self) -> User {
        let now = Utc::now();
        User {
            id: Uuid::new_v4(),
            name: self.name,
            phone: self.phone,
            email: self.email,
            password: self.password,
            image: self.image,
            address: self.address,
            is_business: self.is_business,
            is_admin: self.is_admin,
            created_at: now,
            updated_at: now,
        }
    }
}

// Request payloads. They are deserialized only after schema validation passed.

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterUser {
    pub name: Name,
    pub phone: String,
    pub email: String,
    pub password: String,
    pub image: Option<ImageInput>,
    pub address: Address,
    pub is_business: Option<bool>,
    pub is_admin: Option<bool>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateUser {
    pub name: Name,
    pub phone: String,
    pub image: Option<ImageInput>,
    pub address: Address,
}

/// The columns a profile update writes. Email, password and role flags are
/// left to their own operations; `image` is kept when `None`.
#[derive(Debug, Clone)]
pub struct ProfileChanges {
    pub name: Name,
    pub phone: String,
    pub image: Option<Image>,
    pub address: Address,
}

impl From<UpdateUser> for ProfileChanges {
    fn from(update: UpdateUser) -> Self {
        Self {
            name: update.name,
            phone: update.phone,
            image: update.image.map(|image| image.into_image(Image::user_default())),
            address: update.address,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BusinessStatus {
    pub is_business: bool,
}

/// Emails are compared case-insensitively.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> User {
        NewUser {
            name: Name {
                first: "Dana".to_string(),
                middle: String::new(),
                last: "Levi".to_string(),
            },
            phone: "0501234567".to_string(),
            email: "dana@example.com".to_string(),
            password: "$argon2id$v=19$stub".to_string(),
            image: Image::user_default(),
            address: Address {
                state: String::new(),
                country: "Israel".to_string(),
                city: "Haifa".to_string(),
                street: "HaNassi".to_string(),
                house_number: 3,
                zip: 0,
            },
            is_business: false,
            is_admin: false,
        }
        .into_user()
    }

    #[test]
    fn serialization_hides_password_and_uses_wire_names() {
        let value = serde_json::to_value(sample()).unwrap();
        assert!(value.get("password").is_none());
        assert!(value.get("_id").is_some());
        assert_eq!(value["isBusiness"], json!(false));
        assert_eq!(value["address"]["houseNumber"], json!(3));
    }

    #[test]
    fn update_keeps_image_when_omitted() {
        let mut user = sample();
        let before = user.image.clone();
        let update = UpdateUser {
            name: Name {
                first: "Dana".to_string(),
                middle: "R".to_string(),
                last: "Cohen".to_string(),
            },
            phone: "0521111111".to_string(),
            image: None,
            address: user.address.clone(),
        };
        user.apply_profile(update.into());
        assert_eq!(user.name.last, "Cohen");
        assert_eq!(user.phone, "0521111111");
        assert_eq!(user.image, before);
    }

    #[test]
    fn profile_image_parts_fall_back_to_defaults() {
        let changes = ProfileChanges::from(UpdateUser {
            name: sample().name,
            phone: "0521111111".to_string(),
            image: Some(ImageInput {
                url: Some("https://img.example.com/dana.png".to_string()),
                alt: Some(" ".to_string()),
            }),
            address: sample().address,
        });
        let image = changes.image.unwrap();
        assert_eq!(image.url, "https://img.example.com/dana.png");
        assert_eq!(image.alt, Image::user_default().alt);
    }

    #[test]
    fn normalizes_email() {
        assert_eq!(normalize_email("  Dana@Example.COM "), "dana@example.com");
    }
}
