use serde::Serialize;
use tracing::info;

use crate::auth::password::hash_password;
use crate::database::models::{Address, CardInput, Image, ImageInput, Name, NewUser, User};
use crate::database::Repository;
use crate::services::biz_number::insert_card;

const SEED_CARD_COUNT: i64 = 3;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SeedReport {
    pub users: usize,
    pub cards: usize,
}

struct SeedUser {
    first: &'static str,
    email: &'static str,
    password: &'static str,
    phone: &'static str,
    city: &'static str,
    street: &'static str,
    house_number: i64,
    zip: i64,
    is_business: bool,
    is_admin: bool,
}

const SEED_USERS: [SeedUser; 3] = [
    SeedUser {
        first: "Regular",
        email: "regular@example.com",
        password: "Regular@123",
        phone: "0501234567",
        city: "Tel Aviv",
        street: "Rothschild",
        house_number: 10,
        zip: 1234567,
        is_business: false,
        is_admin: false,
    },
    SeedUser {
        first: "Business",
        email: "business@example.com",
        password: "Business@123",
        phone: "0501234568",
        city: "Jerusalem",
        street: "Jaffa",
        house_number: 20,
        zip: 7654321,
        is_business: true,
        is_admin: false,
    },
    SeedUser {
        first: "Admin",
        email: "admin@example.com",
        password: "Admin@123",
        phone: "0501234569",
        city: "Haifa",
        street: "HaNassi",
        house_number: 30,
        zip: 3456789,
        is_business: true,
        is_admin: true,
    },
];

/// Populate an empty store with one user per role and three sample cards
/// owned by the business user. A store that already has users is untouched.
pub async fn seed_if_empty(repo: &dyn Repository, max_attempts: u32) -> anyhow::Result<SeedReport> {
    let mut report = SeedReport::default();

    if repo.count_users().await? > 0 {
        info!("Users present, skipping seed data");
        return Ok(report);
    }

    info!("Seeding initial users...");
    let mut business_owner: Option<User> = None;
    for seed in &SEED_USERS {
        let user = repo.insert_user(seed_user(seed).await?).await?;
        if seed.is_business && !seed.is_admin {
            business_owner = Some(user);
        }
        report.users += 1;
    }
    info!("Initial users created successfully");

    let owner = match business_owner {
        Some(owner) => owner,
        None => return Ok(report),
    };

    if repo.count_cards().await? > 0 {
        return Ok(report);
    }

    info!("Seeding initial cards...");
    for i in 1..=SEED_CARD_COUNT {
        insert_card(repo, seed_card(i), owner.id, max_attempts).await?;
        report.cards += 1;
    }
    info!("Initial cards created successfully");

    Ok(report)
}

async fn seed_user(seed: &SeedUser) -> anyhow::Result<User> {
    let password = hash_password(seed.password.to_string()).await?;
    let image = Image {
        alt: format!("{} user profile image", seed.first),
        ..Image::user_default()
    };

    Ok(NewUser {
        name: Name {
            first: seed.first.to_string(),
            middle: String::new(),
            last: "User".to_string(),
        },
        phone: seed.phone.to_string(),
        email: seed.email.to_string(),
        password,
        image,
        address: Address {
            state: String::new(),
            country: "Israel".to_string(),
            city: seed.city.to_string(),
            street: seed.street.to_string(),
            house_number: seed.house_number,
            zip: seed.zip,
        },
        is_business: seed.is_business,
        is_admin: seed.is_admin,
    }
    .into_user())
}

fn seed_card(i: i64) -> CardInput {
    CardInput {
        title: format!("Card {i}"),
        subtitle: format!("Subtitle for Card {i}"),
        description: format!(
            "This is a description for Card {i}. It contains information about the business."
        ),
        phone: format!("05012345{i}0"),
        email: format!("card{i}@example.com"),
        web: Some(format!("https://card{i}.example.com")),
        image: Some(ImageInput {
            url: None,
            alt: Some(format!("Business card {i} image")),
        }),
        address: Address {
            state: String::new(),
            country: "Israel".to_string(),
            city: "Tel Aviv".to_string(),
            street: format!("Street {i}"),
            house_number: i * 10,
            zip: 1_000_000 + i,
        },
    }
}
