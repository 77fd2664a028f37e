// handlers/users/mod.rs - /users routes
//
// POST   /users          register (public)
// POST   /users/login    login (public)
// GET    /users          list (admin)
// GET    /users/:id      show (self or admin)
// PUT    /users/:id      update profile (self or admin)
// PATCH  /users/:id      change business status (self)
// DELETE /users/:id      delete (self or admin)

pub mod business;
pub mod delete;
pub mod list;
pub mod login;
pub mod register;
pub mod show;
pub mod update;

pub use business::user_business;
pub use delete::user_delete;
pub use list::user_list;
pub use login::user_login;
pub use register::user_register;
pub use show::user_show;
pub use update::user_update;

use serde::Serialize;

use crate::auth::{generate_jwt, Claims};
use crate::database::models::User;
use crate::error::ApiError;
use crate::state::AppState;

pub(crate) const USER_NOT_FOUND: &str = "User not found";

/// The user record with a freshly issued `token` alongside its fields.
#[derive(Debug, Serialize)]
pub struct AuthPayload {
    #[serde(flatten)]
    pub user: User,
    pub token: String,
}

impl AuthPayload {
    pub(crate) fn issue(state: &AppState, user: User) -> Result<Self, ApiError> {
        let claims = Claims::for_user(&user, state.config.security.jwt_expiry_hours);
        let token = generate_jwt(&claims, &state.config.security.jwt_secret)?;
        Ok(Self { user, token })
    }
}
