// handlers/mod.rs - HTTP handlers grouped by resource
//
// users/   registration, login and account management (/users/*)
// cards/   business card CRUD and likes (/cards/*)
// system   welcome, health check and the JSON 404 fallback

pub mod cards;
pub mod system;
pub mod users;

use uuid::Uuid;

use crate::error::ApiError;

/// Path ids that are not UUIDs cannot name a stored record.
pub(crate) fn parse_id(raw: &str, missing: &'static str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(raw).map_err(|_| ApiError::not_found(missing))
}
