use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts, HeaderMap},
};
use uuid::Uuid;

use crate::auth::decode_jwt;
use crate::error::ApiError;
use crate::state::AppState;

/// Authenticated caller, resolved from the bearer token against the store.
///
/// Role flags are taken from the stored user, so a role change applies to
/// tokens issued before it.
#[derive(Clone, Debug)]
pub struct AuthUser {
    pub id: Uuid,
    pub email: String,
    pub is_business: bool,
    pub is_admin: bool,
}

impl AuthUser {
    pub fn require_business(&self) -> Result<(), ApiError> {
        if self.is_business {
            Ok(())
        } else {
            Err(ApiError::forbidden("Not authorized as a business user"))
        }
    }

    pub fn require_admin(&self) -> Result<(), ApiError> {
        if self.is_admin {
            Ok(())
        } else {
            Err(ApiError::forbidden("Not authorized as an admin"))
        }
    }

    pub fn owns(&self, owner_id: Uuid) -> bool {
        self.id == owner_id
    }

    /// Owner guard: the record belongs to the caller, or the caller is an admin.
    pub fn can_manage(&self, owner_id: Uuid) -> bool {
        self.owns(owner_id) || self.is_admin
    }
}

#[async_trait]
impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let token = extract_jwt_from_headers(&parts.headers).map_err(ApiError::unauthorized)?;
        let claims = decode_jwt(token, &state.config.security.jwt_secret)?;

        let user = state.repo.find_user(claims.id).await?.ok_or_else(|| {
            tracing::warn!("Token for unknown user {}", claims.id);
            ApiError::unauthorized("Not authorized, user not found")
        })?;

        tracing::debug!("Authenticated user {} ({})", user.id, user.email);

        Ok(AuthUser {
            id: user.id,
            email: user.email,
            is_business: user.is_business,
            is_admin: user.is_admin,
        })
    }
}

/// Extract JWT token from Authorization header
fn extract_jwt_from_headers(headers: &HeaderMap) -> Result<&str, String> {
    let auth_header = headers
        .get(AUTHORIZATION)
        .ok_or_else(|| "Not authorized, no token".to_string())?;

    let auth_str = auth_header
        .to_str()
        .map_err(|_| "Invalid Authorization header format".to_string())?;

    match auth_str.strip_prefix("Bearer ") {
        Some(token) if !token.trim().is_empty() => Ok(token.trim()),
        Some(_) => Err("Not authorized, no token".to_string()),
        None => Err("Authorization header must use Bearer token format".to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn extracts_bearer_token() {
        assert_eq!(extract_jwt_from_headers(&headers("Bearer abc.def")).unwrap(), "abc.def");
    }

    #[test]
    fn rejects_missing_or_malformed_header() {
        assert!(extract_jwt_from_headers(&HeaderMap::new()).is_err());
        assert!(extract_jwt_from_headers(&headers("Basic dXNlcjpwYXNz")).is_err());
        assert!(extract_jwt_from_headers(&headers("Bearer   ")).is_err());
    }

    #[test]
    fn owner_guard_allows_owner_or_admin() {
        let owner = Uuid::new_v4();
        let mut caller = AuthUser {
            id: owner,
            email: "owner@example.com".to_string(),
            is_business: true,
            is_admin: false,
        };
        assert!(caller.can_manage(owner));
        assert!(!caller.can_manage(Uuid::new_v4()));

        caller.is_admin = true;
        assert!(caller.can_manage(Uuid::new_v4()));
        assert!(caller.require_admin().is_ok());
    }

    #[test]
    fn role_checks_reject_regular_users() {
        let caller = AuthUser {
            id: Uuid::new_v4(),
            email: "plain@example.com".to_string(),
            is_business: false,
            is_admin: false,
        };
        assert!(matches!(caller.require_business(), Err(ApiError::Forbidden(_))));
        assert!(matches!(caller.require_admin(), Err(ApiError::Forbidden(_))));
    }
}
