use std::convert::Infallible;

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use serde::{Deserialize, Serialize};

use crate::error::AppError;

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct UserClaims {
    pub sub: String, // User ID (Subject)
    pub name: String,
    pub email: String,
    pub iat: i64,
    pub exp: i64, // Expiration time (UNIX timestamp)
}

/// The signed-in user, attached to the request by the session middleware.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UserContext {
    pub user_id: String,
    pub name: String,
    pub email: String,
}

impl UserContext {
    /// Name for the navigation card; "User" when the account has none.
    #[must_use]
    pub fn display_name(&self) -> &str {
        let name = self.name.trim();
        if name.is_empty() { "User" } else { name }
    }
}

impl From<UserClaims> for UserContext {
    fn from(claims: UserClaims) -> Self {
        Self {
            user_id: claims.sub,
            name: claims.name,
            email: claims.email,
        }
    }
}

/// Optional user; never rejects.
#[derive(Clone, Debug)]
pub struct CurrentUser(pub Option<UserContext>);

impl<S: Send + Sync> FromRequestParts<S> for CurrentUser {
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self(parts.extensions.get::<UserContext>().cloned()))
    }
}

/// Required user. Routes using it sit behind [`super::require_user`], so the
/// rejection only fires if a handler is mounted outside the guard.
#[derive(Clone, Debug)]
pub struct SignedIn(pub UserContext);

impl<S: Send + Sync> FromRequestParts<S> for SignedIn {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<UserContext>()
            .cloned()
            .map(Self)
            .ok_or(AppError::Unauthorized)
    }
}
