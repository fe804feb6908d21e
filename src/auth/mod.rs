//! Sign-in, session cookies, and the protected-route guard.
//!
//! The user store is a seam ([`UserDirectory`]): the product's real account
//! service lives elsewhere, and this crate ships an in-memory directory so
//! the shell is usable on its own.
//!
//! - [`claims`]: JWT claims and the per-request [`UserContext`]
//! - [`token`]: signing and verifying session tokens
//! - [`password`]: Argon2id hashing
//! - [`directory`]: the user store
//! - [`middleware`]: cookie decoding and the guard
//! - [`handlers`]: login, register, logout

pub mod claims;
pub mod directory;
pub mod handlers;
pub mod middleware;
pub mod password;
pub mod token;

use thiserror::Error;

pub use claims::{CurrentUser, SignedIn, UserClaims, UserContext};
pub use directory::{InMemoryUserDirectory, User, UserDirectory};
pub use middleware::{SESSION_COOKIE, require_user, session_middleware};
pub use token::TokenService;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("invalid email or password")]
    InvalidCredentials,
    #[error("an account with this email already exists")]
    EmailTaken,
    #[error("invalid input: {0}")]
    InvalidInput(&'static str),
    #[error("password hashing failed: {0}")]
    Hashing(String),
    #[error("session token rejected: {0}")]
    Token(#[from] jsonwebtoken::errors::Error),
}

impl AuthError {
    /// Short code carried in `?error=` so the form can explain what happened.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidCredentials => "invalid_credentials",
            Self::EmailTaken => "email_taken",
            Self::InvalidInput(_) => "invalid_input",
            Self::Hashing(_) | Self::Token(_) => "unavailable",
        }
    }

    /// Whether the user can fix this by resubmitting the form.
    #[must_use]
    pub fn is_user_facing(&self) -> bool {
        matches!(
            self,
            Self::InvalidCredentials | Self::EmailTaken | Self::InvalidInput(_)
        )
    }
}

/// Message shown above the login/register form for an `?error=` code.
#[must_use]
pub fn notice_for(code: &str) -> Option<&'static str> {
    match code {
        "invalid_credentials" => Some("That email and password don't match an account."),
        "email_taken" => Some("An account with this email already exists."),
        "invalid_input" => {
            Some("Please enter your name, a valid email, and a password of at least 8 characters.")
        }
        "rate_limited" => Some("Too many attempts. Please wait a moment and try again."),
        "unavailable" => Some("Sign-in is temporarily unavailable."),
        _ => None,
    }
}
