//! HS256 session tokens.

use std::fmt;

use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use rand::RngCore;
use tracing::warn;

use super::{AuthError, User, UserClaims};
use crate::config::SecurityConfig;

/// Signs and verifies the tokens carried in the session cookie.
pub struct TokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    ttl: Duration,
}

impl fmt::Debug for TokenService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenService")
            .field("ttl", &self.ttl)
            .finish_non_exhaustive()
    }
}

impl TokenService {
    #[must_use]
    pub fn new(secret: &[u8], ttl: Duration) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            validation: Validation::new(Algorithm::HS256),
            ttl,
        }
    }

    /// Build from config. Without a configured secret a random one is used,
    /// which signs everyone out on restart.
    #[must_use]
    pub fn from_config(config: &SecurityConfig) -> Self {
        let ttl = Duration::minutes(config.token_ttl_minutes.max(1));
        if config.jwt_secret.is_empty() {
            warn!(
                name: "auth.secret.generated",
                "No security.jwt_secret configured; using a random per-process secret"
            );
            let mut secret = [0u8; 32];
            rand::rng().fill_bytes(&mut secret);
            Self::new(&secret, ttl)
        } else {
            Self::new(config.jwt_secret.as_bytes(), ttl)
        }
    }

    pub fn issue(&self, user: &User) -> Result<String, AuthError> {
        let now = Utc::now();
        let claims = UserClaims {
            sub: user.id.to_string(),
            name: user.name.clone(),
            email: user.email.clone(),
            iat: now.timestamp(),
            exp: (now + self.ttl).timestamp(),
        };
        Ok(encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)?)
    }

    pub fn verify(&self, token: &str) -> Result<UserClaims, AuthError> {
        Ok(decode::<UserClaims>(token, &self.decoding, &self.validation)?.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn user() -> User {
        User::new(Uuid::new_v4(), "Ada", "ada@example.com", String::new())
    }

    #[test]
    fn issued_token_verifies() {
        let service = TokenService::new(b"secret", Duration::minutes(5));
        let user = user();
        let claims = service.verify(&service.issue(&user).unwrap()).unwrap();
        assert_eq!(claims.sub, user.id.to_string());
        assert_eq!(claims.name, "Ada");
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn foreign_secret_is_rejected() {
        let ours = TokenService::new(b"ours", Duration::minutes(5));
        let theirs = TokenService::new(b"theirs", Duration::minutes(5));
        let token = theirs.issue(&user()).unwrap();
        assert!(matches!(ours.verify(&token), Err(AuthError::Token(_))));
    }

    #[test]
    fn expired_token_is_rejected() {
        // Past the default 60s validation leeway.
        let service = TokenService::new(b"secret", Duration::minutes(-5));
        let token = service.issue(&user()).unwrap();
        assert!(service.verify(&token).is_err());
    }

    #[test]
    fn generated_secret_still_round_trips() {
        let service = TokenService::from_config(&SecurityConfig::default());
        let token = service.issue(&user()).unwrap();
        assert!(service.verify(&token).is_ok());
    }
}
