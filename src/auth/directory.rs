//! User accounts.

use std::collections::HashMap;
use std::fmt::Debug;
use std::sync::{LazyLock, RwLock};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use super::AuthError;
use super::password::{hash_password, verify_password};

pub const MIN_PASSWORD_LEN: usize = 8;

/// Hash checked when the email is unknown, so both rejections cost one Argon2 run.
static UNKNOWN_USER_HASH: LazyLock<Result<String, String>> =
    LazyLock::new(|| hash_password("unknown-user").map_err(|e| e.to_string()));

fn verify_unknown_user(password: &str) -> Result<bool, AuthError> {
    let hash = UNKNOWN_USER_HASH
        .as_ref()
        .map_err(|e| AuthError::Hashing(e.clone()))?;
    verify_password(password, hash)?;
    Ok(false)
}

#[derive(Debug, Clone, Serialize)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    #[serde(skip)]
    password_hash: String,
    pub created_at: DateTime<Utc>,
}

impl User {
    #[must_use]
    pub fn new(
        id: Uuid,
        name: impl Into<String>,
        email: impl Into<String>,
        password_hash: String,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            email: email.into(),
            password_hash,
            created_at: Utc::now(),
        }
    }
}

/// Account store consulted by the sign-in flows.
#[async_trait]
pub trait UserDirectory: Send + Sync + Debug {
    async fn register(&self, name: &str, email: &str, password: &str) -> Result<User, AuthError>;

    async fn authenticate(&self, email: &str, password: &str) -> Result<User, AuthError>;

    async fn find(&self, id: Uuid) -> Option<User>;
}

/// Lowercased, trimmed email used as the lookup key.
#[must_use]
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

pub fn validate_registration(name: &str, email: &str, password: &str) -> Result<(), AuthError> {
    if name.trim().is_empty() {
        return Err(AuthError::InvalidInput("name is required"));
    }
    let email = email.trim();
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && !domain.is_empty() => {}
        _ => return Err(AuthError::InvalidInput("email is not valid")),
    }
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(AuthError::InvalidInput("password is too short"));
    }
    Ok(())
}

/// Process-local directory. Accounts vanish on restart.
#[derive(Debug, Default)]
pub struct InMemoryUserDirectory {
    users: RwLock<HashMap<String, User>>,
}

impl InMemoryUserDirectory {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.users.read().unwrap().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl UserDirectory for InMemoryUserDirectory {
    async fn register(&self, name: &str, email: &str, password: &str) -> Result<User, AuthError> {
        validate_registration(name, email, password)?;
        let key = normalize_email(email);
        if self.users.read().unwrap().contains_key(&key) {
            return Err(AuthError::EmailTaken);
        }

        let password = password.to_owned();
        let hash = tokio::task::spawn_blocking(move || hash_password(&password))
            .await
            .map_err(|e| AuthError::Hashing(e.to_string()))??;

        let user = User::new(Uuid::new_v4(), name.trim(), key.clone(), hash);
        let mut users = self.users.write().unwrap();
        // Another request may have claimed the address while we were hashing.
        if users.contains_key(&key) {
            return Err(AuthError::EmailTaken);
        }
        users.insert(key, user.clone());
        Ok(user)
    }

    async fn authenticate(&self, email: &str, password: &str) -> Result<User, AuthError> {
        let user = self
            .users
            .read()
            .unwrap()
            .get(&normalize_email(email))
            .cloned();

        let password = password.to_owned();
        let stored = user.as_ref().map(|u| u.password_hash.clone());
        let verified = tokio::task::spawn_blocking(move || match stored {
            Some(hash) => verify_password(&password, &hash),
            None => verify_unknown_user(&password),
        })
        .await
        .map_err(|e| AuthError::Hashing(e.to_string()))??;

        match user {
            Some(user) if verified => Ok(user),
            _ => Err(AuthError::InvalidCredentials),
        }
    }

    async fn find(&self, id: Uuid) -> Option<User> {
        self.users
            .read()
            .unwrap()
            .values()
            .find(|u| u.id == id)
            .cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn register_then_authenticate() {
        let dir = InMemoryUserDirectory::new();
        let user = dir
            .register("Grace", "Grace@Example.com ", "hopper1906")
            .await
            .unwrap();
        assert_eq!(user.email, "grace@example.com");

        let signed_in = dir.authenticate("grace@example.com", "hopper1906").await.unwrap();
        assert_eq!(signed_in.id, user.id);
        assert_eq!(dir.find(user.id).await.map(|u| u.name), Some("Grace".to_string()));
    }

    #[tokio::test]
    async fn wrong_password_and_unknown_email_look_the_same() {
        let dir = InMemoryUserDirectory::new();
        dir.register("Grace", "grace@example.com", "hopper1906")
            .await
            .unwrap();

        let wrong = dir.authenticate("grace@example.com", "nope-nope").await;
        let unknown = dir.authenticate("ghost@example.com", "hopper1906").await;
        assert!(matches!(wrong, Err(AuthError::InvalidCredentials)));
        assert!(matches!(unknown, Err(AuthError::InvalidCredentials)));
    }

    #[test]
    fn unknown_users_still_pay_for_a_hash() {
        let hash = UNKNOWN_USER_HASH.as_ref().unwrap();
        assert!(hash.starts_with("$argon2id$"));
        assert!(!verify_unknown_user("unknown-user").unwrap());
        assert!(!verify_unknown_user("hopper1906").unwrap());
    }

    #[tokio::test]
    async fn duplicate_email_is_rejected_case_insensitively() {
        let dir = InMemoryUserDirectory::new();
        dir.register("A", "a@example.com", "password1").await.unwrap();
        let again = dir.register("B", "A@EXAMPLE.COM", "password2").await;
        assert!(matches!(again, Err(AuthError::EmailTaken)));
        assert_eq!(dir.len(), 1);
    }

    #[test]
    fn registration_validation() {
        assert!(validate_registration("Ada", "ada@example.com", "12345678").is_ok());
        assert!(validate_registration(" ", "ada@example.com", "12345678").is_err());
        assert!(validate_registration("Ada", "ada.example.com", "12345678").is_err());
        assert!(validate_registration("Ada", "@example.com", "12345678").is_err());
        assert!(validate_registration("Ada", "ada@example.com", "short").is_err());
    }
}
