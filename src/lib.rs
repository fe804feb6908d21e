//! BuySmart web shell: Axum + Leptos SSR + HTMX
//!
//! Serves the navigation chrome, page routing, authentication guard, theme
//! switching, and comparison badge for the BuySmart product-analysis app.
//! Page bodies are lazily fetched by HTMX behind a loading placeholder.
//!
//! # Modules
//!
//! - [`routes`]: the page table and return-path rules
//! - [`auth`]: accounts, session tokens, and the protected-route guard
//! - [`theme`]: light/dark preference cookie
//! - [`comparison`]: per-user comparison list feeding the nav badge
//! - [`ui`]: Leptos components for the shell, navigation, and pages
//! - [`assets`]: static script chunks and size warnings

// Leptos view types for the full document nest deeper than the default limit.
#![recursion_limit = "256"]
// Allow pedantic clippy warnings that don't add value for this codebase
#![allow(clippy::missing_fields_in_debug)]
#![allow(clippy::implicit_hasher)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::cargo_common_metadata)]
#![allow(clippy::multiple_crate_versions)]
#![allow(clippy::unused_async)]
#![allow(clippy::must_use_candidate)]

pub mod assets;
pub mod auth;
pub mod comparison;
pub mod config;
pub mod error;
pub mod handlers;
pub mod htmx;
pub mod rate_limit;
pub mod routes;
pub mod server;
pub mod telemetry;
pub mod theme;
pub mod ui;

use std::sync::Arc;

use crate::assets::AssetManifest;
use crate::auth::{InMemoryUserDirectory, TokenService, UserDirectory};
use crate::comparison::ComparisonStore;
use crate::config::AppConfig;
use crate::rate_limit::RateLimiter;

/// Application state shared across all handlers.
#[derive(Clone, Debug)]
pub struct AppState {
    /// Global Configuration
    pub config: Arc<AppConfig>,
    /// Account storage and credential checks.
    pub users: Arc<dyn UserDirectory>,
    /// Signs and verifies session cookies.
    pub tokens: Arc<TokenService>,
    pub comparisons: ComparisonStore,
    pub assets: Arc<AssetManifest>,
    /// Sign-in rate limiter
    pub rate_limiter: Arc<RateLimiter>,
}

impl AppState {
    /// State backed by the in-memory user directory.
    #[must_use]
    pub fn new(config: AppConfig) -> Self {
        Self::with_user_directory(config, Arc::new(InMemoryUserDirectory::new()))
    }

    #[must_use]
    pub fn with_user_directory(config: AppConfig, users: Arc<dyn UserDirectory>) -> Self {
        let tokens = Arc::new(TokenService::from_config(&config.security));
        let assets = Arc::new(AssetManifest::load(&config.assets));
        let rate_limiter = Arc::new(RateLimiter::new(
            config.resilience.requests_per_second,
            config.resilience.burst_size,
        ));
        Self {
            config: Arc::new(config),
            users,
            tokens,
            comparisons: ComparisonStore::new(),
            assets,
            rate_limiter,
        }
    }
}
