//! Per-user product comparison set, surfaced as the "Compare" badge.

use std::collections::{BTreeSet, HashMap};
use std::sync::{Arc, RwLock};

use axum::{
    Json,
    extract::{Path, State},
    http::HeaderValue,
    response::{Html, IntoResponse, Response},
};
use serde::Serialize;
use tracing::debug;

use crate::AppState;
use crate::auth::SignedIn;
use crate::error::AppError;
use crate::htmx::HX_TRIGGER;
use crate::ui::navigation::comparison_badge_html;

/// Event fired after the set changes so every badge on the page refreshes.
pub const COMPARISON_CHANGED: &str = "comparison-changed";

/// Longest accepted product identifier.
const MAX_PRODUCT_ID_LEN: usize = 128;

#[derive(Debug, Clone, Default)]
pub struct ComparisonStore {
    inner: Arc<RwLock<HashMap<String, BTreeSet<String>>>>,
}

impl ComparisonStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns whether the product was newly added.
    pub fn add(&self, user_id: &str, product_id: &str) -> bool {
        self.inner
            .write()
            .unwrap()
            .entry(user_id.to_string())
            .or_default()
            .insert(product_id.to_string())
    }

    /// Returns whether the product was present.
    pub fn remove(&self, user_id: &str, product_id: &str) -> bool {
        let mut guard = self.inner.write().unwrap();
        let Some(items) = guard.get_mut(user_id) else {
            return false;
        };
        let removed = items.remove(product_id);
        if items.is_empty() {
            guard.remove(user_id);
        }
        removed
    }

    pub fn clear(&self, user_id: &str) {
        self.inner.write().unwrap().remove(user_id);
    }

    #[must_use]
    pub fn count(&self, user_id: &str) -> usize {
        self.inner.read().unwrap().get(user_id).map_or(0, BTreeSet::len)
    }

    #[must_use]
    pub fn items(&self, user_id: &str) -> Vec<String> {
        self.inner
            .read()
            .unwrap()
            .get(user_id)
            .map(|items| items.iter().cloned().collect())
            .unwrap_or_default()
    }
}

#[derive(Debug, Serialize)]
pub struct ComparisonSummary {
    pub count: usize,
    pub items: Vec<String>,
}

/// GET /api/comparison
pub async fn summary(
    State(state): State<AppState>,
    SignedIn(user): SignedIn,
) -> Json<ComparisonSummary> {
    let items = state.comparisons.items(&user.user_id);
    Json(ComparisonSummary {
        count: items.len(),
        items,
    })
}

/// GET /shell/comparison-badge
pub async fn badge(State(state): State<AppState>, SignedIn(user): SignedIn) -> Html<String> {
    badge_html(state.comparisons.count(&user.user_id))
}

/// POST /comparison/items/{product_id}
pub async fn add_item(
    State(state): State<AppState>,
    SignedIn(user): SignedIn,
    Path(product_id): Path<String>,
) -> Result<Response, AppError> {
    let product_id = validate_product_id(&product_id)?;
    let added = state.comparisons.add(&user.user_id, product_id);
    debug!(name: "comparison.item.added", product_id, added, "Comparison updated");
    Ok(changed(state.comparisons.count(&user.user_id)))
}

/// DELETE /comparison/items/{product_id}
pub async fn remove_item(
    State(state): State<AppState>,
    SignedIn(user): SignedIn,
    Path(product_id): Path<String>,
) -> Result<Response, AppError> {
    let product_id = validate_product_id(&product_id)?;
    let removed = state.comparisons.remove(&user.user_id, product_id);
    debug!(name: "comparison.item.removed", product_id, removed, "Comparison updated");
    Ok(changed(state.comparisons.count(&user.user_id)))
}

fn validate_product_id(product_id: &str) -> Result<&str, AppError> {
    let trimmed = product_id.trim();
    if trimmed.is_empty() || trimmed.len() > MAX_PRODUCT_ID_LEN {
        return Err(AppError::NotFound);
    }
    Ok(trimmed)
}

fn badge_html(count: usize) -> Html<String> {
    Html(comparison_badge_html(count))
}

fn changed(count: usize) -> Response {
    let mut response = badge_html(count).into_response();
    response
        .headers_mut()
        .insert(HX_TRIGGER, HeaderValue::from_static(COMPARISON_CHANGED));
    response
}
