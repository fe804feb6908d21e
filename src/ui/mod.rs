//! Server-rendered UI.
//!
//! Leptos components rendered to HTML strings on every request; htmx on the
//! client swaps fragments in for lazy page bodies and the mobile menu.
//!
//! # Structure
//!
//! - [`shell`]: document, loading placeholder, page transitions
//! - [`navigation`]: sidebar, mobile bar, drawer, badge
//! - [`pages`]: page bodies
//! - [`components`]: shared building blocks

pub mod components;
pub mod navigation;
pub mod pages;
pub mod shell;

use leptos::prelude::*;

/// Render a view to an HTML fragment.
pub fn render_fragment<F, V>(view: F) -> String
where
    F: FnOnce() -> V,
    V: IntoView,
{
    let owner = Owner::new();
    owner.with(|| view().to_html())
}

/// Render a view as a complete HTML document.
pub fn render_document<F, V>(view: F) -> String
where
    F: FnOnce() -> V,
    V: IntoView,
{
    format!("<!DOCTYPE html>{}", render_fragment(view))
}
