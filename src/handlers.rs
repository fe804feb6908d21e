//! Page handlers: full-page shells, lazy page bodies, and chrome fragments.

use axum::{
    extract::{Path, Query, State},
    http::HeaderMap,
    response::{Html, IntoResponse, Response},
};
use axum_extra::extract::cookie::CookieJar;
use serde::Deserialize;
use tracing::debug;

use crate::AppState;
use crate::auth::{CurrentUser, SignedIn, UserContext, notice_for};
use crate::error::AppError;
use crate::htmx;
use crate::routes::{PageRoute, login_redirect};
use crate::theme::Theme;
use crate::ui::navigation::{NavContext, mobile_chrome_html};
use crate::ui::pages::{PageProps, render_page};
use crate::ui::shell::{ShellPage, render_shell};

#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub next: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct MobileMenuQuery {
    #[serde(default)]
    pub open: bool,
    #[serde(default)]
    pub current: Option<String>,
}

fn nav_context(
    state: &AppState,
    jar: &CookieJar,
    user: &UserContext,
    current: &'static str,
    query: Option<String>,
) -> NavContext {
    NavContext {
        current,
        query,
        user_name: user.display_name().to_string(),
        theme: Theme::from_jar(jar, state.config.ui.default_theme),
        comparison_count: state.comparisons.count(&user.user_id),
    }
}

/// GET on any page path. Protected paths only get here past the guard.
pub fn page_shell(
    state: &AppState,
    jar: &CookieJar,
    route: PageRoute,
    user: Option<&UserContext>,
    query: Option<String>,
) -> Html<String> {
    let nav = user
        .filter(|_| route.is_protected())
        .map(|u| nav_context(state, jar, u, route.path(), query.clone()));

    Html(render_shell(ShellPage {
        route,
        query,
        theme: Theme::from_jar(jar, state.config.ui.default_theme),
        nav,
        scripts: state.assets.script_urls(),
        stylesheet: state.assets.stylesheet_url().to_string(),
    }))
}

/// GET /pages/{slug} - the lazily loaded page body.
pub async fn page_fragment(
    headers: HeaderMap,
    CurrentUser(user): CurrentUser,
    Path(slug): Path<String>,
    Query(query): Query<PageQuery>,
) -> Result<Response, AppError> {
    let route = PageRoute::from_slug(&slug).ok_or(AppError::NotFound)?;
    if route.is_protected() && user.is_none() {
        return Ok(htmx::redirect(&headers, &login_redirect(route.path())));
    }
    debug!(name: "page.fragment.rendered", page = route.slug(), "Rendering page body");

    let props = PageProps {
        notice: query.error.as_deref().and_then(notice_for),
        next: query
            .next
            .as_deref()
            .and_then(PageRoute::from_path)
            .filter(|r| r.is_protected())
            .map(PageRoute::path),
        user_name: user.map(|u| u.display_name().to_string()),
    };
    Ok(Html(render_page(route, props)).into_response())
}

/// GET /shell/mobile-menu - mobile chrome opened or closed.
pub async fn mobile_menu(
    State(state): State<AppState>,
    jar: CookieJar,
    SignedIn(user): SignedIn,
    Query(query): Query<MobileMenuQuery>,
) -> Html<String> {
    let current = query
        .current
        .as_deref()
        .and_then(PageRoute::from_path)
        .unwrap_or(PageRoute::HOME)
        .path();
    Html(mobile_chrome_html(
        nav_context(&state, &jar, &user, current, None),
        query.open,
    ))
}

/// Catch-all: unknown paths go to the landing page.
pub async fn redirect_home(headers: HeaderMap) -> Response {
    htmx::redirect(&headers, PageRoute::Landing.path())
}
