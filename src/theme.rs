//! Light/dark theme stored in a session cookie.

use axum::{
    Form,
    extract::State,
    http::HeaderMap,
    response::{IntoResponse, Response},
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::AppState;
use crate::htmx;
use crate::routes::PageRoute;

pub const THEME_COOKIE: &str = "buysmart_theme";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    #[must_use]
    pub fn toggle(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    #[must_use]
    pub fn is_dark(self) -> bool {
        self == Self::Dark
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "light" => Some(Self::Light),
            "dark" => Some(Self::Dark),
            _ => None,
        }
    }

    /// Theme from the cookie jar, or `default` when absent or garbled.
    #[must_use]
    pub fn from_jar(jar: &CookieJar, default: Theme) -> Self {
        jar.get(THEME_COOKIE)
            .and_then(|c| Self::parse(c.value()))
            .unwrap_or(default)
    }

    /// Session cookie: no expiry, so it lives as long as the browser session.
    #[must_use]
    pub fn cookie(self) -> Cookie<'static> {
        Cookie::build((THEME_COOKIE, self.as_str()))
            .path("/")
            .same_site(SameSite::Lax)
            .build()
    }
}

#[derive(Debug, Deserialize)]
pub struct ToggleThemeForm {
    /// Page to return to after toggling.
    #[serde(default)]
    pub current: Option<String>,
}

/// POST /theme - flip the theme and go back where the user was.
pub async fn toggle_theme(
    State(state): State<AppState>,
    headers: HeaderMap,
    jar: CookieJar,
    Form(form): Form<ToggleThemeForm>,
) -> Response {
    let next = Theme::from_jar(&jar, state.config.ui.default_theme).toggle();
    debug!(name: "theme.toggled", theme = next.as_str(), "Theme toggled");

    let jar = jar.add(next.cookie());
    if htmx::is_htmx(&headers) {
        return (jar, htmx::refresh()).into_response();
    }

    let back = return_target(form.current.as_deref());
    (jar, htmx::redirect(&headers, &back)).into_response()
}

/// Known page from `current`, query included; anything else goes to `/`.
#[must_use]
pub fn return_target(current: Option<&str>) -> String {
    let (path, query) = match current {
        Some(current) => current.split_once('?').unwrap_or((current, "")),
        None => ("", ""),
    };
    let Some(route) = PageRoute::from_path(path) else {
        return PageRoute::Landing.path().to_string();
    };
    if query.is_empty() || !query.bytes().all(|b| b.is_ascii_graphic() && b != b'#') {
        return route.path().to_string();
    }
    format!("{}?{query}", route.path())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_flips_between_modes() {
        assert_eq!(Theme::Light.toggle(), Theme::Dark);
        assert_eq!(Theme::Dark.toggle(), Theme::Light);
        assert_eq!(Theme::Light.toggle().toggle(), Theme::Light);
    }

    #[test]
    fn jar_falls_back_to_default() {
        let empty = CookieJar::new();
        assert_eq!(Theme::from_jar(&empty, Theme::Dark), Theme::Dark);

        let garbled = CookieJar::new().add(Cookie::new(THEME_COOKIE, "sepia"));
        assert_eq!(Theme::from_jar(&garbled, Theme::Light), Theme::Light);

        let dark = CookieJar::new().add(Theme::Dark.cookie());
        assert_eq!(Theme::from_jar(&dark, Theme::Light), Theme::Dark);
    }

    #[test]
    fn return_target_keeps_query_on_known_pages() {
        assert_eq!(
            return_target(Some("/login?error=invalid_credentials&next=/history")),
            "/login?error=invalid_credentials&next=/history"
        );
        assert_eq!(return_target(Some("/settings")), "/settings");
        assert_eq!(return_target(Some("https://evil.example/?x=1")), "/");
        assert_eq!(return_target(Some("/nowhere?x=1")), "/");
        assert_eq!(return_target(None), "/");
        assert_eq!(return_target(Some("/history?a=1\r\nSet-Cookie: x")), "/history");
    }

    #[test]
    fn cookie_is_session_scoped() {
        let cookie = Theme::Dark.cookie();
        assert_eq!(cookie.value(), "dark");
        assert_eq!(cookie.path(), Some("/"));
        assert!(cookie.max_age().is_none());
        assert!(cookie.expires().is_none());
    }
}
