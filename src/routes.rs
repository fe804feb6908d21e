//! The page route table.
//!
//! Every page the shell can show is a [`PageRoute`]. Paths are matched by
//! exact string equality; anything that does not resolve falls through to
//! the catch-all redirect in [`crate::server`].

use serde::Serialize;

/// Who may see a page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Access {
    Public,
    /// Requires a signed-in user; visitors are sent to `/login`.
    Protected,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum PageRoute {
    Landing,
    Login,
    Register,
    Dashboard,
    Analyze,
    Result,
    History,
    Profile,
    Settings,
    Wishlist,
    Comparison,
    Help,
}

impl PageRoute {
    pub const ALL: [PageRoute; 12] = [
        Self::Landing,
        Self::Login,
        Self::Register,
        Self::Dashboard,
        Self::Analyze,
        Self::Result,
        Self::History,
        Self::Profile,
        Self::Settings,
        Self::Wishlist,
        Self::Comparison,
        Self::Help,
    ];

    /// Where signed-in users land when no return path is given.
    pub const HOME: PageRoute = Self::Dashboard;

    #[must_use]
    pub fn path(self) -> &'static str {
        match self {
            Self::Landing => "/",
            Self::Login => "/login",
            Self::Register => "/register",
            Self::Dashboard => "/dashboard",
            Self::Analyze => "/analyze",
            Self::Result => "/result",
            Self::History => "/history",
            Self::Profile => "/profile",
            Self::Settings => "/settings",
            Self::Wishlist => "/wishlist",
            Self::Comparison => "/comparison",
            Self::Help => "/help",
        }
    }

    /// Identifier used by the fragment endpoint, `/pages/{slug}`.
    #[must_use]
    pub fn slug(self) -> &'static str {
        match self {
            Self::Landing => "landing",
            other => &other.path()[1..],
        }
    }

    #[must_use]
    pub fn title(self) -> &'static str {
        match self {
            Self::Landing => "Shop smarter",
            Self::Login => "Sign in",
            Self::Register => "Create account",
            Self::Dashboard => "Dashboard",
            Self::Analyze => "Analyze Product",
            Self::Result => "Analysis Result",
            Self::History => "History",
            Self::Profile => "Profile",
            Self::Settings => "Settings",
            Self::Wishlist => "Wishlist",
            Self::Comparison => "Compare",
            Self::Help => "Help",
        }
    }

    #[must_use]
    pub fn access(self) -> Access {
        match self {
            Self::Landing | Self::Login | Self::Register => Access::Public,
            _ => Access::Protected,
        }
    }

    #[must_use]
    pub fn is_protected(self) -> bool {
        self.access() == Access::Protected
    }

    #[must_use]
    pub fn from_path(path: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|r| r.path() == path)
    }

    #[must_use]
    pub fn from_slug(slug: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|r| r.slug() == slug)
    }

    /// URL of this page's lazily loaded body, carrying the query string along.
    #[must_use]
    pub fn fragment_url(self, query: Option<&str>) -> String {
        match query.filter(|q| !q.is_empty()) {
            Some(q) => format!("/pages/{}?{q}", self.slug()),
            None => format!("/pages/{}", self.slug()),
        }
    }
}

/// Resolve a post-login return target.
///
/// Only paths naming a known page are honoured so a crafted `next` cannot
/// bounce the user to another origin.
#[must_use]
pub fn safe_return_path(next: Option<&str>) -> &'static str {
    next.and_then(PageRoute::from_path)
        .filter(|r| !matches!(r, PageRoute::Login | PageRoute::Register))
        .unwrap_or(PageRoute::HOME)
        .path()
}

/// Login URL that returns the visitor to `path` afterwards.
#[must_use]
pub fn login_redirect(path: &str) -> String {
    match PageRoute::from_path(path) {
        Some(route) if route.is_protected() => format!("/login?next={}", route.path()),
        _ => PageRoute::Login.path().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paths_and_slugs_round_trip() {
        for route in PageRoute::ALL {
            assert_eq!(PageRoute::from_path(route.path()), Some(route));
            assert_eq!(PageRoute::from_slug(route.slug()), Some(route));
        }
    }

    #[test]
    fn only_entry_pages_are_public() {
        let public: Vec<_> = PageRoute::ALL
            .into_iter()
            .filter(|r| !r.is_protected())
            .collect();
        assert_eq!(
            public,
            vec![PageRoute::Landing, PageRoute::Login, PageRoute::Register]
        );
    }

    #[test]
    fn unknown_paths_do_not_resolve() {
        assert_eq!(PageRoute::from_path("/nope"), None);
        assert_eq!(PageRoute::from_path("/dashboard/"), None);
        assert_eq!(PageRoute::from_path("/Dashboard"), None);
        assert_eq!(PageRoute::from_slug("/dashboard"), None);
    }

    #[test]
    fn return_path_rejects_foreign_targets() {
        assert_eq!(safe_return_path(Some("/history")), "/history");
        assert_eq!(safe_return_path(Some("https://evil.example")), "/dashboard");
        assert_eq!(safe_return_path(Some("//evil.example")), "/dashboard");
        assert_eq!(safe_return_path(Some("/login")), "/dashboard");
        assert_eq!(safe_return_path(None), "/dashboard");
    }

    #[test]
    fn fragment_url_keeps_query() {
        assert_eq!(PageRoute::Landing.fragment_url(None), "/pages/landing");
        assert_eq!(
            PageRoute::Login.fragment_url(Some("error=invalid_credentials")),
            "/pages/login?error=invalid_credentials"
        );
        assert_eq!(PageRoute::Help.fragment_url(Some("")), "/pages/help");
    }

    #[test]
    fn login_redirect_only_remembers_protected_pages() {
        assert_eq!(login_redirect("/wishlist"), "/login?next=/wishlist");
        assert_eq!(login_redirect("/"), "/login");
        assert_eq!(login_redirect("/unknown"), "/login");
    }
}
