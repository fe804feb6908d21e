//! Document shell, loading placeholder, and page transition wrapper.

use leptos::prelude::*;

use super::navigation::{NavContext, Navigation};
use crate::routes::PageRoute;
use crate::theme::Theme;

/// Enter/exit motion applied to every page body.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageTransition {
    pub duration_ms: u32,
    pub easing: [f32; 4],
    /// Pages enter from this far below and leave this far above.
    pub offset_px: u32,
}

pub const PAGE_TRANSITION: PageTransition = PageTransition {
    duration_ms: 300,
    easing: [0.25, 0.4, 0.25, 1.0],
    offset_px: 20,
};

impl PageTransition {
    /// CSS custom properties read by the `.page-transition` rules in app.css.
    #[must_use]
    pub fn style(&self) -> String {
        let [x1, y1, x2, y2] = self.easing;
        format!(
            "--page-duration:{}ms;--page-ease:cubic-bezier({x1}, {y1}, {x2}, {y2});--page-offset:{}px",
            self.duration_ms, self.offset_px
        )
    }
}

/// One full-page render.
#[derive(Debug, Clone)]
pub struct ShellPage {
    pub route: PageRoute,
    /// Raw query string, forwarded to the lazily loaded body.
    pub query: Option<String>,
    pub theme: Theme,
    /// Present for signed-in pages, which carry the navigation chrome.
    pub nav: Option<NavContext>,
    pub scripts: Vec<String>,
    pub stylesheet: String,
}

#[component]
pub fn Document(
    title: String,
    theme: Theme,
    scripts: Vec<String>,
    stylesheet: String,
    children: Children,
) -> impl IntoView {
    let html_class = theme.as_str();
    let scripts = scripts
        .into_iter()
        .map(|src| view! { <script src=src defer=true></script> })
        .collect_view();

    view! {
        <html lang="en" class=html_class>
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                <meta name="description" content="BuySmart - AI-powered product analysis"/>
                <title>{title}</title>
                {scripts}
                <link rel="stylesheet" href=stylesheet/>
            </head>
            <body class="min-h-screen bg-slate-50 dark:bg-slate-950 text-slate-900 dark:text-white antialiased">
                {children()}
            </body>
        </html>
    }
}

/// Spinner shown until the page body arrives, then replaced by it.
///
/// The "Open page" link stays visible so the body is reachable even when the
/// htmx bundle fails to load.
#[component]
pub fn LoadingFallback(src: String) -> impl IntoView {
    let fetch = src.clone();
    view! {
        <div
            class="page-loading flex items-center justify-center min-h-screen bg-gray-50 dark:bg-gray-900"
            hx-get=fetch
            hx-trigger="load"
            hx-swap="outerHTML"
        >
            <div class="text-center">
                <div class="inline-block animate-spin rounded-full h-12 w-12 border-b-2 border-blue-600"></div>
                <p class="mt-4 text-gray-600 dark:text-gray-400">"Loading..."</p>
                <a href=src class="page-fallback-link mt-2 inline-block text-sm underline text-gray-600 dark:text-gray-400">
                    "Open page"
                </a>
            </div>
        </div>
    }
}

#[component]
pub fn PageWrapper(children: Children) -> impl IntoView {
    view! {
        <div class="page-transition" style={PAGE_TRANSITION.style()}>
            {children()}
        </div>
    }
}

/// Render the full document for `page`; the body is fetched on demand.
#[must_use]
pub fn render_shell(page: ShellPage) -> String {
    let ShellPage {
        route,
        query,
        theme,
        nav,
        scripts,
        stylesheet,
    } = page;
    let title = format!("{} - BuySmart", route.title());
    let src = route.fragment_url(query.as_deref());
    let main_class = if nav.is_some() {
        "lg:pl-64 pt-16 lg:pt-0 min-h-screen"
    } else {
        "min-h-screen"
    };

    super::render_document(move || {
        view! {
            <Document title=title theme=theme scripts=scripts stylesheet=stylesheet>
                {nav.map(|ctx| view! { <Navigation ctx=ctx/> })}
                <main id="page" class=main_class>
                    <LoadingFallback src=src/>
                </main>
            </Document>
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(route: PageRoute, theme: Theme, nav: Option<NavContext>) -> ShellPage {
        ShellPage {
            route,
            query: None,
            theme,
            nav,
            scripts: vec!["/static/vendor/htmx.js".to_string(), "/static/main.js".to_string()],
            stylesheet: "/static/app.css".to_string(),
        }
    }

    #[test]
    fn transition_style_carries_timing() {
        let style = PAGE_TRANSITION.style();
        assert!(style.contains("--page-duration:300ms"));
        assert!(style.contains("cubic-bezier(0.25, 0.4, 0.25, 1)"));
        assert!(style.contains("--page-offset:20px"));
    }

    #[test]
    fn shell_defers_body_to_fragment() {
        let html = render_shell(page(PageRoute::Landing, Theme::Light, None));
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains(r#"hx-get="/pages/landing""#));
        assert!(html.contains("Loading..."));
        assert!(!html.contains("mobile-chrome"));
    }

    #[test]
    fn fallback_link_is_visible_without_htmx() {
        let html = render_shell(page(PageRoute::Landing, Theme::Light, None));
        assert!(html.contains(r#"href="/pages/landing""#));
        assert!(html.contains("page-fallback-link"));
        assert!(!html.contains("<noscript>"));
    }

    #[test]
    fn scripts_keep_chunk_order() {
        let html = render_shell(page(PageRoute::Landing, Theme::Light, None));
        let vendor = html.find("/static/vendor/htmx.js").unwrap();
        let app = html.find("/static/main.js").unwrap();
        assert!(vendor < app);
    }

    #[test]
    fn dark_theme_marks_document_root() {
        let html = render_shell(page(PageRoute::Landing, Theme::Dark, None));
        assert!(html.contains(r#"<html lang="en" class="dark""#));
    }

    #[test]
    fn signed_in_pages_carry_navigation() {
        let nav = NavContext {
            current: "/dashboard",
            query: None,
            user_name: "Ada".to_string(),
            theme: Theme::Light,
            comparison_count: 0,
        };
        let html = render_shell(page(PageRoute::Dashboard, Theme::Light, Some(nav)));
        assert!(html.contains("mobile-chrome"));
        assert!(html.contains("lg:pl-64"));
        assert!(html.contains("Ada"));
    }
}
