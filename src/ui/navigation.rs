//! Navigation chrome: desktop sidebar, mobile top bar, and slide-out drawer.
//!
//! The mobile menu flag is not stored anywhere. Full page renders always
//! draw it closed, and `/shell/mobile-menu` re-renders the mobile chrome in
//! whichever state the toggle asks for, so navigating or logging out resets it.

use leptos::prelude::*;

use super::components::{Icon, IconKind};
use super::render_fragment;
use crate::comparison::COMPARISON_CHANGED;
use crate::routes::PageRoute;
use crate::theme::Theme;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavItem {
    pub route: PageRoute,
    pub icon: IconKind,
    pub label: &'static str,
    pub badge: Option<usize>,
}

impl NavItem {
    const fn new(route: PageRoute, icon: IconKind, label: &'static str) -> Self {
        Self {
            route,
            icon,
            label,
            badge: None,
        }
    }

    #[must_use]
    pub fn path(&self) -> &'static str {
        self.route.path()
    }
}

/// Primary destinations; Compare carries the comparison count.
#[must_use]
pub fn nav_items(comparison_count: usize) -> [NavItem; 5] {
    [
        NavItem::new(PageRoute::Dashboard, IconKind::BarChart, "Dashboard"),
        NavItem::new(PageRoute::Analyze, IconKind::Search, "Analyze"),
        NavItem {
            badge: Some(comparison_count),
            ..NavItem::new(PageRoute::Comparison, IconKind::GitCompare, "Compare")
        },
        NavItem::new(PageRoute::Wishlist, IconKind::Heart, "Wishlist"),
        NavItem::new(PageRoute::History, IconKind::Clock, "History"),
    ]
}

/// Links pinned to the bottom of the sidebar.
#[must_use]
pub fn secondary_items() -> [NavItem; 2] {
    [
        NavItem::new(PageRoute::Help, IconKind::HelpCircle, "Help"),
        NavItem::new(PageRoute::Settings, IconKind::Settings, "Settings"),
    ]
}

#[must_use]
pub fn is_active(current: &str, path: &str) -> bool {
    current == path
}

const LINK_BASE: &str = "flex items-center gap-3 px-4 py-3 rounded-lg text-sm font-medium transition-all";
const LINK_ACTIVE: &str = "text-white dark:text-slate-900 bg-slate-900 dark:bg-white";
const LINK_IDLE: &str = "text-slate-600 dark:text-slate-400 hover:text-slate-900 \
                         dark:hover:text-white hover:bg-slate-50 dark:hover:bg-slate-800";

/// Classes for a navigation link. Primary links get a shadow when active.
#[must_use]
pub fn link_classes(active: bool, primary: bool) -> String {
    match (active, primary) {
        (true, true) => format!("{LINK_BASE} relative group {LINK_ACTIVE} shadow-lg"),
        (true, false) => format!("{LINK_BASE} {LINK_ACTIVE}"),
        (false, true) => format!("{LINK_BASE} relative group {LINK_IDLE}"),
        (false, false) => format!("{LINK_BASE} {LINK_IDLE}"),
    }
}

fn mobile_menu_url(open: bool, current: &str) -> String {
    format!("/shell/mobile-menu?open={open}&current={current}")
}

/// Everything the chrome needs to draw itself for one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavContext {
    /// Path of the page being shown.
    pub current: &'static str,
    /// Its query string, kept when the theme toggle sends the user back.
    pub query: Option<String>,
    pub user_name: String,
    pub theme: Theme,
    pub comparison_count: usize,
}

impl NavContext {
    /// Where the theme toggle returns to: the current path plus its query.
    #[must_use]
    pub fn return_to(&self) -> String {
        match self.query.as_deref() {
            Some(query) if !query.is_empty() => format!("{}?{query}", self.current),
            _ => self.current.to_string(),
        }
    }
}

/// Full navigation chrome for a signed-in page.
#[component]
pub fn Navigation(ctx: NavContext) -> impl IntoView {
    view! {
        <MobileChrome ctx={ctx.clone()} open=false/>
        <DesktopSidebar ctx=ctx/>
    }
}

#[component]
fn DesktopSidebar(ctx: NavContext) -> impl IntoView {
    let return_to = ctx.return_to();
    let NavContext {
        current,
        user_name,
        theme,
        comparison_count,
        ..
    } = ctx;

    view! {
        <aside class="hidden lg:flex fixed left-0 top-0 bottom-0 w-64 bg-white dark:bg-slate-900 border-r border-slate-200 dark:border-slate-800 flex-col z-40">
            <div class="p-6 border-b border-slate-200 dark:border-slate-800">
                <Brand/>
            </div>
            <NavLists current=current comparison_count=comparison_count/>
            <div class="px-4 pb-4 space-y-1">
                <ThemeToggle theme=theme return_to=return_to labelled=true/>
                <UserCard user_name=user_name/>
            </div>
        </aside>
    }
}

/// Mobile top bar plus, when `open`, the overlay and drawer.
///
/// Swapped as a unit by `/shell/mobile-menu`, hence the stable id.
#[component]
pub fn MobileChrome(ctx: NavContext, open: bool) -> impl IntoView {
    let toggle_url = mobile_menu_url(!open, ctx.current);
    let close_url = mobile_menu_url(false, ctx.current);
    let toggle_icon = if open { IconKind::Close } else { IconKind::Menu };
    let toggle_label = if open { "Close menu" } else { "Open menu" };
    let expanded = if open { "true" } else { "false" };

    let drawer = open.then(|| {
        view! {
            <div
                class="lg:hidden fixed inset-0 bg-black/50 z-40 backdrop-blur-sm"
                data-mobile-overlay=""
                hx-get=close_url
                hx-target="#mobile-chrome"
                hx-swap="outerHTML"
            ></div>
            <aside
                class="lg:hidden fixed left-0 top-0 bottom-0 w-72 bg-white dark:bg-slate-900 z-50 flex flex-col shadow-2xl"
                data-mobile-drawer=""
            >
                <div class="p-6 border-b border-slate-200 dark:border-slate-800">
                    <Brand/>
                </div>
                <NavLists current={ctx.current} comparison_count={ctx.comparison_count}/>
                <div class="px-4 pb-4">
                    <UserCard user_name={ctx.user_name.clone()}/>
                </div>
            </aside>
        }
    });

    view! {
        <div id="mobile-chrome">
            <div class="lg:hidden fixed top-0 left-0 right-0 z-50 bg-white/95 dark:bg-slate-900/95 backdrop-blur-md border-b border-slate-200/50 dark:border-slate-700/50 shadow-sm">
                <div class="flex items-center justify-between px-4 h-16">
                    <button
                        type="button"
                        class="p-2 rounded-lg text-slate-600 dark:text-slate-400 hover:text-slate-900 dark:hover:text-white hover:bg-slate-100 dark:hover:bg-slate-800 transition-all"
                        aria-label=toggle_label
                        aria-expanded=expanded
                        hx-get=toggle_url
                        hx-target="#mobile-chrome"
                        hx-swap="outerHTML"
                    >
                        <Icon kind=toggle_icon class="w-6 h-6"/>
                    </button>

                    <a href={PageRoute::HOME.path()} class="flex items-center gap-2">
                        <div class="w-8 h-8 bg-gradient-to-br from-slate-900 to-slate-700 dark:from-white dark:to-slate-200 rounded-lg flex items-center justify-center">
                            <Icon kind=IconKind::Sparkles class="w-4 h-4 text-white dark:text-slate-900"/>
                        </div>
                        <span class="text-lg font-bold bg-gradient-to-r from-slate-900 to-slate-600 dark:from-white dark:to-slate-300 bg-clip-text text-transparent">
                            "BuySmart"
                        </span>
                    </a>

                    <ThemeToggle theme={ctx.theme} return_to={ctx.return_to()} labelled=false/>
                </div>
            </div>
            {drawer}
        </div>
    }
}

#[component]
fn Brand() -> impl IntoView {
    view! {
        <a href={PageRoute::HOME.path()} class="flex items-center gap-3 group">
            <div class="relative">
                <div class="w-10 h-10 bg-gradient-to-br from-slate-900 to-slate-700 dark:from-white dark:to-slate-200 rounded-xl flex items-center justify-center shadow-lg group-hover:scale-105 transition-transform">
                    <Icon kind=IconKind::Sparkles class="w-5 h-5 text-white dark:text-slate-900"/>
                </div>
                <div class="absolute -top-1 -right-1 w-3 h-3 bg-green-500 rounded-full border-2 border-white dark:border-slate-900 animate-pulse"></div>
            </div>
            <div>
                <span class="text-xl font-bold bg-gradient-to-r from-slate-900 to-slate-600 dark:from-white dark:to-slate-300 bg-clip-text text-transparent">
                    "BuySmart"
                </span>
                <span class="text-xs font-medium text-slate-500 dark:text-slate-400 block -mt-1">"AI-Powered"</span>
            </div>
        </a>
    }
}

/// Primary list plus the pinned Help/Settings links.
#[component]
fn NavLists(current: &'static str, comparison_count: usize) -> impl IntoView {
    let primary = nav_items(comparison_count)
        .into_iter()
        .map(|item| view! { <NavLink item=item current=current primary=true/> })
        .collect_view();
    let secondary = secondary_items()
        .into_iter()
        .map(|item| view! { <NavLink item=item current=current primary=false/> })
        .collect_view();

    view! {
        <nav class="flex-1 p-4 space-y-1 overflow-y-auto" hx-boost="true" hx-swap="innerHTML swap:300ms">
            {primary}
        </nav>
        <div class="p-4 border-t border-slate-200 dark:border-slate-800 space-y-1" hx-boost="true" hx-swap="innerHTML swap:300ms">
            {secondary}
        </div>
    }
}

#[component]
fn NavLink(item: NavItem, current: &'static str, primary: bool) -> impl IntoView {
    let active = is_active(current, item.path());
    let badge = item.badge.map(|count| view! { <ComparisonBadge count=count/> });

    view! {
        <a
            href={item.path()}
            class={link_classes(active, primary)}
            aria-current={active.then_some("page")}
        >
            <Icon kind=item.icon/>
            <span>{item.label}</span>
            {badge}
        </a>
    }
}

/// Count pill on the Compare link. Hidden at zero but kept in the DOM so it
/// can refresh itself when the comparison set changes.
#[component]
pub fn ComparisonBadge(count: usize) -> impl IntoView {
    let trigger = format!("{COMPARISON_CHANGED} from:body");
    let (classes, label) = if count > 0 {
        (
            "comparison-badge ml-auto bg-green-500 text-white text-xs font-bold rounded-full w-5 h-5 flex items-center justify-center",
            Some(count),
        )
    } else {
        ("comparison-badge hidden", None)
    };

    view! {
        <span
            class=classes
            hx-get="/shell/comparison-badge"
            hx-trigger=trigger
            hx-swap="outerHTML"
        >
            {label}
        </span>
    }
}

/// Theme switch as a plain form post so it works without scripts.
#[component]
fn ThemeToggle(theme: Theme, return_to: String, labelled: bool) -> impl IntoView {
    let icon = if theme.is_dark() { IconKind::Sun } else { IconKind::Moon };
    let label = if theme.is_dark() { "Light Mode" } else { "Dark Mode" };
    let classes = if labelled {
        "w-full flex items-center gap-3 px-4 py-3 rounded-lg text-sm font-medium text-slate-600 dark:text-slate-400 hover:text-slate-900 dark:hover:text-white hover:bg-slate-50 dark:hover:bg-slate-800 transition-all"
    } else {
        "p-2 rounded-lg text-slate-600 dark:text-slate-400 hover:text-slate-900 dark:hover:text-white transition-all"
    };

    view! {
        <form method="post" action="/theme" class="theme-toggle">
            <input type="hidden" name="current" value=return_to/>
            <button type="submit" class=classes aria-label=label>
                <Icon kind=icon/>
                {labelled.then(|| view! { <span>{label}</span> })}
            </button>
        </form>
    }
}

#[component]
fn UserCard(user_name: String) -> impl IntoView {
    view! {
        <div class="flex items-center gap-3 px-4 py-3 bg-slate-50 dark:bg-slate-800 rounded-lg border border-slate-200 dark:border-slate-700 mt-2">
            <div class="w-8 h-8 bg-gradient-to-br from-slate-600 to-slate-700 dark:from-slate-300 dark:to-slate-400 rounded-full flex items-center justify-center">
                <Icon kind=IconKind::User class="w-4 h-4 text-white dark:text-slate-900"/>
            </div>
            <div class="flex-1 min-w-0">
                <p class="user-name text-sm font-medium text-slate-700 dark:text-slate-300 truncate">{user_name}</p>
                <p class="text-xs text-slate-500 dark:text-slate-400">"Premium"</p>
            </div>
            <form method="post" action="/logout">
                <button
                    type="submit"
                    class="p-1.5 rounded-lg text-slate-400 hover:text-red-600 dark:hover:text-red-400 hover:bg-red-50 dark:hover:bg-red-900/20 transition-all"
                    title="Logout"
                >
                    <Icon kind=IconKind::LogOut class="w-4 h-4"/>
                </button>
            </form>
        </div>
    }
}

/// Standalone badge, answered after the comparison set changes.
#[must_use]
pub fn comparison_badge_html(count: usize) -> String {
    render_fragment(move || view! { <ComparisonBadge count=count/> })
}

/// Mobile chrome in the requested state.
#[must_use]
pub fn mobile_chrome_html(ctx: NavContext, open: bool) -> String {
    render_fragment(move || view! { <MobileChrome ctx=ctx open=open/> })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx(current: &'static str, count: usize) -> NavContext {
        NavContext {
            current,
            query: None,
            user_name: "Ada".to_string(),
            theme: Theme::Light,
            comparison_count: count,
        }
    }

    fn render_nav(ctx: NavContext) -> String {
        render_fragment(move || view! { <Navigation ctx=ctx/> })
    }

    #[test]
    fn primary_items_in_order() {
        let labels: Vec<_> = nav_items(0).iter().map(|i| i.label).collect();
        assert_eq!(labels, ["Dashboard", "Analyze", "Compare", "Wishlist", "History"]);
        let badged: Vec<_> = nav_items(3).iter().filter_map(|i| i.badge).collect();
        assert_eq!(badged, [3]);
    }

    #[test]
    fn activity_is_exact_match() {
        assert!(is_active("/history", "/history"));
        assert!(!is_active("/history/", "/history"));
        assert!(!is_active("/", "/dashboard"));
    }

    #[test]
    fn closed_chrome_marks_one_active_link() {
        let html = render_nav(ctx("/wishlist", 0));
        assert_eq!(html.matches(r#"aria-current="page""#).count(), 1);
        assert!(!html.contains("data-mobile-drawer"));
    }

    #[test]
    fn open_drawer_repeats_the_lists() {
        let html = mobile_chrome_html(ctx("/help", 0), true);
        assert!(html.contains("data-mobile-drawer"));
        assert!(html.contains("data-mobile-overlay"));
        assert!(html.contains("/shell/mobile-menu?open=false"));
        assert!(html.contains("current=/help"));
        assert_eq!(html.matches(r#"aria-current="page""#).count(), 1);
    }

    #[test]
    fn badge_hidden_at_zero() {
        assert!(comparison_badge_html(0).contains("comparison-badge hidden"));
        let html = comparison_badge_html(4);
        assert!(html.contains("bg-green-500"));
        assert!(html.contains('4'));
    }

    #[test]
    fn theme_toggle_labels_follow_theme() {
        let light = render_nav(ctx("/dashboard", 0));
        assert!(light.contains("Dark Mode"));

        let dark = render_nav(NavContext {
            theme: Theme::Dark,
            ..ctx("/dashboard", 0)
        });
        assert!(dark.contains("Light Mode"));
    }

    #[test]
    fn theme_toggle_returns_with_query() {
        let html = render_nav(NavContext {
            query: Some("page=2".to_string()),
            ..ctx("/history", 0)
        });
        assert!(html.contains(r#"name="current" value="/history?page=2""#));

        let bare = NavContext {
            query: Some(String::new()),
            ..ctx("/history", 0)
        };
        assert_eq!(bare.return_to(), "/history");
    }

    #[test]
    fn user_name_is_escaped() {
        let html = render_nav(NavContext {
            user_name: "<script>x</script>".to_string(),
            ..ctx("/dashboard", 0)
        });
        assert!(!html.contains("<script>x</script>"));
        assert!(html.contains("&lt;script&gt;"));
    }
}
