//! Page bodies served by `/pages/{slug}`.
//!
//! Product analysis, history, and account data live in backend services this
//! shell does not own, so most pages are stubs that frame where that content
//! goes.

use leptos::prelude::*;

use super::components::{
    Button, ButtonLink, ButtonVariant, Card, CardContent, CardHeader, Field, Icon, IconKind,
};
use super::shell::PageWrapper;
use crate::routes::PageRoute;

/// What a page body needs from the request.
#[derive(Debug, Clone, Default)]
pub struct PageProps {
    /// Message for a failed form submission.
    pub notice: Option<&'static str>,
    /// Protected page to return to after signing in.
    pub next: Option<&'static str>,
    pub user_name: Option<String>,
}

#[must_use]
pub fn render_page(route: PageRoute, props: PageProps) -> String {
    super::render_fragment(move || {
        view! {
            <PageWrapper>
                {page_body(route, props)}
            </PageWrapper>
        }
    })
}

fn page_body(route: PageRoute, props: PageProps) -> AnyView {
    match route {
        PageRoute::Landing => view! { <Landing/> }.into_any(),
        PageRoute::Login => view! { <Login notice={props.notice} next={props.next}/> }.into_any(),
        PageRoute::Register => view! { <Register notice={props.notice}/> }.into_any(),
        PageRoute::Dashboard => {
            let name = props.user_name.unwrap_or_else(|| "there".to_string());
            view! { <Dashboard name=name/> }.into_any()
        }
        PageRoute::Analyze => view! {
            <StubPage
                route=route
                description="Paste a product link to get an AI breakdown of price, reviews, and alternatives."
            />
        }
        .into_any(),
        PageRoute::Result => view! {
            <StubPage
                route=route
                description="The latest analysis appears here once it finishes."
            />
        }
        .into_any(),
        PageRoute::History => view! {
            <StubPage route=route description="Every product you have analyzed, newest first."/>
        }
        .into_any(),
        PageRoute::Profile => view! {
            <StubPage route=route description="Your account details and plan."/>
        }
        .into_any(),
        PageRoute::Settings => view! {
            <StubPage route=route description="Notification, privacy, and display preferences."/>
        }
        .into_any(),
        PageRoute::Wishlist => view! {
            <StubPage route=route description="Products you saved to revisit later."/>
        }
        .into_any(),
        PageRoute::Comparison => view! {
            <StubPage route=route description="Put analyzed products side by side."/>
        }
        .into_any(),
        PageRoute::Help => view! {
            <StubPage route=route description="Guides and answers to common questions."/>
        }
        .into_any(),
    }
}

#[component]
fn PageHeading(title: &'static str, description: &'static str) -> impl IntoView {
    view! {
        <header class="mb-8">
            <h1 class="text-3xl font-bold text-slate-900 dark:text-white">{title}</h1>
            <p class="mt-2 text-slate-600 dark:text-slate-400">{description}</p>
        </header>
    }
}

#[component]
fn StubPage(route: PageRoute, description: &'static str) -> impl IntoView {
    view! {
        <section class="p-6 lg:p-10 max-w-5xl" data-page={route.slug()}>
            <PageHeading title={route.title()} description=description/>
            <Card>
                <CardContent class="pt-6 text-sm text-slate-500 dark:text-slate-400">
                    "Nothing here yet."
                </CardContent>
            </Card>
        </section>
    }
}

#[component]
fn Landing() -> impl IntoView {
    view! {
        <section class="min-h-screen flex flex-col items-center justify-center px-6 text-center" data-page="landing">
            <div class="w-14 h-14 mb-6 bg-gradient-to-br from-slate-900 to-slate-700 dark:from-white dark:to-slate-200 rounded-2xl flex items-center justify-center shadow-lg">
                <Icon kind=IconKind::Sparkles class="w-7 h-7 text-white dark:text-slate-900"/>
            </div>
            <h1 class="text-4xl lg:text-5xl font-bold text-slate-900 dark:text-white">"Shop smarter with BuySmart"</h1>
            <p class="mt-4 max-w-xl text-slate-600 dark:text-slate-400">
                "AI-powered product analysis: compare prices, read between the reviews, and decide with confidence."
            </p>
            <div class="mt-8 flex gap-3">
                <ButtonLink href={PageRoute::Register.path()}>"Get started"</ButtonLink>
                <ButtonLink href={PageRoute::Login.path()} variant=ButtonVariant::Outline>"Sign in"</ButtonLink>
            </div>
        </section>
    }
}

#[component]
fn Notice(notice: Option<&'static str>) -> impl IntoView {
    notice.map(|message| {
        view! {
            <p class="form-notice rounded-lg bg-red-50 dark:bg-red-900/20 px-4 py-3 text-sm text-red-700 dark:text-red-300" role="alert">
                {message}
            </p>
        }
    })
}

#[component]
fn Login(notice: Option<&'static str>, next: Option<&'static str>) -> impl IntoView {
    view! {
        <section class="min-h-screen flex items-center justify-center px-6" data-page="login">
            <Card class="w-full max-w-md">
                <CardHeader>
                    <h1 class="text-2xl font-bold">"Welcome back"</h1>
                    <p class="text-sm text-slate-500 dark:text-slate-400">"Sign in to continue to BuySmart."</p>
                </CardHeader>
                <CardContent>
                    <form method="post" action="/login" class="space-y-4">
                        <Notice notice=notice/>
                        {next.map(|path| view! { <input type="hidden" name="next" value=path/> })}
                        <Field label="Email" name="email" input_type="email" placeholder="you@example.com" autocomplete="email"/>
                        <Field label="Password" name="password" input_type="password" autocomplete="current-password"/>
                        <Button button_type="submit" class="w-full">"Sign in"</Button>
                    </form>
                    <p class="mt-6 text-center text-sm text-slate-500 dark:text-slate-400">
                        "New here? "
                        <a href={PageRoute::Register.path()} class="font-medium text-slate-900 dark:text-white underline">"Create an account"</a>
                    </p>
                </CardContent>
            </Card>
        </section>
    }
}

#[component]
fn Register(notice: Option<&'static str>) -> impl IntoView {
    view! {
        <section class="min-h-screen flex items-center justify-center px-6" data-page="register">
            <Card class="w-full max-w-md">
                <CardHeader>
                    <h1 class="text-2xl font-bold">"Create your account"</h1>
                    <p class="text-sm text-slate-500 dark:text-slate-400">"Start analyzing products in minutes."</p>
                </CardHeader>
                <CardContent>
                    <form method="post" action="/register" class="space-y-4">
                        <Notice notice=notice/>
                        <Field label="Name" name="name" placeholder="Your name" autocomplete="name"/>
                        <Field label="Email" name="email" input_type="email" placeholder="you@example.com" autocomplete="email"/>
                        <Field label="Password" name="password" input_type="password" placeholder="At least 8 characters" autocomplete="new-password"/>
                        <Button button_type="submit" class="w-full">"Create account"</Button>
                    </form>
                    <p class="mt-6 text-center text-sm text-slate-500 dark:text-slate-400">
                        "Already have an account? "
                        <a href={PageRoute::Login.path()} class="font-medium text-slate-900 dark:text-white underline">"Sign in"</a>
                    </p>
                </CardContent>
            </Card>
        </section>
    }
}

#[component]
fn Dashboard(name: String) -> impl IntoView {
    view! {
        <section class="p-6 lg:p-10 max-w-5xl" data-page="dashboard">
            <header class="mb-8">
                <h1 class="text-3xl font-bold text-slate-900 dark:text-white">"Welcome back, " {name}</h1>
                <p class="mt-2 text-slate-600 dark:text-slate-400">"Pick up where you left off."</p>
            </header>
            <div class="grid gap-4 md:grid-cols-2">
                <QuickLink route=PageRoute::Analyze icon=IconKind::Search blurb="Analyze a new product"/>
                <QuickLink route=PageRoute::Comparison icon=IconKind::GitCompare blurb="Compare your shortlist"/>
                <QuickLink route=PageRoute::Wishlist icon=IconKind::Heart blurb="Revisit saved products"/>
                <QuickLink route=PageRoute::History icon=IconKind::Clock blurb="Browse past analyses"/>
            </div>
        </section>
    }
}

#[component]
fn QuickLink(route: PageRoute, icon: IconKind, blurb: &'static str) -> impl IntoView {
    view! {
        <a
            href={route.path()}
            class="flex items-center gap-4 p-5 rounded-xl border border-slate-200 dark:border-slate-800 bg-white dark:bg-slate-900 hover:shadow-lg transition-all"
        >
            <Icon kind=icon class="w-6 h-6 text-slate-700 dark:text-slate-300"/>
            <div>
                <p class="font-semibold">{route.title()}</p>
                <p class="text-sm text-slate-500 dark:text-slate-400">{blurb}</p>
            </div>
        </a>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_route_has_a_body() {
        for route in PageRoute::ALL {
            let html = render_page(route, PageProps::default());
            assert!(html.contains("page-transition"), "{route:?}");
            assert!(html.contains(&format!(r#"data-page="{}""#, route.slug())), "{route:?}");
        }
    }

    #[test]
    fn login_keeps_return_path_and_notice() {
        let html = render_page(
            PageRoute::Login,
            PageProps {
                notice: Some("That email and password don't match an account."),
                next: Some("/history"),
                user_name: None,
            },
        );
        assert!(html.contains(r#"name="next""#));
        assert!(html.contains(r#"value="/history""#));
        assert!(html.contains("form-notice"));
    }

    #[test]
    fn login_without_notice_has_no_alert() {
        let html = render_page(PageRoute::Login, PageProps::default());
        assert!(!html.contains("form-notice"));
        assert!(!html.contains(r#"name="next""#));
    }

    #[test]
    fn placeholders_only_where_given() {
        let html = render_page(PageRoute::Register, PageProps::default());
        assert!(html.contains(r#"placeholder="you@example.com""#));
        assert!(html.contains(r#"placeholder="At least 8 characters""#));

        let login = render_page(PageRoute::Login, PageProps::default());
        assert!(!login.contains(r#"placeholder="""#));
    }

    #[test]
    fn dashboard_greets_user() {
        let html = render_page(
            PageRoute::Dashboard,
            PageProps {
                user_name: Some("Grace".to_string()),
                ..PageProps::default()
            },
        );
        assert!(html.contains("Grace"));
    }
}
