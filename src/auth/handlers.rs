//! Login, registration, and logout form handlers.

use axum::{
    Form,
    extract::State,
    http::HeaderMap,
    response::{IntoResponse, Response},
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde::Deserialize;
use tracing::{error, info, warn};

use super::{AuthError, SESSION_COOKIE, User};
use crate::AppState;
use crate::htmx;
use crate::routes::{PageRoute, safe_return_path};

#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub next: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct RegisterForm {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// POST /login
pub async fn login(
    State(state): State<AppState>,
    headers: HeaderMap,
    jar: CookieJar,
    Form(form): Form<LoginForm>,
) -> Response {
    let next = form.next.as_deref();
    match state.users.authenticate(&form.email, &form.password).await {
        Ok(user) => {
            info!(name: "auth.login.succeeded", user_id = %user.id, "User signed in");
            sign_in(&state, &headers, jar, &user, safe_return_path(next))
        }
        Err(e) => {
            warn!(name: "auth.login.failed", reason = e.code(), "Sign-in rejected");
            let mut target = form_error_url(PageRoute::Login, &e);
            if let Some(route) = next.and_then(PageRoute::from_path).filter(|r| r.is_protected()) {
                target.push_str("&next=");
                target.push_str(route.path());
            }
            htmx::redirect(&headers, &target)
        }
    }
}

/// POST /register - create the account and sign straight in.
pub async fn register(
    State(state): State<AppState>,
    headers: HeaderMap,
    jar: CookieJar,
    Form(form): Form<RegisterForm>,
) -> Response {
    match state
        .users
        .register(&form.name, &form.email, &form.password)
        .await
    {
        Ok(user) => {
            info!(name: "auth.register.succeeded", user_id = %user.id, "Account created");
            sign_in(&state, &headers, jar, &user, PageRoute::HOME.path())
        }
        Err(e) => {
            warn!(name: "auth.register.failed", reason = e.code(), "Registration rejected");
            htmx::redirect(&headers, &form_error_url(PageRoute::Register, &e))
        }
    }
}

/// POST /logout
pub async fn logout(headers: HeaderMap, jar: CookieJar) -> Response {
    info!(name: "auth.logout", "User signed out");
    let jar = jar.remove(Cookie::build(SESSION_COOKIE).path("/"));
    (jar, htmx::redirect(&headers, PageRoute::Login.path())).into_response()
}

fn sign_in(
    state: &AppState,
    headers: &HeaderMap,
    jar: CookieJar,
    user: &User,
    destination: &str,
) -> Response {
    match state.tokens.issue(user) {
        Ok(token) => {
            let cookie = Cookie::build((SESSION_COOKIE, token))
                .path("/")
                .http_only(true)
                .secure(state.config.security.secure_cookies)
                .same_site(SameSite::Lax)
                .build();
            (jar.add(cookie), htmx::redirect(headers, destination)).into_response()
        }
        Err(e) => {
            error!(name: "auth.token.issue_failed", error = %e, "Could not issue session token");
            htmx::redirect(headers, &form_error_url(PageRoute::Login, &e))
        }
    }
}

fn form_error_url(page: PageRoute, error: &AuthError) -> String {
    if !error.is_user_facing() {
        error!(name: "auth.internal_error", error = %error, "Authentication backend failure");
    }
    format!("{}?error={}", page.path(), error.code())
}
