use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use axum_extra::extract::cookie::CookieJar;
use tracing::{debug, info};

use super::claims::UserContext;
use crate::AppState;
use crate::htmx;
use crate::routes::login_redirect;

pub const SESSION_COOKIE: &str = "buysmart_session";

/// Decode the session cookie, if any, into a [`UserContext`] extension.
///
/// Never rejects: a missing or stale cookie just leaves the request anonymous.
pub async fn session_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let jar = CookieJar::from_headers(request.headers());
    if let Some(cookie) = jar.get(SESSION_COOKIE) {
        match state.tokens.verify(cookie.value()) {
            Ok(claims) => {
                request.extensions_mut().insert(UserContext::from(claims));
            }
            Err(e) => {
                debug!(name: "auth.session.rejected", error = %e, "Ignoring session cookie");
            }
        }
    }
    next.run(request).await
}

/// Guard for protected routes: anonymous visitors go to the login page.
pub async fn require_user(request: Request, next: Next) -> Response {
    if request.extensions().get::<UserContext>().is_some() {
        return next.run(request).await;
    }

    let path = request.uri().path();
    info!(name: "auth.guard.redirected", path = %path, "Anonymous request to protected route");
    htmx::redirect(request.headers(), &login_redirect(path))
}
