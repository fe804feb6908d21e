use std::time::Duration;

use axum::{
    Router,
    extract::{RawQuery, Request, State},
    http::StatusCode,
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use axum_extra::extract::cookie::CookieJar;
use tower::ServiceBuilder;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::AppState;
use crate::assets::STATIC_PREFIX;
use crate::auth::{self, CurrentUser, require_user, session_middleware};
use crate::comparison;
use crate::config::AppConfig;
use crate::handlers;
use crate::rate_limit::limit_sign_in;
use crate::routes::PageRoute;
use crate::theme;

/// Effectively "no timeout" without changing the layer stack's type.
const UNBOUNDED_TIMEOUT: Duration = Duration::from_secs(365 * 24 * 60 * 60);

/// Build the full application router.
pub fn build_router(state: AppState) -> Router {
    let mut public = Router::new();
    let mut protected = Router::new();

    for route in PageRoute::ALL {
        let shell = get(
            move |State(state): State<AppState>,
                  jar: CookieJar,
                  CurrentUser(user): CurrentUser,
                  RawQuery(query): RawQuery| async move {
                handlers::page_shell(&state, &jar, route, user.as_ref(), query)
            },
        );
        if route.is_protected() {
            protected = protected.route(route.path(), shell);
        } else {
            public = public.route(route.path(), shell);
        }
    }

    let sign_in_limit = middleware::from_fn_with_state(state.clone(), limit_sign_in);
    let public = public
        .route(
            PageRoute::Login.path(),
            post(auth::handlers::login).route_layer(sign_in_limit.clone()),
        )
        .route(
            PageRoute::Register.path(),
            post(auth::handlers::register).route_layer(sign_in_limit),
        )
        .route("/logout", post(auth::handlers::logout))
        .route("/theme", post(theme::toggle_theme))
        .route("/pages/{slug}", get(handlers::page_fragment));

    let protected = protected
        .route("/shell/mobile-menu", get(handlers::mobile_menu))
        .route("/shell/comparison-badge", get(comparison::badge))
        .route(
            "/comparison/items/{product_id}",
            post(comparison::add_item).delete(comparison::remove_item),
        )
        .route("/api/comparison", get(comparison::summary))
        .route_layer(middleware::from_fn(require_user));

    let timeout = request_timeout(state.config.server.request_timeout_secs);

    Router::new()
        .merge(public)
        .merge(protected)
        .nest_service(STATIC_PREFIX, ServeDir::new(&state.config.assets.static_dir))
        .fallback(handlers::redirect_home)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(middleware::from_fn_with_state(timeout, enforce_timeout))
                .layer(middleware::from_fn_with_state(
                    state.clone(),
                    session_middleware,
                )),
        )
        .with_state(state)
}

/// Configured request bound; `0` disables it.
#[must_use]
pub fn request_timeout(secs: u64) -> Duration {
    match secs {
        0 => UNBOUNDED_TIMEOUT,
        secs => Duration::from_secs(secs),
    }
}

/// Answer `408` when the inner service runs past `limit`.
pub async fn enforce_timeout(State(limit): State<Duration>, req: Request, next: Next) -> Response {
    match tokio::time::timeout(limit, next.run(req)).await {
        Ok(res) => res,
        Err(_) => {
            warn!(
                name: "http.request.timed_out",
                limit_ms = u64::try_from(limit.as_millis()).unwrap_or(u64::MAX),
                "Request timed out"
            );
            (StatusCode::REQUEST_TIMEOUT, "Request timed out").into_response()
        }
    }
}

/// Start the Axum server with the provided configuration.
pub async fn start_server(config: AppConfig) -> anyhow::Result<()> {
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let state = AppState::new(config);
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!(
        name: "server.started",
        address = %addr,
        "Server started"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!(name: "server.stopped", "Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(name: "server.signal.failed", error = %e, "Failed to listen for Ctrl-C");
        std::future::pending::<()>().await;
    }
    info!(name: "server.shutdown", "Shutdown signal received");
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum_test::TestServer;

    fn slow_app(limit: Duration) -> Router {
        Router::new()
            .route(
                "/slow",
                get(|| async {
                    tokio::time::sleep(Duration::from_millis(200)).await;
                    "done"
                }),
            )
            .layer(middleware::from_fn_with_state(limit, enforce_timeout))
    }

    #[test]
    fn zero_disables_the_bound() {
        assert_eq!(request_timeout(0), UNBOUNDED_TIMEOUT);
        assert_eq!(request_timeout(30), Duration::from_secs(30));
    }

    #[tokio::test]
    async fn slow_requests_time_out() {
        let server = TestServer::new(slow_app(Duration::from_millis(20))).unwrap();
        server.get("/slow").await.assert_status(StatusCode::REQUEST_TIMEOUT);
    }

    #[tokio::test]
    async fn unbounded_requests_finish() {
        let server = TestServer::new(slow_app(request_timeout(0))).unwrap();
        let response = server.get("/slow").await;
        response.assert_status_ok();
        assert_eq!(response.text(), "done");
    }
}
