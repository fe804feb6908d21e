//! Token-bucket limiter for the sign-in forms.

use std::sync::Mutex;
use std::time::Instant;

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use tracing::warn;

use crate::AppState;
use crate::htmx;
use crate::routes::PageRoute;

/// Single global bucket. Refills continuously at `rate_per_sec` up to `burst`.
#[derive(Debug)]
pub struct RateLimiter {
    // (last refill, tokens available)
    bucket: Mutex<(Instant, f32)>,
    rate_per_sec: f32,
    burst: f32,
}

impl RateLimiter {
    #[must_use]
    pub fn new(rate_per_sec: f32, burst: f32) -> Self {
        Self {
            bucket: Mutex::new((Instant::now(), burst)),
            rate_per_sec,
            burst,
        }
    }

    /// Take one token if available.
    pub fn try_acquire(&self) -> bool {
        let mut bucket = self.bucket.lock().unwrap();
        let now = Instant::now();
        let elapsed = now.duration_since(bucket.0).as_secs_f32();
        let tokens = (bucket.1 + elapsed * self.rate_per_sec).min(self.burst);

        if tokens >= 1.0 {
            *bucket = (now, tokens - 1.0);
            true
        } else {
            *bucket = (now, tokens);
            false
        }
    }
}

/// Throttle credential submissions; rejected posts bounce back to the form.
pub async fn limit_sign_in(State(state): State<AppState>, req: Request, next: Next) -> Response {
    if state.config.resilience.rate_limit_enabled && !state.rate_limiter.try_acquire() {
        let form = if req.uri().path() == PageRoute::Register.path() {
            PageRoute::Register
        } else {
            PageRoute::Login
        };
        warn!(name: "auth.rate_limited", path = %req.uri().path(), "Sign-in attempt throttled");
        return htmx::redirect(req.headers(), &format!("{}?error=rate_limited", form.path()));
    }
    next.run(req).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn burst_then_refill() {
        let limiter = RateLimiter::new(2.0, 3.0);

        assert!(limiter.try_acquire());
        assert!(limiter.try_acquire());
        assert!(limiter.try_acquire());
        assert!(!limiter.try_acquire());

        // 0.6s at 2/s refills 1.2 tokens.
        std::thread::sleep(Duration::from_millis(600));
        assert!(limiter.try_acquire());
        assert!(!limiter.try_acquire());
    }

    #[test]
    fn never_exceeds_burst() {
        let limiter = RateLimiter::new(1.0, 2.0);
        std::thread::sleep(Duration::from_millis(20));
        assert!(limiter.try_acquire());
        assert!(limiter.try_acquire());
        assert!(!limiter.try_acquire());
    }
}
