//! HTMX request detection and response headers.

use axum::http::{HeaderMap, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Redirect, Response};

pub const HX_REQUEST: &str = "hx-request";
pub const HX_REDIRECT: &str = "hx-redirect";
pub const HX_REFRESH: &str = "hx-refresh";
pub const HX_TRIGGER: &str = "hx-trigger";

/// Whether the request was issued by htmx rather than a full page load.
pub fn is_htmx(headers: &HeaderMap) -> bool {
    headers
        .get(HX_REQUEST)
        .is_some_and(|v| v.as_bytes().eq_ignore_ascii_case(b"true"))
}

/// Redirect that works for both navigations and htmx swaps.
///
/// XHR follows a 3xx transparently and would swap the target page into the
/// fragment slot, so htmx callers get `204` plus `HX-Redirect` instead.
pub fn redirect(headers: &HeaderMap, location: &str) -> Response {
    if is_htmx(headers) {
        match HeaderValue::from_str(location) {
            Ok(value) => {
                let mut response = StatusCode::NO_CONTENT.into_response();
                response.headers_mut().insert(HX_REDIRECT, value);
                response
            }
            Err(_) => Redirect::to("/").into_response(),
        }
    } else {
        Redirect::to(location).into_response()
    }
}

/// Ask htmx to reload the whole page.
pub fn refresh() -> Response {
    let mut response = StatusCode::NO_CONTENT.into_response();
    response
        .headers_mut()
        .insert(HX_REFRESH, HeaderValue::from_static("true"));
    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::header::LOCATION;

    fn htmx_headers() -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(HX_REQUEST, HeaderValue::from_static("true"));
        headers
    }

    #[test]
    fn plain_requests_get_see_other() {
        let response = redirect(&HeaderMap::new(), "/login");
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers()[LOCATION], "/login");
    }

    #[test]
    fn htmx_requests_get_hx_redirect() {
        let response = redirect(&htmx_headers(), "/login?next=/dashboard");
        assert_eq!(response.status(), StatusCode::NO_CONTENT);
        assert_eq!(response.headers()[HX_REDIRECT], "/login?next=/dashboard");
        assert!(response.headers().get(LOCATION).is_none());
    }

    #[test]
    fn hx_request_header_must_be_true() {
        let mut headers = HeaderMap::new();
        headers.insert(HX_REQUEST, HeaderValue::from_static("false"));
        assert!(!is_htmx(&headers));
        assert!(is_htmx(&htmx_headers()));
    }
}
