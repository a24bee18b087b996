//! Request ID middleware for log and error correlation.

use axum::{extract::Request, http::HeaderValue, middleware::Next, response::Response};
use tracing::Span;
use uuid::Uuid;

/// The HTTP header name for request IDs.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

const MAX_REQUEST_ID_LEN: usize = 128;

/// Tag each request with an ID.
///
/// An upstream `x-request-id` is reused when it is short printable ASCII;
/// otherwise a UUID v4 is generated. The ID is recorded on the request span,
/// set as a Sentry tag, and echoed in the response.
pub async fn request_id_middleware(request: Request, next: Next) -> Response {
    let request_id = request
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|h| h.to_str().ok())
        .filter(|id| is_acceptable(id))
        .map_or_else(|| Uuid::new_v4().to_string(), String::from);

    Span::current().record("request_id", &request_id);
    sentry::configure_scope(|scope| {
        scope.set_tag("request_id", &request_id);
    });

    let mut response = next.run(request).await;

    if let Ok(value) = HeaderValue::from_str(&request_id) {
        response.headers_mut().insert(REQUEST_ID_HEADER, value);
    }

    response
}

fn is_acceptable(id: &str) -> bool {
    !id.is_empty()
        && id.len() <= MAX_REQUEST_ID_LEN
        && id.bytes().all(|b| b.is_ascii_graphic())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_acceptable() {
        assert!(is_acceptable("abc-123"));
        assert!(is_acceptable(&Uuid::new_v4().to_string()));
        assert!(!is_acceptable(""));
        assert!(!is_acceptable("has space"));
        assert!(!is_acceptable(&"x".repeat(MAX_REQUEST_ID_LEN + 1)));
    }
}
