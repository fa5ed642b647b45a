use axum::{
    extract::Request,
    http::{HeaderName, HeaderValue},
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

pub static X_REQUEST_ID: HeaderName = HeaderName::from_static("x-request-id");

/// Longest caller-supplied id that is propagated as-is.
const MAX_INCOMING_LEN: usize = 128;

/// Request id, available to handlers as a request extension.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RequestId(pub String);

/// Reuse a sane incoming `X-Request-Id` (e.g. from a CDN) or mint a UUID v4,
/// record it on the request span and echo it on the response.
pub async fn request_id_middleware(mut request: Request, next: Next) -> Response {
    let id = request
        .headers()
        .get(&X_REQUEST_ID)
        .and_then(|v| v.to_str().ok())
        .and_then(accept_incoming)
        .unwrap_or_else(|| Uuid::new_v4().to_string());

    tracing::Span::current().record("request_id", id.as_str());
    request.extensions_mut().insert(RequestId(id.clone()));

    let mut response = next.run(request).await;
    if let Ok(value) = HeaderValue::from_str(&id) {
        response.headers_mut().insert(X_REQUEST_ID.clone(), value);
    }
    response
}

fn accept_incoming(raw: &str) -> Option<String> {
    let raw = raw.trim();
    let ok = !raw.is_empty()
        && raw.len() <= MAX_INCOMING_LEN
        && raw
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'));
    ok.then(|| raw.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_proxy_ids() {
        assert_eq!(accept_incoming("abc-123").as_deref(), Some("abc-123"));
        assert_eq!(accept_incoming(" cf.ray_1 ").as_deref(), Some("cf.ray_1"));
    }

    #[test]
    fn test_rejects_junk_ids() {
        assert!(accept_incoming("").is_none());
        assert!(accept_incoming("has space").is_none());
        assert!(accept_incoming("<script>").is_none());
        assert!(accept_incoming(&"a".repeat(129)).is_none());
    }
}
