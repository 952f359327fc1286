// CORS configuration via tower-http

use axum::http::HeaderValue;
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tracing::warn;

/// Allow the given origins, or any origin when the list is empty.
/// A non-empty list never widens to any origin: entries that fail to parse
/// are dropped, and if none remain no cross-origin request is allowed.
pub fn apply_cors(router: Router, allowed_origins: &[String]) -> Router {
    let layer = if allowed_origins.is_empty() || allowed_origins.iter().any(|o| o == "*") {
        CorsLayer::new().allow_origin(Any)
    } else {
        let origins: Vec<HeaderValue> = allowed_origins
            .iter()
            .filter_map(|origin| match origin.parse::<HeaderValue>() {
                Ok(value) => Some(value),
                Err(_) => {
                    warn!(origin = %origin, "Ignoring invalid CORS origin");
                    None
                }
            })
            .collect();

        if origins.is_empty() {
            warn!("No valid CORS origins configured, refusing cross-origin requests");
        }
        CorsLayer::new().allow_origin(origins)
    };

    router.layer(layer.allow_methods(Any).allow_headers(Any))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use axum::routing::get;
    use tower::ServiceExt;

    async fn allow_origin_header(allowed: &[&str], origin: &str) -> Option<String> {
        let allowed: Vec<String> = allowed.iter().map(|o| o.to_string()).collect();
        let router = apply_cors(Router::new().route("/", get(|| async { "ok" })), &allowed);

        let response = router
            .oneshot(Request::get("/").header("Origin", origin).body(Body::empty()).unwrap())
            .await
            .unwrap();

        response
            .headers()
            .get("access-control-allow-origin")
            .map(|v| v.to_str().unwrap().to_string())
    }

    #[tokio::test]
    async fn test_empty_list_allows_any_origin() {
        assert_eq!(allow_origin_header(&[], "http://evil.io").await.as_deref(), Some("*"));
    }

    #[tokio::test]
    async fn test_unlisted_origin_is_refused() {
        assert!(allow_origin_header(&["http://localhost:5173"], "http://evil.io").await.is_none());
    }

    #[tokio::test]
    async fn test_all_invalid_origins_refuse_instead_of_allowing_any() {
        assert!(allow_origin_header(&["http://a.io\x01"], "http://evil.io").await.is_none());
    }
}
