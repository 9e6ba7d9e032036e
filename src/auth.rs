//! # auth — API Key Middleware
//!
//! ป้องกัน Endpoint ด้วย `X-API-Key` header
//!
//! ## Mode
//! - `API_KEY` ไม่ได้ตั้ง (หรือ empty) → **Allow All** (Dev Mode)
//! - `API_KEY` ตั้งค่า → `/api/*` ต้องส่ง `X-API-Key: <key>`
//!
//! ## ยกเว้น
//! - The dashboard page (`/`) and `/health` are always open.
//! - Browsers cannot set headers on a WebSocket upgrade, so `/ws/*` also
//!   accepts `?key=<key>`.
//!
//! ```bash
//! curl -X POST -H "X-API-Key: super-secret" http://localhost:8501/api/scanner/start
//! ```

use axum::{
    body::Body,
    extract::{Query, Request},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use tracing::warn;

#[derive(Debug, Deserialize)]
struct KeyParam {
    key: Option<String>,
}

pub async fn require_api_key(request: Request<Body>, next: Next) -> Response {
    let api_key_env = std::env::var("API_KEY").unwrap_or_default();
    check_api_key(&api_key_env, request, next).await
}

async fn check_api_key(expected: &str, request: Request<Body>, next: Next) -> Response {
    // ── Dev Mode ──────────────────────────────────────────────────────────────
    if expected.is_empty() {
        return next.run(request).await;
    }

    let path = request.uri().path();
    let is_api = path.starts_with("/api/");
    let is_ws = path.starts_with("/ws/");
    if !is_api && !is_ws {
        return next.run(request).await;
    }

    let from_header = request
        .headers()
        .get("X-API-Key")
        .and_then(|v| v.to_str().ok());

    // percent-decoded by serde_urlencoded
    let from_query = if is_ws {
        Query::<KeyParam>::try_from_uri(request.uri())
            .ok()
            .and_then(|Query(param)| param.key)
    } else {
        None
    };

    if from_header == Some(expected) || from_query.as_deref() == Some(expected) {
        next.run(request).await
    } else {
        warn!(path, "❌ Unauthorized request — invalid or missing X-API-Key");
        (
            StatusCode::UNAUTHORIZED,
            Json(serde_json::json!({
                "ok":    false,
                "error": "Unauthorized: invalid or missing X-API-Key header",
                "hint":  "Set X-API-Key header with your API key"
            })),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{middleware, routing::get, Router};
    use tower::ServiceExt;

    fn app() -> Router {
        Router::new()
            .route("/", get(|| async { "dashboard" }))
            .route("/api/alerts", get(|| async { "alerts" }))
            .route("/ws/monitor", get(|| async { "ws" }))
            .layer(middleware::from_fn(|req: Request<Body>, next: Next| check_api_key("s3cret", req, next)))
    }

    async fn status_of(req: Request<Body>) -> StatusCode {
        app().oneshot(req).await.unwrap().status()
    }

    #[tokio::test]
    async fn test_dashboard_open() {
        let req = Request::get("/").body(Body::empty()).unwrap();
        assert_eq!(status_of(req).await, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_api_requires_header() {
        let req = Request::get("/api/alerts").body(Body::empty()).unwrap();
        assert_eq!(status_of(req).await, StatusCode::UNAUTHORIZED);

        let req = Request::get("/api/alerts")
            .header("X-API-Key", "s3cret")
            .body(Body::empty())
            .unwrap();
        assert_eq!(status_of(req).await, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_ws_accepts_query_key_but_api_does_not() {
        let req = Request::get("/ws/monitor?key=s3cret").body(Body::empty()).unwrap();
        assert_eq!(status_of(req).await, StatusCode::OK);

        let req = Request::get("/api/alerts?key=s3cret").body(Body::empty()).unwrap();
        assert_eq!(status_of(req).await, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_ws_query_key_is_percent_decoded() {
        let req = Request::get("/ws/monitor?foo=1&key=s3%63ret").body(Body::empty()).unwrap();
        assert_eq!(status_of(req).await, StatusCode::OK);

        let req = Request::get("/ws/monitor?key=s3cre").body(Body::empty()).unwrap();
        assert_eq!(status_of(req).await, StatusCode::UNAUTHORIZED);

        let req = Request::get("/ws/monitor").body(Body::empty()).unwrap();
        assert_eq!(status_of(req).await, StatusCode::UNAUTHORIZED);
    }
}
