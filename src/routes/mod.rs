//! HTTP surface: dashboard page, scanner control, alert tables, tick push,
//! and the monitor WebSocket.

pub mod alerts;
pub mod feed;
pub mod monitor;
pub mod scanner;

use axum::{
    response::Html,
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::{auth::require_api_key, dashboard::dashboard_html, state::SharedState};

pub fn build_router(state: SharedState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // ── Dashboard ─────────────────────────────────────────────────────────
        .route("/",                       get(|| async { Html(dashboard_html()) }))
        .route("/health",                 get(feed::health_check))
        // ── Scanner Control ───────────────────────────────────────────────────
        .route("/api/scanner/start",      post(scanner::start))
        .route("/api/scanner/stop",       post(scanner::stop))
        .route("/api/scanner/status",     get(scanner::status))
        .route("/api/scanner/settings",   get(scanner::get_settings).put(scanner::update_settings))
        // ── Alerts / Ranking ──────────────────────────────────────────────────
        .route("/api/alerts",             get(alerts::list_alerts).delete(alerts::clear_alerts))
        .route("/api/movers",             get(alerts::movers))
        // ── Feed Push ─────────────────────────────────────────────────────────
        .route("/api/feed/tick",          post(feed::push_tick))
        // ── Monitor Loop ──────────────────────────────────────────────────────
        .route("/ws/monitor",             get(monitor::ws_monitor))
        // ── Middleware ────────────────────────────────────────────────────────
        .layer(axum::middleware::from_fn(require_api_key))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
