//! # routes::scanner
//!
//! Scanner lifecycle + settings — the dashboard sidebar.

use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde_json::json;

use crate::{
    engine::poller::{start_scanner, stop_scanner},
    error::AppError,
    events::WsEvent,
    models::settings::SettingsPatch,
    state::SharedState,
};

// ─── POST /api/scanner/start ──────────────────────────────────────────────────

pub async fn start(
    State(state): State<SharedState>,
) -> Result<impl IntoResponse, AppError> {
    let symbols_count = start_scanner(&state).await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "ok":            true,
            "symbols_count": symbols_count,
            "message":       "Scanner started!",
        })),
    ))
}

// ─── POST /api/scanner/stop ───────────────────────────────────────────────────

pub async fn stop(
    State(state): State<SharedState>,
) -> Result<impl IntoResponse, AppError> {
    stop_scanner(&state).await?;

    Ok(Json(json!({
        "ok":      true,
        "message": "Scanner stopped.",
    })))
}

// ─── GET /api/scanner/status ──────────────────────────────────────────────────

pub async fn status(State(state): State<SharedState>) -> impl IntoResponse {
    let status = state.status().await;
    Json(json!({ "ok": true, "status": status }))
}

// ─── GET /api/scanner/settings ────────────────────────────────────────────────

pub async fn get_settings(State(state): State<SharedState>) -> impl IntoResponse {
    let settings = *state.settings.read().await;
    Json(json!({ "ok": true, "settings": settings }))
}

// ─── PUT /api/scanner/settings ────────────────────────────────────────────────

/// Partial update; the running poller picks it up on the next tick.
pub async fn update_settings(
    State(state): State<SharedState>,
    Json(patch): Json<SettingsPatch>,
) -> Result<impl IntoResponse, AppError> {
    let next = {
        let mut guard = state.settings.write().await;
        let next = patch.apply_to(*guard);
        next.validate().map_err(AppError::BadRequest)?;
        *guard = next;
        next
    };

    state.broadcast(&WsEvent::SettingsUpdated { settings: next });

    tracing::info!(
        lookback_secs = next.lookback_secs,
        percent       = next.percent,
        "⚙️ Scan settings updated"
    );

    Ok(Json(json!({ "ok": true, "settings": next })))
}
