//! # routes::feed
//!
//! Push entry point for external quote bridges, plus the liveness probe.

use axum::{extract::State, response::IntoResponse, Json};
use chrono::{Duration, Utc};
use serde_json::json;

use crate::{error::AppError, models::QuoteTick, state::SharedState};

/// How far ahead of our clock a pushed tick's `time` may be.
const MAX_CLOCK_SKEW_SECS: i64 = 5;

// ─── POST /api/feed/tick ──────────────────────────────────────────────────────

/// Same path as a polled quote: ingest → momentum → alert broadcast.
pub async fn push_tick(
    State(state): State<SharedState>,
    Json(tick): Json<QuoteTick>,
) -> Result<impl IntoResponse, AppError> {
    if tick.symbol.trim().is_empty() {
        return Err(AppError::BadRequest("symbol is required".into()));
    }
    if !tick.is_tradable_price() {
        return Err(AppError::BadRequest(format!("ltp must be a positive number, got {}", tick.ltp)));
    }

    if let Some(time) = tick.time {
        let limit = Utc::now() + Duration::seconds(MAX_CLOCK_SKEW_SECS);
        if time > limit {
            return Err(AppError::BadRequest(format!(
                "time {time} is in the future (max skew {MAX_CLOCK_SKEW_SECS}s)"
            )));
        }
    }

    let alert = state.ingest(&tick).await;

    Ok(Json(json!({
        "ok":     true,
        "action": if alert.is_some() { "ALERT" } else { "NO_ACTION" },
        "symbol": tick.symbol,
        "alert":  alert,
    })))
}

// ─── GET /health ──────────────────────────────────────────────────────────────

pub async fn health_check(State(state): State<SharedState>) -> impl IntoResponse {
    Json(json!({
        "ok":      true,
        "running": state.is_running().await,
    }))
}
