//! # routes::alerts
//!
//! | Method | Path          | Description                                  |
//! |--------|---------------|----------------------------------------------|
//! | GET    | `/api/alerts` | Positive + negative tables, newest first     |
//! | DELETE | `/api/alerts` | Clear both tables                            |
//! | GET    | `/api/movers` | Live momentum ranking over the current window |

use axum::{
    extract::{Query, State},
    response::IntoResponse,
    Json,
};
use chrono::Utc;
use serde::Deserialize;
use serde_json::json;

use crate::{events::WsEvent, models::MomentumAlert, state::SharedState};

pub async fn list_alerts(State(state): State<SharedState>) -> impl IntoResponse {
    let scanner = state.scanner.read().await;
    let positive: Vec<&MomentumAlert> = scanner.positive().collect();
    let negative: Vec<&MomentumAlert> = scanner.negative().collect();

    Json(json!({
        "ok":       true,
        "positive": positive,
        "negative": negative,
    }))
}

pub async fn clear_alerts(State(state): State<SharedState>) -> impl IntoResponse {
    state.scanner.write().await.clear_alerts();
    state.broadcast(&WsEvent::AlertsCleared);

    tracing::info!("🧹 Alert tables cleared");

    Json(json!({ "ok": true }))
}

#[derive(Debug, Deserialize)]
pub struct MoversQuery {
    /// Top rows to return; omitted → all tracked symbols.
    pub limit: Option<usize>,
}

pub async fn movers(
    State(state): State<SharedState>,
    Query(query): Query<MoversQuery>,
) -> impl IntoResponse {
    let settings = *state.settings.read().await;
    let mut ranking = state.scanner.read().await.ranking(Utc::now(), settings.lookback());

    if let Some(n) = query.limit {
        ranking.truncate(n);
    }

    Json(json!({
        "ok":            true,
        "lookback_secs": settings.lookback_secs,
        "ranking":       ranking,
    }))
}
