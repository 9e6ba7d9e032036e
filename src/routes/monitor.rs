//! # routes::monitor
//!
//! **Monitor Loop** — WebSocket stream for the dashboard.
//!
//! Connect to `ws://host/ws/monitor`; the first frame is a `SNAPSHOT`
//! (status + both alert tables), then every [`crate::events::WsEvent`] as a JSON text frame.

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        State,
    },
    response::IntoResponse,
};
use futures_util::{SinkExt, StreamExt};
use serde_json::json;
use tracing::{debug, info};

use crate::{models::MomentumAlert, state::SharedState};

// ─── WebSocket Handler ────────────────────────────────────────────────────────

pub async fn ws_monitor(
    ws: WebSocketUpgrade,
    State(state): State<SharedState>,
) -> impl IntoResponse {
    ws.on_upgrade(|socket| handle_socket(socket, state))
}

async fn handle_socket(socket: WebSocket, state: SharedState) {
    // Subscribe before building the snapshot so nothing falls in between.
    let mut rx = state.broadcast_tx.subscribe();
    let (mut sender, mut receiver) = socket.split();

    info!("🔌 WebSocket client connected");

    let snapshot = {
        let status = state.status().await;
        let scanner = state.scanner.read().await;
        let positive: Vec<&MomentumAlert> = scanner.positive().collect();
        let negative: Vec<&MomentumAlert> = scanner.negative().collect();

        json!({
            "event":    "SNAPSHOT",
            "status":   status,
            "positive": positive,
            "negative": negative,
        })
        .to_string()
    };

    if sender.send(Message::Text(snapshot)).await.is_err() {
        return; // Client ปิดก่อน snapshot ส่งได้
    }

    // ── Event Loop ────────────────────────────────────────────────────────────
    loop {
        tokio::select! {
            result = rx.recv() => {
                match result {
                    Ok(json_str) => {
                        if sender.send(Message::Text(json_str)).await.is_err() {
                            break; // Client disconnect
                        }
                    }
                    Err(tokio::sync::broadcast::error::RecvError::Lagged(n)) => {
                        debug!("WS client lagged, skipped {n} events");
                    }
                    Err(_) => break, // Channel closed
                }
            }

            result = receiver.next() => {
                match result {
                    Some(Ok(Message::Close(_))) | None => break,
                    Some(Ok(Message::Ping(data))) => {
                        let _ = sender.send(Message::Pong(data)).await;
                    }
                    _ => {} // Text/Binary from client — ignored
                }
            }
        }
    }

    info!("🔌 WebSocket client disconnected");
}
