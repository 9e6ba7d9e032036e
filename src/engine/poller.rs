//! # engine::poller
//!
//! **Poll Loop** — background task ที่ดึง Quote ทุก `POLL_INTERVAL_MS`
//!
//! ```text
//! start_scanner
//!   1. load watchlist  (empty → 400)
//!   2. read token      (missing → 412)
//!   3. spawn loop:
//!        fetch_quotes ─ ok ──▶ state.ingest(tick) × N
//!                     ├ TokenExpired ─▶ broadcast, sleep TOKEN_RETRY_SECS,
//!                     │                 re-read token file
//!                     └ other error  ─▶ log, broadcast on change, keep going
//! ```
//!
//! The loop never exits on its own; `stop_scanner` aborts it.

use chrono::Utc;
use tokio::time::MissedTickBehavior;
use tracing::{error, info, warn};

use crate::error::AppError;
use crate::events::WsEvent;
use crate::feed::FyersClient;
use crate::state::SharedState;
use crate::token::read_access_token;
use crate::watchlist::load_watchlist;

/// Load the watchlist and token, then spawn the poll loop.
/// Returns the number of symbols being tracked.
pub async fn start_scanner(state: &SharedState) -> Result<usize, AppError> {
    let mut poller = state.poller.lock().await;

    if poller.as_ref().is_some_and(|h| !h.is_finished()) {
        return Err(AppError::Conflict("Scanner is already running.".into()));
    }

    let config = &state.config;

    let symbols = load_watchlist(&config.symbols_file)?;
    let symbols_count = symbols.len();

    {
        let mut feed = state.feed.write().await;
        feed.symbols_count = symbols_count;
    }

    if symbols.is_empty() {
        return Err(AppError::BadRequest(format!(
            "Watchlist {} is missing or empty.",
            config.symbols_file.display()
        )));
    }

    let token = read_access_token(&config.token_file)?;
    let client = FyersClient::new(state.http_client.clone(), &config.api_url, &config.client_id, &token);

    {
        let mut feed = state.feed.write().await;
        feed.started_at = Some(Utc::now());
        feed.last_error = None;
    }

    let task_state = state.clone();
    *poller = Some(tokio::spawn(async move {
        run_poll_loop(task_state, symbols, client).await;
    }));

    state.broadcast(&WsEvent::ScannerStarted { symbols_count });
    info!(symbols_count, interval = ?config.poll_interval, "🚀 Scanner started");

    Ok(symbols_count)
}

/// Abort the poll loop.  `NotFound` when nothing is running.
pub async fn stop_scanner(state: &SharedState) -> Result<(), AppError> {
    let handle = state.poller.lock().await.take();

    match handle {
        Some(handle) if !handle.is_finished() => {
            handle.abort();
            // wait out an in-flight cycle so it cannot write status after us
            let _ = handle.await;
            {
                let mut feed = state.feed.write().await;
                feed.started_at = None;
                feed.last_error = None;
            }
            state.broadcast(&WsEvent::ScannerStopped);
            info!("🛑 Scanner stopped");
            Ok(())
        }
        _ => Err(AppError::NotFound("Scanner is not running.".into())),
    }
}

async fn run_poll_loop(state: SharedState, symbols: Vec<String>, mut client: FyersClient) {
    let config = state.config.clone();
    let mut interval = tokio::time::interval(config.poll_interval);
    interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        interval.tick().await;

        match client.fetch_quotes(&symbols).await {
            Ok(ticks) => {
                for tick in &ticks {
                    state.ingest(tick).await;
                }
                state.clear_feed_error().await;
            }

            Err(AppError::TokenExpired(message)) => {
                error!(%message, "❌ Access token rejected — update the token file");
                if state.record_feed_error(&format!("Token expired: {message}")).await {
                    state.broadcast(&WsEvent::TokenExpired { message });
                }

                tokio::time::sleep(config.token_retry_interval).await;

                match read_access_token(&config.token_file) {
                    Ok(token) => {
                        client = FyersClient::new(
                            state.http_client.clone(),
                            &config.api_url,
                            &config.client_id,
                            &token,
                        );
                        info!("🔑 Token file re-read — retrying");
                    }
                    Err(e) => warn!(error = %e, "Token file unreadable — retrying later"),
                }
            }

            Err(e) => {
                let message = e.to_string();
                warn!(error = %message, "Quote poll failed");
                if state.record_feed_error(&message).await {
                    state.broadcast(&WsEvent::FeedError { message });
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;
    use std::sync::atomic::Ordering;
    use std::time::Duration;

    use axum::{http::HeaderMap, routing::get, Json, Router};
    use serde_json::{json, Value};

    use crate::config::ScannerConfig;
    use crate::state::build_state;

    /// Minimal stand-in for the quote API: accepts `XH11906:good`, echoes a
    /// fixed price for every requested symbol, rejects anything else with -16.
    async fn spawn_mock_api() -> String {
        async fn quotes(
            headers: HeaderMap,
            axum::extract::Query(q): axum::extract::Query<std::collections::HashMap<String, String>>,
        ) -> Json<Value> {
            let auth = headers.get("authorization").and_then(|v| v.to_str().ok()).unwrap_or("");
            if auth != "XH11906:good" {
                return Json(json!({"s": "error", "code": -16, "message": "Could not authenticate the user"}));
            }
            let d: Vec<Value> = q
                .get("symbols")
                .map(|s| s.split(',').map(|n| json!({"n": n, "s": "ok", "v": {"lp": 100.0}})).collect())
                .unwrap_or_default();
            Json(json!({"s": "ok", "code": 200, "d": d}))
        }

        let app = Router::new().route("/data/quotes", get(quotes));
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{addr}")
    }

    fn config_in(dir: &Path, api_url: String) -> ScannerConfig {
        ScannerConfig {
            symbols_file: dir.join("symbols.txt"),
            token_file: dir.join("access_token.txt"),
            api_url,
            poll_interval: Duration::from_millis(50),
            token_retry_interval: Duration::from_secs(60),
            ..ScannerConfig::default()
        }
    }

    async fn wait_until<F, Fut>(mut check: F)
    where
        F: FnMut() -> Fut,
        Fut: std::future::Future<Output = bool>,
    {
        for _ in 0..100 {
            if check().await {
                return;
            }
            tokio::time::sleep(Duration::from_millis(20)).await;
        }
        panic!("condition not reached in time");
    }

    #[tokio::test]
    async fn test_empty_watchlist_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let state = build_state(config_in(dir.path(), "http://127.0.0.1:9".into()));

        let err = start_scanner(&state).await.unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));
        assert!(!state.is_running().await);
    }

    #[tokio::test]
    async fn test_missing_token_rejected() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("symbols.txt"), "sbin\ninfy\n").unwrap();
        let state = build_state(config_in(dir.path(), "http://127.0.0.1:9".into()));

        let err = start_scanner(&state).await.unwrap_err();
        assert!(matches!(err, AppError::TokenMissing(_)));
        assert_eq!(state.status().await.symbols_count, 2);
    }

    #[tokio::test]
    async fn test_start_poll_stop_lifecycle() {
        let api = spawn_mock_api().await;
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("symbols.txt"), "sbin\ninfy\n").unwrap();
        std::fs::write(dir.path().join("access_token.txt"), "good\n").unwrap();
        let state = build_state(config_in(dir.path(), api));

        assert_eq!(start_scanner(&state).await.unwrap(), 2);
        assert!(state.is_running().await);
        assert!(matches!(start_scanner(&state).await, Err(AppError::Conflict(_))));

        let s = state.clone();
        wait_until(|| {
            let s = s.clone();
            async move { s.tick_count.load(Ordering::Relaxed) >= 4 }
        })
        .await;

        let status = state.status().await;
        assert_eq!(status.tracked_symbols, 2);
        assert!(status.last_error.is_none());
        assert!(status.started_at.is_some());

        stop_scanner(&state).await.unwrap();
        assert!(!state.is_running().await);
        assert!(state.status().await.started_at.is_none());
        assert!(matches!(stop_scanner(&state).await, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_rejected_token_surfaces_in_status() {
        let api = spawn_mock_api().await;
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("symbols.txt"), "sbin\n").unwrap();
        std::fs::write(dir.path().join("access_token.txt"), "stale").unwrap();
        let state = build_state(config_in(dir.path(), api));
        let mut rx = state.broadcast_tx.subscribe();

        start_scanner(&state).await.unwrap();

        let s = state.clone();
        wait_until(|| {
            let s = s.clone();
            async move { s.status().await.last_error.is_some() }
        })
        .await;

        let status = state.status().await;
        assert!(status.last_error.unwrap().starts_with("Token expired"));
        assert!(status.running);
        assert_eq!(status.tick_count, 0);

        // SCANNER_STARTED then TOKEN_EXPIRED
        let first = rx.recv().await.unwrap();
        assert!(first.contains("SCANNER_STARTED"));
        let second = rx.recv().await.unwrap();
        assert!(second.contains("TOKEN_EXPIRED"));

        stop_scanner(&state).await.unwrap();
        let status = state.status().await;
        assert!(!status.running);
        assert!(status.started_at.is_none());
        assert!(status.last_error.is_none());
    }
}
