//! # state
//!
//! The scanner's **shared application state** — the single source of truth
//! that the quote poller (writes) and the dashboard handlers (read) share.
//!
//! * `Arc<AppState>` is cloned cheaply into every Axum handler via
//!   `axum::extract::State`.
//! * The momentum engine sits behind a `tokio::sync::RwLock`: the poller
//!   takes the write half once per quote, dashboard polls take the read half.
//! * Counters are atomics so `/api/scanner/status` never waits on the engine.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::{broadcast, Mutex, RwLock};
use tokio::task::JoinHandle;

use crate::config::ScannerConfig;
use crate::engine::momentum::MomentumScanner;
use crate::events::WsEvent;
use crate::models::{MomentumAlert, QuoteTick, ScanSettings};

// ─── Feed Status ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default)]
pub struct FeedStatus {
    pub symbols_count: usize,
    pub started_at:    Option<DateTime<Utc>>,
    /// Last tick processed (any symbol).
    pub last_update:   Option<DateTime<Utc>>,
    pub last_alert_at: Option<DateTime<Utc>>,
    /// Last poll error; cleared by the next successful poll.
    pub last_error:    Option<String>,
}

/// Snapshot served by `GET /api/scanner/status` and the WS `SNAPSHOT`.
#[derive(Debug, Clone, Serialize)]
pub struct ScannerStatus {
    pub running:         bool,
    pub symbols_count:   usize,
    pub tracked_symbols: usize,
    pub tick_count:      u64,
    pub alert_count:     u64,
    pub started_at:      Option<DateTime<Utc>>,
    pub last_update:     Option<DateTime<Utc>>,
    pub last_alert_at:   Option<DateTime<Utc>>,
    pub last_error:      Option<String>,
    pub settings:        ScanSettings,
}

// ─── AppState ─────────────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ScannerConfig>,

    // ── Momentum Engine ───────────────────────────────────────────────────────
    pub scanner:  Arc<RwLock<MomentumScanner>>,
    /// UI-controlled knobs; read on every tick.
    pub settings: Arc<RwLock<ScanSettings>>,

    // ── Poller ────────────────────────────────────────────────────────────────
    /// Background quote task.  `None` = scanner stopped.
    pub poller: Arc<Mutex<Option<JoinHandle<()>>>>,
    pub feed:   Arc<RwLock<FeedStatus>>,

    // ── Monitor / WebSocket ───────────────────────────────────────────────────
    pub broadcast_tx: broadcast::Sender<String>,

    // ── HTTP Client ───────────────────────────────────────────────────────────
    /// Shared connection pool for the quote API.
    pub http_client: reqwest::Client,

    // ── Metrics ───────────────────────────────────────────────────────────────
    pub tick_count:  Arc<AtomicU64>,
    pub alert_count: Arc<AtomicU64>,
}

impl AppState {
    pub fn new(config: ScannerConfig) -> Self {
        let (broadcast_tx, _) = broadcast::channel(256);
        let settings = config.default_settings;

        Self {
            config:       Arc::new(config),
            scanner:      Arc::new(RwLock::new(MomentumScanner::new())),
            settings:     Arc::new(RwLock::new(settings)),
            poller:       Arc::new(Mutex::new(None)),
            feed:         Arc::new(RwLock::new(FeedStatus::default())),
            broadcast_tx,
            http_client:  reqwest::Client::new(),
            tick_count:   Arc::new(AtomicU64::new(0)),
            alert_count:  Arc::new(AtomicU64::new(0)),
        }
    }

    // ── Helper Methods ────────────────────────────────────────────────────────

    /// Broadcast WsEvent ไปยัง WebSocket clients ทั้งหมด
    /// ไม่ panic ถ้าไม่มี listener
    pub fn broadcast(&self, event: &WsEvent) {
        // Err = no receiver, not a real failure
        let _ = self.broadcast_tx.send(event.to_json());
    }

    /// Run one quote through the momentum engine and publish any alert.
    pub async fn ingest(&self, tick: &QuoteTick) -> Option<MomentumAlert> {
        self.tick_count.fetch_add(1, Ordering::Relaxed);

        let now = tick.time.unwrap_or_else(Utc::now);
        let settings = *self.settings.read().await;

        let alert = {
            let mut scanner = self.scanner.write().await;
            scanner.on_tick(&tick.symbol, tick.ltp, now, &settings)
        };

        {
            let mut feed = self.feed.write().await;
            feed.last_update = Some(now);
            if alert.is_some() {
                feed.last_alert_at = Some(now);
            }
        }

        if let Some(alert) = &alert {
            self.alert_count.fetch_add(1, Ordering::Relaxed);
            self.broadcast(&WsEvent::Alert { alert: Box::new(alert.clone()) });
        }

        alert
    }

    pub async fn is_running(&self) -> bool {
        self.poller
            .lock()
            .await
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }

    /// Record a poll error.  Returns `true` when it differs from the previous
    /// one, so callers only broadcast on change.
    pub async fn record_feed_error(&self, message: &str) -> bool {
        let mut feed = self.feed.write().await;
        let changed = feed.last_error.as_deref() != Some(message);
        feed.last_error = Some(message.to_string());
        changed
    }

    pub async fn clear_feed_error(&self) {
        self.feed.write().await.last_error = None;
    }

    pub async fn status(&self) -> ScannerStatus {
        let running = self.is_running().await;
        let feed = self.feed.read().await.clone();
        let settings = *self.settings.read().await;
        let tracked_symbols = self.scanner.read().await.tracked_symbols();

        ScannerStatus {
            running,
            symbols_count: feed.symbols_count,
            tracked_symbols,
            tick_count: self.tick_count.load(Ordering::Relaxed),
            alert_count: self.alert_count.load(Ordering::Relaxed),
            started_at: feed.started_at,
            last_update: feed.last_update,
            last_alert_at: feed.last_alert_at,
            last_error: feed.last_error,
            settings,
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(ScannerConfig::default())
    }
}

/// Convenience type alias
pub type SharedState = Arc<AppState>;

pub fn build_state(config: ScannerConfig) -> SharedState {
    Arc::new(AppState::new(config))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    #[tokio::test]
    async fn test_ingest_publishes_alert() {
        let state = AppState::default();
        let mut rx = state.broadcast_tx.subscribe();
        let t0 = Utc.with_ymd_and_hms(2024, 5, 6, 4, 0, 0).unwrap();

        for (i, price) in [100.0, 100.5, 101.5].into_iter().enumerate() {
            let mut tick = QuoteTick::new("NSE:SBIN-EQ", price);
            tick.time = Some(t0 + Duration::seconds(25 * i as i64));
            state.ingest(&tick).await;
        }

        let status = state.status().await;
        assert_eq!(status.tick_count, 3);
        assert_eq!(status.alert_count, 1);
        assert_eq!(status.last_alert_at, Some(t0 + Duration::seconds(50)));
        assert!(!status.running);

        let msg = rx.recv().await.unwrap();
        assert!(msg.contains(r#""event":"ALERT""#));
        assert!(msg.contains("NSE:SBIN-EQ"));
    }

    #[tokio::test]
    async fn test_feed_error_change_detection() {
        let state = AppState::default();
        assert!(state.record_feed_error("timeout").await);
        assert!(!state.record_feed_error("timeout").await);
        assert!(state.record_feed_error("HTTP 502").await);

        state.clear_feed_error().await;
        assert!(state.status().await.last_error.is_none());
    }
}
