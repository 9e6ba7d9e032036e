//! # events
//!
//! Defines [`WsEvent`] — ทุก Event ที่ระบบ Broadcast ออกไปผ่าน WebSocket
//! ไปยัง Dashboard
//!
//! ใช้ `tokio::sync::broadcast::Sender<String>` โดยแปลง WsEvent เป็น JSON
//! String ก่อนส่ง เพื่อหลีกเลี่ยง Clone constraints ที่ซับซ้อน

use serde::Serialize;

use crate::models::{MomentumAlert, ScanSettings};

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "event", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WsEvent {
    /// Momentum threshold breached — goes to the Positive or Negative table.
    Alert {
        alert: Box<MomentumAlert>,
    },

    /// Lookback / threshold changed from the dashboard.
    SettingsUpdated {
        settings: ScanSettings,
    },

    /// Poller spawned with this many watchlist symbols.
    ScannerStarted {
        symbols_count: usize,
    },

    ScannerStopped,

    /// Quote API unreachable or returned an error.  Poller keeps retrying.
    FeedError {
        message: String,
    },

    /// Quote API rejected the token — ต้องอัปเดตไฟล์ token ใหม่
    TokenExpired {
        message: String,
    },

    AlertsCleared,
}

impl WsEvent {
    /// แปลงเป็น JSON String สำหรับส่งผ่าน WebSocket
    #[inline]
    pub fn to_json(&self) -> String {
        serde_json::to_string(self)
            .unwrap_or_else(|_| r#"{"event":"SERIALIZATION_ERROR"}"#.to_string())
    }
}
