//! # models::alert
//!
//! Rows rendered by the dashboard: [`MomentumAlert`] for the spike / drop
//! tables and [`Mover`] for the live ranking.

use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AlertDirection {
    Positive,
    Negative,
}

/// One momentum breach — ราคาวิ่งเกิน threshold ภายใน lookback window
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MomentumAlert {
    pub id:        Uuid,
    pub at:        DateTime<Utc>,
    /// Display time `HH:MM:SS` in the server's local zone.
    pub time:      String,
    pub symbol:    String,
    pub move_pct:  f64,
    pub ltp:       f64,
    pub direction: AlertDirection,
}

impl MomentumAlert {
    pub fn new(symbol: &str, ltp: f64, move_pct: f64, at: DateTime<Utc>) -> Self {
        let direction = if move_pct >= 0.0 {
            AlertDirection::Positive
        } else {
            AlertDirection::Negative
        };

        Self {
            id: Uuid::new_v4(),
            at,
            time: at.with_timezone(&Local).format("%H:%M:%S").to_string(),
            symbol: symbol.to_string(),
            move_pct,
            ltp,
            direction,
        }
    }
}

/// One row of the momentum ranking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mover {
    pub symbol:      String,
    pub ltp:         f64,
    pub move_pct:    f64,
    /// Seconds actually covered by the symbol's history.
    pub window_secs: f64,
    pub samples:     usize,
}
