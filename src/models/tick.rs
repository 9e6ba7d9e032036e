//! # models::tick
//!
//! Defines [`QuoteTick`], one last-traded-price observation for a symbol.
//! Produced by the quote poller, or pushed by an external bridge through
//! `POST /api/feed/tick`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuoteTick {
    /// Exchange-qualified symbol, e.g. `"NSE:SBIN-EQ"`.
    pub symbol: String,

    /// Last traded price.
    pub ltp: f64,

    /// When the price was observed.  Missing → the scanner stamps it with
    /// the time of receipt.
    #[serde(default)]
    pub time: Option<DateTime<Utc>>,
}

impl QuoteTick {
    pub fn new(symbol: impl Into<String>, ltp: f64) -> Self {
        Self { symbol: symbol.into(), ltp, time: None }
    }

    /// ราคาใช้ได้ไหม — ต้องเป็นจำนวนจริงที่มากกว่า 0
    #[inline]
    pub fn is_tradable_price(&self) -> bool {
        self.ltp.is_finite() && self.ltp > 0.0
    }
}
