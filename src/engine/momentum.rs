//! # engine::momentum
//!
//! **Momentum Engine** — Hot path ที่รันทุก Quote
//!
//! ```text
//! tick (symbol, ltp, now)
//!     │
//!     ├─ [1] append → history[symbol]
//!     ├─ [2] trim   → ทิ้งจุดที่เก่ากว่า now - lookback
//!     ├─ [3] need   → มากกว่า 2 จุด และครอบคลุม ≥ 80% ของ window
//!     ├─ [4] pct    = (ltp - oldest) / oldest × 100
//!     └─ [5] dedupe → 1 alert ต่อ symbol ต่อนาที
//!            pct ≥ +threshold → Positive table
//!            pct ≤ -threshold → Negative table
//! ```
//!
//! The engine is plain synchronous data; [`crate::state::AppState`] wraps it
//! in a `RwLock` and the caller supplies `now`, which keeps the whole thing
//! deterministic under test.

use std::collections::{HashMap, HashSet, VecDeque};

use chrono::{DateTime, Duration, DurationRound, Utc};
use tracing::{debug, info, warn};

use crate::models::{AlertDirection, MomentumAlert, Mover, ScanSettings};

/// Alerts kept per table (newest first).
pub const MAX_ALERTS: usize = 50;

/// Share of the lookback window (per mille) the history must span before we
/// trust a move.  Integer so the 80% boundary is exact.
const MIN_WINDOW_COVERAGE_PERMILLE: i64 = 800;

/// Fewer points than this → no momentum reading yet.
const MIN_SAMPLES: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PricePoint {
    pub time:  DateTime<Utc>,
    pub price: f64,
}

// ─── Momentum Scanner ─────────────────────────────────────────────────────────

#[derive(Debug, Default)]
pub struct MomentumScanner {
    history:  HashMap<String, VecDeque<PricePoint>>,
    /// `(symbol, minute)` pairs that already produced an alert.
    fired:    HashSet<(String, DateTime<Utc>)>,
    positive: VecDeque<MomentumAlert>,
    negative: VecDeque<MomentumAlert>,
}

impl MomentumScanner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one quote.  Returns the alert raised by this tick, if any.
    pub fn on_tick(
        &mut self,
        symbol: &str,
        ltp: f64,
        now: DateTime<Utc>,
        settings: &ScanSettings,
    ) -> Option<MomentumAlert> {
        if !ltp.is_finite() || ltp <= 0.0 {
            debug!(symbol, ltp, "Non-tradable price — tick ignored");
            return None;
        }

        let lookback = settings.lookback();

        // ── 0. Keep history in time order ────────────────────────────────────
        //   late tick (within one window) → ignored
        //   history further ahead than a whole window → clock jumped, restart
        let history = self.history.entry(symbol.to_string()).or_default();
        if let Some(last) = history.back() {
            if now < last.time {
                if last.time - now > lookback {
                    warn!(symbol, last = %last.time, %now, "History ahead of tick clock — window reset");
                    history.clear();
                } else {
                    debug!(symbol, last = %last.time, %now, "Out-of-order tick ignored");
                    return None;
                }
            }
        }

        // ── 1-2. Append + trim ───────────────────────────────────────────────
        history.push_back(PricePoint { time: now, price: ltp });

        let cutoff = now - lookback;
        while history.front().is_some_and(|p| p.time < cutoff) {
            history.pop_front();
        }

        // ── 3. Enough data? ──────────────────────────────────────────────────
        if history.len() < MIN_SAMPLES {
            return None;
        }

        let start = *history.front()?;
        let elapsed_ms = (now - start.time).num_milliseconds();
        if elapsed_ms < i64::from(settings.lookback_secs) * MIN_WINDOW_COVERAGE_PERMILLE {
            return None;
        }

        // ── 4. % change ──────────────────────────────────────────────────────
        let move_pct = percent_change(start.price, ltp)?;

        let direction = if move_pct >= settings.percent {
            AlertDirection::Positive
        } else if move_pct <= -settings.percent {
            AlertDirection::Negative
        } else {
            return None;
        };

        // ── 5. Dedupe per symbol per minute ──────────────────────────────────
        let minute = minute_of(now);
        self.prune_fired(minute);

        let key = (symbol.to_string(), minute);
        if self.fired.contains(&key) {
            debug!(symbol, move_pct, "Alert already raised this minute — skipped");
            return None;
        }
        self.fired.insert(key);

        let alert = MomentumAlert::new(symbol, ltp, move_pct, now);
        let table = match direction {
            AlertDirection::Positive => &mut self.positive,
            AlertDirection::Negative => &mut self.negative,
        };
        table.push_front(alert.clone());
        table.truncate(MAX_ALERTS);

        info!(
            symbol,
            ltp,
            move_pct  = %format!("{move_pct:.2}"),
            direction = ?direction,
            "⚡ Momentum alert"
        );

        Some(alert)
    }

    /// Current window change for every symbol with at least two points,
    /// strongest gainer first.
    pub fn ranking(&self, now: DateTime<Utc>, lookback: Duration) -> Vec<Mover> {
        let cutoff = now - lookback;

        let mut movers: Vec<Mover> = self
            .history
            .iter()
            .filter_map(|(symbol, points)| {
                let mut window = points.iter().filter(|p| p.time >= cutoff);
                let first = window.next()?;
                let (last, samples) = window.fold((first, 1usize), |(_, n), p| (p, n + 1));
                if samples < 2 {
                    return None;
                }

                Some(Mover {
                    symbol:      symbol.clone(),
                    ltp:         last.price,
                    move_pct:    percent_change(first.price, last.price)?,
                    window_secs: (last.time - first.time).num_milliseconds() as f64 / 1000.0,
                    samples,
                })
            })
            .collect();

        movers.sort_by(|a, b| b.move_pct.total_cmp(&a.move_pct).then_with(|| a.symbol.cmp(&b.symbol)));
        movers
    }

    pub fn positive(&self) -> impl Iterator<Item = &MomentumAlert> {
        self.positive.iter()
    }

    pub fn negative(&self) -> impl Iterator<Item = &MomentumAlert> {
        self.negative.iter()
    }

    pub fn alert_count(&self) -> usize {
        self.positive.len() + self.negative.len()
    }

    pub fn tracked_symbols(&self) -> usize {
        self.history.len()
    }

    /// ล้างตาราง alert ทั้งสอง (history ยังอยู่ — momentum ยังคำนวณต่อได้)
    pub fn clear_alerts(&mut self) {
        self.positive.clear();
        self.negative.clear();
        self.fired.clear();
    }

    fn prune_fired(&mut self, current_minute: DateTime<Utc>) {
        self.fired.retain(|(_, minute)| *minute >= current_minute);
    }
}

// ─── Helpers ──────────────────────────────────────────────────────────────────

#[inline]
fn percent_change(from: f64, to: f64) -> Option<f64> {
    if from <= 0.0 || !from.is_finite() {
        return None;
    }
    Some((to - from) / from * 100.0)
}

fn minute_of(time: DateTime<Utc>) -> DateTime<Utc> {
    time.duration_trunc(Duration::minutes(1)).unwrap_or(time)
}

// ─── Tests ────────────────────────────────────────────────────────────────────
