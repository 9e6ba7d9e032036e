//! # models::settings
//!
//! [`ScanSettings`] — the two knobs the dashboard exposes.  The poller reads
//! them on every tick, so a change applies from the next quote onwards.

use serde::{Deserialize, Serialize};

pub const LOOKBACK_MIN_SECS:  u32 = 30;
pub const LOOKBACK_MAX_SECS:  u32 = 900;
pub const LOOKBACK_STEP_SECS: u32 = 30;
pub const PERCENT_MIN: f64 = 0.1;
pub const PERCENT_MAX: f64 = 5.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScanSettings {
    /// Rolling window length in seconds.
    pub lookback_secs: u32,
    /// Absolute % move that raises an alert.
    pub percent: f64,
}

impl Default for ScanSettings {
    fn default() -> Self {
        Self { lookback_secs: 60, percent: 1.0 }
    }
}

impl ScanSettings {
    pub fn validate(&self) -> Result<(), String> {
        if !(LOOKBACK_MIN_SECS..=LOOKBACK_MAX_SECS).contains(&self.lookback_secs) {
            return Err(format!(
                "lookback_secs must be between {LOOKBACK_MIN_SECS} and {LOOKBACK_MAX_SECS}"
            ));
        }
        if self.lookback_secs % LOOKBACK_STEP_SECS != 0 {
            return Err(format!("lookback_secs must be a multiple of {LOOKBACK_STEP_SECS}"));
        }
        // Small epsilon so 0.1 typed into a number input is not rejected.
        if !self.percent.is_finite()
            || self.percent < PERCENT_MIN - 1e-9
            || self.percent > PERCENT_MAX + 1e-9
        {
            return Err(format!("percent must be between {PERCENT_MIN} and {PERCENT_MAX}"));
        }
        Ok(())
    }

    /// Window length as a chrono duration.
    #[inline]
    pub fn lookback(&self) -> chrono::Duration {
        chrono::Duration::seconds(i64::from(self.lookback_secs))
    }
}

/// Partial update accepted by `PUT /api/scanner/settings`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SettingsPatch {
    pub lookback_secs: Option<u32>,
    pub percent:       Option<f64>,
}

impl SettingsPatch {
    pub fn apply_to(&self, current: ScanSettings) -> ScanSettings {
        ScanSettings {
            lookback_secs: self.lookback_secs.unwrap_or(current.lookback_secs),
            percent:       self.percent.unwrap_or(current.percent),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(ScanSettings::default().validate().is_ok());
    }

    #[test]
    fn test_lookback_bounds_and_step() {
        let mut s = ScanSettings::default();
        s.lookback_secs = 900;
        assert!(s.validate().is_ok());
        s.lookback_secs = 930;
        assert!(s.validate().is_err());
        s.lookback_secs = 15;
        assert!(s.validate().is_err());
        s.lookback_secs = 45;
        assert!(s.validate().is_err());
    }

    #[test]
    fn test_percent_bounds() {
        let mut s = ScanSettings::default();
        s.percent = 0.1;
        assert!(s.validate().is_ok());
        s.percent = 5.0;
        assert!(s.validate().is_ok());
        s.percent = 5.5;
        assert!(s.validate().is_err());
        s.percent = f64::NAN;
        assert!(s.validate().is_err());
    }

    #[test]
    fn test_patch_keeps_unset_fields() {
        let patch = SettingsPatch { lookback_secs: None, percent: Some(2.5) };
        let next = patch.apply_to(ScanSettings::default());
        assert_eq!(next.lookback_secs, 60);
        assert_eq!(next.percent, 2.5);
    }
}
