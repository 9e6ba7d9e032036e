//! # config — อ่าน Config จาก Environment Variables
//!
//! | Variable                | Default                    | Description                          |
//! |-------------------------|----------------------------|--------------------------------------|
//! | `BIND_ADDR`             | `0.0.0.0:8501`             | Address Axum listens on              |
//! | `SYMBOLS_FILE`          | `symbols.txt`              | Watchlist, one symbol per line       |
//! | `TOKEN_FILE`            | `access_token.txt`         | Daily access token (replace each AM) |
//! | `FYERS_CLIENT_ID`       | `XH11906`                  | App client id prefixed to the token  |
//! | `FYERS_API_URL`         | `https://api-t1.fyers.in`  | Quote API base URL                   |
//! | `POLL_INTERVAL_MS`      | `1000`                     | Quote poll period                    |
//! | `TOKEN_RETRY_SECS`      | `30`                       | Back-off after the token is rejected |
//! | `DEFAULT_LOOKBACK_SECS` | `60`                       | Initial momentum window              |
//! | `DEFAULT_PERCENT`       | `1.0`                      | Initial momentum threshold (%)       |
//! | `AUTO_START`            | `false`                    | Start polling without the UI button  |

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;

use crate::models::ScanSettings;

/// Config ทั้งหมดที่ Scanner ต้องการ
#[derive(Debug, Clone)]
pub struct ScannerConfig {
    pub bind_addr:            SocketAddr,
    pub symbols_file:         PathBuf,
    pub token_file:           PathBuf,
    pub client_id:            String,
    pub api_url:              String,
    pub poll_interval:        Duration,
    /// รอนานแค่ไหนก่อนอ่าน token ใหม่ หลังจาก API ตอบว่า token หมดอายุ
    pub token_retry_interval: Duration,
    pub default_settings:     ScanSettings,
    pub auto_start:           bool,
}

impl ScannerConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let bind_addr: SocketAddr = env_or("BIND_ADDR", "0.0.0.0:8501")
            .parse()
            .context("BIND_ADDR must be a socket address like 0.0.0.0:8501")?;

        let poll_ms: u64 = env_or("POLL_INTERVAL_MS", "1000")
            .parse()
            .context("POLL_INTERVAL_MS must be a number")?;

        let retry_secs: u64 = env_or("TOKEN_RETRY_SECS", "30")
            .parse()
            .context("TOKEN_RETRY_SECS must be a number")?;

        let lookback_secs: u32 = env_or("DEFAULT_LOOKBACK_SECS", "60")
            .parse()
            .context("DEFAULT_LOOKBACK_SECS must be a number")?;

        let percent: f64 = env_or("DEFAULT_PERCENT", "1.0")
            .parse()
            .context("DEFAULT_PERCENT must be a number")?;

        let default_settings = ScanSettings { lookback_secs, percent };
        default_settings
            .validate()
            .map_err(|e| anyhow::anyhow!("invalid default scan settings: {e}"))?;

        Ok(Self {
            bind_addr,
            symbols_file:         PathBuf::from(env_or("SYMBOLS_FILE", "symbols.txt")),
            token_file:           PathBuf::from(env_or("TOKEN_FILE", "access_token.txt")),
            client_id:            env_or("FYERS_CLIENT_ID", "XH11906"),
            api_url:              env_or("FYERS_API_URL", "https://api-t1.fyers.in")
                                      .trim_end_matches('/')
                                      .to_string(),
            poll_interval:        Duration::from_millis(poll_ms.max(100)),
            token_retry_interval: Duration::from_secs(retry_secs.max(1)),
            default_settings,
            auto_start:           env_bool("AUTO_START", false),
        })
    }
}

impl Default for ScannerConfig {
    fn default() -> Self {
        Self {
            bind_addr:            SocketAddr::from(([0, 0, 0, 0], 8501)),
            symbols_file:         PathBuf::from("symbols.txt"),
            token_file:           PathBuf::from("access_token.txt"),
            client_id:            "XH11906".to_string(),
            api_url:              "https://api-t1.fyers.in".to_string(),
            poll_interval:        Duration::from_secs(1),
            token_retry_interval: Duration::from_secs(30),
            default_settings:     ScanSettings::default(),
            auto_start:           false,
        }
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn env_bool(key: &str, default: bool) -> bool {
    match std::env::var(key) {
        Ok(v) => matches!(v.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on"),
        Err(_) => default,
    }
}
