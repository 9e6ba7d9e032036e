//! # feed::fyers — Fyers v3 REST quote client
//!
//! `GET {base}/data/quotes?symbols=NSE:SBIN-EQ,NSE:INFY-EQ`
//! with header `Authorization: {client_id}:{access_token}`.
//!
//! ```json
//! { "s": "ok", "code": 200,
//!   "d": [ { "n": "NSE:SBIN-EQ", "s": "ok", "v": { "lp": 812.35, "chp": 0.42 } } ] }
//! ```

use std::time::Duration;

use reqwest::StatusCode;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::error::AppError;
use crate::models::QuoteTick;
use crate::token::authorization_header;

/// API limit on symbols per quote request.
pub const MAX_SYMBOLS_PER_REQUEST: usize = 50;

/// Error codes the API uses for a rejected / expired token.
const AUTH_ERROR_CODES: [i64; 4] = [-8, -15, -16, -17];

const REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

// ─── Wire Types ───────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct QuotesResponse {
    pub s:       String,
    #[serde(default)]
    pub code:    Option<i64>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub d:       Vec<QuoteEntry>,
}

#[derive(Debug, Deserialize)]
pub struct QuoteEntry {
    pub n: String,
    pub s: String,
    #[serde(default)]
    pub v: Option<QuoteValues>,
}

#[derive(Debug, Deserialize)]
pub struct QuoteValues {
    #[serde(default)]
    pub lp: Option<f64>,
}

// ─── Client ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct FyersClient {
    http:     reqwest::Client,
    base_url: String,
    auth:     String,
}

impl FyersClient {
    pub fn new(http: reqwest::Client, base_url: &str, client_id: &str, token: &str) -> Self {
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            auth:     authorization_header(client_id, token),
        }
    }

    /// Quote every symbol, batching to the API limit.  One failing batch
    /// fails the whole call so the poller can report it.
    pub async fn fetch_quotes(&self, symbols: &[String]) -> Result<Vec<QuoteTick>, AppError> {
        let mut ticks = Vec::with_capacity(symbols.len());

        for batch in symbols.chunks(MAX_SYMBOLS_PER_REQUEST) {
            ticks.extend(self.fetch_batch(batch).await?);
        }

        Ok(ticks)
    }

    async fn fetch_batch(&self, batch: &[String]) -> Result<Vec<QuoteTick>, AppError> {
        let url = format!("{}/data/quotes", self.base_url);

        let resp = self
            .http
            .get(&url)
            .query(&[("symbols", batch.join(","))])
            .header(reqwest::header::AUTHORIZATION, &self.auth)
            .timeout(REQUEST_TIMEOUT)
            .send()
            .await
            .map_err(|e| AppError::Upstream(format!("quote API unreachable: {e}")))?;

        let status = resp.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            let body = resp.text().await.unwrap_or_default();
            return Err(AppError::TokenExpired(format!("HTTP {status}: {body}")));
        }

        let body: QuotesResponse = resp
            .json()
            .await
            .map_err(|e| AppError::Upstream(format!("HTTP {status}: unreadable quote response: {e}")))?;

        parse_quotes(body)
    }
}

// ─── Parsing ──────────────────────────────────────────────────────────────────

/// Turn an API response into ticks.  Per-symbol errors (bad symbol, no
/// price) are skipped; a top-level error fails the call.
pub fn parse_quotes(body: QuotesResponse) -> Result<Vec<QuoteTick>, AppError> {
    if body.s != "ok" {
        let code = body.code.unwrap_or_default();
        let message = body.message.unwrap_or_else(|| "unknown error".to_string());

        if AUTH_ERROR_CODES.contains(&code) {
            return Err(AppError::TokenExpired(format!("code {code}: {message}")));
        }
        return Err(AppError::Upstream(format!("code {code}: {message}")));
    }

    let ticks = body
        .d
        .into_iter()
        .filter_map(|entry| {
            if entry.s != "ok" {
                warn!(symbol = %entry.n, "Quote rejected for symbol");
                return None;
            }
            let ltp = entry.v.and_then(|v| v.lp)?;
            let tick = QuoteTick::new(entry.n, ltp);
            if !tick.is_tradable_price() {
                debug!(symbol = %tick.symbol, ltp, "Quote without a usable price");
                return None;
            }
            Some(tick)
        })
        .collect();

    Ok(ticks)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> Result<Vec<QuoteTick>, AppError> {
        parse_quotes(serde_json::from_str(json).unwrap())
    }

    #[test]
    fn test_parse_ok_response() {
        let ticks = parse(
            r#"{"s":"ok","code":200,"d":[
                {"n":"NSE:SBIN-EQ","s":"ok","v":{"lp":812.35,"chp":0.42,"volume":1000}},
                {"n":"NSE:INFY-EQ","s":"ok","v":{"lp":1450.0}}
            ]}"#,
        )
        .unwrap();

        assert_eq!(ticks.len(), 2);
        assert_eq!(ticks[0].symbol, "NSE:SBIN-EQ");
        assert_eq!(ticks[0].ltp, 812.35);
    }

    #[test]
    fn test_parse_skips_bad_symbols_and_missing_prices() {
        let ticks = parse(
            r#"{"s":"ok","d":[
                {"n":"NSE:NOPE-EQ","s":"error","v":{"errmsg":"invalid symbol"}},
                {"n":"NSE:ZERO-EQ","s":"ok","v":{"lp":0.0}},
                {"n":"NSE:NOLP-EQ","s":"ok","v":{}},
                {"n":"NSE:TCS-EQ","s":"ok","v":{"lp":3900.5}}
            ]}"#,
        )
        .unwrap();

        assert_eq!(ticks, vec![QuoteTick::new("NSE:TCS-EQ", 3900.5)]);
    }

    #[test]
    fn test_auth_error_code_is_token_expired() {
        let err = parse(r#"{"s":"error","code":-16,"message":"Could not authenticate the user"}"#)
            .unwrap_err();
        assert!(matches!(err, AppError::TokenExpired(_)));
    }

    #[test]
    fn test_other_error_is_upstream() {
        let err = parse(r#"{"s":"error","code":-300,"message":"Rate limit"}"#).unwrap_err();
        assert!(matches!(err, AppError::Upstream(_)));
    }
}
