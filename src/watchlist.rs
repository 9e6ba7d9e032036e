//! # watchlist — อ่านรายชื่อหุ้นจากไฟล์ (1 symbol ต่อบรรทัด)
//!
//! Bare tickers are qualified to the Fyers format: `sbin` → `NSE:SBIN-EQ`.
//! Index symbols (`NSE:NIFTY50-INDEX`) and non-equity segments keep their
//! suffix.

use std::collections::BTreeSet;
use std::path::Path;

use tracing::{debug, warn};

const EXCHANGES: [&str; 3] = ["NSE:", "BSE:", "MCX:"];

/// Qualify one watchlist line.  `None` for blank lines and `#` comments.
pub fn normalize_symbol(raw: &str) -> Option<String> {
    let s = raw.trim().to_uppercase();
    if s.is_empty() || s.starts_with('#') {
        return None;
    }

    let mut symbol = if EXCHANGES.iter().any(|ex| s.starts_with(ex)) {
        s
    } else {
        format!("NSE:{s}")
    };

    if !symbol.ends_with("-EQ") && !symbol.contains("-INDEX") {
        symbol.push_str("-EQ");
    }

    Some(symbol)
}

/// Load and normalise the watchlist.  A missing file yields an empty list;
/// the caller decides whether that is fatal.
pub fn load_watchlist(path: &Path) -> std::io::Result<Vec<String>> {
    if !path.exists() {
        warn!(path = %path.display(), "Watchlist file not found");
        return Ok(Vec::new());
    }

    let content = std::fs::read_to_string(path)?;
    let symbols: BTreeSet<String> = content.lines().filter_map(normalize_symbol).collect();

    debug!(path = %path.display(), count = symbols.len(), "Watchlist loaded");
    Ok(symbols.into_iter().collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_bare_ticker_gets_exchange_and_series() {
        assert_eq!(normalize_symbol("sbin"), Some("NSE:SBIN-EQ".to_string()));
        assert_eq!(normalize_symbol("  reliance \r"), Some("NSE:RELIANCE-EQ".to_string()));
    }

    #[test]
    fn test_existing_prefix_and_suffix_kept() {
        assert_eq!(normalize_symbol("BSE:TCS-EQ"), Some("BSE:TCS-EQ".to_string()));
        assert_eq!(normalize_symbol("mcx:crudeoil"), Some("MCX:CRUDEOIL-EQ".to_string()));
    }

    #[test]
    fn test_index_symbols_untouched() {
        assert_eq!(
            normalize_symbol("NSE:NIFTY50-INDEX"),
            Some("NSE:NIFTY50-INDEX".to_string())
        );
        assert_eq!(
            normalize_symbol("niftybank-index"),
            Some("NSE:NIFTYBANK-INDEX".to_string())
        );
    }

    #[test]
    fn test_blank_and_comment_lines_skipped() {
        assert_eq!(normalize_symbol("   "), None);
        assert_eq!(normalize_symbol("# banks"), None);
    }

    #[test]
    fn test_load_dedupes_and_sorts() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "sbin\ninfy\n\nNSE:SBIN-EQ\n# comment\nNSE:NIFTY50-INDEX").unwrap();

        let symbols = load_watchlist(file.path()).unwrap();
        assert_eq!(
            symbols,
            vec!["NSE:INFY-EQ", "NSE:NIFTY50-INDEX", "NSE:SBIN-EQ"]
        );
    }

    #[test]
    fn test_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let symbols = load_watchlist(&dir.path().join("nope.txt")).unwrap();
        assert!(symbols.is_empty());
    }
}
