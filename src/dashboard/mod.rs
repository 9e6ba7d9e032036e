//! Dashboard module - Momentum scanner web interface
//!
//! Single self-contained page served at `/`.  Separated into HTML, CSS, and
//! JS submodules for maintainability.
//!
//! # Features
//! - Status bar: running state, tracked symbols, last alert
//! - Lookback slider + momentum % input, Start / Stop buttons
//! - Dual tables: positive spikes and negative drops
//! - Live movers ranking
//! - 1-second auto-refresh

mod css;
mod html;
mod js;

/// Generate the complete dashboard HTML page
pub fn dashboard_html() -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Momentum Scanner</title>
    <style>
{css}
    </style>
</head>
<body>
{html}
    <script>
{js}
    </script>
</body>
</html>"#,
        css = css::STYLES,
        html = html::TEMPLATE,
        js = js::SCRIPT
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_wires_every_table() {
        let page = dashboard_html();
        for id in ["positiveBody", "negativeBody", "moversBody", "lookback", "percent"] {
            assert!(page.contains(&format!("id=\"{id}\"")), "missing #{id}");
        }
        assert!(page.contains("/api/alerts"));
    }
}
