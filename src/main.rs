//! # Momentum Scanner — Real-time watchlist spike detector
//!
//! ```text
//!  symbols.txt ─┐
//!               ├─▶ Poll Loop ── GET /data/quotes ──▶ Fyers API
//!  token.txt  ──┘       │
//!                       ▼
//!  ┌─────────────┐  POST /api/feed/tick   ┌─────────────────────────────┐
//!  │  Bridge     │ ─────────────────────▶ │ AppState                    │
//!  │  (optional) │                        │ ├─ scanner (momentum) ⚡    │
//!  └─────────────┘                        │ ├─ settings                 │
//!                                         │ ├─ feed status              │
//!                                         │ └─ broadcast_tx ──────────┐ │
//!                                         └───────────────────────────┘ │
//!  ┌─────────────┐  ws://host/ws/monitor  ◀─────────────────────────────┘
//!  │  Dashboard  │  GET  /  ·  /api/alerts  ·  /api/movers
//!  └─────────────┘  POST /api/scanner/start | stop
//! ```
//!
//! Configuration: see [`config`].  `RUST_LOG` overrides the default tracing
//! filter.

use tracing::{info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod auth;
mod config;
mod dashboard;
mod engine;
mod error;
mod events;
mod feed;
mod models;
mod routes;
mod state;
mod token;
mod watchlist;

use config::ScannerConfig;
use engine::poller::start_scanner;
use routes::build_router;
use state::build_state;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // ── 1. Load .env ──────────────────────────────────────────────────────────
    dotenvy::dotenv().ok();

    // ── 2. Structured logging ─────────────────────────────────────────────────
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(
            EnvFilter::from_default_env()
                .add_directive("momentum_scanner=debug".parse()?)
                .add_directive("tower_http=info".parse()?),
        )
        .init();

    info!(r#"

  ╔═══════════════════════════════════════════════╗
  ║       MOMENTUM SCANNER — Real-time Spikes     ║
  ║   Watchlist · Quotes · Alerts · Dashboard     ║
  ╚═══════════════════════════════════════════════╝"#);

    // ── 3. Config + shared state ──────────────────────────────────────────────
    let config = ScannerConfig::from_env()?;
    let addr = config.bind_addr;
    let auto_start = config.auto_start;

    info!(
        symbols_file = %config.symbols_file.display(),
        token_file   = %config.token_file.display(),
        api_url      = %config.api_url,
        poll         = ?config.poll_interval,
        "Config loaded"
    );

    let state = build_state(config);

    // ── 4. Optional auto-start (headless mode) ────────────────────────────────
    if auto_start {
        match start_scanner(&state).await {
            Ok(n) => info!(symbols = n, "Auto-start: scanner running"),
            Err(e) => warn!(error = %e, "Auto-start failed — use the dashboard to retry"),
        }
    }

    // ── 5. Router ─────────────────────────────────────────────────────────────
    let app = build_router(state);

    // ── 6. Bind & Serve ───────────────────────────────────────────────────────
    info!(?addr, "🚀 Momentum Scanner dashboard at http://{addr}");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
