//! Quote sources.  The scanner polls the Fyers REST quote API; external
//! bridges may also push ticks through `POST /api/feed/tick`.

pub mod fyers;

pub use fyers::FyersClient;
