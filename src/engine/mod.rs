//! Scanner engine: the momentum calculation and the quote poller that feeds it.

pub mod momentum;
pub mod poller;
