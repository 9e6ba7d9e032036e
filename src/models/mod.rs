//! Domain models shared across the scanner.

pub mod alert;
pub mod settings;
pub mod tick;

pub use alert::{AlertDirection, MomentumAlert, Mover};
pub use settings::ScanSettings;
pub use tick::QuoteTick;
