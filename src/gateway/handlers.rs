//! HTTP handlers
//!
//! - [`history`] - `GET /` trade history
//! - [`health`] - `GET /health`

pub mod health;
pub mod history;

pub use health::health_check;
pub use history::{HistoryQuery, trading_history};
