//! Gateway Services Layer
//!
//! Business logic extracted from handlers. Handlers are thin HTTP adapters
//! that delegate to services.

pub mod history;

pub use history::TradeHistoryService;
