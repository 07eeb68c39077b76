//! Gateway types module
//!
//! - [`response`]: error responses and response DTOs

pub mod response;

pub use response::{ApiError, ErrorDetail, HealthResponse};
