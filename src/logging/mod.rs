//! Structured logging helpers
//!
//! Privacy-safe prompt previews and request ID propagation for the HTTP API.
//! Filter directives are built by
//! [`LoggingConfig::filter_directives`](crate::config::LoggingConfig::filter_directives).

pub mod fields;
pub mod middleware;

pub use fields::truncate_prompt;
pub use middleware::{generate_request_id, request_id, REQUEST_ID_HEADER};
