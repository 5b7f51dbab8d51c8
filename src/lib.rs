//! Plancraft - resilient business plan generation
//!
//! This library builds multi-section business plans from a name and a short
//! description using an external text-completion service. Each section is
//! retried once in a degraded form and then falls back to template content,
//! so a build only fails on invalid input or cancellation. A separate
//! regex-cascade engine extracts competitors, financial projections, market
//! segments and SWOT items from free text.

pub mod api;
pub mod cli;
pub mod completion;
pub mod config;
pub mod extract;
pub mod ideas;
pub mod logging;
pub mod metrics;
pub mod plan;
pub mod progress;
pub mod session;
