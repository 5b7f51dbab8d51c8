//! Completion service abstraction.
//!
//! The section generator treats text generation as an opaque, possibly slow,
//! possibly failing dependency. This module provides the `CompletionService`
//! trait it calls and the provider implementations behind it.
//!
//! Implementations never retry: all resilience lives in
//! [`SectionGenerator`](crate::plan::SectionGenerator).

use async_trait::async_trait;

pub mod anthropic;
pub mod error;
pub mod factory;
pub mod offline;
pub mod openai;
pub mod types;

pub use error::CompletionError;
pub use types::{CompletionRequest, CompletionResponse, ModelMap, QualityTier};

/// Unified interface for text-generation providers.
///
/// # Object Safety
///
/// Designed to be used as `Arc<dyn CompletionService>`.
///
/// # Cancellation Safety
///
/// `complete` is cancellation-safe. Dropping the future aborts any in-flight
/// HTTP request.
#[async_trait]
pub trait CompletionService: Send + Sync + 'static {
    /// Human-readable provider name for logging (e.g. "openai").
    fn name(&self) -> &str;

    /// Run one completion.
    ///
    /// Transport errors, provider errors and unparseable bodies are all
    /// reported as a failed [`CompletionResponse`], never as a panic.
    async fn complete(&self, request: CompletionRequest) -> CompletionResponse;
}
