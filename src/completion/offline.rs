//! Provider that never reaches the network.

use super::{CompletionRequest, CompletionResponse, CompletionService};
use async_trait::async_trait;

/// Declines every call, so each section resolves to its fallback content.
///
/// Useful for previewing document structure and for running without
/// credentials.
#[derive(Debug, Default, Clone, Copy)]
pub struct OfflineService;

#[async_trait]
impl CompletionService for OfflineService {
    fn name(&self) -> &str {
        "offline"
    }

    async fn complete(&self, _request: CompletionRequest) -> CompletionResponse {
        CompletionResponse::failed("completion service disabled (offline mode)")
    }
}
