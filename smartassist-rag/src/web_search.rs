//! Web search provider trait.

use async_trait::async_trait;
use tracing::debug;

use crate::document::WebResult;
use crate::error::Result;

/// A source of fresh, external information.
///
/// Adapters may return errors; [`AssistantPipeline`](crate::AssistantPipeline)
/// logs them and continues with no web results, so a failing or unconfigured
/// search never fails a query.
#[async_trait]
pub trait WebSearchProvider: Send + Sync {
    /// Search for `query` and return at most `k` normalized results.
    async fn search(&self, query: &str, k: usize) -> Result<Vec<WebResult>>;

    /// A short provider name used in logs and error messages.
    fn name(&self) -> &str {
        "web"
    }
}

/// A web search provider for deployments without search credentials.
///
/// Always returns an empty result list.
#[derive(Debug, Clone, Copy, Default)]
pub struct DisabledWebSearch;

#[async_trait]
impl WebSearchProvider for DisabledWebSearch {
    async fn search(&self, query: &str, _k: usize) -> Result<Vec<WebResult>> {
        debug!(query_len = query.len(), "web search not configured");
        Ok(Vec::new())
    }

    fn name(&self) -> &str {
        "disabled"
    }
}
