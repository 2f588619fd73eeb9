//! Language model trait used for final answer synthesis.

use async_trait::async_trait;

use crate::error::Result;

/// A chat model that turns a system instruction and a user message into an
/// answer.
///
/// The pipeline calls [`complete`](LanguageModel::complete) exactly once per
/// query. Errors are not surfaced to the pipeline's caller; they become the
/// answer text instead.
#[async_trait]
pub trait LanguageModel: Send + Sync {
    /// Produce a completion for a two-message conversation.
    async fn complete(&self, system_prompt: &str, user_message: &str) -> Result<String>;

    /// A short provider name used in logs and error messages.
    fn name(&self) -> &str {
        "llm"
    }
}
