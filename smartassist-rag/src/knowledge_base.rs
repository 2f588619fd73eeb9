//! Session-scoped holder of the current [`VectorIndex`].

use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::info;

use crate::error::Result;
use crate::index::VectorIndex;
use crate::pipeline::AssistantPipeline;
use crate::source::DocumentSource;

/// The knowledge base a session queries against.
///
/// Starts empty. A rebuild constructs the new index without holding the lock
/// and then swaps it in wholesale; queries work on an `Arc` snapshot, so a
/// rebuild never changes an index that a query is already reading. A failed
/// rebuild leaves the previous index in place.
///
/// # Example
///
/// ```rust,ignore
/// use smartassist_rag::{DirectoryDocumentSource, KnowledgeBase, ResponseMode};
///
/// let kb = KnowledgeBase::new();
/// kb.rebuild(&pipeline, &DirectoryDocumentSource::new("data/docs")).await?;
/// let bundle =
///     pipeline.answer_from(&kb, "How do I reset my password?", ResponseMode::Concise).await?;
/// ```
#[derive(Debug, Default)]
pub struct KnowledgeBase {
    index: RwLock<Option<Arc<VectorIndex>>>,
}

impl KnowledgeBase {
    /// Create an empty knowledge base.
    pub fn new() -> Self {
        Self::default()
    }

    /// The current index, if one has been built.
    pub async fn snapshot(&self) -> Option<Arc<VectorIndex>> {
        self.index.read().await.clone()
    }

    /// Whether an index is currently available.
    pub async fn is_built(&self) -> bool {
        self.index.read().await.is_some()
    }

    /// Publish `index`, replacing any previous one.
    pub async fn replace(&self, index: VectorIndex) -> Arc<VectorIndex> {
        let index = Arc::new(index);
        *self.index.write().await = Some(Arc::clone(&index));
        info!(chunk_count = index.len(), "knowledge base replaced");
        index
    }

    /// Load `source`, build a fresh index with `pipeline`, and publish it.
    ///
    /// # Errors
    ///
    /// Propagates load and build errors; the previous index is kept.
    pub async fn rebuild(
        &self,
        pipeline: &AssistantPipeline,
        source: &dyn DocumentSource,
    ) -> Result<Arc<VectorIndex>> {
        let index = pipeline.load_index(source).await?;
        Ok(self.replace(index).await)
    }

    /// Drop the current index.
    pub async fn clear(&self) {
        *self.index.write().await = None;
    }
}
