//! Query orchestrator.
//!
//! The [`AssistantPipeline`] ties the pieces together: it builds indexes from
//! document sets and answers questions by embedding the query, searching the
//! index, routing to web search when needed, assembling the prompt and
//! calling the language model once.
//!
//! Index build failures are returned as errors. Web search and LLM failures
//! are not: a failed web search continues with no web results, and a failed
//! LLM call becomes the answer text, so the caller always gets an
//! [`AnswerBundle`] with whatever evidence was gathered.
//!
//! # Example
//!
//! ```rust,ignore
//! use smartassist_rag::{AssistantConfig, AssistantPipeline, ResponseMode};
//!
//! let pipeline = AssistantPipeline::builder()
//!     .config(AssistantConfig::default())
//!     .embedding_provider(Arc::new(my_embedder))
//!     .web_search(Arc::new(my_search))
//!     .language_model(Arc::new(my_llm))
//!     .build()?;
//!
//! let index = pipeline.build_index(&documents).await?;
//! let bundle = pipeline.answer(&index, "Is the API down?", ResponseMode::Concise).await?;
//! ```

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, error, info, warn};

use crate::chunking::FixedSizeChunker;
use crate::config::AssistantConfig;
use crate::context::{AssembledPrompt, ContextAssembler, ResponseMode};
use crate::document::{AnswerBundle, Document, RetrievalResult, WebResult};
use crate::embedding::EmbeddingProvider;
use crate::error::{RagError, Result};
use crate::index::{VectorIndex, build_index_with};
use crate::knowledge_base::KnowledgeBase;
use crate::llm::LanguageModel;
use crate::router::RetrievalRouter;
use crate::search::search;
use crate::source::DocumentSource;
use crate::web_search::{DisabledWebSearch, WebSearchProvider};

/// Prefix of the answer text when the language model call fails.
pub const LLM_FAILURE_PREFIX: &str = "Error getting response from model";

/// Await `fut`, failing with [`RagError::Timeout`] if `timeout` elapses first.
async fn bounded<T, F>(capability: &'static str, timeout: Option<Duration>, fut: F) -> Result<T>
where
    F: Future<Output = Result<T>>,
{
    match timeout {
        Some(limit) => tokio::time::timeout(limit, fut)
            .await
            .map_err(|_| RagError::Timeout { capability, timeout: limit })?,
        None => fut.await,
    }
}

/// Applies the configured timeout to every call of the wrapped provider.
struct BoundedEmbedder<'a> {
    inner: &'a dyn EmbeddingProvider,
    timeout: Option<Duration>,
}

#[async_trait]
impl EmbeddingProvider for BoundedEmbedder<'_> {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        bounded("embedding", self.timeout, self.inner.embed(text)).await
    }

    async fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>> {
        bounded("embedding", self.timeout, self.inner.embed_batch(texts)).await
    }

    fn name(&self) -> &str {
        self.inner.name()
    }
}

/// The retrieval-augmented answering pipeline.
///
/// Holds no index of its own; pass a [`VectorIndex`] or a
/// [`KnowledgeBase`] to each query. Construct one via
/// [`AssistantPipeline::builder()`].
pub struct AssistantPipeline {
    config: AssistantConfig,
    chunker: FixedSizeChunker,
    router: RetrievalRouter,
    assembler: ContextAssembler,
    embedding_provider: Arc<dyn EmbeddingProvider>,
    web_search: Arc<dyn WebSearchProvider>,
    language_model: Arc<dyn LanguageModel>,
}

impl AssistantPipeline {
    /// Create a new [`AssistantPipelineBuilder`].
    pub fn builder() -> AssistantPipelineBuilder {
        AssistantPipelineBuilder::default()
    }

    /// Return a reference to the pipeline configuration.
    pub fn config(&self) -> &AssistantConfig {
        &self.config
    }

    /// Return a reference to the router.
    pub fn router(&self) -> &RetrievalRouter {
        &self.router
    }

    fn embedder(&self) -> BoundedEmbedder<'_> {
        BoundedEmbedder {
            inner: self.embedding_provider.as_ref(),
            timeout: self.config.capability_timeout,
        }
    }

    /// Chunk and embed `documents` into a new index.
    ///
    /// # Errors
    ///
    /// Returns [`RagError::EmptyCorpus`] if nothing could be chunked, and any
    /// embedding, dimension or timeout error. No index is produced on error.
    pub async fn build_index(&self, documents: &[Document]) -> Result<VectorIndex> {
        build_index_with(documents, &self.chunker, &self.embedder()).await
    }

    /// Load documents from `source` and build an index from them.
    ///
    /// # Errors
    ///
    /// See [`build_index`](Self::build_index); source errors are propagated.
    pub async fn load_index(&self, source: &dyn DocumentSource) -> Result<VectorIndex> {
        let documents = source.load().await.inspect_err(|e| {
            error!(error = %e, "failed to load documents");
        })?;
        self.build_index(&documents).await
    }

    /// Retrieve the `top_k` chunks most similar to `query`.
    ///
    /// A blank query returns no results without calling the embedder.
    ///
    /// # Errors
    ///
    /// Returns [`RagError::EmptyIndex`] for an empty index, and any query
    /// embedding, dimension or timeout error.
    pub async fn retrieve(&self, index: &VectorIndex, query: &str) -> Result<Vec<RetrievalResult>> {
        if index.is_empty() {
            return Err(RagError::EmptyIndex);
        }
        if query.trim().is_empty() {
            return Ok(Vec::new());
        }

        let query_vector = self.embedder().embed(query).await.inspect_err(|e| {
            error!(error = %e, "embedding failed during query");
        })?;
        search(&query_vector, index, self.config.top_k)
    }

    /// Answer `query` from `index`, consulting web search when the router
    /// asks for it.
    ///
    /// # Errors
    ///
    /// Only retrieval errors are returned (see [`retrieve`](Self::retrieve)).
    /// Web search and language model failures are absorbed.
    pub async fn answer(
        &self,
        index: &VectorIndex,
        query: &str,
        mode: ResponseMode,
    ) -> Result<AnswerBundle> {
        let rag_results = self.retrieve(index, query).await?;

        let decision = self.router.decide(query, &rag_results);
        debug!(?decision, "routing decision");
        let used_web = decision.needs_web();

        let web_results = if used_web { self.fetch_web_results(query).await } else { Vec::new() };

        let prompt = self.assembler.assemble(&rag_results, &web_results, mode);
        let answer = self.synthesize(&prompt, query).await;

        info!(
            rag_count = rag_results.len(),
            web_count = web_results.len(),
            used_web,
            %mode,
            "query completed"
        );

        Ok(AnswerBundle { answer, rag_results, web_results, used_web })
    }

    /// Answer `query` from the knowledge base's current index.
    ///
    /// # Errors
    ///
    /// Returns [`RagError::EmptyIndex`] if the knowledge base has not been
    /// built; otherwise as [`answer`](Self::answer).
    pub async fn answer_from(
        &self,
        knowledge_base: &KnowledgeBase,
        query: &str,
        mode: ResponseMode,
    ) -> Result<AnswerBundle> {
        let index = knowledge_base.snapshot().await.ok_or(RagError::EmptyIndex)?;
        self.answer(&index, query, mode).await
    }

    async fn fetch_web_results(&self, query: &str) -> Vec<WebResult> {
        if query.trim().is_empty() {
            debug!("blank query, web search skipped");
            return Vec::new();
        }
        let k = self.config.web_result_count;
        let search =
            bounded("web search", self.config.capability_timeout, self.web_search.search(query, k));
        match search.await {
            Ok(results) => results.into_iter().take(k).map(WebResult::normalized).collect(),
            Err(e) => {
                warn!(
                    provider = self.web_search.name(),
                    error = %e,
                    "web search failed, continuing without it"
                );
                Vec::new()
            }
        }
    }

    async fn synthesize(&self, prompt: &AssembledPrompt, query: &str) -> String {
        let user_message = prompt.user_message(query);
        let completion = bounded(
            "llm",
            self.config.capability_timeout,
            self.language_model.complete(&prompt.system_prompt, &user_message),
        );
        match completion.await {
            Ok(answer) => answer,
            Err(e) => {
                warn!(
                    provider = self.language_model.name(),
                    error = %e,
                    "language model call failed"
                );
                format!("{LLM_FAILURE_PREFIX}: {e}")
            }
        }
    }
}

/// Builder for constructing an [`AssistantPipeline`].
///
/// `config`, `embedding_provider` and `language_model` are required. Without
/// a `web_search` provider, web search is [`DisabledWebSearch`].
#[derive(Default)]
pub struct AssistantPipelineBuilder {
    config: Option<AssistantConfig>,
    embedding_provider: Option<Arc<dyn EmbeddingProvider>>,
    web_search: Option<Arc<dyn WebSearchProvider>>,
    language_model: Option<Arc<dyn LanguageModel>>,
}

impl AssistantPipelineBuilder {
    /// Set the pipeline configuration.
    pub fn config(mut self, config: AssistantConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Set the embedding provider.
    pub fn embedding_provider(mut self, provider: Arc<dyn EmbeddingProvider>) -> Self {
        self.embedding_provider = Some(provider);
        self
    }

    /// Set the web search provider.
    pub fn web_search(mut self, provider: Arc<dyn WebSearchProvider>) -> Self {
        self.web_search = Some(provider);
        self
    }

    /// Set the language model used for answer synthesis.
    pub fn language_model(mut self, model: Arc<dyn LanguageModel>) -> Self {
        self.language_model = Some(model);
        self
    }

    /// Build the [`AssistantPipeline`], validating the configuration and that
    /// all required fields are set.
    ///
    /// # Errors
    ///
    /// Returns [`RagError::ConfigError`] if a required field is missing or the
    /// configuration is invalid.
    pub fn build(self) -> Result<AssistantPipeline> {
        let config =
            self.config.ok_or_else(|| RagError::ConfigError("config is required".to_string()))?;
        config.validate()?;
        let embedding_provider = self
            .embedding_provider
            .ok_or_else(|| RagError::ConfigError("embedding_provider is required".to_string()))?;
        let language_model = self
            .language_model
            .ok_or_else(|| RagError::ConfigError("language_model is required".to_string()))?;
        let web_search = self.web_search.unwrap_or_else(|| Arc::new(DisabledWebSearch));

        let chunker = FixedSizeChunker::new(config.chunk_size, config.chunk_overlap)?;
        let router = RetrievalRouter::new(&config.router);
        let assembler = ContextAssembler::new(config.assistant_name.clone());

        Ok(AssistantPipeline {
            config,
            chunker,
            router,
            assembler,
            embedding_provider,
            web_search,
            language_model,
        })
    }
}
