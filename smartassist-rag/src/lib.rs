//! Retrieval-augmented answering for a support assistant.
//!
//! This crate provides:
//! - Character-window document chunking
//! - An in-memory embedding index with exact cosine similarity search
//! - A router that decides when web search should supplement internal docs
//! - Prompt assembly from internal and web evidence
//! - An orchestrator that answers questions through injected embedding,
//!   web search and language model capabilities
//!
//! Provider clients are not part of this crate. Implement
//! [`EmbeddingProvider`], [`WebSearchProvider`], [`LanguageModel`] and
//! [`DocumentSource`] to plug them in.

pub mod chunking;
pub mod config;
pub mod context;
pub mod document;
pub mod embedding;
pub mod error;
pub mod index;
pub mod knowledge_base;
pub mod llm;
pub mod pipeline;
pub mod router;
pub mod search;
pub mod similarity;
pub mod source;
pub mod web_search;

pub use chunking::{Chunker, FixedSizeChunker, chunk_text};
pub use config::{AssistantConfig, AssistantConfigBuilder};
pub use context::{AssembledPrompt, ContextAssembler, ResponseMode, build_context_block};
pub use document::{AnswerBundle, Chunk, Citation, Document, RetrievalResult, WebResult};
pub use embedding::EmbeddingProvider;
pub use error::{RagError, Result};
pub use index::{EmbeddingMatrix, VectorIndex, build_index, build_index_with};
pub use knowledge_base::KnowledgeBase;
pub use llm::LanguageModel;
pub use pipeline::{AssistantPipeline, AssistantPipelineBuilder};
pub use router::{RetrievalRouter, RouteDecision, RouterConfig, needs_web_search};
pub use search::search;
pub use source::{DirectoryDocumentSource, DocumentSource, InMemoryDocumentSource};
pub use web_search::{DisabledWebSearch, WebSearchProvider};
