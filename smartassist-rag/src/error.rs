//! Error types for the `smartassist-rag` crate.

use std::time::Duration;

use thiserror::Error;

/// Errors that can occur in retrieval and answering operations.
#[derive(Debug, Error)]
pub enum RagError {
    /// A caller-supplied parameter violates its contract (e.g. chunk overlap
    /// not smaller than the chunk size).
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The document set produced no chunks to index.
    #[error("Empty corpus: no chunks could be created from the loaded documents")]
    EmptyCorpus,

    /// A search was attempted against an index with no chunks, or before any
    /// index was built.
    #[error("Empty index: build the knowledge base before querying it")]
    EmptyIndex,

    /// Two embedding vectors that must share a dimension do not.
    #[error("Dimension mismatch: expected {expected}, found {found}")]
    DimensionMismatch {
        /// The dimension established by the index (or the first vector).
        expected: usize,
        /// The offending dimension.
        found: usize,
    },

    /// An error occurred during embedding generation.
    #[error("Embedding error ({provider}): {message}")]
    EmbeddingError {
        /// The embedding provider that produced the error.
        provider: String,
        /// A description of the failure.
        message: String,
    },

    /// An error occurred in a web search provider.
    #[error("Web search error ({provider}): {message}")]
    WebSearchError {
        /// The search provider that produced the error.
        provider: String,
        /// A description of the failure.
        message: String,
    },

    /// An error occurred while calling the language model.
    #[error("LLM error ({provider}): {message}")]
    LlmError {
        /// The model provider that produced the error.
        provider: String,
        /// A description of the failure.
        message: String,
    },

    /// The document source could not be read as a whole.
    #[error("Document source error ({source_name}): {message}")]
    DocumentSourceError {
        /// The source (usually a directory path) that failed.
        source_name: String,
        /// A description of the failure.
        message: String,
    },

    /// An external capability call did not complete in time.
    #[error("{capability} call timed out after {timeout:?}")]
    Timeout {
        /// Which capability was being called.
        capability: &'static str,
        /// The bound that elapsed.
        timeout: Duration,
    },

    /// A configuration validation error.
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// A convenience result type for RAG operations.
pub type Result<T> = std::result::Result<T, RagError>;
