//! In-memory vector index built from a document set.
//!
//! A [`VectorIndex`] is immutable once built: rebuilding produces a new value
//! that replaces the old one wholesale (see
//! [`KnowledgeBase`](crate::KnowledgeBase)).

use tracing::{error, info};

use crate::chunking::{Chunker, FixedSizeChunker};
use crate::document::{Chunk, Document};
use crate::embedding::EmbeddingProvider;
use crate::error::{RagError, Result};

/// A dense row-major matrix of embeddings, shape `[rows, dimensions]`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EmbeddingMatrix {
    data: Vec<f32>,
    rows: usize,
    dimensions: usize,
}

impl EmbeddingMatrix {
    /// Pack equal-length vectors into a matrix.
    ///
    /// # Errors
    ///
    /// Returns [`RagError::InvalidArgument`] if a vector is empty or holds a
    /// non-finite component, and [`RagError::DimensionMismatch`] if the
    /// vectors differ in length.
    pub fn from_rows(rows: Vec<Vec<f32>>) -> Result<Self> {
        let Some(dimensions) = rows.first().map(Vec::len) else {
            return Ok(Self::default());
        };
        if dimensions == 0 {
            return Err(RagError::InvalidArgument("embedding vectors must not be empty".into()));
        }

        let mut data = Vec::with_capacity(rows.len() * dimensions);
        for (i, row) in rows.iter().enumerate() {
            if row.len() != dimensions {
                return Err(RagError::DimensionMismatch { expected: dimensions, found: row.len() });
            }
            if !row.iter().all(|x| x.is_finite()) {
                return Err(RagError::InvalidArgument(format!(
                    "embedding row {i} has a non-finite component"
                )));
            }
            data.extend_from_slice(row);
        }
        Ok(Self { data, rows: rows.len(), dimensions })
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows
    }

    /// Whether the matrix has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows == 0
    }

    /// Number of columns (the embedding dimension). Zero for an empty matrix.
    pub fn dimensions(&self) -> usize {
        self.dimensions
    }

    /// Row `i`, if present.
    pub fn row(&self, i: usize) -> Option<&[f32]> {
        (i < self.rows).then(|| &self.data[i * self.dimensions..(i + 1) * self.dimensions])
    }

    /// Iterate over rows in order.
    pub fn rows(&self) -> impl Iterator<Item = &[f32]> {
        self.data.chunks_exact(self.dimensions.max(1))
    }
}

/// Parallel collection of chunks and their embeddings.
///
/// Row `i` of [`embeddings`](VectorIndex::embeddings) is the embedding of
/// `chunks()[i]`; both always have the same length.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VectorIndex {
    embeddings: EmbeddingMatrix,
    chunks: Vec<Chunk>,
}

impl VectorIndex {
    /// Assemble an index from chunks and their embeddings (same order).
    ///
    /// # Errors
    ///
    /// Returns [`RagError::InvalidArgument`] if the counts differ or a vector
    /// is empty, and [`RagError::DimensionMismatch`] if the vectors differ in
    /// length.
    pub fn from_parts(chunks: Vec<Chunk>, embeddings: Vec<Vec<f32>>) -> Result<Self> {
        if chunks.len() != embeddings.len() {
            return Err(RagError::InvalidArgument(format!(
                "{} embeddings supplied for {} chunks",
                embeddings.len(),
                chunks.len()
            )));
        }
        let embeddings = EmbeddingMatrix::from_rows(embeddings)?;
        Ok(Self { embeddings, chunks })
    }

    /// Number of indexed chunks.
    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    /// Whether the index holds no chunks.
    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    /// Embedding dimension shared by every row.
    pub fn dimensions(&self) -> usize {
        self.embeddings.dimensions()
    }

    /// The indexed chunks, in embedding row order.
    pub fn chunks(&self) -> &[Chunk] {
        &self.chunks
    }

    /// The embedding matrix.
    pub fn embeddings(&self) -> &EmbeddingMatrix {
        &self.embeddings
    }
}

/// Chunk every document with `chunker`, preserving document order.
pub fn chunk_documents(documents: &[Document], chunker: &dyn Chunker) -> Vec<Chunk> {
    documents.iter().flat_map(|document| chunker.chunk(document)).collect()
}

/// Build an index with the default 800/200 character chunking.
///
/// # Errors
///
/// See [`build_index_with`].
pub async fn build_index(
    documents: &[Document],
    embedder: &dyn EmbeddingProvider,
) -> Result<VectorIndex> {
    build_index_with(documents, &FixedSizeChunker::default(), embedder).await
}

/// Chunk `documents`, embed all chunk texts in one batch, and assemble the
/// index.
///
/// # Errors
///
/// - [`RagError::EmptyCorpus`] if the documents yield no chunks.
/// - Any error from the embedding provider.
/// - [`RagError::EmbeddingError`] if the provider returns the wrong number of
///   vectors, an empty vector, or a vector with a NaN or infinite component.
/// - [`RagError::DimensionMismatch`] if the vectors differ in length.
pub async fn build_index_with(
    documents: &[Document],
    chunker: &dyn Chunker,
    embedder: &dyn EmbeddingProvider,
) -> Result<VectorIndex> {
    let chunks = chunk_documents(documents, chunker);
    if chunks.is_empty() {
        error!(document_count = documents.len(), "no chunks created from documents");
        return Err(RagError::EmptyCorpus);
    }

    let texts: Vec<&str> = chunks.iter().map(|c| c.text.as_str()).collect();
    let embeddings = embedder.embed_batch(&texts).await.inspect_err(|e| {
        error!(provider = embedder.name(), error = %e, "embedding failed during index build");
    })?;

    if embeddings.len() != chunks.len() {
        return Err(RagError::EmbeddingError {
            provider: embedder.name().to_string(),
            message: format!(
                "returned {} embeddings for {} chunks",
                embeddings.len(),
                chunks.len()
            ),
        });
    }
    if let Some(i) = embeddings.iter().position(Vec::is_empty) {
        return Err(RagError::EmbeddingError {
            provider: embedder.name().to_string(),
            message: format!("returned an empty embedding for chunk {i}"),
        });
    }
    if let Some(i) = embeddings.iter().position(|v| v.iter().any(|x| !x.is_finite())) {
        error!(provider = embedder.name(), chunk = i, "non-finite embedding, index not built");
        return Err(RagError::EmbeddingError {
            provider: embedder.name().to_string(),
            message: format!("returned a non-finite embedding for chunk {i}"),
        });
    }

    let index = VectorIndex::from_parts(chunks, embeddings).inspect_err(|e| {
        error!(error = %e, "inconsistent embeddings, index not built");
    })?;

    info!(
        document_count = documents.len(),
        chunk_count = index.len(),
        dimensions = index.dimensions(),
        "built vector index"
    );
    Ok(index)
}
