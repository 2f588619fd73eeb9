//! Exact brute-force similarity search over a [`VectorIndex`].

use tracing::debug;

use crate::document::RetrievalResult;
use crate::error::{RagError, Result};
use crate::index::VectorIndex;
use crate::similarity::{cosine_scores, top_k_indices};

/// Rank every indexed chunk by cosine similarity to `query_vector` and return
/// the best `top_k`, highest score first.
///
/// Equal scores keep index order. An empty `query_vector` yields no results.
///
/// # Errors
///
/// - [`RagError::EmptyIndex`] if the index has no chunks.
/// - [`RagError::DimensionMismatch`] if the query length differs from the
///   index dimension.
///
/// # Example
///
/// ```rust
/// use smartassist_rag::{Chunk, VectorIndex, search};
///
/// let chunks = vec![
///     Chunk { text: "billing".into(), source: "billing.txt".into() },
///     Chunk { text: "passwords".into(), source: "faq.txt".into() },
/// ];
/// let index = VectorIndex::from_parts(chunks, vec![vec![1.0, 0.0], vec![0.0, 1.0]]).unwrap();
///
/// let results = search(&[0.0, 1.0], &index, 1).unwrap();
/// assert_eq!(results[0].source, "faq.txt");
/// ```
pub fn search(
    query_vector: &[f32],
    index: &VectorIndex,
    top_k: usize,
) -> Result<Vec<RetrievalResult>> {
    if index.is_empty() {
        return Err(RagError::EmptyIndex);
    }
    if query_vector.is_empty() {
        return Ok(Vec::new());
    }
    if query_vector.len() != index.dimensions() {
        return Err(RagError::DimensionMismatch {
            expected: index.dimensions(),
            found: query_vector.len(),
        });
    }

    let scores = cosine_scores(query_vector, index.embeddings().rows());
    let results: Vec<RetrievalResult> = top_k_indices(&scores, top_k)
        .into_iter()
        .map(|i| {
            let chunk = &index.chunks()[i];
            RetrievalResult {
                text: chunk.text.clone(),
                source: chunk.source.clone(),
                score: scores[i],
            }
        })
        .collect();

    debug!(candidates = index.len(), top_k, result_count = results.len(), "similarity search");
    Ok(results)
}
