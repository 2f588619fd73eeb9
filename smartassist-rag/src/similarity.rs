//! Vector math for similarity scoring.
//!
//! All cosine scoring goes through [`cosine_similarity`] so the epsilon
//! handling lives in one place.

use std::cmp::Ordering;

/// Added to both the candidate norm and the full denominator so degenerate
/// (all-zero) vectors score `0.0` instead of dividing by zero.
pub const SIMILARITY_EPSILON: f32 = 1e-8;

/// Dot product of two equal-length vectors.
pub fn dot(a: &[f32], b: &[f32]) -> f32 {
    a.iter().zip(b).map(|(x, y)| x * y).sum()
}

/// Euclidean (L2) norm of a vector.
pub fn l2_norm(v: &[f32]) -> f32 {
    v.iter().map(|x| x * x).sum::<f32>().sqrt()
}

/// Scale `v` to unit length in place. Zero vectors are left unchanged.
pub fn normalize(v: &mut [f32]) {
    let norm = l2_norm(v);
    if norm > 0.0 {
        v.iter_mut().for_each(|x| *x /= norm);
    }
}

/// Cosine similarity with the candidate norm already computed.
///
/// `dot(q, v) / (‖q‖ · (‖v‖ + ε) + ε)`.
fn cosine_with_norms(
    query: &[f32],
    query_norm: f32,
    candidate: &[f32],
    candidate_norm: f32,
) -> f32 {
    let denominator = query_norm * (candidate_norm + SIMILARITY_EPSILON) + SIMILARITY_EPSILON;
    dot(query, candidate) / denominator
}

/// Cosine similarity between two equal-length vectors, in `[-1, 1]`.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    cosine_with_norms(a, l2_norm(a), b, l2_norm(b))
}

/// Score `query` against every row of a matrix. Returns one score per row,
/// in row order. The query norm is computed once.
pub fn cosine_scores<'a>(query: &[f32], rows: impl Iterator<Item = &'a [f32]>) -> Vec<f32> {
    let query_norm = l2_norm(query);
    rows.map(|row| cosine_with_norms(query, query_norm, row, l2_norm(row))).collect()
}

/// Indices of the `k` highest scores, best first.
///
/// Equal scores keep their original index order. NaN scores rank below
/// every other score.
pub fn top_k_indices(scores: &[f32], k: usize) -> Vec<usize> {
    let rank = |i: usize| if scores[i].is_nan() { f32::NEG_INFINITY } else { scores[i] };
    let mut order: Vec<usize> = (0..scores.len()).collect();
    order.sort_by(|&a, &b| {
        rank(b).partial_cmp(&rank(a)).unwrap_or(Ordering::Equal).then(a.cmp(&b))
    });
    order.truncate(k);
    order
}
