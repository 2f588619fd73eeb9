//! Document chunking.
//!
//! Chunks are fixed-size character windows with a configurable overlap. The
//! chunker counts Unicode scalar values, not tokens or sentences, so a chunk
//! may end mid-word.

use crate::document::{Chunk, Document};
use crate::error::{RagError, Result};

/// Default chunk size in characters.
pub const DEFAULT_CHUNK_SIZE: usize = 800;

/// Default overlap between consecutive chunks in characters.
pub const DEFAULT_CHUNK_OVERLAP: usize = 200;

/// A strategy for splitting documents into chunks.
pub trait Chunker: Send + Sync {
    /// Split a document into chunks tagged with the document's source.
    ///
    /// Returns an empty `Vec` if the document has empty text.
    fn chunk(&self, document: &Document) -> Vec<Chunk>;
}

/// Check that `chunk_size > 0` and `overlap < chunk_size`.
pub fn validate_chunk_params(chunk_size: usize, overlap: usize) -> Result<()> {
    if chunk_size == 0 {
        return Err(RagError::InvalidArgument("chunk_size must be greater than zero".to_string()));
    }
    if overlap >= chunk_size {
        return Err(RagError::InvalidArgument(format!(
            "chunk_overlap ({overlap}) must be less than chunk_size ({chunk_size})"
        )));
    }
    Ok(())
}

/// Split `text` into windows of `chunk_size` characters, each starting
/// `chunk_size - overlap` characters after the previous one.
///
/// The last window is clipped to the end of the text and may be shorter.
///
/// # Errors
///
/// Returns [`RagError::InvalidArgument`] if `chunk_size == 0` or
/// `overlap >= chunk_size`.
///
/// # Example
///
/// ```rust
/// use smartassist_rag::chunk_text;
///
/// let chunks = chunk_text("abcdefghij", 4, 1).unwrap();
/// assert_eq!(chunks, vec!["abcd", "defg", "ghij", "j"]);
/// ```
pub fn chunk_text(text: &str, chunk_size: usize, overlap: usize) -> Result<Vec<String>> {
    validate_chunk_params(chunk_size, overlap)?;
    if text.is_empty() {
        return Ok(Vec::new());
    }

    // Byte offset of every char boundary, including the end of the text.
    let boundaries: Vec<usize> =
        text.char_indices().map(|(i, _)| i).chain(std::iter::once(text.len())).collect();
    let char_count = boundaries.len() - 1;
    let step = chunk_size - overlap;

    let mut chunks = Vec::with_capacity(char_count / step + 1);
    let mut start = 0;
    while start < char_count {
        let end = (start + chunk_size).min(char_count);
        chunks.push(text[boundaries[start]..boundaries[end]].to_string());
        start += step;
    }

    Ok(chunks)
}

/// Splits text into fixed-size chunks by character count with configurable overlap.
///
/// # Example
///
/// ```rust
/// use smartassist_rag::{Chunker, Document, FixedSizeChunker};
///
/// let chunker = FixedSizeChunker::new(800, 200).unwrap();
/// let chunks = chunker.chunk(&Document::new("faq.txt", "Reset links expire in 24 hours."));
/// assert_eq!(chunks.len(), 1);
/// assert_eq!(chunks[0].source, "faq.txt");
/// ```
#[derive(Debug, Clone)]
pub struct FixedSizeChunker {
    chunk_size: usize,
    chunk_overlap: usize,
}

impl FixedSizeChunker {
    /// Create a new `FixedSizeChunker`.
    ///
    /// # Arguments
    ///
    /// * `chunk_size`: maximum number of characters per chunk
    /// * `chunk_overlap`: number of overlapping characters between consecutive chunks
    ///
    /// # Errors
    ///
    /// Returns [`RagError::InvalidArgument`] if the parameters would not make
    /// progress through the text.
    pub fn new(chunk_size: usize, chunk_overlap: usize) -> Result<Self> {
        validate_chunk_params(chunk_size, chunk_overlap)?;
        Ok(Self { chunk_size, chunk_overlap })
    }

    /// Maximum characters per chunk.
    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    /// Characters shared by consecutive chunks.
    pub fn chunk_overlap(&self) -> usize {
        self.chunk_overlap
    }

    fn split(&self, text: &str) -> Vec<String> {
        // Parameters were validated in `new`.
        chunk_text(text, self.chunk_size, self.chunk_overlap).unwrap_or_default()
    }
}

impl Default for FixedSizeChunker {
    fn default() -> Self {
        Self { chunk_size: DEFAULT_CHUNK_SIZE, chunk_overlap: DEFAULT_CHUNK_OVERLAP }
    }
}

impl Chunker for FixedSizeChunker {
    fn chunk(&self, document: &Document) -> Vec<Chunk> {
        self.split(&document.text)
            .into_iter()
            .map(|text| Chunk { text, source: document.source.clone() })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_text_yields_no_chunks() {
        assert!(chunk_text("", 10, 2).unwrap().is_empty());
    }

    #[test]
    fn defaults_produce_expected_windows() {
        let text: String = (0..2000).map(|i| char::from(b'a' + (i % 26) as u8)).collect();
        let chunks = chunk_text(&text, DEFAULT_CHUNK_SIZE, DEFAULT_CHUNK_OVERLAP).unwrap();

        // Windows start at 0, 600, 1200, 1800.
        assert_eq!(chunks.len(), 4);
        assert_eq!(chunks[0], text[0..800]);
        assert_eq!(chunks[1], text[600..1400]);
        assert_eq!(chunks[2], text[1200..2000]);
        assert_eq!(chunks[3], text[1800..2000]);
    }

    #[test]
    fn rejects_overlap_not_smaller_than_size() {
        assert!(matches!(chunk_text("abc", 4, 4), Err(RagError::InvalidArgument(_))));
        assert!(matches!(chunk_text("abc", 4, 9), Err(RagError::InvalidArgument(_))));
        assert!(FixedSizeChunker::new(100, 100).is_err());
    }

    #[test]
    fn rejects_zero_chunk_size() {
        assert!(matches!(chunk_text("abc", 0, 0), Err(RagError::InvalidArgument(_))));
    }

    #[test]
    fn splits_on_char_boundaries() {
        let chunks = chunk_text("héllo wörld", 4, 1).unwrap();
        assert_eq!(chunks[0], "héll");
        assert_eq!(chunks[1], "lo w");
        assert!(chunks.iter().all(|c| c.chars().count() <= 4));
    }

    #[test]
    fn chunks_carry_document_source() {
        let chunker = FixedSizeChunker::new(5, 0).unwrap();
        let document = Document::new("billing.txt", "0123456789ab");
        let chunks = chunker.chunk(&document);

        assert_eq!(chunks.len(), 3);
        assert!(chunks.iter().all(|c| c.source == "billing.txt"));
        assert_eq!(chunks[2].text, "ab");
    }
}
