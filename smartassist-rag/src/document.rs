//! Data types for documents, chunks, retrieval hits and answers.

use serde::{Deserialize, Serialize};

/// Maximum number of characters kept from a web result snippet.
pub const MAX_SNIPPET_CHARS: usize = 400;

/// Title used for web results that arrive without one.
pub const UNTITLED_RESULT: &str = "Untitled result";

/// A loaded text resource.
///
/// `id` and `source` both hold the originating file name for documents read
/// from disk.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Document {
    /// Unique identifier for the document.
    pub id: String,
    /// The full text content of the document.
    pub text: String,
    /// Where the document came from, used for citation.
    pub source: String,
}

impl Document {
    /// Create a document whose `id` and `source` are the same name.
    pub fn new(name: impl Into<String>, text: impl Into<String>) -> Self {
        let name = name.into();
        Self { id: name.clone(), text: text.into(), source: name }
    }
}

/// A contiguous character span of a [`Document`], the unit of retrieval.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Chunk {
    /// The text content of the chunk.
    pub text: String,
    /// The `source` of the parent [`Document`].
    pub source: String,
}

/// A [`Chunk`] paired with its cosine similarity to the current query.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RetrievalResult {
    /// The chunk text.
    pub text: String,
    /// The chunk's source document.
    pub source: String,
    /// Cosine similarity in `[-1, 1]` (higher is more relevant).
    pub score: f32,
}

/// A normalized external search hit.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct WebResult {
    /// Page title.
    pub title: String,
    /// Content excerpt, at most [`MAX_SNIPPET_CHARS`] characters.
    pub snippet: String,
    /// Page URL.
    pub url: String,
}

impl WebResult {
    /// Create a normalized web result.
    ///
    /// An empty title becomes [`UNTITLED_RESULT`] and the snippet is cut to
    /// [`MAX_SNIPPET_CHARS`] characters.
    pub fn new(
        title: impl Into<String>,
        snippet: impl Into<String>,
        url: impl Into<String>,
    ) -> Self {
        Self { title: title.into(), snippet: snippet.into(), url: url.into() }.normalized()
    }

    /// Apply title defaulting and snippet truncation to an existing value.
    pub fn normalized(mut self) -> Self {
        if self.title.trim().is_empty() {
            self.title = UNTITLED_RESULT.to_string();
        }
        if let Some((cut, _)) = self.snippet.char_indices().nth(MAX_SNIPPET_CHARS) {
            self.snippet.truncate(cut);
        }
        self
    }
}

/// One piece of evidence surfaced to the user alongside an answer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Citation {
    /// A chunk from the internal documentation.
    Internal {
        /// Source document name.
        source: String,
        /// Similarity score of the chunk.
        score: f32,
    },
    /// A web search hit.
    Web {
        /// Page title.
        title: String,
        /// Page URL.
        url: String,
    },
}

/// The terminal output of one query cycle.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AnswerBundle {
    /// The model's answer, or a description of why no answer could be produced.
    pub answer: String,
    /// Internal chunks that were retrieved for the query.
    pub rag_results: Vec<RetrievalResult>,
    /// Web results that were fetched for the query (empty when not used).
    pub web_results: Vec<WebResult>,
    /// Whether the router asked for web search.
    pub used_web: bool,
}

impl AnswerBundle {
    /// List the evidence behind this answer, internal documents first.
    pub fn citations(&self) -> Vec<Citation> {
        let internal = self
            .rag_results
            .iter()
            .map(|r| Citation::Internal { source: r.source.clone(), score: r.score });
        let web = self
            .web_results
            .iter()
            .map(|w| Citation::Web { title: w.title.clone(), url: w.url.clone() });
        internal.chain(web).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn web_result_snippet_is_truncated_by_characters() {
        let snippet = "é".repeat(MAX_SNIPPET_CHARS + 25);
        let result = WebResult::new("Status", snippet, "https://status.example.com");
        assert_eq!(result.snippet.chars().count(), MAX_SNIPPET_CHARS);
    }

    #[test]
    fn web_result_without_title_gets_placeholder() {
        let result = WebResult::new("  ", "short", "https://example.com");
        assert_eq!(result.title, UNTITLED_RESULT);
        assert_eq!(result.snippet, "short");
    }

    #[test]
    fn citations_list_internal_before_web() {
        let bundle = AnswerBundle {
            answer: "ok".into(),
            rag_results: vec![RetrievalResult {
                text: "t".into(),
                source: "faq.txt".into(),
                score: 0.8,
            }],
            web_results: vec![WebResult::new("Status page", "all good", "https://s.example")],
            used_web: true,
        };

        let citations = bundle.citations();
        assert_eq!(citations.len(), 2);
        assert_eq!(citations[0], Citation::Internal { source: "faq.txt".into(), score: 0.8 });
        assert_eq!(
            citations[1],
            Citation::Web { title: "Status page".into(), url: "https://s.example".into() }
        );
    }
}
