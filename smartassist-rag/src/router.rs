//! Decides whether internal retrieval is enough or web search is needed.

use serde::{Deserialize, Serialize};

use crate::document::RetrievalResult;

/// Query words that signal a need for live information.
pub const DEFAULT_FRESHNESS_KEYWORDS: [&str; 9] = [
    "outage",
    "down",
    "status",
    "today",
    "current",
    "latest",
    "incident",
    "issue",
    "maintenance",
];

/// Mean retrieval score below which internal results are considered unhelpful.
pub const DEFAULT_MIN_MEAN_SCORE: f32 = 0.25;

/// Tunable inputs of the [`RetrievalRouter`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RouterConfig {
    /// Substrings that force web search when found in the lower-cased query.
    pub freshness_keywords: Vec<String>,
    /// Web search is used when the mean score is strictly below this value.
    pub min_mean_score: f32,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            freshness_keywords: DEFAULT_FRESHNESS_KEYWORDS.iter().map(|k| k.to_string()).collect(),
            min_mean_score: DEFAULT_MIN_MEAN_SCORE,
        }
    }
}

/// Why the router decided what it did.
#[derive(Debug, Clone, PartialEq)]
pub enum RouteDecision {
    /// The query mentions a freshness keyword.
    FreshnessKeyword(String),
    /// Retrieval returned nothing.
    NoInternalResults,
    /// Retrieval results are on average too weak.
    LowRelevance {
        /// Mean similarity of the retrieved chunks.
        mean_score: f32,
    },
    /// Internal documentation is sufficient.
    InternalSufficient {
        /// Mean similarity of the retrieved chunks.
        mean_score: f32,
    },
}

impl RouteDecision {
    /// Whether web search should be consulted.
    pub fn needs_web(&self) -> bool {
        !matches!(self, Self::InternalSufficient { .. })
    }
}

/// Heuristic router between internal documentation and web search.
///
/// Rules, first match wins:
/// 1. a freshness keyword occurs in the lower-cased query;
/// 2. there are no retrieval results;
/// 3. the mean score is below [`RouterConfig::min_mean_score`].
///
/// Otherwise internal results are used alone.
#[derive(Debug, Clone)]
pub struct RetrievalRouter {
    keywords: Vec<String>,
    min_mean_score: f32,
}

impl RetrievalRouter {
    /// Create a router from its configuration. Keywords are lower-cased.
    pub fn new(config: &RouterConfig) -> Self {
        Self {
            keywords: config.freshness_keywords.iter().map(|k| k.to_lowercase()).collect(),
            min_mean_score: config.min_mean_score,
        }
    }

    /// Classify a query and its retrieval results.
    pub fn decide(&self, query: &str, rag_results: &[RetrievalResult]) -> RouteDecision {
        let query = query.to_lowercase();
        if let Some(keyword) = self.keywords.iter().find(|k| query.contains(k.as_str())) {
            return RouteDecision::FreshnessKeyword(keyword.clone());
        }

        if rag_results.is_empty() {
            return RouteDecision::NoInternalResults;
        }

        let sum: f64 = rag_results.iter().map(|r| f64::from(r.score)).sum();
        let mean = sum / rag_results.len() as f64;
        let mean_score = mean as f32;
        if mean < f64::from(self.min_mean_score) {
            RouteDecision::LowRelevance { mean_score }
        } else {
            RouteDecision::InternalSufficient { mean_score }
        }
    }

    /// Whether web search should supplement `rag_results` for `query`.
    pub fn needs_web_search(&self, query: &str, rag_results: &[RetrievalResult]) -> bool {
        self.decide(query, rag_results).needs_web()
    }
}

impl Default for RetrievalRouter {
    fn default() -> Self {
        Self::new(&RouterConfig::default())
    }
}

/// [`RetrievalRouter::needs_web_search`] with the default keywords and threshold.
pub fn needs_web_search(query: &str, rag_results: &[RetrievalResult]) -> bool {
    RetrievalRouter::default().needs_web_search(query, rag_results)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hit(score: f32) -> RetrievalResult {
        RetrievalResult { text: "chunk".into(), source: "faq.txt".into(), score }
    }

    #[test]
    fn keyword_wins_over_strong_results() {
        let router = RetrievalRouter::default();
        let decision = router.decide("Is there an OUTAGE right now?", &[hit(0.95)]);
        assert_eq!(decision, RouteDecision::FreshnessKeyword("outage".into()));
        assert!(decision.needs_web());
    }

    #[test]
    fn empty_results_need_web() {
        let router = RetrievalRouter::default();
        assert_eq!(router.decide("how do refunds work", &[]), RouteDecision::NoInternalResults);
    }

    #[test]
    fn threshold_is_exclusive() {
        let router = RetrievalRouter::default();
        assert!(router.needs_web_search("refund policy", &[hit(0.24999)]));
        assert!(!router.needs_web_search("refund policy", &[hit(0.25)]));
        assert!(!router.needs_web_search("refund policy", &[hit(0.2), hit(0.3)]));
    }

    #[test]
    fn custom_keywords_are_case_insensitive() {
        let config =
            RouterConfig { freshness_keywords: vec!["Pricing".into()], min_mean_score: 0.0 };
        let router = RetrievalRouter::new(&config);
        assert!(router.needs_web_search("what is the pricing now", &[hit(0.9)]));
        assert!(!router.needs_web_search("is the service down", &[hit(0.9)]));
    }
}
