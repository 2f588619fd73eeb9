//! Configuration for the assistant pipeline.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::chunking::{DEFAULT_CHUNK_OVERLAP, DEFAULT_CHUNK_SIZE, validate_chunk_params};
use crate::error::{RagError, Result};
use crate::router::RouterConfig;

/// Persona named in the system prompt.
pub const DEFAULT_ASSISTANT_NAME: &str = "SmartAssist";

/// Internal chunks retrieved per query.
pub const DEFAULT_TOP_K: usize = 5;

/// Web results requested when the router asks for web search.
pub const DEFAULT_WEB_RESULT_COUNT: usize = 3;

/// Configuration parameters for the assistant pipeline.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AssistantConfig {
    /// Maximum chunk size in characters.
    pub chunk_size: usize,
    /// Number of overlapping characters between consecutive chunks.
    pub chunk_overlap: usize,
    /// Number of internal chunks to retrieve per query.
    pub top_k: usize,
    /// Number of web results to request when web search is used.
    pub web_result_count: usize,
    /// Web-search routing heuristics.
    pub router: RouterConfig,
    /// Persona named in the system prompt.
    pub assistant_name: String,
    /// Upper bound on each embedding, web search and LLM call. `None` leaves
    /// calls unbounded.
    pub capability_timeout: Option<Duration>,
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            chunk_overlap: DEFAULT_CHUNK_OVERLAP,
            top_k: DEFAULT_TOP_K,
            web_result_count: DEFAULT_WEB_RESULT_COUNT,
            router: RouterConfig::default(),
            assistant_name: DEFAULT_ASSISTANT_NAME.to_string(),
            capability_timeout: None,
        }
    }
}

impl AssistantConfig {
    /// Create a new builder for constructing an [`AssistantConfig`].
    pub fn builder() -> AssistantConfigBuilder {
        AssistantConfigBuilder::default()
    }

    /// Parse a JSON configuration document and validate it.
    ///
    /// Missing fields take their default values.
    ///
    /// # Errors
    ///
    /// Returns [`RagError::ConfigError`] if the JSON is malformed or the
    /// values are inconsistent.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| RagError::ConfigError(format!("invalid config JSON: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Check that the parameters are consistent.
    ///
    /// # Errors
    ///
    /// Returns [`RagError::ConfigError`] if:
    /// - `chunk_size == 0` or `chunk_overlap >= chunk_size`
    /// - `top_k == 0` or `web_result_count == 0`
    /// - a freshness keyword is blank or the score threshold is not finite
    /// - `capability_timeout` is zero
    pub fn validate(&self) -> Result<()> {
        validate_chunk_params(self.chunk_size, self.chunk_overlap).map_err(|e| match e {
            RagError::InvalidArgument(message) => RagError::ConfigError(message),
            other => other,
        })?;
        if self.top_k == 0 {
            return Err(RagError::ConfigError("top_k must be greater than zero".to_string()));
        }
        if self.web_result_count == 0 {
            return Err(RagError::ConfigError(
                "web_result_count must be greater than zero".to_string(),
            ));
        }
        if self.router.freshness_keywords.iter().any(|k| k.trim().is_empty()) {
            return Err(RagError::ConfigError("freshness keywords must not be blank".to_string()));
        }
        if !self.router.min_mean_score.is_finite() {
            return Err(RagError::ConfigError("min_mean_score must be finite".to_string()));
        }
        if self.capability_timeout.is_some_and(|t| t.is_zero()) {
            return Err(RagError::ConfigError(
                "capability_timeout must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

/// Builder for constructing a validated [`AssistantConfig`].
#[derive(Debug, Clone, Default)]
pub struct AssistantConfigBuilder {
    config: AssistantConfig,
}

impl AssistantConfigBuilder {
    /// Set the maximum chunk size in characters.
    pub fn chunk_size(mut self, size: usize) -> Self {
        self.config.chunk_size = size;
        self
    }

    /// Set the overlap between consecutive chunks in characters.
    pub fn chunk_overlap(mut self, overlap: usize) -> Self {
        self.config.chunk_overlap = overlap;
        self
    }

    /// Set the number of internal chunks retrieved per query.
    pub fn top_k(mut self, k: usize) -> Self {
        self.config.top_k = k;
        self
    }

    /// Set the number of web results requested per web search.
    pub fn web_result_count(mut self, count: usize) -> Self {
        self.config.web_result_count = count;
        self
    }

    /// Replace the freshness keywords that force web search.
    pub fn freshness_keywords<I, S>(mut self, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.config.router.freshness_keywords = keywords.into_iter().map(Into::into).collect();
        self
    }

    /// Set the mean score below which web search is used.
    pub fn min_mean_score(mut self, threshold: f32) -> Self {
        self.config.router.min_mean_score = threshold;
        self
    }

    /// Set the persona named in the system prompt.
    pub fn assistant_name(mut self, name: impl Into<String>) -> Self {
        self.config.assistant_name = name.into();
        self
    }

    /// Bound every external capability call by `timeout`.
    pub fn capability_timeout(mut self, timeout: Duration) -> Self {
        self.config.capability_timeout = Some(timeout);
        self
    }

    /// Build the [`AssistantConfig`], validating that parameters are consistent.
    ///
    /// # Errors
    ///
    /// See [`AssistantConfig::validate`].
    pub fn build(self) -> Result<AssistantConfig> {
        self.config.validate()?;
        Ok(self.config)
    }
}
