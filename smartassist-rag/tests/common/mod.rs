//! Deterministic fakes for the capability traits.

#![allow(dead_code)]

use std::sync::Arc;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use smartassist_rag::similarity::normalize;
use smartassist_rag::{
    AssistantConfig, AssistantPipeline, EmbeddingProvider, LanguageModel, RagError, Result,
    WebResult, WebSearchProvider,
};

/// Bag-of-words embedder: each lower-cased alphanumeric word is hashed into a
/// bucket, and the count vector is L2-normalized. Texts sharing words score
/// high; unrelated texts score near zero.
pub struct HashEmbedder {
    dimensions: usize,
}

impl HashEmbedder {
    pub fn new(dimensions: usize) -> Self {
        Self { dimensions }
    }
}

fn fnv1a(word: &str) -> u64 {
    word.bytes()
        .fold(0xcbf2_9ce4_8422_2325, |hash, b| (hash ^ u64::from(b)).wrapping_mul(0x0100_0000_01b3))
}

#[async_trait]
impl EmbeddingProvider for HashEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        if text.is_empty() {
            return Ok(Vec::new());
        }
        let mut v = vec![0.0f32; self.dimensions];
        for word in text.split(|c: char| !c.is_alphanumeric()).filter(|w| !w.is_empty()) {
            let bucket = (fnv1a(&word.to_lowercase()) % self.dimensions as u64) as usize;
            v[bucket] += 1.0;
        }
        normalize(&mut v);
        Ok(v)
    }

    fn name(&self) -> &str {
        "hash"
    }
}

/// Always fails.
pub struct FailingEmbedder;

#[async_trait]
impl EmbeddingProvider for FailingEmbedder {
    async fn embed(&self, _text: &str) -> Result<Vec<f32>> {
        Err(RagError::EmbeddingError {
            provider: "failing".into(),
            message: "model unavailable".into(),
        })
    }
}

/// Returns vectors whose length grows with each call.
pub struct RaggedEmbedder;

#[async_trait]
impl EmbeddingProvider for RaggedEmbedder {
    async fn embed(&self, _text: &str) -> Result<Vec<f32>> {
        Ok(vec![1.0])
    }

    async fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>> {
        Ok((0..texts.len()).map(|i| vec![1.0; i + 1]).collect())
    }
}

/// Never finishes within any reasonable timeout.
pub struct SlowEmbedder;

#[async_trait]
impl EmbeddingProvider for SlowEmbedder {
    async fn embed(&self, _text: &str) -> Result<Vec<f32>> {
        tokio::time::sleep(Duration::from_secs(3600)).await;
        Ok(vec![1.0])
    }
}

/// Records every call and returns a canned result list.
#[derive(Default)]
pub struct RecordingWebSearch {
    pub calls: Mutex<Vec<(String, usize)>>,
    pub results: Vec<WebResult>,
}

impl RecordingWebSearch {
    pub fn with_results(results: Vec<WebResult>) -> Self {
        Self { calls: Mutex::new(Vec::new()), results }
    }

    pub fn calls(&self) -> Vec<(String, usize)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl WebSearchProvider for RecordingWebSearch {
    async fn search(&self, query: &str, k: usize) -> Result<Vec<WebResult>> {
        self.calls.lock().unwrap().push((query.to_string(), k));
        Ok(self.results.clone())
    }

    fn name(&self) -> &str {
        "recording"
    }
}

/// Always fails.
pub struct FailingWebSearch;

#[async_trait]
impl WebSearchProvider for FailingWebSearch {
    async fn search(&self, _query: &str, _k: usize) -> Result<Vec<WebResult>> {
        Err(RagError::WebSearchError { provider: "failing".into(), message: "HTTP 503".into() })
    }
}

/// Answers with the user message it was given, and records the system prompt.
#[derive(Default)]
pub struct EchoLlm {
    pub system_prompts: Mutex<Vec<String>>,
}

#[async_trait]
impl LanguageModel for EchoLlm {
    async fn complete(&self, system_prompt: &str, user_message: &str) -> Result<String> {
        self.system_prompts.lock().unwrap().push(system_prompt.to_string());
        Ok(user_message.to_string())
    }
}

/// Always fails.
pub struct FailingLlm;

#[async_trait]
impl LanguageModel for FailingLlm {
    async fn complete(&self, _system_prompt: &str, _user_message: &str) -> Result<String> {
        Err(RagError::LlmError { provider: "failing".into(), message: "rate limited".into() })
    }
}

/// Never answers within any reasonable timeout.
pub struct SlowLlm;

#[async_trait]
impl LanguageModel for SlowLlm {
    async fn complete(&self, _system_prompt: &str, _user_message: &str) -> Result<String> {
        tokio::time::sleep(Duration::from_secs(3600)).await;
        Ok("too late".into())
    }
}

/// A pipeline with default config, a 256-dimension hash embedder and the
/// given web search and language model.
pub fn pipeline(
    web_search: Arc<dyn WebSearchProvider>,
    language_model: Arc<dyn LanguageModel>,
) -> AssistantPipeline {
    AssistantPipeline::builder()
        .config(AssistantConfig::default())
        .embedding_provider(Arc::new(HashEmbedder::new(256)))
        .web_search(web_search)
        .language_model(language_model)
        .build()
        .unwrap()
}
