//! # Support Desk Example
//!
//! Builds a knowledge base from a small in-memory corpus and answers a few
//! support questions, showing when the router reaches for web search.
//!
//! Uses a deterministic `WordHashEmbedder`, a canned status-page search and
//! an echoing language model so it runs with **zero API keys**.
//!
//! Run: `RUST_LOG=smartassist_rag=debug cargo run -p smartassist-rag --example support_desk`

use std::sync::Arc;

use async_trait::async_trait;
use smartassist_rag::similarity::normalize;
use smartassist_rag::{
    AssistantConfig, AssistantPipeline, Citation, Document, EmbeddingProvider,
    InMemoryDocumentSource, KnowledgeBase, LanguageModel, ResponseMode, WebResult,
    WebSearchProvider,
};
use tracing_subscriber::EnvFilter;

// ---------------------------------------------------------------------------
// Offline capabilities
// ---------------------------------------------------------------------------

/// Hashes each lower-cased word into one of `dimensions` buckets.
struct WordHashEmbedder {
    dimensions: usize,
}

#[async_trait]
impl EmbeddingProvider for WordHashEmbedder {
    async fn embed(&self, text: &str) -> smartassist_rag::Result<Vec<f32>> {
        let mut v = vec![0.0f32; self.dimensions];
        for word in text.split(|c: char| !c.is_alphanumeric()).filter(|w| !w.is_empty()) {
            let hash = word
                .to_lowercase()
                .bytes()
                .fold(0u64, |acc, b| acc.wrapping_mul(31).wrapping_add(u64::from(b)));
            v[(hash % self.dimensions as u64) as usize] += 1.0;
        }
        normalize(&mut v);
        Ok(v)
    }

    fn name(&self) -> &str {
        "word-hash"
    }
}

/// Pretends to be a status page search.
struct StatusPageSearch;

#[async_trait]
impl WebSearchProvider for StatusPageSearch {
    async fn search(&self, _query: &str, k: usize) -> smartassist_rag::Result<Vec<WebResult>> {
        let results = vec![
            WebResult::new(
                "Acme Status",
                "All systems operational. Scheduled maintenance on Saturday 02:00 UTC.",
                "https://status.acme.example",
            ),
            WebResult::new(
                "Acme incident history",
                "No incidents reported in the last 7 days.",
                "https://status.acme.example/history",
            ),
        ];
        Ok(results.into_iter().take(k).collect())
    }
}

/// Returns the first line of context it was given, standing in for a model.
struct EchoModel;

#[async_trait]
impl LanguageModel for EchoModel {
    async fn complete(&self, _system: &str, user_message: &str) -> smartassist_rag::Result<String> {
        let evidence = user_message
            .lines()
            .find(|line| line.starts_with("[Doc") || line.starts_with("[Web"))
            .unwrap_or("I could not find this in the available context.");
        Ok(format!("Based on the context: {evidence}"))
    }
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // -- 1. Configure the pipeline ----------------------------------------
    let config = AssistantConfig::builder().chunk_size(200).chunk_overlap(50).top_k(3).build()?;

    let pipeline = AssistantPipeline::builder()
        .config(config)
        .embedding_provider(Arc::new(WordHashEmbedder { dimensions: 128 }))
        .web_search(Arc::new(StatusPageSearch))
        .language_model(Arc::new(EchoModel))
        .build()?;

    // -- 2. Build the knowledge base --------------------------------------
    let corpus = vec![
        Document::new(
            "accounts.txt",
            "The password reset link expires in 24 hours. Request a new link from the \
             sign-in page if it has expired.",
        ),
        Document::new(
            "billing.txt",
            "Invoices are emailed on the first day of each month. You can download past \
             invoices from Settings > Billing.",
        ),
    ];
    let knowledge_base = KnowledgeBase::new();
    let index = knowledge_base.rebuild(&pipeline, &InMemoryDocumentSource::new(corpus)).await?;
    println!("Knowledge base built: {} chunk(s)\n", index.len());

    // -- 3. Ask questions -------------------------------------------------
    let questions = [
        ("How long is the password reset link valid?", ResponseMode::Concise),
        ("When are invoices emailed?", ResponseMode::Detailed),
        ("Is the service down right now?", ResponseMode::Concise),
    ];

    for (question, mode) in questions {
        let bundle = pipeline.answer_from(&knowledge_base, question, mode).await?;
        println!("Q ({mode}): {question}");
        println!("A: {}", bundle.answer);
        println!("   web search used: {}", bundle.used_web);
        for citation in bundle.citations() {
            match citation {
                Citation::Internal { source, score } => {
                    println!("   - doc {source} (score {score:.2})")
                }
                Citation::Web { title, url } => println!("   - web {title} <{url}>"),
            }
        }
        println!();
    }

    Ok(())
}
