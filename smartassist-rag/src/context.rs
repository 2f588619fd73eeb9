//! Prompt assembly from retrieved evidence.
//!
//! Turns internal hits and web hits into a single context block and builds
//! the mode-dependent system prompt. Both are plain strings; nothing here
//! talks to the model.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::document::{RetrievalResult, WebResult};

/// How long and how structured the answer should be.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseMode {
    /// A few sentences, at most three bullets.
    #[default]
    Concise,
    /// Step-by-step with per-item source attribution.
    Detailed,
}

impl ResponseMode {
    /// Parse a mode name case-insensitively. Anything other than `"concise"`
    /// is treated as [`ResponseMode::Detailed`].
    pub fn parse(mode: &str) -> Self {
        if mode.trim().eq_ignore_ascii_case("concise") { Self::Concise } else { Self::Detailed }
    }

    /// The lower-case mode name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Concise => "concise",
            Self::Detailed => "detailed",
        }
    }
}

impl FromStr for ResponseMode {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

impl fmt::Display for ResponseMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The two strings handed to the language model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssembledPrompt {
    /// Evidence section embedded in the user message.
    pub context_block: String,
    /// System instruction.
    pub system_prompt: String,
}

impl AssembledPrompt {
    /// The user message: the question, the evidence, and the grounding
    /// instruction.
    pub fn user_message(&self, query: &str) -> String {
        format!(
            "User question:\n{query}\n\n\
             Here is the available context from internal docs and web (if any):\n{}\n\n\
             Using ONLY this information, answer the question. \
             If the context does not contain enough information, say that explicitly.",
            self.context_block
        )
    }
}

/// Builds [`AssembledPrompt`]s for a named assistant persona.
#[derive(Debug, Clone)]
pub struct ContextAssembler {
    assistant_name: String,
}

impl Default for ContextAssembler {
    fn default() -> Self {
        Self::new(crate::config::DEFAULT_ASSISTANT_NAME)
    }
}

impl ContextAssembler {
    /// Create an assembler whose system prompt introduces `assistant_name`.
    pub fn new(assistant_name: impl Into<String>) -> Self {
        Self { assistant_name: assistant_name.into() }
    }

    /// Build the context block and system prompt for one query.
    pub fn assemble(
        &self,
        rag_results: &[RetrievalResult],
        web_results: &[WebResult],
        mode: ResponseMode,
    ) -> AssembledPrompt {
        AssembledPrompt {
            context_block: build_context_block(rag_results, web_results),
            system_prompt: self.system_prompt(mode),
        }
    }

    /// The system instruction for `mode`.
    pub fn system_prompt(&self, mode: ResponseMode) -> String {
        let mut prompt = format!(
            "You are {}, an AI customer support agent for a SaaS product.\n\
             You must always be accurate and honest. Answer only from the context you are given; \
             if the context is insufficient, say so clearly.\n\
             Internal documentation is the main source of truth. \
             Use web results only for fresh or external information.\n\n",
            self.assistant_name
        );
        prompt.push_str(match mode {
            ResponseMode::Concise => {
                "Respond in 2-4 short sentences. Be crisp, direct, and easy to skim.\n\
                 If steps are needed, use at most 3 short bullet points.\n"
            }
            ResponseMode::Detailed => {
                "Provide a detailed, step-by-step answer.\n\
                 Use numbered or bulleted lists where helpful.\n\
                 For each item, mention which source you used, \
                 e.g. 'According to Doc 1' or 'Based on Web 2'.\n"
            }
        });
        prompt
    }
}

/// Render internal hits then web hits as numbered lines.
///
/// An empty input omits its section; sections are separated by a blank line.
/// Trailing whitespace of the last entry is dropped.
pub fn build_context_block(rag_results: &[RetrievalResult], web_results: &[WebResult]) -> String {
    let mut sections = Vec::with_capacity(2);

    if !rag_results.is_empty() {
        let mut lines = vec!["Internal documentation:".to_string()];
        lines.extend(
            rag_results
                .iter()
                .enumerate()
                .map(|(i, r)| format!("[Doc {} | {}] {}", i + 1, r.source, r.text)),
        );
        sections.push(lines.join("\n"));
    }

    if !web_results.is_empty() {
        let mut lines = vec!["Web search results:".to_string()];
        lines.extend(web_results.iter().enumerate().map(|(i, w)| {
            format!("[Web {} | {}] {} (URL: {})", i + 1, w.title, w.snippet, w.url)
        }));
        sections.push(lines.join("\n"));
    }

    sections.join("\n\n").trim_end().to_string()
}
