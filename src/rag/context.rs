//! Grounding context assembly for the outbound gateway request
//!
//! Flattens the highlighted sentences from retrieval matches into the
//! snippet list the gateway consumes, and builds the grounded system
//! prompt around them.

use serde::{Deserialize, Serialize};

use crate::rag::engine::RagMatch;

/// Base system prompt sent with every chat request
pub const SYSTEM_PROMPT: &str = "You are JARVIS, an advanced AI assistant with \
neural-link capabilities. You have access to retrieval-augmented context when \
available. Be concise, helpful, and precise.";

/// Grounding context assembled from retrieval matches
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroundingContext {
    /// Highlighted sentences, flattened from all matches in match order
    pub snippets: Vec<String>,
    /// Ids of the documents that contributed snippets
    pub document_ids: Vec<String>,
}

impl GroundingContext {
    /// Flatten the highlights of ranked matches into grounding snippets
    pub fn from_matches(matches: &[RagMatch]) -> Self {
        let snippets = matches
            .iter()
            .flat_map(|m| m.highlights.iter().cloned())
            .collect();

        let document_ids = matches
            .iter()
            .filter(|m| !m.highlights.is_empty())
            .map(|m| m.document.id.clone())
            .collect();

        GroundingContext {
            snippets,
            document_ids,
        }
    }

    /// Whether any snippet survived retrieval
    pub fn is_empty(&self) -> bool {
        self.snippets.is_empty()
    }

    /// Build the system prompt, appending grounded context when present
    pub fn system_prompt(&self) -> String {
        if self.snippets.is_empty() {
            return SYSTEM_PROMPT.to_string();
        }

        format!(
            "{}\n\nGrounded context:\n{}",
            SYSTEM_PROMPT,
            self.snippets.join("\n")
        )
    }
}
