//! Chat backends: the upstream gateway and a local heuristic fallback
//!
//! The REPL talks to a `ChatBackend`; normally that is the HTTP gateway,
//! but when the link drops the local backend produces an acknowledgement
//! grounded in whatever context retrieval surfaced.

pub mod client;
pub mod types;

pub use client::GatewayClient;
pub use types::{ChatReply, DEFAULT_REPLY, FALLBACK_ACK};

use async_trait::async_trait;

use crate::errors::Result;
use crate::rag::context::GroundingContext;

/// Notice shown when the gateway is unreachable and the local backend
/// takes over
pub const INTERRUPTION_NOTICE: &str =
    "Neural link temporarily interrupted. Falling back to local heuristics.";

/// A backend that can answer a grounded query
#[async_trait]
pub trait ChatBackend: Send + Sync {
    async fn chat(
        &self,
        query: &str,
        grounding: &GroundingContext,
        agent: &str,
    ) -> Result<ChatReply>;
}

#[async_trait]
impl ChatBackend for GatewayClient {
    async fn chat(
        &self,
        query: &str,
        grounding: &GroundingContext,
        agent: &str,
    ) -> Result<ChatReply> {
        GatewayClient::chat(self, query, grounding, agent).await
    }
}

/// Offline reply generator used when the gateway cannot be reached
#[derive(Debug, Default)]
pub struct LocalBackend;

impl LocalBackend {
    /// Compose an acknowledgement reply from the prompt and any snippets
    pub fn reply(&self, query: &str, grounding: &GroundingContext) -> ChatReply {
        let trimmed: String = query.chars().take(140).collect();
        let grounded = if grounding.snippets.is_empty() {
            "No external context surfaced; responding from core heuristics.".to_string()
        } else {
            format!("Grounded context: {}", grounding.snippets.join(" | "))
        };

        ChatReply {
            reply: format!(
                "Acknowledged. Optimizing response for: \"{}\". {}",
                trimmed, grounded
            ),
        }
    }
}

#[async_trait]
impl ChatBackend for LocalBackend {
    async fn chat(
        &self,
        query: &str,
        grounding: &GroundingContext,
        _agent: &str,
    ) -> Result<ChatReply> {
        Ok(self.reply(query, grounding))
    }
}
