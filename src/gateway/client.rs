//! HTTP client for the chat-completion gateway
//!
//! Sends the grounded query to the gateway's chat route. On a non-success
//! status the prompt is re-routed through the gateway's message queue
//! before giving up, mirroring the gateway's own fallback path.

use reqwest::Client;
use serde_json::Value;
use std::time::Duration;

use crate::config::GatewayConfig;
use crate::errors::{NeuroError, Result};
use crate::gateway::types::{
    ChatCompletionRequest, ChatReply, FallbackMessageRequest, WireMessage,
};
use crate::rag::context::GroundingContext;

/// Sender name used on the fallback message route
const SENDER: &str = "neurolink-client";

/// HTTP client for the chat gateway
pub struct GatewayClient {
    client: Client,
    base_url: String,
    bearer_token: Option<String>,
    timeout: Duration,
}

impl GatewayClient {
    /// Create a client from gateway configuration
    pub fn new(config: &GatewayConfig) -> Result<Self> {
        let timeout = Duration::from_secs(config.timeout_secs);
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(NeuroError::HttpError)?;

        Ok(Self {
            client,
            base_url: config.url.trim_end_matches('/').to_string(),
            bearer_token: config.bearer_token.clone(),
            timeout,
        })
    }

    /// Send a grounded query and return the gateway's reply
    ///
    /// Retrieval must already have run for this exact query; the caller
    /// passes the grounding context produced from it, so a stale query's
    /// snippets can never attach to a newer request.
    pub async fn chat(
        &self,
        query: &str,
        grounding: &GroundingContext,
        agent: &str,
    ) -> Result<ChatReply> {
        let request = ChatCompletionRequest {
            messages: vec![
                WireMessage::system(grounding.system_prompt()),
                WireMessage::user(query),
            ],
            max_tokens: 500,
            temperature: 0.7,
            model: agent.to_string(),
        };

        let url = format!("{}/api/llm/chat", self.base_url);
        let mut builder = self.client.post(&url).json(&request);
        if let Some(token) = &self.bearer_token {
            builder = builder.header("Authorization", format!("Bearer {}", token));
        }

        let response = builder.send().await.map_err(|e| {
            if e.is_timeout() {
                NeuroError::GatewayTimeout {
                    duration_ms: self.timeout.as_millis() as u64,
                }
            } else {
                NeuroError::HttpError(e)
            }
        })?;

        if !response.status().is_success() {
            return self.chat_fallback(query, agent).await;
        }

        let payload: Value = response.json().await?;
        Ok(ChatReply::from_payload(&payload))
    }

    /// Route the prompt through the gateway's message queue
    async fn chat_fallback(&self, query: &str, agent: &str) -> Result<ChatReply> {
        let request = FallbackMessageRequest {
            sender: SENDER.to_string(),
            recipient: agent.to_string(),
            content: query.to_string(),
            message_type: "text".to_string(),
        };

        let url = format!("{}/api/messages", self.base_url);
        let mut builder = self.client.post(&url).json(&request);
        if let Some(token) = &self.bearer_token {
            builder = builder.header("Authorization", format!("Bearer {}", token));
        }

        let response = builder.send().await.map_err(|e| {
            if e.is_timeout() {
                NeuroError::GatewayTimeout {
                    duration_ms: self.timeout.as_millis() as u64,
                }
            } else {
                NeuroError::HttpError(e)
            }
        })?;

        if !response.status().is_success() {
            return Err(NeuroError::GatewayStatus {
                status: response.status().as_u16(),
                route: "/api/messages".to_string(),
            });
        }

        let payload: Value = response.json().await?;
        Ok(ChatReply::from_fallback_payload(&payload))
    }

    /// Check whether the gateway is reachable
    pub async fn is_available(&self) -> bool {
        let url = format!("{}/api/llm/chat", self.base_url);
        self.client
            .head(&url)
            .timeout(Duration::from_secs(2))
            .send()
            .await
            .is_ok()
    }

    /// The gateway base URL this client targets
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}
