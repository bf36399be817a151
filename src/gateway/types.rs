//! Wire types for the chat gateway

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Default reply when the gateway answers with an unrecognized payload
pub const DEFAULT_REPLY: &str = "Neural link established. Awaiting further calibration.";

/// Reply used when the fallback message route accepts the prompt but
/// returns no content
pub const FALLBACK_ACK: &str = "Message logged. Processing...";

/// A single chat message in the upstream request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WireMessage {
    pub role: String,
    pub content: String,
}

impl WireMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

/// Request body for the primary chat completion route
#[derive(Debug, Clone, Serialize)]
pub struct ChatCompletionRequest {
    pub messages: Vec<WireMessage>,
    pub max_tokens: u32,
    pub temperature: f64,
    /// Routes to a specific agent/model
    pub model: String,
}

/// Request body for the fallback message route
#[derive(Debug, Clone, Serialize)]
pub struct FallbackMessageRequest {
    pub sender: String,
    pub recipient: String,
    pub content: String,
    pub message_type: String,
}

/// The gateway's reply, extracted from whichever payload shape it used
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatReply {
    pub reply: String,
}

impl ChatReply {
    /// Extract a reply from an arbitrary gateway payload
    ///
    /// The gateway answers in one of several shapes depending on which
    /// upstream served it: an OpenAI-style `response.choices[0].message
    /// .content`, a bare `content`, or a bare `reply`. Anything else
    /// defaults rather than erroring.
    pub fn from_payload(payload: &Value) -> Self {
        let reply = payload
            .pointer("/response/choices/0/message/content")
            .and_then(Value::as_str)
            .or_else(|| payload.get("content").and_then(Value::as_str))
            .or_else(|| payload.get("reply").and_then(Value::as_str))
            .unwrap_or(DEFAULT_REPLY)
            .to_string();

        ChatReply { reply }
    }

    /// Extract a reply from the fallback route's payload
    pub fn from_fallback_payload(payload: &Value) -> Self {
        let reply = payload
            .pointer("/message/content")
            .and_then(Value::as_str)
            .unwrap_or(FALLBACK_ACK)
            .to_string();

        ChatReply { reply }
    }
}
