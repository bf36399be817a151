//! Session state: transcript, memory bank, metrics, and toggles
//!
//! A single explicitly owned state object, passed by reference to whoever
//! needs it. There is no global singleton; the REPL owns the only writer.

pub mod persistence;

use chrono::Utc;
use rand::Rng;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Maximum number of memory items retained, newest first
const MAX_MEMORY_ITEMS: usize = 20;

/// Minimum prompt length before it is auto-captured as a memory
pub const AUTO_MEMORY_THRESHOLD: usize = 8;

/// Role of a transcript message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
    System,
}

/// A single transcript entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: String,
    pub role: Role,
    pub content: String,
    pub timestamp: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl ChatMessage {
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            role,
            content: content.into(),
            timestamp: Utc::now().to_rfc3339(),
            tags: vec![],
        }
    }
}

/// A captured note, pinned or transient
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemoryItem {
    pub id: String,
    pub label: String,
    pub content: String,
    pub pinned: bool,
    pub updated_at: String,
}

/// Simulated link telemetry gauges
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Metrics {
    pub fps: u32,
    pub latency_ms: u32,
    pub memory_mb: u32,
    pub mood: f64,
}

impl Default for Metrics {
    fn default() -> Self {
        Metrics {
            fps: 60,
            latency_ms: 24,
            memory_mb: 512,
            mood: 0.5,
        }
    }
}

impl Metrics {
    /// Sample a fresh set of synthetic gauges
    pub fn sample() -> Self {
        let mut rng = rand::thread_rng();
        Metrics {
            fps: 55 + rng.gen_range(0..=10),
            latency_ms: 18 + rng.gen_range(0..=20),
            memory_mb: 420 + rng.gen_range(0..=180),
            mood: ((0.4 + rng.gen::<f64>() * 0.5) * 100.0).round() / 100.0,
        }
    }
}

/// Rendering/response quality mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QualityMode {
    Ultra,
    Balanced,
    Lite,
}

impl QualityMode {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "ultra" => Some(QualityMode::Ultra),
            "balanced" => Some(QualityMode::Balanced),
            "lite" => Some(QualityMode::Lite),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            QualityMode::Ultra => "ultra",
            QualityMode::Balanced => "balanced",
            QualityMode::Lite => "lite",
        }
    }
}

/// Conversation state owned by the REPL
///
/// Tracks:
/// - Transcript (append-only)
/// - Memory bank (bounded to MAX_MEMORY_ITEMS, newest first)
/// - Simulated metrics
/// - Retrieval toggle and quality mode
pub struct SessionState {
    messages: Vec<ChatMessage>,
    memory: Vec<MemoryItem>,
    pub metrics: Metrics,
    pub rag_enabled: bool,
    pub quality_mode: QualityMode,
}

impl SessionState {
    /// Create a fresh session
    pub fn new() -> Self {
        SessionState {
            messages: Vec::new(),
            memory: Vec::new(),
            metrics: Metrics::default(),
            rag_enabled: true,
            quality_mode: QualityMode::Balanced,
        }
    }

    /// Append a message to the transcript
    pub fn add_message(&mut self, message: ChatMessage) {
        self.messages.push(message);
    }

    /// Capture a memory item, newest first, bounded
    pub fn add_memory(&mut self, label: impl Into<String>, content: impl Into<String>, pinned: bool) -> String {
        let item = MemoryItem {
            id: Uuid::new_v4().to_string(),
            label: label.into(),
            content: content.into(),
            pinned,
            updated_at: Utc::now().to_rfc3339(),
        };
        let id = item.id.clone();

        self.memory.insert(0, item);
        self.memory.truncate(MAX_MEMORY_ITEMS);

        id
    }

    /// Flip a memory item's pinned flag
    pub fn toggle_pin(&mut self, id: &str) -> bool {
        match self.memory.iter_mut().find(|item| item.id == id) {
            Some(item) => {
                item.pinned = !item.pinned;
                item.updated_at = Utc::now().to_rfc3339();
                true
            }
            None => false,
        }
    }

    /// Flip the retrieval toggle, returning the new value
    pub fn toggle_rag(&mut self) -> bool {
        self.rag_enabled = !self.rag_enabled;
        self.rag_enabled
    }

    /// Refresh the simulated telemetry gauges
    pub fn refresh_metrics(&mut self) {
        self.metrics = Metrics::sample();
    }

    /// Clear transcript and memory; metrics and toggles survive
    pub fn clear_session(&mut self) {
        self.messages.clear();
        self.memory.clear();
    }

    /// Transcript, oldest first
    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    /// Memory bank, newest first
    pub fn memory(&self) -> &[MemoryItem] {
        &self.memory
    }

    /// Number of memory items captured
    pub fn memory_len(&self) -> usize {
        self.memory.len()
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_creation() {
        let session = SessionState::new();
        assert!(session.messages().is_empty());
        assert!(session.memory().is_empty());
        assert!(session.rag_enabled);
        assert_eq!(session.quality_mode, QualityMode::Balanced);
    }

    #[test]
    fn test_add_message() {
        let mut session = SessionState::new();
        session.add_message(ChatMessage::new(Role::User, "hello"));
        session.add_message(ChatMessage::new(Role::Assistant, "hi"));

        assert_eq!(session.messages().len(), 2);
        assert_eq!(session.messages()[0].role, Role::User);
    }

    #[test]
    fn test_memory_newest_first() {
        let mut session = SessionState::new();
        session.add_memory("Note 1", "first", false);
        session.add_memory("Note 2", "second", false);

        assert_eq!(session.memory()[0].label, "Note 2");
        assert_eq!(session.memory()[1].label, "Note 1");
    }

    #[test]
    fn test_memory_bounded() {
        let mut session = SessionState::new();
        for i in 0..30 {
            session.add_memory(format!("Note {}", i), "content", false);
        }

        assert_eq!(session.memory_len(), MAX_MEMORY_ITEMS);
        // Oldest entries evicted
        assert_eq!(session.memory()[0].label, "Note 29");
        assert_eq!(session.memory()[19].label, "Note 10");
    }

    #[test]
    fn test_toggle_pin() {
        let mut session = SessionState::new();
        let id = session.add_memory("Note", "content", false);

        assert!(session.toggle_pin(&id));
        assert!(session.memory()[0].pinned);
        assert!(session.toggle_pin(&id));
        assert!(!session.memory()[0].pinned);
        assert!(!session.toggle_pin("missing-id"));
    }

    #[test]
    fn test_toggle_rag() {
        let mut session = SessionState::new();
        assert!(!session.toggle_rag());
        assert!(session.toggle_rag());
    }

    #[test]
    fn test_clear_session_keeps_toggles() {
        let mut session = SessionState::new();
        session.add_message(ChatMessage::new(Role::User, "hello"));
        session.add_memory("Note", "content", true);
        session.toggle_rag();
        session.quality_mode = QualityMode::Ultra;

        session.clear_session();

        assert!(session.messages().is_empty());
        assert!(session.memory().is_empty());
        assert!(!session.rag_enabled);
        assert_eq!(session.quality_mode, QualityMode::Ultra);
    }

    #[test]
    fn test_metrics_sample_ranges() {
        for _ in 0..50 {
            let m = Metrics::sample();
            assert!((55..=65).contains(&m.fps));
            assert!((18..=38).contains(&m.latency_ms));
            assert!((420..=600).contains(&m.memory_mb));
            assert!(m.mood >= 0.4 && m.mood <= 0.9);
        }
    }

    #[test]
    fn test_quality_mode_parse() {
        assert_eq!(QualityMode::parse("ultra"), Some(QualityMode::Ultra));
        assert_eq!(QualityMode::parse("lite"), Some(QualityMode::Lite));
        assert!(QualityMode::parse("extreme").is_none());
    }
}
