//! Knowledge base: the static corpus retrieval operates over
//!
//! Documents are defined once at startup and never mutated during a
//! session. The built-in corpus ships with the binary; an alternative
//! corpus can be loaded from a TOML file (document order in the file is
//! corpus order, which the retrieval engine depends on for tie-breaking).

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Immutable unit of knowledge
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KnowledgeDocument {
    /// Unique identifier
    pub id: String,
    /// Display label
    pub title: String,
    /// Free-text body, the unit of retrieval
    pub content: String,
    /// Labels carried for future filtering; unused by scoring
    #[serde(default)]
    pub tags: Vec<String>,
}

/// Ordered collection of knowledge documents
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KnowledgeBase {
    pub documents: Vec<KnowledgeDocument>,
}

impl KnowledgeBase {
    /// Load a corpus from a TOML file with a `[[documents]]` array
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read corpus file: {}", path.display()))?;

        let kb: KnowledgeBase =
            toml::from_str(&contents).context("Failed to parse corpus file")?;

        Ok(kb)
    }

    /// The corpus bundled with the binary
    pub fn builtin() -> Self {
        let doc = |id: &str, title: &str, content: &str, tags: &[&str]| KnowledgeDocument {
            id: id.to_string(),
            title: title.to_string(),
            content: content.to_string(),
            tags: tags.iter().map(|t| t.to_string()).collect(),
        };

        KnowledgeBase {
            documents: vec![
                doc(
                    "kb-1",
                    "Neuro-Link Core Systems",
                    "The Neuro-Link core orchestrates multimodal streams, aligning input \
                     channels with adaptive memory layers. It prioritizes low-latency context \
                     retrieval and proactive safety gating.",
                    &["core", "neuro-link", "systems"],
                ),
                doc(
                    "kb-2",
                    "Memory Weaving Protocol",
                    "Memory weaving blends short-term conversational state with long-term \
                     recall. Key signals include intent, sentiment, task-critical entities, \
                     and user preferences.",
                    &["memory", "state", "preferences"],
                ),
                doc(
                    "kb-3",
                    "Retrieval-Augmented Generation (RAG)",
                    "RAG pipelines surface high-signal documents using vector similarity, \
                     then ground responses by summarizing and citing retrieved context. \
                     Compression layers reduce token footprint while preserving facts.",
                    &["rag", "retrieval", "grounding"],
                ),
                doc(
                    "kb-4",
                    "Optimization Layer",
                    "Adaptive optimization monitors performance metrics, adjusting compute \
                     intensity, rendering complexity, and memory compaction to maintain \
                     target responsiveness.",
                    &["optimization", "performance"],
                ),
                doc(
                    "kb-5",
                    "Agent Orchestration",
                    "Agent orchestration routes tasks to specialized tools with stateful \
                     coordination. Key components include task graphs, priority queues, and \
                     resilience fallbacks.",
                    &["agents", "orchestration", "tools"],
                ),
            ],
        }
    }

    /// Number of documents in the corpus
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    /// Whether the corpus is empty
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// Look up a document by id
    pub fn get(&self, id: &str) -> Option<&KnowledgeDocument> {
        self.documents.iter().find(|d| d.id == id)
    }
}

impl Default for KnowledgeBase {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_builtin_corpus() {
        let kb = KnowledgeBase::builtin();
        assert_eq!(kb.len(), 5);
        assert_eq!(kb.documents[0].id, "kb-1");
        assert_eq!(kb.documents[4].id, "kb-5");
    }

    #[test]
    fn test_get_by_id() {
        let kb = KnowledgeBase::builtin();
        let doc = kb.get("kb-2").unwrap();
        assert_eq!(doc.title, "Memory Weaving Protocol");
        assert!(kb.get("kb-99").is_none());
    }

    #[test]
    fn test_load_from_toml() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
[[documents]]
id = "doc-1"
title = "First"
content = "Alpha beta gamma."
tags = ["a"]

[[documents]]
id = "doc-2"
title = "Second"
content = "Delta epsilon."
"#
        )
        .unwrap();

        let kb = KnowledgeBase::load(file.path()).unwrap();
        assert_eq!(kb.len(), 2);
        assert_eq!(kb.documents[0].id, "doc-1");
        // Missing tags default to empty
        assert!(kb.documents[1].tags.is_empty());
    }

    #[test]
    fn test_load_missing_file() {
        let result = KnowledgeBase::load(Path::new("/nonexistent/corpus.toml"));
        assert!(result.is_err());
    }
}
