//! Retrieval orchestrator: vocabulary, vectors, ranking, highlights
//!
//! The single entry point the rest of the system consumes. Synchronous,
//! pure, and total: any query string against any document collection
//! produces a result, never an error. Each call rebuilds the vocabulary
//! from the supplied corpus, so concurrent callers share nothing.

use serde::{Deserialize, Serialize};

use crate::knowledge::KnowledgeDocument;
use crate::rag::highlight::highlight;
use crate::rag::scoring::cosine_similarity;
use crate::rag::tokenizer::tokenize;
use crate::rag::vocabulary::Vocabulary;

/// Search parameters for retrieval
///
/// The defaults are the engine's contract: top 3 matches, at most 2
/// highlight sentences per match.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchParams {
    /// Maximum number of matches to return
    pub top_k: usize,
    /// Maximum highlight sentences per match
    pub max_highlights: usize,
}

impl Default for SearchParams {
    fn default() -> Self {
        Self {
            top_k: 3,
            max_highlights: 2,
        }
    }
}

/// A retrieved document with its similarity score and excerpts
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RagMatch {
    pub document: KnowledgeDocument,
    /// Cosine similarity in (0, 1]; zero-score documents are dropped
    pub score: f64,
    /// Sentences from the document containing a query term, in order
    pub highlights: Vec<String>,
}

/// Lexical retrieval engine
pub struct RetrievalEngine {
    params: SearchParams,
}

impl RetrievalEngine {
    /// Create an engine with the contract defaults
    pub fn new() -> Self {
        Self {
            params: SearchParams::default(),
        }
    }

    /// Create with custom parameters
    pub fn with_params(params: SearchParams) -> Self {
        Self { params }
    }

    /// Retrieve the documents most similar to `query`
    ///
    /// Builds the vocabulary from `documents`, vectorizes the query and
    /// each document against it, scores by cosine similarity, attaches
    /// highlights computed from the query's own tokenized terms, drops
    /// non-positive scores, sorts by descending score (stable, so ties
    /// keep corpus order), and truncates to `top_k`.
    pub fn retrieve(&self, query: &str, documents: &[KnowledgeDocument]) -> Vec<RagMatch> {
        let vocab = Vocabulary::build(documents);
        let query_vector = vocab.vectorize(query);
        let query_terms: Vec<String> = tokenize(query).collect();

        let mut matches: Vec<RagMatch> = documents
            .iter()
            .map(|document| {
                let document_vector = vocab.vectorize(&document.content);
                let score = cosine_similarity(&query_vector, &document_vector);
                RagMatch {
                    document: document.clone(),
                    score,
                    highlights: highlight(
                        &document.content,
                        &query_terms,
                        self.params.max_highlights,
                    ),
                }
            })
            .filter(|m| m.score > 0.0)
            .collect();

        // Vec::sort_by is stable; equal scores keep corpus order
        matches.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        matches.truncate(self.params.top_k);

        matches
    }

    /// Get the engine's search parameters
    pub fn params(&self) -> &SearchParams {
        &self.params
    }
}

impl Default for RetrievalEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// Retrieve grounding matches with the default parameters
pub fn retrieve_context(query: &str, documents: &[KnowledgeDocument]) -> Vec<RagMatch> {
    RetrievalEngine::new().retrieve(query, documents)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::knowledge::KnowledgeBase;

    fn doc(id: &str, content: &str) -> KnowledgeDocument {
        KnowledgeDocument {
            id: id.to_string(),
            title: id.to_string(),
            content: content.to_string(),
            tags: vec![],
        }
    }

    #[test]
    fn test_search_params_default() {
        let params = SearchParams::default();
        assert_eq!(params.top_k, 3);
        assert_eq!(params.max_highlights, 2);
    }

    #[test]
    fn test_empty_query_yields_empty() {
        let kb = KnowledgeBase::builtin();
        assert!(retrieve_context("", &kb.documents).is_empty());
    }

    #[test]
    fn test_empty_corpus_yields_empty() {
        assert!(retrieve_context("memory weaving", &[]).is_empty());
    }

    #[test]
    fn test_unknown_terms_yield_empty() {
        let kb = KnowledgeBase::builtin();
        assert!(retrieve_context("xyzabc123", &kb.documents).is_empty());
    }

    #[test]
    fn test_top_match_and_highlights() {
        let kb = KnowledgeBase::builtin();
        let matches = retrieve_context("memory weaving protocol", &kb.documents);

        assert!(!matches.is_empty());
        assert_eq!(matches[0].document.id, "kb-2");
        assert!(matches[0].score > 0.0);
        assert!(matches[0]
            .highlights
            .iter()
            .any(|h| h.contains("short-term conversational state")
                || h.contains("task-critical entities")));
    }

    #[test]
    fn test_self_similarity_is_maximal() {
        let kb = KnowledgeBase::builtin();
        let query = kb.get("kb-4").unwrap().content.clone();
        let matches = retrieve_context(&query, &kb.documents);

        assert_eq!(matches[0].document.id, "kb-4");
        assert!((matches[0].score - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_results_sorted_descending() {
        let kb = KnowledgeBase::builtin();
        let matches = retrieve_context("memory retrieval context", &kb.documents);

        for pair in matches.windows(2) {
            assert!(pair[0].score >= pair[1].score);
        }
    }

    #[test]
    fn test_truncates_to_top_k() {
        let docs: Vec<KnowledgeDocument> = (0..10)
            .map(|i| doc(&format!("d{}", i), "shared term everywhere"))
            .collect();

        let matches = retrieve_context("shared", &docs);
        assert_eq!(matches.len(), 3);
    }

    #[test]
    fn test_ties_keep_corpus_order() {
        // Identical contents score identically; corpus order must survive
        let docs = vec![
            doc("first", "alpha beta"),
            doc("second", "alpha beta"),
            doc("third", "alpha beta"),
        ];

        let matches = retrieve_context("alpha", &docs);
        let ids: Vec<&str> = matches.iter().map(|m| m.document.id.as_str()).collect();
        assert_eq!(ids, vec!["first", "second", "third"]);
    }

    #[test]
    fn test_custom_top_k() {
        let docs = vec![doc("a", "alpha"), doc("b", "alpha"), doc("c", "alpha")];
        let engine = RetrievalEngine::with_params(SearchParams {
            top_k: 1,
            max_highlights: 2,
        });

        assert_eq!(engine.retrieve("alpha", &docs).len(), 1);
    }

    #[test]
    fn test_total_over_odd_inputs() {
        // Empty content, non-ASCII text, duplicate ids: no panics
        let docs = vec![
            doc("dup", ""),
            doc("dup", "数据 retrieval データ"),
            doc("x", "plain retrieval text"),
        ];

        let matches = retrieve_context("retrieval ラーメン", &docs);
        assert!(matches.len() <= 3);
        for m in &matches {
            assert!(m.score > 0.0 && m.score <= 1.0 + 1e-12);
        }
    }

    #[test]
    fn test_oov_query_term_still_highlights() {
        // "weav" is not a corpus term and cannot score, but it can still
        // surface as a substring highlight alongside scoring terms
        let docs = vec![doc("a", "Memory weaving blends state. Other sentence here.")];
        let matches = retrieve_context("memory weav", &docs);

        assert_eq!(matches.len(), 1);
        assert_eq!(
            matches[0].highlights,
            vec!["Memory weaving blends state".to_string()]
        );
    }

    #[test]
    fn test_determinism() {
        let kb = KnowledgeBase::builtin();
        let a = retrieve_context("adaptive memory optimization", &kb.documents);
        let b = retrieve_context("adaptive memory optimization", &kb.documents);

        assert_eq!(a.len(), b.len());
        for (x, y) in a.iter().zip(b.iter()) {
            assert_eq!(x.document.id, y.document.id);
            assert_eq!(x.score.to_bits(), y.score.to_bits());
            assert_eq!(x.highlights, y.highlights);
        }
    }
}
