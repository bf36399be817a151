//! Vocabulary: shared term index and term-frequency vectorization
//!
//! Built deterministically in first-seen order while scanning documents in
//! corpus order, tokens left to right within each document. Rebuilt on
//! every retrieval call; nothing is cached between invocations.

use std::collections::HashMap;

use crate::knowledge::KnowledgeDocument;
use crate::rag::tokenizer::tokenize;

/// Mapping from normalized term to a dense vector index
#[derive(Debug, Clone, Default)]
pub struct Vocabulary {
    terms: HashMap<String, usize>,
}

impl Vocabulary {
    /// Build the vocabulary from an ordered document sequence
    ///
    /// Every distinct term across all document contents gets exactly one
    /// index. The query plays no part here.
    pub fn build(documents: &[KnowledgeDocument]) -> Self {
        let mut terms = HashMap::new();

        for doc in documents {
            for token in tokenize(&doc.content) {
                let next_index = terms.len();
                terms.entry(token).or_insert(next_index);
            }
        }

        Vocabulary { terms }
    }

    /// Number of distinct terms
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    /// Whether the vocabulary is empty
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Index of a term, if it occurs anywhere in the corpus
    pub fn index_of(&self, term: &str) -> Option<usize> {
        self.terms.get(term).copied()
    }

    /// Term-frequency vector of `text` over this vocabulary
    ///
    /// Tokens absent from the vocabulary are silently ignored; they carry
    /// no signal and do not enlarge the vector. This only happens for the
    /// query, since the vocabulary covers every document term.
    pub fn vectorize(&self, text: &str) -> Vec<f64> {
        let mut vector = vec![0.0; self.terms.len()];

        for token in tokenize(text) {
            if let Some(&index) = self.terms.get(&token) {
                vector[index] += 1.0;
            }
        }

        vector
    }
}
