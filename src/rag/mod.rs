// Lexical retrieval engine for grounding chat queries
//
// Selects and highlights knowledge snippets to ground a user query before
// it is sent to the chat gateway.
//
// Components:
// - Tokenizer: lowercase alphanumeric token scanning
// - Vocabulary: term index + term-frequency vectorization
// - Scoring: cosine similarity over count vectors
// - Highlighter: sentence-level excerpt extraction
// - Engine: end-to-end retrieval orchestration
// - Context: grounding snippet assembly for the gateway prompt

pub mod tokenizer;
pub mod vocabulary;
pub mod scoring;
pub mod highlight;
pub mod engine;
pub mod context;

// Re-export key types
pub use context::GroundingContext;
pub use engine::{retrieve_context, RagMatch, RetrievalEngine, SearchParams};
pub use vocabulary::Vocabulary;
