//! NeuroLink v0.3.0 - Terminal Chat with Retrieval Grounding
//!
//! A terminal chat client that grounds every query with snippets retrieved
//! from a local knowledge base before forwarding it to a chat-completion
//! gateway.
//!
//! # Architecture
//!
//! - **rag**: in-memory lexical retrieval engine (the core)
//! - **gateway**: HTTP client for the upstream chat gateway, with a local
//!   heuristic fallback
//! - **session**: single-writer conversation state with JSON persistence

pub mod errors;
pub mod knowledge;
pub mod rag;
pub mod gateway;
pub mod session;
pub mod config;
pub mod cli;
pub mod repl;

// Re-export commonly used types
pub use errors::{NeuroError, Result};
pub use knowledge::{KnowledgeBase, KnowledgeDocument};
pub use rag::{retrieve_context, RagMatch, RetrievalEngine};
