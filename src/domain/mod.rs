// ============================================================
// Layer 3 — Domain Layer
// ============================================================
// Plain Rust types and traits describing a question about a
// paper and its extracted answer. No burn, no tokenizers, no
// file I/O in this layer.

/// A paper file's extracted text
pub mod document;

/// Tokenized input and per-token relevance scores
pub mod encoding;

/// Typed pipeline failures
pub mod error;

/// The user's query and context selection
pub mod paper;

/// Answer span selection from relevance scores
pub mod span;

/// Collaborator traits (tokenizer, scorer, answerer, document source)
pub mod traits;
