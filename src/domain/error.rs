// ============================================================
// Layer 3 — Domain Errors
// ============================================================
// Typed failures of the answering pipeline. The application
// layer wraps these in anyhow::Error, so callers can still
// downcast to decide how to report a rejected request.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum QaError {
    /// Both the abstract and the paper text are empty
    #[error("missing context: provide an abstract or the paper text")]
    EmptyContext,

    /// The tokenizer produced no tokens at all
    #[error("empty token sequence: nothing to extract an answer from")]
    EmptySequence,

    /// Token sequence and score arrays are not index-aligned
    #[error(
        "length mismatch: {tokens} tokens, {start_scores} start scores, {end_scores} end scores"
    )]
    LengthMismatch {
        tokens:       usize,
        start_scores: usize,
        end_scores:   usize,
    },

    /// A boundary token like [CLS] is absent from the vocabulary
    #[error("special token '{0}' is not in the tokenizer vocabulary")]
    MissingSpecialToken(String),
}
