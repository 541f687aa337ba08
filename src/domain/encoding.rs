// ============================================================
// Layer 3 — Tokenized Input & Relevance Scores
// ============================================================
// The two values that cross the tokenizer / model boundary.
// Both are index-aligned with the joint
//   [CLS] question [SEP] context [SEP]
// token sequence: position i of `tokens`, `ids`, `start` and
// `end` all describe the same token.

use serde::{Deserialize, Serialize};

use crate::domain::error::QaError;

/// Tokens of a (question, context) pair and their vocabulary ids.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenizedInput {
    pub tokens: Vec<String>,
    pub ids:    Vec<u32>,
}

impl TokenizedInput {
    pub fn new(tokens: Vec<String>, ids: Vec<u32>) -> Self {
        Self { tokens, ids }
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

/// Per-token start/end scores produced by the scoring model.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RelevanceScores {
    pub start: Vec<f32>,
    pub end:   Vec<f32>,
}

impl RelevanceScores {
    pub fn new(start: Vec<f32>, end: Vec<f32>) -> Self {
        Self { start, end }
    }

    /// Check that both score arrays line up with a sequence of `tokens` tokens.
    pub fn check_aligned(&self, tokens: usize) -> Result<(), QaError> {
        if tokens != self.start.len() || tokens != self.end.len() {
            return Err(QaError::LengthMismatch {
                tokens,
                start_scores: self.start.len(),
                end_scores:   self.end.len(),
            });
        }
        if tokens == 0 {
            return Err(QaError::EmptySequence);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aligned_scores_pass() {
        let s = RelevanceScores::new(vec![0.1, 0.2], vec![0.3, 0.4]);
        assert_eq!(s.check_aligned(2), Ok(()));
    }

    #[test]
    fn test_short_end_scores_rejected() {
        let s = RelevanceScores::new(vec![0.1, 0.2, 0.3], vec![0.3, 0.4]);
        assert_eq!(
            s.check_aligned(3),
            Err(QaError::LengthMismatch { tokens: 3, start_scores: 3, end_scores: 2 })
        );
    }

    #[test]
    fn test_zero_length_rejected() {
        let s = RelevanceScores::default();
        assert_eq!(s.check_aligned(0), Err(QaError::EmptySequence));
    }
}
