// ============================================================
// Layer 3 — Answer Span
// ============================================================
// Extractive Q&A answers are spans of the input: the model
// scores every token as a possible start and a possible end,
// and the answer is the token range between the two best.
//
// Start and end are chosen independently of each other:
//
//   start = argmax(start_scores)
//   end   = argmax(end_scores)
//
// so end < start can happen. Such a span is kept as is and
// simply covers no tokens.
//
// Reference: Devlin et al. (2019) - BERT paper, §4.2 (SQuAD)

use serde::{Deserialize, Serialize};

use crate::domain::{encoding::RelevanceScores, error::QaError};

/// A (start, end) pair of token indices, end inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerSpan {
    pub start: usize,
    pub end:   usize,
}

impl AnswerSpan {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Pick the span from the scores of a `tokens`-long sequence.
    ///
    /// Fails when the score arrays do not match the sequence length
    /// or the sequence is empty.
    pub fn from_scores(scores: &RelevanceScores, tokens: usize) -> Result<Self, QaError> {
        scores.check_aligned(tokens)?;
        // check_aligned guarantees both arrays are non-empty
        let start = argmax_first(&scores.start).unwrap_or(0);
        let end   = argmax_first(&scores.end).unwrap_or(0);
        Ok(Self::new(start, end))
    }

    /// End index lies before the start index.
    pub fn is_inverted(&self) -> bool {
        self.end < self.start
    }

    /// Number of tokens covered (0 for an inverted span).
    pub fn len(&self) -> usize {
        if self.is_inverted() { 0 } else { self.end - self.start + 1 }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The covered tokens; an inverted span yields an empty slice.
    pub fn slice<'a, T>(&self, tokens: &'a [T]) -> &'a [T] {
        if self.is_inverted() || self.start >= tokens.len() {
            return &[];
        }
        let end = self.end.min(tokens.len() - 1);
        &tokens[self.start..=end]
    }
}

/// Index of the largest value; ties go to the lowest index.
///
/// A strict `>` scan keeps the first maximum, and a NaN never
/// replaces an earlier value. Returns `None` for an empty slice.
pub fn argmax_first(values: &[f32]) -> Option<usize> {
    let mut iter = values.iter().enumerate();
    let (mut best_idx, mut best) = iter.next().map(|(i, &v)| (i, v))?;
    for (i, &v) in iter {
        if v > best || (best.is_nan() && !v.is_nan()) {
            best     = v;
            best_idx = i;
        }
    }
    Some(best_idx)
}
