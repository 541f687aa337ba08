// ============================================================
// Layer 3 — Core Traits (Abstractions)
// ============================================================
// The seams between the answering pipeline and its
// collaborators. The pipeline only ever sees these traits,
// so tests can swap in hand-written tokenizers and scorers
// and the CLI can plug in the real ones:
//
//   QaTokenizer      → HfTokenizer (tokenizer.json)
//   SpanScorer       → BurnScorer  (encoder checkpoint)
//   QuestionAnswerer → AskUseCase
//   DocumentSource   → PaperFileLoader (.txt / .docx)
//
// None of the methods take &mut self: a loaded tokenizer or
// model is read-only and may serve any number of requests.

use anyhow::Result;

use crate::domain::{
    document::Document,
    encoding::{RelevanceScores, TokenizedInput},
    paper::PaperQuery,
};

// ─── QaTokenizer ──────────────────────────────────────────────────────────────
/// Turns a (question, context) pair into one joint token sequence.
pub trait QaTokenizer {
    /// Tokenize question and context together. `tokens` and `ids`
    /// in the result must have the same length.
    fn tokenize(&self, question: &str, context: &str) -> Result<TokenizedInput>;
}

// ─── SpanScorer ───────────────────────────────────────────────────────────────
/// Scores every input position as a possible answer start / end.
pub trait SpanScorer {
    /// Return one start and one end score per id.
    fn score(&self, ids: &[u32]) -> Result<RelevanceScores>;
}

// ─── QuestionAnswerer ─────────────────────────────────────────────────────────
/// Anything that can answer a question about a paper.
pub trait QuestionAnswerer {
    fn answer(&self, query: &PaperQuery) -> Result<String>;
}

// ─── DocumentSource ───────────────────────────────────────────────────────────
/// Anything that can produce the text of a paper (or its abstract).
pub trait DocumentSource {
    fn load(&self) -> Result<Document>;
}

impl<T: QaTokenizer + ?Sized> QaTokenizer for &T {
    fn tokenize(&self, question: &str, context: &str) -> Result<TokenizedInput> {
        (**self).tokenize(question, context)
    }
}

impl<S: SpanScorer + ?Sized> SpanScorer for &S {
    fn score(&self, ids: &[u32]) -> Result<RelevanceScores> {
        (**self).score(ids)
    }
}
