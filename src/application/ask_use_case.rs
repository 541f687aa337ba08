// ============================================================
// Layer 2 — Ask Use Case
// ============================================================
// Answers one question about a paper:
//
//   1. Select the context (full text, else abstract)
//   2. Reject the request if there is no context at all
//   3. Tokenize [CLS] question [SEP] context [SEP]
//   4. Score every token as answer start / end
//   5. Pick start and end independently (first argmax each)
//   6. Decode the covered tokens back into text
//
// The tokenizer and scorer are injected, so the same workflow
// runs with the pretrained pair in the CLI and with hand-made
// stand-ins in tests.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::data::span_decoder::{DecodeConfig, SpanDecoder};
use crate::domain::{
    encoding::{RelevanceScores, TokenizedInput},
    error::QaError,
    paper::PaperQuery,
    span::AnswerSpan,
    traits::{QaTokenizer, QuestionAnswerer, SpanScorer},
};
use crate::infra::{
    checkpoint::CheckpointManager,
    tokenizer_store::{HfTokenizer, TokenizerStore},
};
use crate::ml::scorer::BurnScorer;

type InferBackend = burn::backend::Wgpu;

/// Optional per-model settings file in the model directory
pub const QA_CONFIG_FILE: &str = "qa_config.json";

// ─── Ask Configuration ───────────────────────────────────────────────────────
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AskConfig {
    /// Longest joint sequence fed to the model, special tokens included
    pub max_seq_len: usize,

    /// Token conventions used for pair assembly and answer decoding
    pub decode: DecodeConfig,
}

impl Default for AskConfig {
    fn default() -> Self {
        Self {
            max_seq_len: 512,
            decode:      DecodeConfig::default(),
        }
    }
}

impl AskConfig {
    /// Read `qa_config.json` from the model directory, or fall back
    /// to the defaults when the file does not exist.
    pub fn load_or_default(model_dir: &Path) -> Result<Self> {
        let path = model_dir.join(QA_CONFIG_FILE);
        if !path.exists() {
            tracing::debug!("No '{}', using default settings", path.display());
            return Ok(Self::default());
        }
        let json = std::fs::read_to_string(&path)
            .with_context(|| format!("Cannot read '{}'", path.display()))?;
        serde_json::from_str(&json)
            .with_context(|| format!("Invalid settings in '{}'", path.display()))
    }
}

// ─── Span Extraction ─────────────────────────────────────────────────────────
/// Pick the answer span from `scores` and decode it from `tokens`.
///
/// An inverted span (end before start) gives an empty answer.
pub fn extract_answer<S: AsRef<str>>(
    tokens:  &[S],
    scores:  &RelevanceScores,
    decoder: &SpanDecoder,
) -> Result<String, QaError> {
    let span = AnswerSpan::from_scores(scores, tokens.len())?;
    if span.is_empty() {
        tracing::debug!("Inverted span [{}, {}], empty answer", span.start, span.end);
    }
    let answer = decoder.decode(span.slice(tokens));
    tracing::debug!(
        "Span [{}, {}] ({} tokens) answer='{}'",
        span.start,
        span.end,
        span.len(),
        answer
    );
    Ok(answer)
}

// ─── AskUseCase ───────────────────────────────────────────────────────────────
pub struct AskUseCase<T, S> {
    tokenizer: T,
    scorer:    S,
    decoder:   SpanDecoder,
}

impl<T: QaTokenizer, S: SpanScorer> AskUseCase<T, S> {
    pub fn new(tokenizer: T, scorer: S, decode: &DecodeConfig) -> Self {
        Self {
            tokenizer,
            scorer,
            decoder: SpanDecoder::new(decode),
        }
    }

    /// Tokenize and score a (question, context) pair.
    fn encode_and_score(&self, question: &str, context: &str) -> Result<(TokenizedInput, RelevanceScores)> {
        let input = self.tokenizer.tokenize(question, context)?;
        if input.is_empty() {
            return Err(QaError::EmptySequence.into());
        }
        tracing::debug!("Scoring {} tokens", input.len());
        let scores = self.scorer.score(&input.ids)?;
        Ok((input, scores))
    }
}

impl<T: QaTokenizer, S: SpanScorer> QuestionAnswerer for AskUseCase<T, S> {
    fn answer(&self, query: &PaperQuery) -> Result<String> {
        if !query.has_context() {
            return Err(QaError::EmptyContext.into());
        }
        let context = query.context();
        tracing::debug!(
            "Answering from {} ({} chars)",
            if query.paper_text.as_deref().unwrap_or("").is_empty() { "abstract" } else { "paper text" },
            context.len()
        );

        let (input, scores) = self.encode_and_score(&query.question, context)?;
        Ok(extract_answer(&input.tokens, &scores, &self.decoder)?)
    }
}

impl AskUseCase<HfTokenizer, BurnScorer<InferBackend>> {
    /// Load tokenizer.json, the encoder checkpoint and (optionally)
    /// qa_config.json from `model_dir`.
    pub fn from_model_dir(model_dir: &Path, config: &AskConfig) -> Result<Self> {
        let tokenizer = TokenizerStore::new(model_dir).load()?;
        let ckpt      = CheckpointManager::new(model_dir);
        let device    = burn::backend::wgpu::WgpuDevice::default();

        let model_limit = ckpt.load_config()?.max_seq_len;
        let max_seq_len = config.max_seq_len.min(model_limit);
        if max_seq_len < config.max_seq_len {
            tracing::warn!(
                "max_seq_len {} exceeds the model's {} positions, using {}",
                config.max_seq_len,
                model_limit,
                max_seq_len
            );
        }

        let tokenizer = HfTokenizer::new(tokenizer, &config.decode, max_seq_len)?;
        let scorer    = BurnScorer::from_checkpoint(&ckpt, device, tokenizer.sep_id())?;
        Ok(Self::new(tokenizer, scorer, &config.decode))
    }
}
