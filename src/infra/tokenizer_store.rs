// ============================================================
// Layer 6 — Tokenizer Store
// ============================================================
// Loads the pretrained tokenizer (`tokenizer.json` in the
// model directory) and adapts it to the QaTokenizer trait.
//
// The joint input is assembled by hand in BERT layout:
//
//   [CLS] question [SEP] context [SEP]
//
// so it does not depend on the tokenizer.json carrying a
// post-processor. When the pair is longer than max_seq_len the
// context is cut first; the closing [SEP] is always kept.

use anyhow::{ensure, Result};
use std::path::PathBuf;
use tokenizers::Tokenizer;

use crate::data::span_decoder::DecodeConfig;
use crate::domain::encoding::TokenizedInput;
use crate::domain::error::QaError;
use crate::domain::traits::QaTokenizer;

/// [CLS] + two [SEP]
const SPECIAL_SLOTS: usize = 3;

pub struct TokenizerStore {
    dir: PathBuf,
}

impl TokenizerStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn path(&self) -> PathBuf {
        self.dir.join("tokenizer.json")
    }

    /// Load the tokenizer saved in the model directory.
    pub fn load(&self) -> Result<Tokenizer> {
        let path = self.path();
        let tokenizer = Tokenizer::from_file(&path).map_err(|e| {
            anyhow::anyhow!("Cannot load tokenizer from '{}': {}", path.display(), e)
        })?;
        tracing::info!("Tokenizer loaded from '{}'", path.display());
        Ok(tokenizer)
    }
}

/// A Hugging Face tokenizer producing BERT-style pair sequences.
pub struct HfTokenizer {
    tokenizer:   Tokenizer,
    cls:         (String, u32),
    sep:         (String, u32),
    max_seq_len: usize,
}

impl HfTokenizer {
    /// Wrap `tokenizer`, resolving the boundary tokens named in `decode`.
    pub fn new(tokenizer: Tokenizer, decode: &DecodeConfig, max_seq_len: usize) -> Result<Self> {
        ensure!(
            max_seq_len > SPECIAL_SLOTS,
            "max_seq_len must be greater than {SPECIAL_SLOTS}, got {max_seq_len}"
        );
        let lookup = |token: &str| -> Result<(String, u32)> {
            let id = tokenizer
                .token_to_id(token)
                .ok_or_else(|| QaError::MissingSpecialToken(token.to_string()))?;
            Ok((token.to_string(), id))
        };
        let cls = lookup(&decode.cls_token)?;
        let sep = lookup(&decode.sep_token)?;
        Ok(Self { tokenizer, cls, sep, max_seq_len })
    }

    pub fn sep_id(&self) -> u32 {
        self.sep.1
    }

    fn encode(&self, text: &str, what: &str) -> Result<(Vec<String>, Vec<u32>)> {
        let enc = self
            .tokenizer
            .encode(text, false)
            .map_err(|e| anyhow::anyhow!("Cannot tokenise {what}: {e}"))?;
        Ok((enc.get_tokens().to_vec(), enc.get_ids().to_vec()))
    }
}

impl QaTokenizer for HfTokenizer {
    fn tokenize(&self, question: &str, context: &str) -> Result<TokenizedInput> {
        let q = self.encode(question, "question")?;
        let c = self.encode(context, "context")?;
        Ok(assemble_pair(q, c, &self.cls, &self.sep, self.max_seq_len))
    }
}

/// Lay out `[CLS] q [SEP] c [SEP]`, truncating to `max_seq_len`.
fn assemble_pair(
    (mut q_tokens, mut q_ids): (Vec<String>, Vec<u32>),
    (mut c_tokens, mut c_ids): (Vec<String>, Vec<u32>),
    cls:         &(String, u32),
    sep:         &(String, u32),
    max_seq_len: usize,
) -> TokenizedInput {
    let budget = max_seq_len.saturating_sub(SPECIAL_SLOTS);
    let q_keep = q_tokens.len().min(budget);
    let c_keep = c_tokens.len().min(budget - q_keep);

    if q_keep < q_tokens.len() || c_keep < c_tokens.len() {
        tracing::warn!(
            "Input truncated to {} tokens (question {} → {}, context {} → {})",
            max_seq_len,
            q_tokens.len(),
            q_keep,
            c_tokens.len(),
            c_keep,
        );
    }
    q_tokens.truncate(q_keep);
    q_ids.truncate(q_keep);
    c_tokens.truncate(c_keep);
    c_ids.truncate(c_keep);

    let total      = q_keep + c_keep + SPECIAL_SLOTS;
    let mut tokens = Vec::with_capacity(total);
    let mut ids    = Vec::with_capacity(total);

    tokens.push(cls.0.clone());
    ids.push(cls.1);
    tokens.extend(q_tokens);
    ids.extend(q_ids);
    tokens.push(sep.0.clone());
    ids.push(sep.1);
    tokens.extend(c_tokens);
    ids.extend(c_ids);
    tokens.push(sep.0.clone());
    ids.push(sep.1);

    TokenizedInput::new(tokens, ids)
}
