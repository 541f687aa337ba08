// ============================================================
// Layer 4 — Span Decoder
// ============================================================
// Rebuilds readable text from a slice of sub-word tokens.
//
// WordPiece-style tokenizers split rare words into pieces and
// mark every piece after the first with a prefix:
//
//   "embeddings" → ["em", "##bed", "##ding", "##s"]
//
// Decoding rules, applied token by token:
//   1. special tokens ([CLS], [SEP], [PAD], …) are dropped
//   2. a token carrying the continuation prefix is glued to
//      the previous token with the prefix removed
//   3. any other token is preceded by a single space
//
//   ["[CLS]", "bert", "is", "fast", "[SEP]"] → "bert is fast"
//   ["em", "##bed", "##ding", "##s"]         → "embeddings"
//
// The prefix and the special-token list come from DecodeConfig,
// so other vocabularies can be decoded without code changes.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

/// Token conventions of the tokenizer that produced the sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DecodeConfig {
    /// Marker on sub-word continuation tokens; empty disables joining
    pub continuation_prefix: String,

    /// Tokens removed from decoded answers
    pub special_tokens: Vec<String>,

    /// Sequence start marker placed before the question
    pub cls_token: String,

    /// Separator placed after the question and after the context
    pub sep_token: String,

    /// Remove the space before trailing punctuation and English
    /// contractions ("model ." → "model.") and contract "do not",
    /// as the Hugging Face WordPiece decoder does with `cleanup` enabled
    pub cleanup_punctuation: bool,
}

impl Default for DecodeConfig {
    fn default() -> Self {
        Self {
            continuation_prefix: "##".to_string(),
            special_tokens:      ["[CLS]", "[SEP]", "[PAD]", "[MASK]"]
                .iter()
                .map(|t| t.to_string())
                .collect(),
            cls_token:           "[CLS]".to_string(),
            sep_token:           "[SEP]".to_string(),
            cleanup_punctuation: false,
        }
    }
}

pub struct SpanDecoder {
    continuation_prefix: String,
    special_tokens:      HashSet<String>,
    cleanup_punctuation: bool,
}

impl SpanDecoder {
    pub fn new(config: &DecodeConfig) -> Self {
        let mut special_tokens: HashSet<String> =
            config.special_tokens.iter().cloned().collect();
        special_tokens.insert(config.cls_token.clone());
        special_tokens.insert(config.sep_token.clone());
        Self {
            continuation_prefix: config.continuation_prefix.clone(),
            special_tokens,
            cleanup_punctuation: config.cleanup_punctuation,
        }
    }

    pub fn is_special(&self, token: &str) -> bool {
        self.special_tokens.contains(token)
    }

    /// Join a token slice back into text.
    pub fn decode<S: AsRef<str>>(&self, tokens: &[S]) -> String {
        let mut out = String::new();

        for token in tokens {
            let token = token.as_ref();
            if self.is_special(token) {
                continue;
            }

            match self.strip_continuation(token) {
                Some(piece) => out.push_str(piece),
                None => {
                    if !out.is_empty() {
                        out.push(' ');
                    }
                    out.push_str(token);
                }
            }
        }

        if self.cleanup_punctuation {
            cleanup_spaces(&out)
        } else {
            out
        }
    }

    /// The token without its continuation prefix, if it has one.
    fn strip_continuation<'a>(&self, token: &'a str) -> Option<&'a str> {
        if self.continuation_prefix.is_empty() {
            return None;
        }
        token.strip_prefix(self.continuation_prefix.as_str())
    }
}

impl Default for SpanDecoder {
    fn default() -> Self {
        Self::new(&DecodeConfig::default())
    }
}

/// Same substitutions as the Hugging Face WordPiece decoder cleanup.
fn cleanup_spaces(text: &str) -> String {
    const RULES: [(&str, &str); 11] = [
        (" .", "."),
        (" ?", "?"),
        (" !", "!"),
        (" ,", ","),
        (" ' ", "'"),
        (" n't", "n't"),
        (" 'm", "'m"),
        (" do not", " don't"),
        (" 's", "'s"),
        (" 've", "'ve"),
        (" 're", "'re"),
    ];
    RULES
        .iter()
        .fold(text.to_string(), |acc, (from, to)| acc.replace(from, to))
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_boundary_tokens() {
        let d = SpanDecoder::default();
        assert_eq!(d.decode(&["[CLS]", "bert", "is", "fast", "[SEP]"]), "bert is fast");
    }

    #[test]
    fn test_joins_continuations() {
        let d = SpanDecoder::default();
        assert_eq!(d.decode(&["word", "em", "##bed", "##ding", "##s"]), "word embeddings");
    }

    #[test]
    fn test_single_continuation_token_loses_marker() {
        let d = SpanDecoder::default();
        assert_eq!(d.decode(&["##ding"]), "ding");
    }

    #[test]
    fn test_continuation_after_dropped_special_has_no_space() {
        let d = SpanDecoder::default();
        assert_eq!(d.decode(&["[SEP]", "##s", "model"]), "s model");
    }

    #[test]
    fn test_empty_slice() {
        let d = SpanDecoder::default();
        let empty: [&str; 0] = [];
        assert_eq!(d.decode(&empty), "");
        assert_eq!(d.decode(&["[CLS]", "[SEP]"]), "");
    }

    #[test]
    fn test_custom_prefix_and_specials() {
        let cfg = DecodeConfig {
            continuation_prefix: "@@".to_string(),
            special_tokens:      vec!["<pad>".to_string()],
            cls_token:           "<s>".to_string(),
            sep_token:           "</s>".to_string(),
            cleanup_punctuation: false,
        };
        let d = SpanDecoder::new(&cfg);
        assert_eq!(d.decode(&["<s>", "trans", "@@former", "##x", "</s>", "<pad>"]), "transformer ##x");
    }

    #[test]
    fn test_empty_prefix_disables_joining() {
        let cfg = DecodeConfig { continuation_prefix: String::new(), ..DecodeConfig::default() };
        let d = SpanDecoder::new(&cfg);
        assert_eq!(d.decode(&["a", "##b"]), "a ##b");
    }

    #[test]
    fn test_unknown_token_is_kept() {
        let d = SpanDecoder::default();
        assert_eq!(d.decode(&["the", "[UNK]", "layer"]), "the [UNK] layer");
    }

    #[test]
    fn test_cleanup_punctuation() {
        let cfg = DecodeConfig { cleanup_punctuation: true, ..DecodeConfig::default() };
        let d = SpanDecoder::new(&cfg);
        assert_eq!(d.decode(&["a", "model", ".", "it", "isn", "'", "t"]), "a model. it isn't");
        assert_eq!(SpanDecoder::default().decode(&["model", "."]), "model .");
    }

    #[test]
    fn test_cleanup_contracts_do_not() {
        let cfg = DecodeConfig { cleanup_punctuation: true, ..DecodeConfig::default() };
        let d = SpanDecoder::new(&cfg);
        assert_eq!(d.decode(&["we", "do", "not", "fine", "##tune", "."]), "we don't finetune.");
    }
}
