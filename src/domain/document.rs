// ============================================================
// Layer 3 — Document Domain Type
// ============================================================
// The text of a paper (or of its abstract) loaded from a file,
// tagged with where it came from.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    /// File name the text was read from, for log messages
    pub source: String,

    /// Extracted text, already cleaned by the Preprocessor
    pub text: String,
}

impl Document {
    pub fn new(source: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            text:   text.into(),
        }
    }
}
