// ============================================================
// Layer 3 — Paper Query & Context Selection
// ============================================================
// One request from the user: a question about a paper plus
// the two possible evidence passages. The full text wins
// whenever it was supplied; otherwise the abstract is used.
//
//   paper_text = ""            → context = abstract
//   paper_text = "  "          → context = "  " (no trimming)
//   paper_text = "We propose…" → context = "We propose…"

use serde::{Deserialize, Serialize};

/// A question about a research paper, with its abstract and
/// (optionally) its full text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaperQuery {
    pub question:      String,
    pub abstract_text: String,
    /// `None` and `Some("")` are equivalent: both fall back to the abstract
    pub paper_text:    Option<String>,
}

impl PaperQuery {
    pub fn new(
        question:      impl Into<String>,
        abstract_text: impl Into<String>,
        paper_text:    Option<String>,
    ) -> Self {
        Self {
            question:      question.into(),
            abstract_text: abstract_text.into(),
            paper_text,
        }
    }

    /// The evidence passage for this query.
    pub fn context(&self) -> &str {
        select_context(&self.abstract_text, self.paper_text.as_deref().unwrap_or(""))
    }

    /// False when both passages are empty.
    pub fn has_context(&self) -> bool {
        !self.context().is_empty()
    }
}

/// Pick the evidence passage: `paper_text` if non-empty, else `abstract_text`.
///
/// Any non-empty `paper_text` counts as present, whitespace included.
/// Returns an empty string only when both inputs are empty.
pub fn select_context<'a>(abstract_text: &'a str, paper_text: &'a str) -> &'a str {
    if paper_text.is_empty() {
        abstract_text
    } else {
        paper_text
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paper_text_wins_when_present() {
        for abstract_text in ["", "An abstract.", "   "] {
            assert_eq!(
                select_context(abstract_text, "Full text of the paper."),
                "Full text of the paper."
            );
        }
    }

    #[test]
    fn test_empty_paper_text_falls_back_to_abstract() {
        assert_eq!(select_context("An abstract.", ""), "An abstract.");
    }

    #[test]
    fn test_whitespace_paper_text_is_not_trimmed() {
        assert_eq!(select_context("An abstract.", " \n"), " \n");
    }

    #[test]
    fn test_both_empty_gives_empty_context() {
        let q = PaperQuery::new("What?", "", None);
        assert_eq!(q.context(), "");
        assert!(!q.has_context());
    }

    #[test]
    fn test_missing_and_blank_paper_text_are_equivalent() {
        let a = PaperQuery::new("Q", "Abstract", None);
        let b = PaperQuery::new("Q", "Abstract", Some(String::new()));
        assert_eq!(a.context(), b.context());
        assert_eq!(a.context(), "Abstract");
    }
}
