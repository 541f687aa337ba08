// ============================================================
// Layer 1 — Interactive Form
// ============================================================
// Terminal version of the question form. Each round asks for
// three fields and prints one:
//
//   Question:                 <line>
//   Abstract:                 <lines, ended by a blank line>
//   Paper text (optional):    <lines, ended by a blank line>
//   Answer: <text>
//
// Pasted passages keep their line breaks. A passage given as a
// single `@path` line is read from that file instead, which is
// the way to pass text containing blank lines.
//
// The loop ends at end of input. A rejected request prints the
// error and the form asks again.

use anyhow::Result;
use std::io::{BufRead, Write};

use crate::data::loader::PaperFileLoader;
use crate::domain::paper::PaperQuery;
use crate::domain::traits::{DocumentSource, QuestionAnswerer};

pub const TITLE: &str = "Ask question to research paper";
pub const DESCRIPTION: &str =
    "Enter a question, the paper's abstract and, optionally, the paper's full text to get an answer.\n\
     End the abstract and the paper text with a blank line, or give '@path/to/file' to read one from disk.";

/// The three fields of one round, as typed.
struct FormFields {
    question:      String,
    abstract_text: String,
    paper_text:    Option<String>,
}

impl FormFields {
    /// Resolve `@path` passages and build the query.
    fn into_query(self) -> Result<PaperQuery> {
        let abstract_text = resolve_passage(self.abstract_text)?;
        let paper_text    = self.paper_text.map(resolve_passage).transpose()?;
        Ok(PaperQuery::new(self.question, abstract_text, paper_text))
    }
}

fn resolve_passage(text: String) -> Result<String> {
    match text.strip_prefix('@') {
        Some(path) if !text.contains('\n') && !path.trim().is_empty() => {
            Ok(PaperFileLoader::new(path.trim()).load()?.text)
        }
        _ => Ok(text),
    }
}

pub struct InteractiveForm<R, W> {
    input:  R,
    output: W,
}

impl<R: BufRead, W: Write> InteractiveForm<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Run until end of input. Returns the number of answered questions.
    pub fn run(&mut self, qa: &dyn QuestionAnswerer) -> Result<usize> {
        writeln!(self.output, "{TITLE}")?;
        writeln!(self.output, "{DESCRIPTION}")?;

        let mut answered = 0;
        while let Some(fields) = self.read_fields()? {
            match fields.into_query().and_then(|query| qa.answer(&query)) {
                Ok(answer) => {
                    writeln!(self.output, "Answer: {answer}\n")?;
                    answered += 1;
                }
                Err(e) => {
                    tracing::warn!("Request rejected: {e}");
                    writeln!(self.output, "Error: {e}\n")?;
                }
            }
        }
        Ok(answered)
    }

    /// Prompt for the three fields; `None` once input runs out.
    fn read_fields(&mut self) -> Result<Option<FormFields>> {
        let Some(question) = self.prompt_line("Question: ")? else { return Ok(None) };
        let Some(abstract_text) = self.prompt_block("Abstract: ")? else { return Ok(None) };
        let paper_text = self.prompt_block("Paper text (optional): ")?;
        Ok(Some(FormFields { question, abstract_text, paper_text }))
    }

    fn prompt_line(&mut self, label: &str) -> Result<Option<String>> {
        write!(self.output, "{label}")?;
        self.output.flush()?;
        self.next_line()
    }

    /// Lines up to the next blank line, joined with `\n`.
    /// `None` only when input ended before anything was read.
    fn prompt_block(&mut self, label: &str) -> Result<Option<String>> {
        write!(self.output, "{label}")?;
        self.output.flush()?;

        let Some(first) = self.next_line()? else { return Ok(None) };
        let mut lines = Vec::new();
        let mut line  = Some(first);
        while let Some(text) = line.take().filter(|l| !l.is_empty()) {
            lines.push(text);
            line = self.next_line()?;
        }
        Ok(Some(lines.join("\n")))
    }

    fn next_line(&mut self) -> Result<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        // Only the line terminator is removed; the rest is kept as typed
        let len = line.trim_end_matches(['\n', '\r']).len();
        line.truncate(len);
        Ok(Some(line))
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::error::QaError;

    /// Answers with the selected context, like a span covering all of it.
    struct EchoContext;

    impl QuestionAnswerer for EchoContext {
        fn answer(&self, query: &PaperQuery) -> Result<String> {
            if !query.has_context() {
                return Err(QaError::EmptyContext.into());
            }
            Ok(query.context().to_string())
        }
    }

    fn run_form(input: &str) -> (usize, String) {
        let mut out  = Vec::new();
        let answered = InteractiveForm::new(input.as_bytes(), &mut out).run(&EchoContext).unwrap();
        (answered, String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_blank_paper_text_uses_abstract() {
        let (answered, out) = run_form("What is BERT?\nBERT is a transformer model.\n\n");
        assert_eq!(answered, 1);
        assert!(out.starts_with(TITLE));
        assert!(out.contains("Answer: BERT is a transformer model.\n"));
    }

    #[test]
    fn test_paper_text_used_when_given() {
        let (_, out) = run_form("Q\nabstract\n\nfull text\r\n");
        assert!(out.contains("Answer: full text\n"));
    }

    #[test]
    fn test_multi_line_abstract_with_blank_paper_text() {
        let (answered, out) =
            run_form("What is BERT?\nBERT is a transformer model.\nIt is pretrained on books.\n\n\n");
        assert_eq!(answered, 1);
        assert!(out.contains("Answer: BERT is a transformer model.\nIt is pretrained on books.\n"));
        assert!(!out.contains("Answer: It is pretrained"));
        assert!(!out.contains("Error:"));
    }

    #[test]
    fn test_multi_line_paper_text_then_next_round() {
        let (answered, out) = run_form("Q\nabstract\n\nline one\r\nline two\n\nQ2\nsecond abstract\n\n");
        assert_eq!(answered, 2);
        assert!(out.contains("Answer: line one\nline two\n"));
        assert!(out.contains("Answer: second abstract\n"));
    }

    #[test]
    fn test_paper_text_read_from_file() {
        let dir = std::env::temp_dir().join(format!("paper-qa-form-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("paper.txt");
        std::fs::write(&path, "Intro.\n\nWe propose a trans-\nformer.\n").unwrap();

        let (answered, out) = run_form(&format!("Q\nabstract\n\n@{}\n\n", path.display()));
        std::fs::remove_dir_all(&dir).unwrap();

        assert_eq!(answered, 1);
        assert!(out.contains("Answer: Intro.\n\nWe propose a transformer.\n"));
    }

    #[test]
    fn test_unreadable_file_keeps_form_open() {
        let (answered, out) = run_form("Q\nabstract\n\n@does/not/exist.txt\n\nQ2\nabstract two\n\n");
        assert_eq!(answered, 1);
        assert!(out.contains("Error: Cannot read 'does/not/exist.txt'"));
        assert!(out.contains("Answer: abstract two\n"));
    }

    #[test]
    fn test_missing_context_keeps_form_open() {
        let (answered, out) = run_form("Q\n\n\nQ2\nabstract two\n\n");
        assert_eq!(answered, 1);
        assert!(out.contains("Error: missing context"));
        assert!(out.contains("Answer: abstract two\n"));
    }

    #[test]
    fn test_eof_mid_round_ends_quietly() {
        let (answered, out) = run_form("Only a question\n");
        assert_eq!(answered, 0);
        assert!(!out.contains("Answer:"));
    }

    #[test]
    fn test_eof_after_abstract_still_answers() {
        let (answered, out) = run_form("Q\nabstract");
        assert_eq!(answered, 1);
        assert!(out.contains("Answer: abstract\n"));
    }
}
