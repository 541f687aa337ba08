// ============================================================
// Layer 1 — CLI Commands and Arguments
// ============================================================
// Two subcommands:
//   ask  — answer one question given on the command line
//   form — interactive prompt loop on stdin/stdout
//
// Both share the model flags in ModelArgs.

use anyhow::Result;
use clap::{Args, Subcommand};
use std::path::PathBuf;

use crate::application::ask_use_case::AskConfig;
use crate::data::loader::PaperFileLoader;
use crate::domain::error::QaError;
use crate::domain::paper::PaperQuery;
use crate::domain::traits::DocumentSource;

pub const DEFAULT_MODEL_DIR: &str = "models/bert-large-uncased-whole-word-masking-finetuned-squad";

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Answer a single question about a paper
    Ask(AskArgs),

    /// Open the interactive question form
    Form(FormArgs),
}

/// Where the pretrained model lives and how to feed it.
#[derive(Args, Debug, Clone)]
pub struct ModelArgs {
    /// Directory with tokenizer.json, model_config.json and the weights
    #[arg(long, default_value = DEFAULT_MODEL_DIR)]
    pub model_dir: PathBuf,

    /// Longest question + context sequence in tokens, special tokens included
    /// (overrides qa_config.json)
    #[arg(long)]
    pub max_seq_len: Option<usize>,

    /// Marker of sub-word continuation tokens, e.g. "##"
    /// (overrides qa_config.json)
    #[arg(long)]
    pub continuation_prefix: Option<String>,
}

impl ModelArgs {
    /// qa_config.json from the model directory, with flag overrides applied.
    pub fn resolve_config(&self) -> Result<AskConfig> {
        let file_config = AskConfig::load_or_default(&self.model_dir)?;
        Ok(self.apply_overrides(file_config))
    }

    fn apply_overrides(&self, mut config: AskConfig) -> AskConfig {
        if let Some(len) = self.max_seq_len {
            config.max_seq_len = len;
        }
        if let Some(prefix) = &self.continuation_prefix {
            config.decode.continuation_prefix = prefix.clone();
        }
        config
    }
}

#[derive(Args, Debug)]
pub struct AskArgs {
    #[command(flatten)]
    pub model: ModelArgs,

    /// The question to answer
    #[arg(long)]
    pub question: String,

    /// The paper's abstract
    #[arg(long = "abstract", conflicts_with = "abstract_file")]
    pub abstract_text: Option<String>,

    /// Read the abstract from a .txt, .md or .docx file
    #[arg(long)]
    pub abstract_file: Option<PathBuf>,

    /// The paper's full text; when given it is used instead of the abstract
    #[arg(long, conflicts_with = "paper_file")]
    pub paper_text: Option<String>,

    /// Read the full text from a .txt, .md or .docx file
    #[arg(long)]
    pub paper_file: Option<PathBuf>,
}

impl AskArgs {
    /// Build the query, reading any passage given as a file.
    ///
    /// Fails with `QaError::EmptyContext` when neither passage has
    /// any text, so no model is loaded for a request that cannot be
    /// answered.
    pub fn to_query(&self) -> Result<PaperQuery> {
        let abstract_text = passage(&self.abstract_text, &self.abstract_file)?.unwrap_or_default();
        let paper_text    = passage(&self.paper_text, &self.paper_file)?;
        let query = PaperQuery::new(self.question.clone(), abstract_text, paper_text);
        if !query.has_context() {
            return Err(QaError::EmptyContext.into());
        }
        Ok(query)
    }
}

#[derive(Args, Debug)]
pub struct FormArgs {
    #[command(flatten)]
    pub model: ModelArgs,
}

/// Inline text is used verbatim; file contents go through the loader.
fn passage(inline: &Option<String>, file: &Option<PathBuf>) -> Result<Option<String>> {
    match (inline, file) {
        (Some(text), _)    => Ok(Some(text.clone())),
        (None, Some(path)) => Ok(Some(PaperFileLoader::new(path).load()?.text)),
        (None, None)       => Ok(None),
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::Cli;
    use clap::Parser;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("paper-qa").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_ask_defaults() {
        let cli = parse(&["ask", "--question", "What is BERT?", "--abstract", "BERT is a model."]);
        let Commands::Ask(args) = cli.command else { panic!("expected ask") };
        assert_eq!(args.model.model_dir, PathBuf::from(DEFAULT_MODEL_DIR));
        let query = args.to_query().unwrap();
        assert_eq!(query.context(), "BERT is a model.");
        assert_eq!(query.paper_text, None);
    }

    #[test]
    fn test_inline_paper_text_kept_verbatim() {
        let cli = parse(&["ask", "--question", "Q", "--abstract", "A", "--paper-text", "  spaced  "]);
        let Commands::Ask(args) = cli.command else { panic!("expected ask") };
        assert_eq!(args.to_query().unwrap().context(), "  spaced  ");
    }

    #[test]
    fn test_missing_context_rejected_before_loading() {
        let cli = parse(&["ask", "--question", "Q", "--abstract", "", "--paper-text", ""]);
        let Commands::Ask(args) = cli.command else { panic!("expected ask") };
        let err = args.to_query().unwrap_err();
        assert_eq!(err.downcast_ref::<QaError>(), Some(&QaError::EmptyContext));

        let cli = parse(&["ask", "--question", "Q"]);
        let Commands::Ask(args) = cli.command else { panic!("expected ask") };
        assert!(args.to_query().is_err());
    }

    #[test]
    fn test_abstract_and_abstract_file_conflict() {
        let result = Cli::try_parse_from([
            "paper-qa", "ask", "--question", "Q", "--abstract", "A", "--abstract-file", "a.txt",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_flag_overrides() {
        let cli = parse(&["form", "--max-seq-len", "256", "--continuation-prefix", "@@"]);
        let Commands::Form(args) = cli.command else { panic!("expected form") };
        let cfg = args.model.apply_overrides(AskConfig::default());
        assert_eq!(cfg.max_seq_len, 256);
        assert_eq!(cfg.decode.continuation_prefix, "@@");
        assert_eq!(cfg.decode.cls_token, "[CLS]");
    }
}
