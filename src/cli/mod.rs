// ============================================================
// Layer 1 — CLI / Presentation Layer
// ============================================================
// Parses arguments with clap and routes to the use case.
//
//   1. `ask`  — answer one question and print it
//   2. `form` — interactive question form on the terminal

pub mod commands;
pub mod form;

use anyhow::Result;
use clap::Parser;
use commands::{AskArgs, Commands, FormArgs, ModelArgs};

use crate::application::ask_use_case::AskUseCase;
use crate::domain::traits::QuestionAnswerer;
use form::InteractiveForm;

#[derive(Parser, Debug)]
#[command(
    name = "paper-qa",
    version,
    about = "Ask questions to a research paper: extracts the answer from its abstract or full text."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    pub fn run(self) -> Result<()> {
        match self.command {
            Commands::Ask(args)  => run_ask(args),
            Commands::Form(args) => run_form(args),
        }
    }
}

fn load_use_case(model: &ModelArgs) -> Result<impl QuestionAnswerer> {
    let config = model.resolve_config()?;
    tracing::info!("Loading model from '{}'", model.model_dir.display());
    AskUseCase::from_model_dir(&model.model_dir, &config)
}

fn run_ask(args: AskArgs) -> Result<()> {
    // Rejects a request without context before the model is loaded
    let query    = args.to_query()?;
    let use_case = load_use_case(&args.model)?;

    let answer = use_case.answer(&query)?;
    println!("\nAnswer: {}", answer);
    Ok(())
}

fn run_form(args: FormArgs) -> Result<()> {
    let use_case = load_use_case(&args.model)?;

    let stdin  = std::io::stdin();
    let stdout = std::io::stdout();
    let answered = InteractiveForm::new(stdin.lock(), stdout.lock()).run(&use_case)?;

    tracing::info!("Form closed after {} answers", answered);
    Ok(())
}
