// ============================================================
// Layer 2 — Application / Use Cases
// ============================================================
// Workflow coordination only: no tensor code, no printing,
// no file parsing. The CLI layer builds an AskUseCase and
// hands it PaperQuery values.

// Question answering over a paper's abstract or full text
pub mod ask_use_case;
