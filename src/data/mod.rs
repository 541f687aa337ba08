// ============================================================
// Layer 4 — Text Data
// ============================================================
// Everything that touches text on its way in or out:
//
//   paper file (.txt / .docx)
//       │
//       ▼
//   PaperFileLoader → reads the file, extracts raw text
//       │
//       ▼
//   Preprocessor    → cleans whitespace, hyphenation, controls
//       │
//       ▼
//   … tokenizer and model …
//       │
//       ▼
//   SpanDecoder     → joins answer tokens back into text

/// Loads .txt / .md / .docx paper files
pub mod loader;

/// Cleans and normalises extracted paper text
pub mod preprocessor;

/// Continuation-aware token-to-text reconstruction
pub mod span_decoder;
