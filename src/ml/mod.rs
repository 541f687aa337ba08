// ============================================================
// Layer 5 — ML / Model Layer (Burn)
// ============================================================
// All burn-specific code lives here; the rest of the crate
// sees the model only through the SpanScorer trait.
//
//   model.rs  — transformer encoder with a 2-logit span head
//   scorer.rs — SpanScorer implementation running the encoder
//               over one tokenized pair

/// Transformer encoder Q&A architecture
pub mod model;

/// Per-token start/end scoring with a loaded encoder
pub mod scorer;
