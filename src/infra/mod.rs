// ============================================================
// Layer 6 — Infrastructure Layer
// ============================================================
// Loading of the pretrained artefacts in the model directory:
//
//   checkpoint.rs      — model_config.json + weights record
//   tokenizer_store.rs — tokenizer.json, wrapped as a
//                        QaTokenizer producing BERT pairs

/// Model config and weights loading
pub mod checkpoint;

/// Tokenizer loading and pair assembly
pub mod tokenizer_store;
