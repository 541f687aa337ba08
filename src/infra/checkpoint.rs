// ============================================================
// Layer 6 — Checkpoint Loader
// ============================================================
// Restores the span encoder from the model directory:
//
//   models/<name>/
//     model_config.json   ← SpanEncoderConfig (burn Config)
//     model.mpk           ← weights (burn CompactRecorder)
//     tokenizer.json      ← see tokenizer_store.rs
//     qa_config.json      ← optional, see AskConfig
//
// The config is read first so the model can be rebuilt with
// the right architecture before the weights are loaded into it.
//
// Reference: Burn Book §5 (Records and Checkpointing)

use anyhow::{Context, Result};
use burn::{
    prelude::*,
    record::{CompactRecorder, Recorder},
};
use std::path::PathBuf;

use crate::ml::model::{SpanEncoder, SpanEncoderConfig};

/// File stem of the weights record; the recorder adds the extension
const WEIGHTS_STEM: &str = "model";
const CONFIG_FILE:  &str = "model_config.json";

pub struct CheckpointManager {
    dir: PathBuf,
}

impl CheckpointManager {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn config_path(&self) -> PathBuf {
        self.dir.join(CONFIG_FILE)
    }

    pub fn weights_path(&self) -> PathBuf {
        self.dir.join(WEIGHTS_STEM)
    }

    /// Read the model architecture from model_config.json.
    pub fn load_config(&self) -> Result<SpanEncoderConfig> {
        let path = self.config_path();
        SpanEncoderConfig::load(&path).map_err(|e| {
            anyhow::anyhow!("Cannot read model config '{}': {:?}", path.display(), e)
        })
    }

    /// Build the model described by model_config.json and load its weights.
    pub fn load_model<B: Backend>(&self, device: &B::Device) -> Result<SpanEncoder<B>> {
        let config = self.load_config()?;
        let model: SpanEncoder<B> = config.init(device);

        let path   = self.weights_path();
        let record = CompactRecorder::new()
            .load(path.clone(), device)
            .with_context(|| format!("Cannot load weights '{}'", path.display()))?;

        tracing::info!(
            "Model loaded from '{}' ({} layers, d_model={})",
            self.dir.display(),
            config.num_layers,
            config.d_model,
        );
        Ok(model.load_record(record))
    }
}
