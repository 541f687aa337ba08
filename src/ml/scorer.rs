// ============================================================
// Layer 5 — Burn Scorer
// ============================================================
// Runs the span encoder over one tokenized (question, context)
// pair and returns the raw start / end logits per position.
//
// Logits are returned as is: softmax is monotonic, so the
// argmax positions do not change with normalisation.

use anyhow::{ensure, Result};
use burn::prelude::*;

use crate::domain::encoding::RelevanceScores;
use crate::domain::traits::SpanScorer;
use crate::infra::checkpoint::CheckpointManager;
use crate::ml::model::SpanEncoder;

pub struct BurnScorer<B: Backend> {
    model:  SpanEncoder<B>,
    device: B::Device,
    /// Separator id; everything after the first one is context
    sep_id: u32,
}

impl<B: Backend> BurnScorer<B> {
    pub fn new(model: SpanEncoder<B>, device: B::Device, sep_id: u32) -> Self {
        Self { model, device, sep_id }
    }

    pub fn from_checkpoint(ckpt: &CheckpointManager, device: B::Device, sep_id: u32) -> Result<Self> {
        let model = ckpt.load_model::<B>(&device)?;
        Ok(Self::new(model, device, sep_id))
    }

    fn int_tensor(&self, values: &[i32]) -> Tensor<B, 2, Int> {
        Tensor::<B, 1, Int>::from_ints(values, &self.device).reshape([1, values.len()])
    }
}

impl<B: Backend> SpanScorer for BurnScorer<B> {
    fn score(&self, ids: &[u32]) -> Result<RelevanceScores> {
        let seq_len = ids.len();
        ensure!(seq_len > 0, "cannot score an empty sequence");
        ensure!(
            seq_len <= self.model.max_seq_len,
            "sequence of {} tokens exceeds the model limit of {}",
            seq_len,
            self.model.max_seq_len
        );
        if let Some(&bad) = ids.iter().find(|&&id| id as usize >= self.model.vocab_size) {
            anyhow::bail!(
                "token id {} is outside the model vocabulary ({} entries)",
                bad,
                self.model.vocab_size
            );
        }

        let input_ids: Vec<i32> = ids.iter().map(|&x| x as i32).collect();
        let segments            = segment_ids(ids, self.sep_id);

        let output = self.model.forward(self.int_tensor(&input_ids), self.int_tensor(&segments));

        let start = to_vec(output.start_logits.reshape([seq_len]))?;
        let end   = to_vec(output.end_logits.reshape([seq_len]))?;

        Ok(RelevanceScores::new(start, end))
    }
}

fn to_vec<B: Backend>(tensor: Tensor<B, 1>) -> Result<Vec<f32>> {
    tensor
        .into_data()
        .convert::<f32>()
        .to_vec::<f32>()
        .map_err(|e| anyhow::anyhow!("Cannot read logits: {e:?}"))
}

/// 0 up to and including the first separator, 1 afterwards.
fn segment_ids(ids: &[u32], sep_id: u32) -> Vec<i32> {
    let mut segment = 0;
    ids.iter()
        .map(|&id| {
            let current = segment;
            if id == sep_id {
                segment = 1;
            }
            current
        })
        .collect()
}
