// ============================================================
// Layer 5 — Span Encoder
// ============================================================
// Transformer encoder with an extractive Q&A head:
//
//   ids ──► token emb ─┐
//   pos ──► pos emb ───┼─► + ─► LayerNorm ─► N × EncoderBlock ─► Linear(d, 2)
//   seg ──► segment emb┘                                           │
//                                                   start_logits ◄─┴─► end_logits
//
// Segment ids mark which half of the pair a token belongs to:
// 0 for [CLS] question [SEP], 1 for context [SEP].
//
// Reference: Vaswani et al. (2017) Attention Is All You Need
//            Devlin et al. (2019) BERT

use burn::{
    nn::{
        attention::{MhaInput, MultiHeadAttention, MultiHeadAttentionConfig},
        Dropout, DropoutConfig,
        Embedding, EmbeddingConfig,
        LayerNorm, LayerNormConfig,
        Linear, LinearConfig,
    },
    prelude::*,
};

/// Number of segment ids (question, context)
const SEGMENTS: usize = 2;

// NOTE: #[derive(Config)] already generates Clone and Serialize/Deserialize.
#[derive(Config, Debug)]
pub struct SpanEncoderConfig {
    pub vocab_size:  usize,
    pub max_seq_len: usize,
    pub d_model:     usize,
    pub num_heads:   usize,
    pub num_layers:  usize,
    pub d_ff:        usize,
    #[config(default = 0.0)]
    pub dropout:     f64,
}

impl SpanEncoderConfig {
    pub fn init<B: Backend>(&self, device: &B::Device) -> SpanEncoder<B> {
        let layers = (0..self.num_layers)
            .map(|_| self.build_encoder_block(device))
            .collect();
        SpanEncoder {
            token_embedding:    EmbeddingConfig::new(self.vocab_size, self.d_model).init(device),
            position_embedding: EmbeddingConfig::new(self.max_seq_len, self.d_model).init(device),
            segment_embedding:  EmbeddingConfig::new(SEGMENTS, self.d_model).init(device),
            embedding_norm:     LayerNormConfig::new(self.d_model).init(device),
            layers,
            qa_head:            LinearConfig::new(self.d_model, 2).init(device),
            dropout:            DropoutConfig::new(self.dropout).init(),
            vocab_size:         self.vocab_size,
            max_seq_len:        self.max_seq_len,
        }
    }

    fn build_encoder_block<B: Backend>(&self, device: &B::Device) -> EncoderBlock<B> {
        EncoderBlock {
            self_attn:   MultiHeadAttentionConfig::new(self.d_model, self.num_heads)
                .with_dropout(self.dropout)
                .init(device),
            ffn_linear1: LinearConfig::new(self.d_model, self.d_ff).init(device),
            ffn_linear2: LinearConfig::new(self.d_ff, self.d_model).init(device),
            norm1:       LayerNormConfig::new(self.d_model).init(device),
            norm2:       LayerNormConfig::new(self.d_model).init(device),
            dropout:     DropoutConfig::new(self.dropout).init(),
        }
    }
}

/// Post-norm encoder block: attention and GELU feed-forward,
/// each wrapped in a residual connection.
#[derive(Module, Debug)]
pub struct EncoderBlock<B: Backend> {
    pub self_attn:   MultiHeadAttention<B>,
    pub ffn_linear1: Linear<B>,
    pub ffn_linear2: Linear<B>,
    pub norm1:       LayerNorm<B>,
    pub norm2:       LayerNorm<B>,
    pub dropout:     Dropout,
}

impl<B: Backend> EncoderBlock<B> {
    pub fn forward(&self, x: Tensor<B, 3>) -> Tensor<B, 3> {
        let attn = self.self_attn.forward(MhaInput::self_attn(x.clone())).context;
        let x    = self.norm1.forward(x + self.dropout.forward(attn));
        let ffn  = self.ffn_linear2.forward(
            burn::tensor::activation::gelu(self.ffn_linear1.forward(x.clone())),
        );
        self.norm2.forward(x + self.dropout.forward(ffn))
    }
}

#[derive(Module, Debug)]
pub struct SpanEncoder<B: Backend> {
    pub token_embedding:    Embedding<B>,
    pub position_embedding: Embedding<B>,
    pub segment_embedding:  Embedding<B>,
    pub embedding_norm:     LayerNorm<B>,
    pub layers:             Vec<EncoderBlock<B>>,
    pub qa_head:            Linear<B>,
    pub dropout:            Dropout,
    pub vocab_size:         usize,
    pub max_seq_len:        usize,
}

/// Raw start / end logits, shape [batch, seq_len] each.
pub struct SpanLogits<B: Backend> {
    pub start_logits: Tensor<B, 2>,
    pub end_logits:   Tensor<B, 2>,
}

impl<B: Backend> SpanEncoder<B> {
    /// input_ids, segment_ids: [batch, seq_len] → logits [batch, seq_len]
    pub fn forward(
        &self,
        input_ids:   Tensor<B, 2, Int>,
        segment_ids: Tensor<B, 2, Int>,
    ) -> SpanLogits<B> {
        let [batch_size, seq_len] = input_ids.dims();

        let tok_emb = self.token_embedding.forward(input_ids);
        let seg_emb = self.segment_embedding.forward(segment_ids);
        let positions = Tensor::<B, 1, Int>::arange(0..seq_len as i64, &tok_emb.device())
            .unsqueeze::<2>()
            .expand([batch_size, seq_len]);
        let pos_emb = self.position_embedding.forward(positions);

        let mut x = self.dropout.forward(
            self.embedding_norm.forward(tok_emb + pos_emb + seg_emb),
        );
        for layer in &self.layers {
            x = layer.forward(x);
        }

        let logits = self.qa_head.forward(x); // [batch, seq_len, 2]
        let start_logits = logits.clone()
            .slice([0..batch_size, 0..seq_len, 0..1])
            .reshape([batch_size, seq_len]);
        let end_logits = logits
            .slice([0..batch_size, 0..seq_len, 1..2])
            .reshape([batch_size, seq_len]);

        SpanLogits { start_logits, end_logits }
    }
}
