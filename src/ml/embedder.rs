// ============================================================
// Layer 5 — Text Embedder
// ============================================================
// Turns a text into one fixed-length vector:
//
//   text → tokenize (truncate to max_seq_len)
//        → encoder forward pass (no autodiff backend, so no
//          gradient bookkeeping)
//        → attention-mask-weighted mean pooling
//
// Mean pooling:
//   pooled = Σ (hidden_state * mask) / clamp(Σ mask, min=1e-9)
// The clamp guards against an all-padding row ever dividing
// by zero. Padding token vectors are zeroed by the mask before
// the sum, so batch padding cannot leak into the embedding.
//
// Failure policy: embed() never fails. Tokenisation errors and
// any other extraction problem are logged and yield a zero
// vector of the expected dimension — grading must degrade, not
// crash. Cosine against a zero vector is 0, so a failed
// embedding simply contributes no semantic score downstream.
//
// Lifecycle: an embedder is loaded at most once per process
// through infra::ModelRegistry; after that it is shared
// read-only across all requests.
//
// Reference: Reimers & Gurevych (2019) Sentence-BERT
//            Devlin et al. (2019) BERT

use anyhow::Result;
use burn::prelude::*;
use tokenizers::Tokenizer;

use crate::domain::traits::EmbeddingSource;
use crate::infra::model_store::ModelStore;
use crate::ml::encoder::TextEncoder;
use crate::ml::{InferBackend, InferDevice};

/// Minimum pooling denominator — guards the all-padding row.
const POOLING_EPSILON: f32 = 1e-9;

pub struct TextEmbedder {
    tokenizer:   Tokenizer,
    encoder:     TextEncoder<InferBackend>,
    device:      InferDevice,
    max_seq_len: usize,
    dimension:   usize,
}

impl TextEmbedder {
    /// Load tokenizer + encoder weights from a model artifact
    /// directory. Called exactly once per process by the registry.
    pub fn load(store: &ModelStore) -> Result<Self> {
        let device    = InferDevice::default();
        let tokenizer = store.load_tokenizer()?;
        let (encoder, spec) = store.load_encoder(&device)?;

        tracing::info!(
            "Text encoder loaded (dim={}, max_seq_len={})",
            spec.d_model, spec.max_seq_len,
        );

        Ok(Self {
            tokenizer,
            encoder,
            device,
            max_seq_len: spec.max_seq_len,
            dimension:   spec.d_model,
        })
    }

    /// Build an embedder from already-constructed parts.
    /// Used by tests and by offline tooling that initialises a
    /// fresh encoder before any weights exist.
    pub fn from_parts(
        tokenizer:   Tokenizer,
        encoder:     TextEncoder<InferBackend>,
        max_seq_len: usize,
        dimension:   usize,
    ) -> Self {
        Self {
            tokenizer,
            encoder,
            device: InferDevice::default(),
            max_seq_len,
            dimension,
        }
    }

    /// The fixed embedding dimension (the encoder's hidden size).
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// Embed one text. Total: returns a zero vector of the
    /// expected dimension on any extraction failure.
    pub fn embed(&self, text: &str) -> Vec<f32> {
        match self.try_embed_batch(&[text]) {
            Ok(mut rows) => rows.pop().unwrap_or_else(|| vec![0.0; self.dimension]),
            Err(e) => {
                tracing::warn!("Embedding failed, returning zero vector: {e}");
                vec![0.0; self.dimension]
            }
        }
    }

    /// Embed several independent texts in one padded forward pass.
    /// Same degradation rule: any failure yields zero vectors.
    pub fn embed_batch(&self, texts: &[&str]) -> Vec<Vec<f32>> {
        match self.try_embed_batch(texts) {
            Ok(rows) => rows,
            Err(e) => {
                tracing::warn!("Batch embedding failed, returning zero vectors: {e}");
                texts.iter().map(|_| vec![0.0; self.dimension]).collect()
            }
        }
    }

    /// The fallible core shared by embed() and embed_batch().
    fn try_embed_batch(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        // ── Step 1: Tokenise each text, truncating to the bound ──────────────
        // The truncation bound is what keeps a pathological input
        // from producing unbounded latency.
        let mut id_rows: Vec<Vec<u32>> = Vec::with_capacity(texts.len());
        for text in texts {
            let enc = self.tokenizer
                .encode(*text, false)
                .map_err(|e| anyhow::anyhow!("tokenise: {e}"))?;
            let mut ids: Vec<u32> = enc.get_ids().to_vec();
            ids.truncate(self.max_seq_len);
            if ids.is_empty() {
                // Whitespace-only input: a single [UNK] keeps the
                // tensor shapes valid; the pooled row is near-zero.
                ids.push(1);
            }
            id_rows.push(ids);
        }

        // ── Step 2: Pad to a common length and build the mask ────────────────
        let batch   = id_rows.len();
        let max_len = id_rows.iter().map(Vec::len).max().unwrap_or(1);

        let mut flat_ids:  Vec<i32> = Vec::with_capacity(batch * max_len);
        let mut flat_mask: Vec<f32> = Vec::with_capacity(batch * max_len);
        for row in &id_rows {
            for &id in row {
                flat_ids.push(id as i32);
                flat_mask.push(1.0);
            }
            for _ in row.len()..max_len {
                flat_ids.push(0); // [PAD]
                flat_mask.push(0.0);
            }
        }

        let input_ids = Tensor::<InferBackend, 1, Int>::from_ints(
            flat_ids.as_slice(), &self.device,
        ).reshape([batch, max_len]);

        let mask = Tensor::<InferBackend, 1>::from_floats(
            flat_mask.as_slice(), &self.device,
        ).reshape([batch, max_len]);

        // ── Step 3: Forward pass + masked mean pooling ────────────────────────
        let hidden = self.encoder.forward(input_ids); // [batch, len, dim]
        let dim    = self.dimension;

        let mask3 = mask.clone()
            .reshape([batch, max_len, 1])
            .expand([batch, max_len, dim]);

        let summed = (hidden * mask3)
            .sum_dim(1)                    // [batch, 1, dim]
            .reshape([batch, dim]);

        let counted = mask
            .sum_dim(1)                    // [batch, 1]
            .clamp_min(POOLING_EPSILON)
            .reshape([batch, 1])
            .expand([batch, dim]);

        let pooled = summed / counted;     // [batch, dim]

        let flat: Vec<f32> = pooled
            .into_data()
            .to_vec::<f32>()
            .map_err(|e| anyhow::anyhow!("pooled tensor readback: {e:?}"))?;

        Ok(flat.chunks(dim).map(|row| row.to_vec()).collect())
    }
}

impl EmbeddingSource for TextEmbedder {
    fn embed(&self, text: &str) -> Option<Vec<f32>> {
        Some(TextEmbedder::embed(self, text))
    }

    fn dimension(&self) -> usize {
        self.dimension
    }
}
