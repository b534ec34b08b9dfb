// ============================================================
// Layer 5 — ML / Model Layer (Burn)
// ============================================================
// This layer contains ALL Burn framework specific code.
// No other layer imports from burn directly — only this one.
//
// Why isolate Burn code here?
//   - If Burn's API changes, we only update this layer
//   - Other layers are testable without any model artifact
//   - The model architectures are clearly separated from
//     scoring logic and application workflow
//
// What's in this layer:
//
//   encoder.rs    — The transformer text encoder
//                   Token + positional embeddings, multi-head
//                   self-attention blocks, layer normalisation.
//                   Outputs per-token hidden states.
//
//   embedder.rs   — The embedding engine
//                   Tokenises with truncation, runs the encoder
//                   without gradient tracking, and mean-pools the
//                   hidden states weighted by the attention mask.
//                   Degrades to a zero vector on any failure.
//
//   classifier.rs — The grade classifier
//                   A small MLP mapping the 3-feature similarity
//                   vector to a discrete grade label.
//
//   predictor.rs  — The prediction engine
//                   Owns the classifier artifact and its
//                   Unloaded → Loaded | LoadFailed state machine.
//                   Returns a sentinel label when load failed.
//
// Inference backend: NdArray (CPU). Grading runs inside request
// handlers on server hardware; deterministic CPU inference with
// no GPU requirement is the operational constraint here.
//
// Reference: Burn Book §3 (Building Blocks)
//            Vaswani et al. (2017) Attention Is All You Need
//            Devlin et al. (2019) BERT

/// Transformer encoder architecture
pub mod encoder;

/// Mean-pooled text embedding engine
pub mod embedder;

/// 3-feature grade classifier architecture
pub mod classifier;

/// Grade prediction engine with load-state machine
pub mod predictor;

/// The CPU inference backend used across this layer.
pub type InferBackend = burn::backend::NdArray;

/// The device instances of InferBackend live on.
pub type InferDevice = burn::backend::ndarray::NdArrayDevice;
