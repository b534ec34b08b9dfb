// ============================================================
// Layer 6 — Infrastructure Layer
// ============================================================
// Handles all cross-cutting concerns that don't belong in
// any specific business layer:
//
//   model_store.rs     — Model artifact loading
//                        Uses Burn's CompactRecorder to read
//                        serialised encoder and classifier
//                        weights, plus their JSON config files
//                        so the exact architectures can be
//                        rebuilt before the weights load.
//
//   tokenizer_store.rs — Tokenizer persistence
//                        Loads the tokenizer JSON shipped with
//                        the encoder artifact, or builds a
//                        word-level vocabulary from a corpus
//                        for bootstrap and test use.
//
//   criteria_store.rs  — Grading criteria loading
//                        Reads criteria JSON keyed by
//                        assignment id, normalising the two
//                        historical keyword serialisations at
//                        this boundary.
//
//   registry.rs        — Process-wide model registry
//                        Owns the lazily-initialised embedder
//                        and predictor singletons behind
//                        lock-protected once-cells.
//
// Why is this a separate layer?
//   These concerns are used by multiple other layers but
//   don't belong to any one of them. Keeping them here:
//   - Prevents duplication across layers
//   - Makes it easy to swap implementations
//     (e.g. swap file artifacts for blob storage)
//   - Keeps other layers focused on their core logic
//
// Reference: Rust Book §7 (Modules)
//            Rust Book §9 (Error Handling with anyhow)

/// Model artifact (weights + config) loading
pub mod model_store;

/// Tokenizer loading and bootstrap building
pub mod tokenizer_store;

/// Criteria JSON loading with keyword normalisation
pub mod criteria_store;

/// Lazily-initialised process-wide model singletons
pub mod registry;
