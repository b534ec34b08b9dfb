// ============================================================
// Layer 6 — Model Store
// ============================================================
// Loads the versioned model artifacts from a directory.
//
// Artifact layout (produced by the external training jobs):
//   models/
//     tokenizer.json           ← HuggingFace tokenizer file
//     encoder_config.json      ← encoder architecture
//     encoder.mpk.gz           ← encoder weights
//     classifier_config.json   ← classifier shape + grade labels
//     classifier.mpk.gz        ← classifier weights
//
// Why save the configs separately?
//   When loading for inference, we need to know the exact
//   architecture (d_model, num_layers, hidden_size, ...) to
//   rebuild the model before loading the weights into it.
//   Without the config, we can't reconstruct the model.
//
// Burn's CompactRecorder:
//   - Serialises model parameters to MessagePack format
//   - Compresses with gzip for smaller file size
//   - Type-safe: loading fails if the architecture doesn't match
//
// Versioning/rotation of the directory is the deployment's
// concern; this store reads whatever the path points at, once.
//
// Reference: Burn Book §5 (Records and Checkpointing)
//            Rust Book §9 (Error Handling)

use anyhow::{Context, Result};
use std::{fs, path::PathBuf};
use burn::{
    prelude::*,
    record::{CompactRecorder, Recorder},
};
use serde::{Deserialize, Serialize};
use tokenizers::Tokenizer;

use crate::infra::tokenizer_store::TokenizerStore;
use crate::ml::classifier::{GradeClassifier, GradeClassifierConfig};
use crate::ml::encoder::{TextEncoder, TextEncoderConfig};

/// Architecture description shipped next to the encoder weights.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EncoderSpec {
    pub vocab_size:  usize,
    pub max_seq_len: usize,
    pub d_model:     usize,
    pub num_heads:   usize,
    pub num_layers:  usize,
    pub d_ff:        usize,
}

/// Shape + label set shipped next to the classifier weights.
/// Carrying the labels here keeps the artifact self-describing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassifierSpec {
    pub hidden_size: usize,
    pub labels:      Vec<String>,
}

/// Reads model artifacts from a single directory.
pub struct ModelStore {
    dir: PathBuf,
}

impl ModelStore {
    /// Create a store over an artifact directory. The directory
    /// is not touched until something is loaded from it.
    pub fn new(dir: impl Into<String>) -> Self {
        Self { dir: PathBuf::from(dir.into()) }
    }

    /// Load the tokenizer shipped with the encoder artifact.
    /// Delegates to the TokenizerStore over the same directory —
    /// there is exactly one reader for the tokenizer file.
    pub fn load_tokenizer(&self) -> Result<Tokenizer> {
        TokenizerStore::new(self.dir.clone()).load()
    }

    /// Rebuild the encoder from its config and load its weights.
    ///
    /// Steps:
    ///   1. Read encoder_config.json for the architecture
    ///   2. Initialise a fresh model with that architecture
    ///      (dropout 0 — this is inference only)
    ///   3. Load the recorded weights into it
    pub fn load_encoder<B: Backend>(
        &self,
        device: &B::Device,
    ) -> Result<(TextEncoder<B>, EncoderSpec)> {
        let spec: EncoderSpec = self.read_config("encoder_config.json")?;

        let model = TextEncoderConfig::new(
            spec.vocab_size, spec.max_seq_len, spec.d_model,
            spec.num_heads, spec.num_layers, spec.d_ff, 0.0,
        ).init(device);

        let path = self.dir.join("encoder");
        let record = CompactRecorder::new()
            .load(path.clone(), device)
            .with_context(|| {
                format!("Cannot load encoder weights '{}'", path.display())
            })?;

        Ok((model.load_record(record), spec))
    }

    /// Rebuild the classifier from its config and load its
    /// weights. The label list rides along with the model.
    pub fn load_classifier<B: Backend>(
        &self,
        device: &B::Device,
    ) -> Result<(GradeClassifier<B>, Vec<String>)> {
        let spec: ClassifierSpec = self.read_config("classifier_config.json")?;

        let model = GradeClassifierConfig::new(spec.hidden_size, spec.labels.len())
            .init(device);

        let path = self.dir.join("classifier");
        let record = CompactRecorder::new()
            .load(path.clone(), device)
            .with_context(|| {
                format!("Cannot load classifier weights '{}'", path.display())
            })?;

        Ok((model.load_record(record), spec.labels))
    }

    /// Read and deserialise one JSON config file from the
    /// artifact directory.
    fn read_config<T: for<'de> Deserialize<'de>>(&self, name: &str) -> Result<T> {
        let path = self.dir.join(name);
        let json = fs::read_to_string(&path)
            .with_context(|| {
                format!(
                    "Cannot read '{}'. Is the model artifact directory complete?",
                    path.display()
                )
            })?;
        serde_json::from_str(&json)
            .with_context(|| format!("Malformed config '{}'", path.display()))
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_directory_is_an_error() {
        let store = ModelStore::new("/nonexistent/artifacts");
        assert!(store.load_tokenizer().is_err());
        let device = burn::backend::ndarray::NdArrayDevice::default();
        assert!(store.load_encoder::<burn::backend::NdArray>(&device).is_err());
        assert!(store.load_classifier::<burn::backend::NdArray>(&device).is_err());
    }

    #[test]
    fn test_load_tokenizer_reads_store_built_file() {
        let dir = std::env::temp_dir().join(format!(
            "answer-grader-store-tok-{}",
            std::process::id()
        ));
        TokenizerStore::new(&dir)
            .build_and_save(&["shared artifact".to_string()], 16)
            .unwrap();

        // Same directory, read through the model store
        let store = ModelStore::new(dir.to_string_lossy());
        assert!(store.load_tokenizer().is_ok());
    }

    #[test]
    fn test_specs_roundtrip_json() {
        let spec = EncoderSpec {
            vocab_size: 30522, max_seq_len: 256, d_model: 256,
            num_heads: 8, num_layers: 6, d_ff: 1024,
        };
        let json = serde_json::to_string(&spec).unwrap();
        let back: EncoderSpec = serde_json::from_str(&json).unwrap();
        assert_eq!(back.d_model, 256);

        let cls: ClassifierSpec = serde_json::from_str(
            r#"{ "hidden_size": 16, "labels": ["A", "B", "C", "D", "F"] }"#,
        ).unwrap();
        assert_eq!(cls.labels.len(), 5);
    }
}
