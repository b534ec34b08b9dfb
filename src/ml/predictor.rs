// ============================================================
// Layer 5 — Grade Predictor
// ============================================================
// Owns the trained classifier artifact and maps a 3-feature
// similarity vector to a discrete grade label.
//
// State machine:
//
//   Unloaded ──load()──► Loaded      (artifact present + valid)
//            └─────────► LoadFailed  (anything went wrong)
//
// In LoadFailed, predict() always returns the
// GradeLabel::Unavailable sentinel WITHOUT retrying the load —
// a missing artifact would otherwise cost a disk probe on
// every grading request. Callers that rotate the artifact call
// load() again explicitly (via the registry's reload).
//
// Input hygiene: the three features come from upstream float
// arithmetic that can produce NaN (e.g. 0/0 in a degenerate
// similarity). Non-finite inputs are replaced with 0.0 rather
// than propagated — a NaN feature must never turn into a NaN
// score or a panic inside the model.

use crate::domain::report::GradeLabel;
use crate::infra::model_store::ModelStore;
use crate::ml::classifier::GradeClassifier;
use crate::ml::{InferBackend, InferDevice};
use burn::prelude::*;

/// The loaded-or-failed state. There is intentionally no
/// public constructor for Failed — only load() produces it.
enum PredictorState {
    Loaded {
        model:  GradeClassifier<InferBackend>,
        labels: Vec<String>,
    },
    LoadFailed,
}

pub struct GradePredictor {
    state:  PredictorState,
    device: InferDevice,
}

impl GradePredictor {
    /// Load the classifier artifact. This constructor never
    /// returns an error: a failed load produces a predictor in
    /// the LoadFailed state, logged exactly once here.
    pub fn load(store: &ModelStore) -> Self {
        let device = InferDevice::default();
        match store.load_classifier(&device) {
            Ok((model, labels)) => {
                tracing::info!("Grade classifier loaded ({} labels)", labels.len());
                Self { state: PredictorState::Loaded { model, labels }, device }
            }
            Err(e) => {
                tracing::warn!(
                    "Grade classifier unavailable, predictions will return \
                     the sentinel label: {e:#}"
                );
                Self { state: PredictorState::LoadFailed, device }
            }
        }
    }

    /// Build a predictor from already-constructed parts (tests,
    /// offline tooling).
    pub fn from_parts(model: GradeClassifier<InferBackend>, labels: Vec<String>) -> Self {
        Self {
            state:  PredictorState::Loaded { model, labels },
            device: InferDevice::default(),
        }
    }

    /// True when the model artifact loaded successfully.
    pub fn is_loaded(&self) -> bool {
        matches!(self.state, PredictorState::Loaded { .. })
    }

    /// Map the 3-feature vector to a grade label. Never fails:
    /// LoadFailed yields the sentinel, non-finite inputs are
    /// coerced to 0.0.
    pub fn predict(
        &self,
        tfidf_score:          f32,
        full_similarity:      f32,
        structure_similarity: f32,
    ) -> GradeLabel {
        let PredictorState::Loaded { model, labels } = &self.state else {
            return GradeLabel::Unavailable;
        };

        let features = [
            sanitize(tfidf_score),
            sanitize(full_similarity),
            sanitize(structure_similarity),
        ];

        let input = Tensor::<InferBackend, 1>::from_floats(
            features.as_slice(), &self.device,
        ).reshape([1, 3]);

        let index = model.predict_index(input);

        match labels.get(index) {
            Some(label) => GradeLabel::Label(label.clone()),
            None => {
                // A label list shorter than the model head means the
                // artifact config and weights disagree.
                tracing::warn!("Predicted index {index} has no label; artifact mismatch");
                GradeLabel::Unavailable
            }
        }
    }
}

/// Replace NaN/inf with 0.0 so bad upstream arithmetic can
/// only ever cost accuracy, not correctness.
fn sanitize(value: f32) -> f32 {
    if value.is_finite() { value } else { 0.0 }
}
