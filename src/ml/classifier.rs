// ============================================================
// Layer 5 — Grade Classifier
// ============================================================
// A small MLP mapping the 3-feature similarity vector
//   [tfidf_similarity, full_similarity, structure_similarity]
// to one of a configured set of discrete grade labels.
//
// The architecture is deliberately tiny — the features are
// already high-level similarity summaries, so a single hidden
// layer is enough capacity. Training happens in an external
// offline job; this crate only rebuilds the architecture and
// loads the exported weights.
//
// The label set travels WITH the weights (in the classifier
// artifact's config JSON) so the artifact is self-describing:
// a 5-label model and a 7-label model can never be confused.
//
// NOTE: #[derive(Config)] already generates Clone and
// Serialize/Deserialize internally — do NOT add them again.

use burn::{
    nn::{Linear, LinearConfig},
    prelude::*,
};

#[derive(Config, Debug)]
pub struct GradeClassifierConfig {
    /// Size of the input feature vector
    #[config(default = 3)]
    pub num_features: usize,

    /// Hidden layer width
    pub hidden_size: usize,

    /// Number of grade labels the model predicts over
    pub num_classes: usize,
}

impl GradeClassifierConfig {
    pub fn init<B: Backend>(&self, device: &B::Device) -> GradeClassifier<B> {
        GradeClassifier {
            input:  LinearConfig::new(self.num_features, self.hidden_size).init(device),
            output: LinearConfig::new(self.hidden_size, self.num_classes).init(device),
        }
    }
}

#[derive(Module, Debug)]
pub struct GradeClassifier<B: Backend> {
    pub input:  Linear<B>,
    pub output: Linear<B>,
}

impl<B: Backend> GradeClassifier<B> {
    /// features: [batch, num_features] → logits: [batch, num_classes]
    pub fn forward(&self, features: Tensor<B, 2>) -> Tensor<B, 2> {
        let hidden = burn::tensor::activation::relu(self.input.forward(features));
        self.output.forward(hidden)
    }

    /// Predict the label index for one feature vector.
    pub fn predict_index(&self, features: Tensor<B, 2>) -> usize {
        let logits = self.forward(features); // [1, num_classes]
        let index: Vec<i64> = logits
            .argmax(1)                        // [1, 1]
            .into_data()
            .to_vec::<i64>()
            .unwrap_or_default();
        index.first().copied().unwrap_or(0) as usize
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::ml::{InferBackend, InferDevice};

    #[test]
    fn test_forward_shapes() {
        let device = InferDevice::default();
        let model  = GradeClassifierConfig::new(8, 5).init::<InferBackend>(&device);
        let input  = Tensor::<InferBackend, 1>::from_floats(
            [0.5f32, 0.8, 0.3].as_slice(), &device,
        ).reshape([1, 3]);
        let logits = model.forward(input);
        assert_eq!(logits.dims(), [1, 5]);
    }

    #[test]
    fn test_predict_index_in_range() {
        let device = InferDevice::default();
        let model  = GradeClassifierConfig::new(8, 5).init::<InferBackend>(&device);
        let input  = Tensor::<InferBackend, 1>::from_floats(
            [0.1f32, 0.9, 0.4].as_slice(), &device,
        ).reshape([1, 3]);
        assert!(model.predict_index(input) < 5);
    }
}
