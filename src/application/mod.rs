// ============================================================
// Layer 2 — Application / Use Cases
// ============================================================
// This layer orchestrates all the other layers to accomplish
// a specific goal (grading a submission, or predicting a
// grade label).
//
// Rules for this layer:
//   - No ML math or model code here
//   - No UI or printing here (that's Layer 1)
//   - No direct file access (that's Layer 6)
//   - Only workflow coordination
//
// Think of this layer as the "director" — it tells other
// layers what to do but doesn't do the work itself.
//
// The two grading paths:
//
//   GradeUseCase    raw text → normalize → feature extractors
//                   → criterion aggregation → suggestions
//                   (the main, explainable scoring path)
//
//   PredictUseCase  raw text + reference → normalize
//                   → [tfidf, full, structure] similarities
//                   → trained classifier → grade label
//                   (the auxiliary, model-driven path)
//
// Reference: Clean Architecture pattern
//            Rust Book §7 (Module System)

// The criterion-weighted grading workflow
pub mod grade_use_case;

// The trained-model label prediction workflow
pub mod predict_use_case;
