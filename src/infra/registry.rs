// ============================================================
// Layer 6 — Model Registry
// ============================================================
// Owns the two expensive, process-wide model singletons:
// the text embedder and the grade predictor.
//
// Requirements this satisfies:
//   - Load each artifact at most ONCE per process, lazily
//   - Concurrent first use from multiple request threads must
//     not race to double-load (OnceCell::get_or_init holds an
//     internal lock during initialisation; late arrivals block
//     and then see the single loaded instance)
//   - After init, everything is shared read-only (Arc)
//   - Availability is an explicit capability flag the caller
//     branches on once, not a runtime probe scattered through
//     the scoring logic
//   - The predictor supports explicit reload (artifact
//     rotation), which is why it sits behind an RwLock rather
//     than a plain once-cell
//
// The registry is built by the application lifecycle (main, or
// the web collaborator's startup) and handed down as a
// dependency — there is no global static here.
//
// Reference: once_cell docs (sync::OnceCell)
//            Rust Book §16 (Shared-State Concurrency)

use once_cell::sync::OnceCell;
use std::sync::{Arc, RwLock};

use crate::infra::model_store::ModelStore;
use crate::ml::embedder::TextEmbedder;
use crate::ml::predictor::GradePredictor;

pub struct ModelRegistry {
    store: ModelStore,

    /// None inside the cell = embedding capability absent.
    /// The cell itself distinguishes "not yet tried" from
    /// "tried and failed".
    embedder: OnceCell<Option<Arc<TextEmbedder>>>,

    /// The predictor is always constructible (a failed load
    /// yields a sentinel-returning instance); RwLock allows
    /// explicit reload after artifact rotation.
    predictor: RwLock<Option<Arc<GradePredictor>>>,
}

impl ModelRegistry {
    /// Create a registry over a model artifact directory.
    /// Nothing is loaded until first use (or warm_up()).
    pub fn new(model_dir: impl Into<String>) -> Self {
        Self {
            store:     ModelStore::new(model_dir),
            embedder:  OnceCell::new(),
            predictor: RwLock::new(None),
        }
    }

    /// Get the shared embedder, loading it on first call.
    /// Returns None when the deployment has no usable encoder
    /// artifact — callers treat that as "semantic scoring off".
    pub fn embedder(&self) -> Option<Arc<TextEmbedder>> {
        self.embedder
            .get_or_init(|| match TextEmbedder::load(&self.store) {
                Ok(e) => Some(Arc::new(e)),
                Err(e) => {
                    // Logged once; every later call hits the cached None.
                    tracing::warn!(
                        "Embedding model unavailable, semantic scoring \
                         disabled: {e:#}"
                    );
                    None
                }
            })
            .clone()
    }

    /// The embedding capability flag. Resolving it forces the
    /// lazy load, so call this at startup to fail fast in logs.
    pub fn embedding_available(&self) -> bool {
        self.embedder().is_some()
    }

    /// True once the embedder lazy-load has been attempted,
    /// whatever the outcome. Does NOT force the load.
    pub fn embedder_resolved(&self) -> bool {
        self.embedder.get().is_some()
    }

    /// Get the shared grade predictor, loading it on first call.
    /// Always returns an instance; a failed load yields one that
    /// answers with the sentinel label.
    pub fn predictor(&self) -> Arc<GradePredictor> {
        // Fast path: already initialised
        if let Some(p) = self.predictor.read().expect("predictor lock poisoned").as_ref() {
            return Arc::clone(p);
        }

        // Slow path: take the write lock and double-check, so
        // concurrent first calls still load exactly once.
        let mut guard = self.predictor.write().expect("predictor lock poisoned");
        if let Some(p) = guard.as_ref() {
            return Arc::clone(p);
        }
        let loaded = Arc::new(GradePredictor::load(&self.store));
        *guard = Some(Arc::clone(&loaded));
        loaded
    }

    /// Drop the cached predictor and load the artifact again.
    /// Used after artifact rotation; in-flight requests keep the
    /// old Arc until they finish.
    pub fn reload_predictor(&self) -> Arc<GradePredictor> {
        let loaded = Arc::new(GradePredictor::load(&self.store));
        let mut guard = self.predictor.write().expect("predictor lock poisoned");
        *guard = Some(Arc::clone(&loaded));
        loaded
    }

    /// Resolve both capabilities eagerly. Called at startup so
    /// missing artifacts show up in logs before the first
    /// grading request.
    pub fn warm_up(&self) {
        let embedding = self.embedding_available();
        let predictor = self.predictor().is_loaded();
        tracing::info!(
            "Model registry ready (embedding: {}, predictor: {})",
            if embedding { "available" } else { "unavailable" },
            if predictor { "loaded" } else { "unavailable" },
        );
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::report::GradeLabel;

    #[test]
    fn test_missing_artifacts_degrade() {
        let reg = ModelRegistry::new("/nonexistent/models");
        assert!(reg.embedder().is_none());
        assert!(!reg.embedding_available());
        // The predictor still exists and answers with the sentinel
        let p = reg.predictor();
        assert!(!p.is_loaded());
        assert_eq!(p.predict(0.5, 0.5, 0.5), GradeLabel::Unavailable);
    }

    #[test]
    fn test_singletons_are_shared() {
        let reg = ModelRegistry::new("/nonexistent/models");
        let a = reg.predictor();
        let b = reg.predictor();
        assert!(Arc::ptr_eq(&a, &b));
    }

    #[test]
    fn test_reload_replaces_instance() {
        let reg = ModelRegistry::new("/nonexistent/models");
        let before = reg.predictor();
        let after  = reg.reload_predictor();
        assert!(!Arc::ptr_eq(&before, &after));
        assert!(Arc::ptr_eq(&after, &reg.predictor()));
    }

    #[test]
    fn test_concurrent_first_use_loads_once() {
        let reg = Arc::new(ModelRegistry::new("/nonexistent/models"));
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let reg = Arc::clone(&reg);
                std::thread::spawn(move || reg.predictor())
            })
            .collect();
        let instances: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        for pair in instances.windows(2) {
            assert!(Arc::ptr_eq(&pair[0], &pair[1]));
        }
    }
}
