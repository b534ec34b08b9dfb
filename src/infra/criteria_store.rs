// ============================================================
// Layer 6 — Criteria Store
// ============================================================
// Loads grading criteria from a JSON file keyed by assignment
// identifier. This is the single boundary where the two
// historical keyword serialisations are normalised:
//
//   "keywords": ["mitochondria", "ATP"]        (JSON array)
//   "keywords": "mitochondria, ATP"            (comma string)
//
// Both deserialise through the untagged KeywordField enum and
// leave this module as an ordered Vec<String> — no scorer ever
// sees the raw blob.
//
// File format:
//   {
//     "bio-101-essay-2": [
//       { "name": "...", "max_points": 10,
//         "description": "...", "keywords": [...] }
//     ]
//   }
//
// An unknown assignment id yields an empty Vec (the aggregator
// falls back to the basic heuristic score), not an error.
//
// Reference: serde untagged enum representations

use anyhow::{Context, Result};
use serde::Deserialize;
use std::{collections::HashMap, fs, path::PathBuf};

use crate::domain::criterion::{parse_keywords, Criterion};
use crate::domain::traits::CriteriaSource;

/// A stored criterion record before keyword normalisation.
#[derive(Debug, Deserialize)]
struct RawCriterion {
    name: String,
    max_points: f32,
    #[serde(default)]
    description: String,
    #[serde(default)]
    keywords: KeywordField,
}

/// The two accepted keyword serialisations.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum KeywordField {
    List(Vec<String>),
    Blob(String),
}

impl Default for KeywordField {
    fn default() -> Self {
        KeywordField::List(Vec::new())
    }
}

impl KeywordField {
    /// Normalise either form to an ordered keyword list.
    fn into_keywords(self) -> Vec<String> {
        match self {
            KeywordField::List(list) => list
                .into_iter()
                .map(|k| k.trim().to_string())
                .filter(|k| !k.is_empty())
                .collect(),
            KeywordField::Blob(raw) => parse_keywords(&raw),
        }
    }
}

impl From<RawCriterion> for Criterion {
    fn from(raw: RawCriterion) -> Self {
        Criterion::new(
            raw.name,
            raw.max_points,
            raw.description,
            raw.keywords.into_keywords(),
        )
    }
}

/// File-backed criteria store.
pub struct CriteriaStore {
    path: PathBuf,
}

impl CriteriaStore {
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: PathBuf::from(path.into()) }
    }

    /// Parse a criteria document from a JSON string.
    /// Split out from file reading so the parsing is testable
    /// without touching the filesystem.
    fn parse(json: &str) -> Result<HashMap<String, Vec<Criterion>>> {
        let raw: HashMap<String, Vec<RawCriterion>> = serde_json::from_str(json)
            .context("Malformed criteria JSON")?;
        Ok(raw
            .into_iter()
            .map(|(id, list)| (id, list.into_iter().map(Criterion::from).collect()))
            .collect())
    }
}

impl CriteriaSource for CriteriaStore {
    fn criteria_for(&self, assignment_id: &str) -> Result<Vec<Criterion>> {
        let json = fs::read_to_string(&self.path)
            .with_context(|| {
                format!("Cannot read criteria file '{}'", self.path.display())
            })?;
        let mut all = Self::parse(&json)?;
        Ok(all.remove(assignment_id).unwrap_or_default())
    }
}
