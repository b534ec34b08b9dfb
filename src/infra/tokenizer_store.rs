// ============================================================
// Layer 6 — Tokenizer Store
// ============================================================
// Owns the tokenizer side of the model artifact directory:
// loading the tokenizer JSON shipped with the encoder (the
// path every grading request takes, via ModelStore), and
// building a fresh word-level vocabulary from a corpus for
// bootstrap and test use.
//
// In tokenizers 0.15, train_from_files requires Trainer::Model
// to equal ModelWrapper. The correct approach here is to build
// the tokenizer JSON manually and load it, bypassing the
// trainer type mismatch entirely — the grading vocabulary is a
// plain word-frequency cut, no subword merges needed.
//
// Reference: Sennrich et al. (2016) BPE paper (for contrast —
//            we deliberately do NOT need BPE here)

use anyhow::{Context, Result};
use serde_json::{json, Map, Value};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tokenizers::Tokenizer;

/// Fixed special-token ids, shared with the external training
/// jobs (BERT convention). The embedder pads with [PAD]=0 and
/// substitutes [UNK]=1 for empty encodings, so these ids are a
/// contract, not a choice.
const SPECIAL_TOKENS: [(&str, u32); 5] = [
    ("[PAD]", 0),
    ("[UNK]", 1),
    ("[CLS]", 101),
    ("[SEP]", 102),
    ("[MASK]", 103),
];

/// First id handed to a corpus word.
const FIRST_WORD_ID: u32 = 104;

pub struct TokenizerStore {
    dir: PathBuf,
}

impl TokenizerStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn file_path(&self) -> PathBuf {
        self.dir.join("tokenizer.json")
    }

    /// Load the tokenizer JSON from the artifact directory.
    pub fn load(&self) -> Result<Tokenizer> {
        load_file(&self.file_path())
    }

    /// Build a word-level vocabulary from corpus texts and write
    /// a tokenizer JSON in the format Tokenizer::from_file expects.
    pub fn build_and_save(&self, texts: &[String], vocab_size: usize) -> Result<Tokenizer> {
        std::fs::create_dir_all(&self.dir).ok();

        let words = ranked_words(texts, vocab_size.saturating_sub(SPECIAL_TOKENS.len()));

        // Specials keep their fixed ids; corpus words follow by rank
        let mut vocab = Map::new();
        for (token, id) in SPECIAL_TOKENS {
            vocab.insert(token.to_string(), json!(id));
        }
        for (rank, word) in words.iter().enumerate() {
            vocab.insert(word.clone(), json!(FIRST_WORD_ID + rank as u32));
        }

        let added_tokens: Vec<Value> = SPECIAL_TOKENS
            .iter()
            .map(|(token, id)| {
                json!({
                    "id": id, "content": token,
                    "single_word": false, "lstrip": false, "rstrip": false,
                    "normalized": false, "special": true,
                })
            })
            .collect();

        let document = json!({
            "version": "1.0",
            "truncation": null,
            "padding": null,
            "added_tokens": added_tokens,
            "normalizer": {
                "type": "BertNormalizer",
                "clean_text": true,
                "handle_chinese_chars": true,
                "strip_accents": null,
                "lowercase": true
            },
            "pre_tokenizer": { "type": "Whitespace" },
            "post_processor": null,
            "decoder": null,
            "model": {
                "type": "WordLevel",
                "vocab": vocab,
                "unk_token": "[UNK]"
            }
        });

        let path = self.file_path();
        std::fs::write(&path, serde_json::to_string_pretty(&document)?)
            .with_context(|| format!("Cannot write tokenizer '{}'", path.display()))?;

        tracing::info!(
            "Tokenizer built ({} words) at '{}'",
            words.len(),
            path.display()
        );

        // Load back as a proper Tokenizer instance
        load_file(&path)
    }
}

fn load_file(path: &Path) -> Result<Tokenizer> {
    Tokenizer::from_file(path).map_err(|e| {
        anyhow::anyhow!("Cannot load tokenizer from '{}': {}", path.display(), e)
    })
}

/// The vocabulary cut: lowercased words ranked by frequency,
/// ties broken alphabetically so a rebuild over the same corpus
/// always assigns the same ids.
fn ranked_words(texts: &[String], limit: usize) -> Vec<String> {
    let mut freq: BTreeMap<String, usize> = BTreeMap::new();
    for text in texts {
        for raw in text.split_whitespace() {
            let word = raw.to_lowercase();
            let word = word.trim_matches(|c: char| !c.is_alphanumeric());
            if !word.is_empty() {
                *freq.entry(word.to_string()).or_default() += 1;
            }
        }
    }

    let mut ranked: Vec<(String, usize)> = freq.into_iter().collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    ranked.truncate(limit);
    ranked.into_iter().map(|(word, _)| word).collect()
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_and_reload() {
        let dir = std::env::temp_dir()
            .join(format!("answer-grader-tok-{}", std::process::id()));
        let store = TokenizerStore::new(&dir);
        let texts = vec!["the cell divides the cell the grows".to_string()];
        let tok = store.build_and_save(&texts, 32).unwrap();

        let enc = tok.encode("the cell", false).unwrap();
        assert_eq!(enc.get_ids().len(), 2);
        // "the" (freq 3) outranks every other word → first word id
        assert_eq!(enc.get_ids()[0], FIRST_WORD_ID);

        // And load() finds the same file again
        assert!(store.load().is_ok());
    }

    #[test]
    fn test_unknown_words_map_to_unk() {
        let dir = std::env::temp_dir()
            .join(format!("answer-grader-tok-unk-{}", std::process::id()));
        let store = TokenizerStore::new(&dir);
        let tok = store
            .build_and_save(&["known words only".to_string()], 32)
            .unwrap();
        let enc = tok.encode("zzzunknown", false).unwrap();
        assert_eq!(enc.get_ids(), &[1]); // [UNK]
    }

    #[test]
    fn test_ranking_breaks_ties_alphabetically() {
        let words = ranked_words(&["beta alpha beta alpha".to_string()], 10);
        assert_eq!(words, vec!["alpha", "beta"]);

        // Frequency still dominates the alphabetical tie-break
        let words = ranked_words(&["zeta zeta alpha".to_string()], 10);
        assert_eq!(words, vec!["zeta", "alpha"]);
    }

    #[test]
    fn test_vocab_size_limit_reserves_special_slots() {
        let words = ranked_words(&["a b c d e f".to_string()], 3);
        assert_eq!(words.len(), 3);
    }
}
