// ============================================================
// Layer 4 — Text Normalizer
// ============================================================
// Cleans raw text handed over by the OCR collaborator before
// any scoring runs.
//
// Why do we need to clean OCR text?
//   Scanned handwriting produces:
//   - Stray symbols from smudges and ruled lines (| ~ ^ `)
//   - Runs of whitespace where line breaks were detected
//   - Digit/letter confusions inside words: "c0mplete",
//     "bi1ogy", "cla55" — the OCR engine picks the digit
//     glyph when the handwriting is ambiguous
//
// Cleaning steps (applied in order):
//   1. Strip characters outside the allow-list
//      (word characters, sentence punctuation . , ; : ! ? - ( ))
//   2. Collapse consecutive whitespace to single spaces
//   3. Context-guarded confusion fixes: 0→O, 1→I, 5→S, but
//      ONLY when the digit sits between two ASCII letters —
//      "10 points" must keep its digits, "c0mplete" must not.
//
// normalize() is a total function: it never fails, and returns
// an empty string for empty or whitespace-only input.
//
// Reference: Rust Book §8 (Strings in Rust)
//            Rust Book §13 (Iterators)

/// Normalizes raw OCR text for downstream feature extraction.
pub struct TextNormalizer;

impl TextNormalizer {
    /// Create a new TextNormalizer instance
    pub fn new() -> Self {
        Self
    }

    /// Clean a raw text string. Takes a &str and returns an
    /// owned String; the result is immutable for the rest of
    /// the pipeline run.
    pub fn normalize(&self, raw: &str) -> String {
        // ── Step 1: Drop characters outside the allow-list ────────────────────
        // Word characters (alphanumeric + underscore), whitespace,
        // and sentence punctuation survive; everything else is an
        // OCR artifact and is removed outright.
        let allowed: String = raw
            .chars()
            .filter(|&c| {
                c.is_alphanumeric()
                    || c == '_'
                    || c.is_whitespace()
                    || matches!(c, '.' | ',' | ';' | ':' | '!' | '?' | '-' | '(' | ')')
            })
            .collect();

        // ── Step 2: Collapse whitespace runs ─────────────────────────────────
        // split_whitespace() handles spaces, tabs, and newlines in
        // one pass and drops leading/trailing whitespace for free.
        let collapsed = allowed.split_whitespace().collect::<Vec<_>>().join(" ");

        // ── Step 3: Context-guarded confusion fixes ───────────────────────────
        // Substitute a digit for its look-alike letter only when it
        // is flanked by ASCII letters on BOTH sides. Working on a
        // char Vec keeps the prev/next lookups O(1) and Unicode-safe.
        let chars: Vec<char> = collapsed.chars().collect();
        let mut out = String::with_capacity(collapsed.len());

        for (i, &c) in chars.iter().enumerate() {
            let fixed = match c {
                '0' | '1' | '5' => {
                    let prev_alpha = i > 0 && chars[i - 1].is_ascii_alphabetic();
                    let next_alpha = i + 1 < chars.len()
                        && chars[i + 1].is_ascii_alphabetic();
                    if prev_alpha && next_alpha {
                        match c {
                            '0' => 'O',
                            '1' => 'I',
                            _   => 'S',
                        }
                    } else {
                        c
                    }
                }
                c => c,
            };
            out.push(fixed);
        }

        out
    }
}

/// Implement Default so TextNormalizer can be created with
/// TextNormalizer::default()
impl Default for TextNormalizer {
    fn default() -> Self {
        Self::new()
    }
}
