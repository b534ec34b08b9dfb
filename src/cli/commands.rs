// ============================================================
// Layer 1 — CLI Commands and Arguments
// ============================================================
// Defines the three subcommands: `grade`, `predict`, `suggest`
// and all their configurable flags.
//
// clap's derive macros automatically generate:
//   - help text (--help)
//   - error messages for missing args
//   - type conversion (string → f32, etc.)
//
// Reference: Rust Book §12 (Building a CLI Program)

use clap::{Args, Subcommand};

/// The three top-level subcommands available to the operator
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Score an answer file against an assignment's criteria
    Grade(GradeArgs),

    /// Predict a grade label against a reference answer
    Predict(PredictArgs),

    /// Print only the review suggestions for an answer
    Suggest(SuggestArgs),
}

/// All arguments for the `grade` command.
/// Each field becomes a --flag on the command line.
#[derive(Args, Debug)]
pub struct GradeArgs {
    /// Path to the extracted answer text file
    #[arg(long)]
    pub answer: String,

    /// Path to the criteria JSON file (optional — without it the
    /// generic heuristic score is used)
    #[arg(long)]
    pub criteria: Option<String>,

    /// Assignment id selecting the criteria set within the file
    #[arg(long)]
    pub assignment: Option<String>,

    /// Maximum score of the assignment
    #[arg(long, default_value_t = 100.0)]
    pub max_score: f32,

    /// Directory containing the model artifacts
    /// (tokenizer.json, encoder.*, classifier.*)
    #[arg(long, default_value = "models")]
    pub model_dir: String,

    /// Optional JSON file overriding the scoring heuristics
    /// (weights, credits, thresholds)
    #[arg(long)]
    pub scoring_config: Option<String>,
}

/// All arguments for the `predict` command
#[derive(Args, Debug)]
pub struct PredictArgs {
    /// Path to the extracted answer text file
    #[arg(long)]
    pub answer: String,

    /// Path to the reference (answer key) text file
    #[arg(long)]
    pub reference: String,

    /// Directory containing the model artifacts
    #[arg(long, default_value = "models")]
    pub model_dir: String,
}

/// All arguments for the `suggest` command
#[derive(Args, Debug)]
pub struct SuggestArgs {
    /// Path to the extracted answer text file
    #[arg(long)]
    pub answer: String,

    /// Directory containing the model artifacts (unused by the
    /// suggestion rules, kept for flag symmetry with `grade`)
    #[arg(long, default_value = "models")]
    pub model_dir: String,
}
