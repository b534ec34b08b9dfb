// ============================================================
// Layer 1 — CLI / Presentation Layer
// ============================================================
// This is the entry point for operator interaction (the web
// backend calls the library directly and never goes through
// here). It uses the `clap` crate to parse arguments.
// All business logic is delegated to Layer 2 (application).
//
// Three commands are supported:
//   1. `grade`   — scores an answer file against criteria
//   2. `predict` — predicts a grade label against a reference
//   3. `suggest` — prints only the review suggestions
//
// Reference: Rust Book §7 (Modules), §12 (CLI programs)

// Declare the commands submodule
pub mod commands;

use anyhow::{Context, Result};
use clap::Parser;
use std::{fs, sync::Arc};

use self::commands::{Commands, GradeArgs, PredictArgs, SuggestArgs};
use crate::application::grade_use_case::GradeUseCase;
use crate::application::predict_use_case::PredictUseCase;
use crate::domain::config::ScoringConfig;
use crate::domain::criterion::Criterion;
use crate::domain::traits::CriteriaSource;
use crate::infra::criteria_store::CriteriaStore;
use crate::infra::registry::ModelRegistry;

/// The main CLI struct — clap reads the fields and generates
/// argument parsing code automatically via the Parser derive macro.
#[derive(Parser, Debug)]
#[command(
    name = "answer-grader",
    version = "0.1.0",
    about = "Score OCR'd student answers against grading criteria, \
             and predict grade labels with a trained model."
)]
pub struct Cli {
    /// The subcommand to run (grade, predict, or suggest)
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Match on the subcommand and dispatch to the correct use case.
    /// This keeps the CLI layer thin — it only routes, never computes.
    pub fn run(self) -> Result<()> {
        match self.command {
            Commands::Grade(args)   => run_grade(args),
            Commands::Predict(args) => run_predict(args),
            Commands::Suggest(args) => run_suggest(args),
        }
    }
}

/// Handles the `grade` subcommand.
fn run_grade(args: GradeArgs) -> Result<()> {
    let text     = read_answer(&args.answer)?;
    let criteria = load_criteria(&args)?;
    let config   = load_scoring_config(args.scoring_config.as_deref())?;

    let registry = Arc::new(ModelRegistry::new(args.model_dir.clone()));
    registry.warm_up();

    let use_case = GradeUseCase::new(registry, config);
    let report = use_case.execute(&text, &criteria, args.max_score);

    println!(
        "\nScore: {:.2} / {:.2}  (confidence {:.0}%)",
        report.score, report.max_score, report.confidence * 100.0,
    );
    println!(
        "Words: {}  Sentences: {}",
        report.word_count, report.sentence_count,
    );
    for suggestion in &report.suggestions {
        println!("  - {suggestion}");
    }
    Ok(())
}

/// Handles the `predict` subcommand.
fn run_predict(args: PredictArgs) -> Result<()> {
    let answer    = read_answer(&args.answer)?;
    let reference = read_answer(&args.reference)?;

    let registry = Arc::new(ModelRegistry::new(args.model_dir.clone()));
    registry.warm_up();

    let use_case = PredictUseCase::new(registry);
    let report = use_case.execute(&answer, &reference);

    println!("\nPredicted grade: {}", report.label);
    println!(
        "Features: tfidf={:.4}  full={:.4}  structure={:.4}",
        report.tfidf_similarity,
        report.full_similarity,
        report.structure_similarity,
    );
    Ok(())
}

/// Handles the `suggest` subcommand. Reuses the grading use
/// case with no criteria — only the suggestion list matters.
fn run_suggest(args: SuggestArgs) -> Result<()> {
    let text   = read_answer(&args.answer)?;
    let config = ScoringConfig::default();

    // Suggestions never touch the models, so the registry can
    // stay cold here.
    let registry = Arc::new(ModelRegistry::new(args.model_dir.clone()));
    let use_case = GradeUseCase::new(registry, config);
    let report = use_case.execute(&text, &[], 100.0);

    if report.suggestions.is_empty() {
        println!("No suggestions — the submission looks clean.");
    }
    for suggestion in &report.suggestions {
        println!("  - {suggestion}");
    }
    Ok(())
}

/// Read an answer/reference text file.
fn read_answer(path: &str) -> Result<String> {
    fs::read_to_string(path)
        .with_context(|| format!("Cannot read text file '{path}'"))
}

/// Load criteria for the grade command, if a criteria file and
/// assignment id were given. No file → empty criteria → the
/// aggregator uses its basic heuristic score.
fn load_criteria(args: &GradeArgs) -> Result<Vec<Criterion>> {
    match (&args.criteria, &args.assignment) {
        (Some(path), Some(id)) => CriteriaStore::new(path.clone()).criteria_for(id),
        (Some(_), None) => anyhow::bail!(
            "--criteria requires --assignment to select the criteria set"
        ),
        _ => Ok(Vec::new()),
    }
}

/// Load a scoring config override, or fall back to the
/// documented default heuristics.
fn load_scoring_config(path: Option<&str>) -> Result<ScoringConfig> {
    match path {
        None => Ok(ScoringConfig::default()),
        Some(p) => {
            let json = fs::read_to_string(p)
                .with_context(|| format!("Cannot read scoring config '{p}'"))?;
            serde_json::from_str(&json)
                .with_context(|| format!("Malformed scoring config '{p}'"))
        }
    }
}
