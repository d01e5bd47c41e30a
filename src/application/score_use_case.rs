// ============================================================
// Layer 2 — ScoreUseCase
// ============================================================
// Orchestrates one evaluation run:
//
//   Step 1: Load the gold and masked files      (Layer 4 - data)
//   Step 2: For each prediction file:
//             load it, build an EvaluationSet,
//             score and aggregate               (Layer 5 - eval)
//   Step 3: Summarise missing answers           (Layer 5 - eval)
//   Step 4: Optionally persist the report       (Layer 6 - infra)
//
// The returned EvaluationReport holds every table the CLI
// prints. Nothing here writes to stdout.
//
// Reference: Rust Book §13 (Iterators and Closures)

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::data::loader::{load_index, TsvLoader};
use crate::domain::language::CONTROLLED_GENERA;
use crate::eval::{
    aggregator::{Aggregator, GroupAccuracy, Grouping},
    average::Average,
    evaluation_set::EvaluationSet,
    ledger::MissingLedger,
};
use crate::infra::metrics::ReportWriter;

// ─── Scoring Configuration ───────────────────────────────────────────────────
// Everything a run needs, independent of how it was requested.
// Serialisable so it can be stored alongside the JSON report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreConfig {
    pub gold_path:        PathBuf,
    pub masked_path:      PathBuf,
    pub prediction_paths: Vec<PathBuf>,
    pub summary_modes:    Vec<Average>,
    pub report_dir:       Option<PathBuf>,
}

impl Default for ScoreConfig {
    fn default() -> Self {
        Self {
            gold_path:        PathBuf::from("data/test_gold.csv"),
            masked_path:      PathBuf::from("data/test_blinded.csv"),
            prediction_paths: Vec::new(),
            summary_modes:    vec![Average::Micro],
            report_dir:       None,
        }
    }
}

// ─── Report Types ────────────────────────────────────────────────────────────

/// Accuracies of one grouping under one averaging mode
#[derive(Debug, Clone, Serialize)]
pub struct AccuracyTable {
    /// Grouping name: "id", "family", "genus" or a feature name
    pub field: String,
    pub mode:  Average,
    pub rows:  Vec<GroupAccuracy>,
}

/// Controlled-genus row and overall accuracy for one summary mode
#[derive(Debug, Clone, Serialize)]
pub struct ModeSummary {
    pub mode: Average,
    /// One entry per CONTROLLED_GENERA label, in taxonomy order
    pub controlled_genus: Vec<GroupAccuracy>,
    pub overall: f64,
}

/// Unanswered masked slots for one submission
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MissingSummary {
    pub missing_features:   usize,
    pub total_slots:        usize,
    pub affected_languages: usize,
    pub total_languages:    usize,
}

impl MissingSummary {
    pub fn has_gaps(&self) -> bool {
        self.missing_features > 0
    }
}

/// Every table computed for one prediction file
#[derive(Debug, Clone, Serialize)]
pub struct SubmissionReport {
    pub name:      String,
    /// Per-language (single) first, then family, genus, features
    pub tables:    Vec<AccuracyTable>,
    pub summaries: Vec<ModeSummary>,
    pub missing:   MissingSummary,
}

impl SubmissionReport {
    /// Summary computed for `mode`, if that mode was requested
    pub fn summary(&self, mode: Average) -> Option<&ModeSummary> {
        self.summaries.iter().find(|s| s.mode == mode)
    }
}

/// The full result of one run
#[derive(Debug, Clone, Serialize)]
pub struct EvaluationReport {
    pub config: ScoreConfig,
    /// Masked-file language count per controlled genus, in taxonomy order
    pub genus_language_counts: Vec<(String, usize)>,
    pub submissions: Vec<SubmissionReport>,
}

// ─── ScoreUseCase ────────────────────────────────────────────────────────────
pub struct ScoreUseCase {
    config: ScoreConfig,
}

impl ScoreUseCase {
    pub fn new(config: ScoreConfig) -> Self {
        Self { config }
    }

    /// Score every prediction file and build the report
    pub fn execute(&self) -> Result<EvaluationReport> {
        let cfg = &self.config;
        if cfg.prediction_paths.is_empty() {
            bail!("At least one prediction file is required");
        }

        // ── Step 1: Load the reference files once ───────────────────────────
        let gold   = load_index(&TsvLoader::new(&cfg.gold_path))?;
        let masked = load_index(&TsvLoader::new(&cfg.masked_path))?;

        // ── Step 2: Score each submission ───────────────────────────────────
        // One ledger for the whole run; entries are keyed by submission name.
        let mut ledger      = MissingLedger::new();
        let mut submissions = Vec::with_capacity(cfg.prediction_paths.len());
        let mut genus_counts = Vec::new();

        for path in &cfg.prediction_paths {
            let name = submission_name(path);
            if submissions.iter().any(|s: &SubmissionReport| s.name == name) {
                tracing::warn!("Submission name '{}' appears twice; missing counts will be shared", name);
            }

            let predicted = load_index(&TsvLoader::new(path))?;
            let set = EvaluationSet::new(&name, gold.clone(), masked.clone(), predicted);
            if genus_counts.is_empty() {
                genus_counts = set.controlled_genus_counts();
            }

            let report = evaluate_submission(&set, &mut ledger, &cfg.summary_modes)
                .with_context(|| format!("Scoring '{}' failed", path.display()))?;

            tracing::info!(
                "Scored '{}': {} tables, {} missing answers",
                name,
                report.tables.len(),
                report.missing.missing_features
            );
            submissions.push(report);
        }

        let report = EvaluationReport {
            config: cfg.clone(),
            genus_language_counts: genus_counts,
            submissions,
        };

        // ── Step 3: Persist if requested ────────────────────────────────────
        if let Some(dir) = &cfg.report_dir {
            let writer = ReportWriter::new(dir)?;
            for submission in &report.submissions {
                writer.write_accuracies(submission)?;
            }
            writer.save_report(&report)?;
        }

        Ok(report)
    }
}

/// Submission name: the file's base name without a trailing ".tsv"
pub fn submission_name(path: &Path) -> String {
    let base = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    base.strip_suffix(".tsv").map(str::to_string).unwrap_or(base)
}

/// Compute every table for one evaluation set.
pub fn evaluate_submission(
    set:    &EvaluationSet,
    ledger: &mut MissingLedger,
    modes:  &[Average],
) -> Result<SubmissionReport> {
    let agg = Aggregator::new(set, ledger)?;

    let table = |grouping: Grouping, mode: Average| -> Result<AccuracyTable> {
        Ok(AccuracyTable {
            field: grouping.to_string(),
            mode,
            rows: agg.accuracy_per_field(&grouping, mode)?,
        })
    };

    let mut tables = vec![table(Grouping::LanguageId, Average::Single)?];
    for grouping in [Grouping::Family, Grouping::Genus] {
        for mode in [Average::Micro, Average::Macro] {
            tables.push(table(grouping.clone(), mode)?);
        }
    }
    for feature in set.gold().feature_names() {
        for mode in [Average::Micro, Average::Macro] {
            tables.push(table(Grouping::Feature(feature.to_string()), mode)?);
        }
    }

    let mut summaries = Vec::with_capacity(modes.len());
    for &mode in modes {
        let rows = agg.accuracy_per_field(&Grouping::ControlledGenus, mode)?;
        // Align to the fixed taxonomy; a bucket with no gold language is undefined
        let controlled_genus = CONTROLLED_GENERA
            .iter()
            .map(|g| {
                let acc = rows
                    .iter()
                    .find(|(label, _)| label == g)
                    .map(|(_, acc)| *acc)
                    .unwrap_or(f64::NAN);
                (g.to_string(), acc)
            })
            .collect();
        summaries.push(ModeSummary {
            mode,
            controlled_genus,
            overall: agg.overall(mode)?,
        });
    }

    let missing = MissingSummary {
        missing_features:   ledger.missing_features(set.name()),
        total_slots:        set.total_masked_slots(),
        affected_languages: ledger.affected_languages(set.name()),
        total_languages:    set.masked_language_count(),
    };

    Ok(SubmissionReport {
        name: set.name().to_string(),
        tables,
        summaries,
        missing,
    })
}
