// ============================================================
// Layer 1 — CLI Commands and Arguments
// ============================================================
// Defines the two subcommands: `score` and `check`
// and all their configurable flags.
//
// Reference: Rust Book §12 (Building a CLI Program)

use clap::{Args, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::application::score_use_case::ScoreConfig;
use crate::eval::average::Average;

/// The top-level subcommands available to the user
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Score one or more prediction files against the gold test set
    Score(ScoreArgs),

    /// Parse and validate feature files without scoring them
    Check(CheckArgs),
}

/// Averaging modes allowed for the summary tables
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SummaryMode {
    Micro,
    Macro,
}

impl From<SummaryMode> for Average {
    fn from(m: SummaryMode) -> Self {
        match m {
            SummaryMode::Micro => Average::Micro,
            SummaryMode::Macro => Average::Macro,
        }
    }
}

/// All arguments for the `score` command.
#[derive(Args, Debug)]
pub struct ScoreArgs {
    /// Prediction files, one per submission
    #[arg(required = true)]
    pub predictions: Vec<PathBuf>,

    /// Gold file with every test-set value filled in
    #[arg(long, default_value = "data/test_gold.csv")]
    pub gold: PathBuf,

    /// Blinded file given to participants ("?" marks hidden values)
    #[arg(long, default_value = "data/test_blinded.csv")]
    pub masked: PathBuf,

    /// Averaging mode(s) for the controlled-genus and overall summary
    #[arg(long = "mode", value_enum, default_values_t = [SummaryMode::Micro])]
    pub modes: Vec<SummaryMode>,

    /// Also write per-submission CSVs and report.json into this directory
    #[arg(long)]
    pub report_dir: Option<PathBuf>,

    /// Print the full report as JSON instead of text tables
    #[arg(long)]
    pub json: bool,
}

/// Convert CLI ScoreArgs into the application-layer ScoreConfig.
/// The application layer never sees clap types.
impl From<&ScoreArgs> for ScoreConfig {
    fn from(a: &ScoreArgs) -> Self {
        let mut modes: Vec<Average> = Vec::new();
        for m in &a.modes {
            let mode = Average::from(*m);
            if !modes.contains(&mode) {
                modes.push(mode);
            }
        }

        ScoreConfig {
            gold_path:        a.gold.clone(),
            masked_path:      a.masked.clone(),
            prediction_paths: a.predictions.clone(),
            summary_modes:    modes,
            report_dir:       a.report_dir.clone(),
        }
    }
}

/// All arguments for the `check` command
#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Feature files to validate ("-" reads standard input)
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// Also print every record as the parser read it
    #[arg(long)]
    pub records: bool,
}
