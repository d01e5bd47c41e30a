// ============================================================
// Layer 6 — Report Writer
// ============================================================
// Persists a finished evaluation to a directory:
//
//   <dir>/<submission>_accuracies.csv   — one row per group
//   <dir>/report.json                   — the whole report
//
// Example CSV output:
//   table,mode,label,accuracy
//   id,single,abc,0.750000
//   family,micro,Mayan,0.812500
//   family,macro,Mayan,0.790000
//   ...
//
// Undefined accuracies (groups with no masked slots) are
// written as "nan" in the CSV and as null in the JSON.
//
// Reference: Rust Book §12 (I/O and File Handling)

use anyhow::{Context, Result};
use std::{
    fs,
    io::Write,
    path::{Path, PathBuf},
};

use crate::application::score_use_case::{EvaluationReport, SubmissionReport};

/// CSV header shared by every accuracy file
pub const CSV_HEADER: &str = "table,mode,label,accuracy";

/// Writes evaluation results into one output directory.
pub struct ReportWriter {
    dir: PathBuf,
}

impl ReportWriter {
    /// Create the writer, creating the directory if needed.
    pub fn new(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir)
            .with_context(|| format!("Cannot create report directory '{}'", dir.display()))?;
        Ok(Self { dir })
    }

    /// Path of a submission's accuracy CSV
    pub fn csv_path(&self, submission: &str) -> PathBuf {
        self.dir.join(format!("{submission}_accuracies.csv"))
    }

    /// Write every table of one submission as CSV rows.
    ///
    /// An existing file for the same submission is replaced.
    pub fn write_accuracies(&self, report: &SubmissionReport) -> Result<()> {
        let path = self.csv_path(&report.name);

        let mut f = fs::File::create(&path)
            .with_context(|| format!("Cannot create '{}'", path.display()))?;
        writeln!(f, "{CSV_HEADER}")?;

        let mut rows = 0usize;
        for table in &report.tables {
            for (label, acc) in &table.rows {
                writeln!(
                    f,
                    "{},{},{},{}",
                    csv_field(&table.field),
                    table.mode,
                    csv_field(label),
                    format_accuracy(*acc, 6)
                )?;
                rows += 1;
            }
        }

        tracing::debug!("Wrote {} accuracy rows to '{}'", rows, path.display());
        Ok(())
    }

    /// Save the full report as pretty-printed JSON.
    pub fn save_report(&self, report: &EvaluationReport) -> Result<()> {
        let path = self.dir.join("report.json");
        let json = serde_json::to_string_pretty(report)?;
        fs::write(&path, json)
            .with_context(|| format!("Cannot write report to '{}'", path.display()))?;

        tracing::info!("Saved evaluation report to '{}'", path.display());
        Ok(())
    }
}

/// Format an accuracy with `decimals` places; NaN becomes "nan".
pub fn format_accuracy(acc: f64, decimals: usize) -> String {
    if acc.is_nan() {
        "nan".to_string()
    } else {
        format!("{acc:.decimals$}")
    }
}

/// Quote a CSV field when it contains a comma or quote.
fn csv_field(raw: &str) -> String {
    if raw.contains(',') || raw.contains('"') {
        format!("\"{}\"", raw.replace('"', "\"\""))
    } else {
        raw.to_string()
    }
}
