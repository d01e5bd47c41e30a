// ============================================================
// Layer 1 — Text Output
// ============================================================
// Plain-text rendering of what the use cases return.
//
// Score report, per submission: per-language accuracies, then
// family and genus (micro, macro), then every feature (micro,
// macro). After all submissions come one controlled-genus block
// per summary mode and a closing `# Errors` block.
//
// Tables are tab-separated; accuracies use four decimals and
// NaN prints as `nan`.

use anyhow::Result;
use std::io::{self, Write};

use crate::application::score_use_case::{AccuracyTable, EvaluationReport};
use crate::data::dataset::DatasetIndex;
use crate::eval::average::Average;
use crate::infra::metrics::format_accuracy;

const DECIMALS: usize = 4;

/// Print the report to stdout
pub fn print_report(report: &EvaluationReport) -> Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    write_report(&mut out, report)?;
    out.flush()?;
    Ok(())
}

/// Render the report into any writer
pub fn write_report<W: Write>(out: &mut W, report: &EvaluationReport) -> Result<()> {
    for submission in &report.submissions {
        writeln!(out, "# Submission: {}\n", submission.name)?;
        for (i, table) in submission.tables.iter().enumerate() {
            if i > 0 {
                writeln!(out)?;
            }
            write_table(out, table)?;
        }
        writeln!(out)?;
    }

    for mode in &report.config.summary_modes {
        writeln!(out, "\n# Averaging: {mode}\n")?;

        let header: Vec<&str> = report
            .genus_language_counts
            .iter()
            .map(|(g, _)| g.as_str())
            .collect();
        writeln!(out, "submission\t{}", header.join("\t"))?;

        let counts: Vec<String> = report
            .genus_language_counts
            .iter()
            .map(|(_, n)| n.to_string())
            .collect();
        writeln!(out, "number of languages\t{}", counts.join("\t"))?;

        for submission in &report.submissions {
            let Some(summary) = submission.summary(*mode) else {
                continue;
            };
            let accs: Vec<String> = summary
                .controlled_genus
                .iter()
                .map(|(_, acc)| format_accuracy(*acc, DECIMALS))
                .collect();
            writeln!(out, "{}\t{}", submission.name, accs.join("\t"))?;
        }

        writeln!(out, "\noverall:")?;
        for submission in &report.submissions {
            if let Some(summary) = submission.summary(*mode) {
                writeln!(
                    out,
                    "{}\t{}",
                    submission.name,
                    format_accuracy(summary.overall, DECIMALS)
                )?;
            }
        }
    }

    writeln!(out, "\n# Errors\n")?;
    for submission in &report.submissions {
        let m = &submission.missing;
        if m.has_gaps() {
            writeln!(
                out,
                "{} missing {}/{} features in {}/{} languages!",
                submission.name,
                m.missing_features,
                m.total_slots,
                m.affected_languages,
                m.total_languages
            )?;
        }
    }

    Ok(())
}

/// One `check` row: file name and its language, feature and genus counts.
/// With `records`, every sample follows in normalised record form.
pub fn write_check_row<W: Write>(out: &mut W, index: &DatasetIndex, records: bool) -> Result<()> {
    writeln!(
        out,
        "{}\t{} languages\t{} features\t{} genera",
        index.name(),
        index.len(),
        index.feature_names().count(),
        index.genus_family().len()
    )?;
    if records {
        for sample in index.samples() {
            writeln!(out, "{}", sample.to_record_line())?;
        }
    }
    Ok(())
}

fn write_table<W: Write>(out: &mut W, table: &AccuracyTable) -> Result<()> {
    if table.mode == Average::Single {
        writeln!(out, "Accuracies per language:")?;
    } else {
        writeln!(out, "Accuracies per language {} ({}):", table.field, table.mode)?;
    }
    for (label, acc) in &table.rows {
        writeln!(out, "{}\t{}", label, format_accuracy(*acc, DECIMALS))?;
    }
    Ok(())
}
