// ============================================================
// Layer 1 — CLI / Presentation Layer
// ============================================================
// Entry point for all user interaction. Parses arguments with
// clap, delegates to Layer 2, and prints what comes back.
//
// Two commands are supported:
//   1. `score` — score prediction files against gold
//   2. `check` — validate feature files ("-" reads stdin)
//
// Reference: Rust Book §7 (Modules), §12 (CLI programs)

pub mod commands;

/// Text rendering of evaluation reports
pub mod output;

use anyhow::Result;
use clap::Parser;
use std::io::{self, Read, Write};
use std::path::PathBuf;

use crate::data::loader::{load_index, LineSource, TsvLoader};
use commands::{CheckArgs, Commands, ScoreArgs};

/// File argument that stands for standard input
pub const STDIN_PATH: &str = "-";

/// The main CLI struct
#[derive(Parser, Debug)]
#[command(
    name = "wals-eval",
    version,
    about = "Score typological feature predictions against a gold test set."
)]
pub struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// The subcommand to run (score or check)
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Match on the subcommand and dispatch to the correct use case.
    pub fn run(self) -> Result<()> {
        match &self.command {
            Commands::Score(args) => self.run_score(args),
            Commands::Check(args) => self.run_check(args),
        }
    }

    /// Handles the `score` subcommand.
    fn run_score(&self, args: &ScoreArgs) -> Result<()> {
        use crate::application::score_use_case::ScoreUseCase;

        tracing::info!(
            "Scoring {} submission(s) against '{}'",
            args.predictions.len(),
            args.gold.display()
        );

        let report = ScoreUseCase::new(args.into()).execute()?;

        if args.json {
            println!("{}", serde_json::to_string_pretty(&report)?);
        } else {
            output::print_report(&report)?;
        }
        Ok(())
    }

    /// Handles the `check` subcommand.
    fn run_check(&self, args: &CheckArgs) -> Result<()> {
        let stdout = io::stdout();
        let mut out = stdout.lock();
        check_files(&mut out, &args.files, args.records)?;
        out.flush()?;
        Ok(())
    }
}

/// Fully parse and index every file, writing one summary row per file.
/// The first failure aborts; rows already written stay written.
pub fn check_files<W: Write>(out: &mut W, files: &[PathBuf], records: bool) -> Result<()> {
    for path in files {
        let index = if path.as_os_str() == STDIN_PATH {
            let mut text = String::new();
            io::stdin().read_to_string(&mut text)?;
            load_index(&LineSource::new("<stdin>", &text))?
        } else {
            load_index(&TsvLoader::new(path))?
        };

        if index.is_empty() {
            tracing::warn!("'{}' holds no records", index.name());
        }
        output::write_check_row(out, &index, records)?;
    }
    Ok(())
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    const GOOD: &str = "wals_code\tname\tlatitude\tlongitude\tgenus\tfamily\tcountrycodes\tfeatures\n\
                        abc\tA\t1.0\t2.0\tMayan\tMayan\tGT\tx=3 three|y=1 one\n\
                        def\tD\t1.0\t2.0\tNilotic\tEastern Sudanic\tKE\tx=2|z=?\n\
                        ghi\tG\tIsolate\tx=1\n";

    fn write(dir: &TempDir, file: &str, body: &str) -> PathBuf {
        let path = dir.path().join(file);
        fs::write(&path, body).unwrap();
        path
    }

    #[test]
    fn test_check_reports_counts() {
        let dir = TempDir::new().unwrap();
        let good = write(&dir, "good.tsv", GOOD);

        let mut buf = Vec::new();
        check_files(&mut buf, &[good.clone()], false).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert_eq!(
            text,
            format!("{}\t3 languages\t3 features\t2 genera\n", good.display())
        );
    }

    #[test]
    fn test_check_stops_at_first_bad_file() {
        let dir = TempDir::new().unwrap();
        let good  = write(&dir, "good.tsv", GOOD);
        let bad   = write(&dir, "bad.tsv", "abc\tA\tMayan\tx=1\ndef\tD\tMayan\tx=one\n");
        let later = write(&dir, "later.tsv", GOOD);

        let mut buf = Vec::new();
        let err = check_files(&mut buf, &[good.clone(), bad.clone(), later.clone()], false).unwrap_err();
        let msg = format!("{err:#}");
        assert!(msg.contains(&format!("{}:2", bad.display())), "{msg}");
        assert!(msg.contains("invalid value 'one'"), "{msg}");

        let text = String::from_utf8(buf).unwrap();
        assert!(text.starts_with(&good.display().to_string()));
        assert!(!text.contains(&later.display().to_string()));
    }

    #[test]
    fn test_check_lists_normalised_records() {
        let dir = TempDir::new().unwrap();
        let good = write(&dir, "good.tsv", GOOD);

        let mut buf = Vec::new();
        check_files(&mut buf, &[good], true).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.contains("\nabc\tA\t1\t2\tMayan\tMayan\tGT\tx=3|y=1\n"), "{text}");
        assert!(text.contains("\nghi\tG\tIsolate\tx=1\n"), "{text}");
    }
}
