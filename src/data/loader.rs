// ============================================================
// Layer 4 — Feature File Loader
// ============================================================
// Reads a tab-separated feature file line by line and hands
// every record line to the parser.
//
// Skipped lines:
//   - blank (or whitespace-only) lines
//   - the header line, whose first field is "wals_code"
//
// Unlike a loose document loader, a bad line here is NOT
// skipped: the whole load fails, naming file and line number.
//
// Reference: Rust Book §9 (Error Handling)
//            Rust Book §12 (I/O and File Handling)

use anyhow::{Context, Result};
use std::{fs, path::PathBuf};

use crate::data::dataset::DatasetIndex;
use crate::data::parser::{parse_record, FIELD_SEPARATOR};
use crate::domain::sample::Sample;
use crate::domain::traits::SampleSource;

/// First field of the header line
pub const HEADER_TOKEN: &str = "wals_code";

/// Loads samples from a tab-separated file on disk.
pub struct TsvLoader {
    path: PathBuf,
}

impl TsvLoader {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl SampleSource for TsvLoader {
    fn source_name(&self) -> String {
        self.path.display().to_string()
    }

    fn load_samples(&self) -> Result<Vec<Sample>> {
        let text = fs::read_to_string(&self.path)
            .with_context(|| format!("Cannot read feature file '{}'", self.path.display()))?;

        let samples = parse_lines(&self.source_name(), text.lines())?;
        tracing::debug!("Parsed {} records from '{}'", samples.len(), self.path.display());
        Ok(samples)
    }
}

/// Parses record lines that are already in memory.
pub struct LineSource {
    name:  String,
    lines: Vec<String>,
}

impl LineSource {
    pub fn new(name: impl Into<String>, text: &str) -> Self {
        Self {
            name:  name.into(),
            lines: text.lines().map(str::to_string).collect(),
        }
    }
}

impl SampleSource for LineSource {
    fn source_name(&self) -> String {
        self.name.clone()
    }

    fn load_samples(&self) -> Result<Vec<Sample>> {
        parse_lines(&self.name, self.lines.iter().map(String::as_str))
    }
}

/// True for lines the loader ignores
pub fn is_skipped(line: &str) -> bool {
    line.trim().is_empty() || line.split(FIELD_SEPARATOR).next() == Some(HEADER_TOKEN)
}

/// Parse every non-skipped line, attaching source and line number to failures.
fn parse_lines<'a>(source: &str, lines: impl Iterator<Item = &'a str>) -> Result<Vec<Sample>> {
    let mut samples = Vec::new();

    for (number, line) in lines.enumerate() {
        if is_skipped(line) {
            continue;
        }
        let sample = parse_record(line)
            .with_context(|| format!("{}:{}: invalid record", source, number + 1))?;
        samples.push(sample);
    }

    Ok(samples)
}

/// Load a source fully into a DatasetIndex.
pub fn load_index(source: &dyn SampleSource) -> Result<DatasetIndex> {
    let name    = source.source_name();
    let samples = source.load_samples()?;
    let index   = DatasetIndex::from_samples(&name, samples)
        .with_context(|| format!("Inconsistent dataset '{}'", name))?;

    tracing::info!(
        "Loaded {} languages ({} features) from '{}'",
        index.len(),
        index.feature_names().count(),
        index.name()
    );
    Ok(index)
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const HEADER: &str = "wals_code\tname\tlatitude\tlongitude\tgenus\tfamily\tcountrycodes\tfeatures";

    #[test]
    fn test_skips_header_and_blank_lines() {
        assert!(is_skipped(HEADER));
        assert!(is_skipped(""));
        assert!(is_skipped("   "));
        assert!(!is_skipped("abc\tAbc\tFam\tX=1"));
    }

    #[test]
    fn test_load_from_file() {
        let mut f = NamedTempFile::new().unwrap();
        writeln!(f, "{HEADER}").unwrap();
        writeln!(f, "abc\tAbc\t1.0\t2.0\tMayan\tMayan\tGT\tX=1|Y=?").unwrap();
        writeln!(f).unwrap();
        writeln!(f, "def\tDef\tFam\tX=2").unwrap();

        let idx = load_index(&TsvLoader::new(f.path())).unwrap();
        assert_eq!(idx.len(), 2);
        assert!(idx.contains("abc"));
        assert!(idx.contains("def"));
    }

    #[test]
    fn test_bad_line_reports_line_number() {
        let src = LineSource::new("mem", "abc\tAbc\tFam\tX=1\nbad\tBad\tFam\tX=oops");
        let err = load_index(&src).unwrap_err();
        assert!(format!("{err:#}").contains("mem:2"), "{err:#}");
    }

    #[test]
    fn test_duplicate_id_names_dataset() {
        let src = LineSource::new("mem", "abc\tA\tFam\tX=1\nabc\tB\tFam\tX=1");
        let err = load_index(&src).unwrap_err();
        let msg = format!("{err:#}");
        assert!(msg.contains("mem"), "{msg}");
        assert!(msg.contains("duplicate language id 'abc'"), "{msg}");
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let loader = TsvLoader::new("/definitely/not/here.tsv");
        assert!(loader.load_samples().is_err());
    }
}
