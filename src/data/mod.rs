// ============================================================
// Layer 4 — Data Pipeline
// ============================================================
// Everything between a feature file on disk and an indexed,
// validated dataset in memory:
//
//   feature file (.tsv / .csv)
//       │
//       ▼
//   TsvLoader      → reads lines, skips header and blanks
//       │
//       ▼
//   parse_record   → repairs known defects, builds a Sample
//       │
//       ▼
//   DatasetIndex   → id → Sample, plus value tallies
//
// Reference: Rust Book §8 (Collections)
//            Rust Book §13 (Iterators and Closures)

/// Reads feature files and builds indices
pub mod loader;

/// Parses one record line into a Sample
pub mod parser;

/// Indexed collection of samples with value tallies
pub mod dataset;
