// ============================================================
// Layer 3 — Core Traits (Abstractions)
// ============================================================
// The application layer only needs "something that yields
// parsed samples". Files on disk are read by path; standard
// input and test fixtures go through the in-memory source.
//
// Reference: Rust Book §10 (Traits: Defining Shared Behaviour)

use anyhow::Result;

use crate::domain::sample::Sample;

// ─── SampleSource ─────────────────────────────────────────────────────────────
/// Any component that can produce language samples.
///
/// Implementations:
///   - TsvLoader  → reads a tab-separated feature file
///   - LineSource → parses lines already held in memory
pub trait SampleSource {
    /// Human-readable name used in logs and error context
    fn source_name(&self) -> String;

    /// Parse every record in this source, in file order.
    fn load_samples(&self) -> Result<Vec<Sample>>;
}
