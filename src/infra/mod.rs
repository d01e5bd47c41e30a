// ============================================================
// Layer 6 — Infrastructure Layer
// ============================================================
// Side effects that sit outside the scoring engine:
//
//   metrics.rs — Report persistence
//                Writes per-submission accuracy CSVs and
//                the full evaluation report as JSON.
//
// Reference: Rust Book §7 (Modules)
//            Rust Book §9 (Error Handling with anyhow)

/// Accuracy CSV and JSON report writer
pub mod metrics;
