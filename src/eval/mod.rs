// ============================================================
// Layer 5 — Evaluation Engine
// ============================================================
// Turns three loaded datasets into accuracy tables:
//
//   gold + masked + predicted
//       │
//       ▼
//   EvaluationSet  → strips known values from the masked file,
//       │            leaving the slots that were hidden
//       ▼
//   score()        → (correct, masked) per language, writing
//       │            unanswered slots into the MissingLedger
//       ▼
//   Aggregator     → groups languages and averages their pairs
//                    (micro / macro / single)
//
// Nothing in this layer touches the filesystem or prints.

/// Score pairs and averaging modes
pub mod average;

/// Gold / masked / predicted composition and masking derivation
pub mod evaluation_set;

/// Per-language scoring
pub mod scorer;

/// Unanswered-slot bookkeeping per submission
pub mod ledger;

/// Grouping strategies and group accuracies
pub mod aggregator;
