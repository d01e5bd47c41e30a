// ============================================================
// Layer 2 — Application / Use Cases
// ============================================================
// Coordinates loading, scoring and persistence for one run.
//
// Rules for this layer:
//   - No parsing or scoring logic here (Layers 4 and 5)
//   - No printing here (that's Layer 1)
//   - Only workflow coordination
//
// Reference: Rust Book §7 (Module System)

// The scoring workflow and its report types
pub mod score_use_case;
