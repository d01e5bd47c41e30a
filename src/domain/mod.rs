// ============================================================
// Layer 3 — Domain Layer
// ============================================================
// Plain Rust structs, enums and traits describing languages,
// feature values and the failures the engine can raise.
//
// Rules for this layer:
//   - NO file I/O
//   - NO printing
//   - Only data definitions and their invariants
//
// Reference: Rust Book §5 (Structs), §6 (Enums), §10 (Traits)

/// Fatal engine errors
pub mod error;

/// Language metadata and the controlled-genus taxonomy
pub mod language;

/// Feature values and the Sample record
pub mod sample;

/// Abstractions that other layers implement
pub mod traits;
