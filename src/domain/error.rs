// ============================================================
// Layer 3 — Domain Errors
// ============================================================
// Every structural failure the engine can hit. All of these
// abort the run: the input files are a fixed, validated corpus,
// so a malformed record means the corpus itself is wrong.
//
// A prediction that simply has no answer for a masked slot is
// NOT an error. It is recorded in the MissingLedger instead.
//
// The orchestration layers wrap these in anyhow with file and
// line context.
//
// Reference: Rust Book §9 (Recoverable Errors with Result)

use thiserror::Error;

/// Fatal failures raised while parsing, indexing, scoring or averaging.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EvalError {
    /// A record line had fewer than the three leading fields (id, name, family)
    #[error("record has {0} field(s), expected at least 3")]
    TooFewFields(usize),

    /// A feature piece did not split into exactly `name=value`
    #[error("malformed feature pair '{0}'")]
    MalformedFeature(String),

    /// A feature value was neither "?" nor a canonical non-negative integer
    #[error("feature '{feature}' has invalid value '{value}'")]
    MalformedValue { feature: String, value: String },

    /// Latitude or longitude did not parse as a float
    #[error("invalid coordinate '{0}'")]
    MalformedCoordinate(String),

    /// The same language id appeared twice in one file
    #[error("duplicate language id '{0}'")]
    DuplicateLanguage(String),

    /// A genus was assigned to two different families
    #[error("genus '{genus}' belongs to family '{existing}' but also to '{found}'")]
    GenusFamilyConflict {
        genus:    String,
        existing: String,
        found:    String,
    },

    /// A gold language has no sample in the masked file
    #[error("language '{0}' is missing from the masked dataset")]
    MissingMaskedLanguage(String),

    /// A masked slot whose gold answer is itself unknown
    #[error("masked feature '{feature}' of language '{language}' has gold value '?'")]
    UnknownGoldValue { language: String, feature: String },

    /// A masked slot with no gold entry at all
    #[error("masked feature '{feature}' of language '{language}' is absent from gold")]
    MissingGoldFeature { language: String, feature: String },

    /// An averaging mode name outside micro / macro / single
    #[error("illegal averaging mode '{0}'")]
    InvalidAverage(String),

    /// "single" averaging received other than exactly one pair
    #[error("single averaging expects exactly one score pair, got {0}")]
    SingleArity(usize),

    /// "macro" averaging over zero groups
    #[error("cannot macro-average an empty set of score pairs")]
    EmptyAverage,
}

/// Convenience alias used throughout the engine
pub type EvalResult<T> = std::result::Result<T, EvalError>;
