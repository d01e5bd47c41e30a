// ============================================================
// Layer 3 — Sample Domain Type
// ============================================================
// One language record: its metadata plus a mapping from
// lower-cased feature name to feature value.
//
// A feature value is either the "?" sentinel (unknown, or
// hidden from participants) or an integer code. Codes are
// compared as integers, so "3" from gold and "3" from a
// prediction are the same answer regardless of the descriptive
// text that followed them in the file.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::error::EvalError;
use crate::domain::language::LanguageMeta;

/// Sentinel token for an unknown or masked value
pub const UNKNOWN_TOKEN: &str = "?";

/// A single feature value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum FeatureValue {
    /// "?" — unknown, or masked in a blinded file
    Unknown,
    /// Canonical non-negative integer code
    Code(u64),
}

impl FeatureValue {
    pub fn is_unknown(&self) -> bool {
        matches!(self, FeatureValue::Unknown)
    }

    /// Parse a bare value token.
    ///
    /// Accepts "?" or the canonical decimal form of a non-negative
    /// integer: ASCII digits only, no sign, no leading zeros.
    pub fn parse_token(token: &str) -> Option<Self> {
        if token == UNKNOWN_TOKEN {
            return Some(FeatureValue::Unknown);
        }
        let canonical = !token.is_empty()
            && token.bytes().all(|b| b.is_ascii_digit())
            && (token == "0" || !token.starts_with('0'));
        if !canonical {
            return None;
        }
        token.parse::<u64>().ok().map(FeatureValue::Code)
    }
}

impl fmt::Display for FeatureValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FeatureValue::Unknown => f.write_str(UNKNOWN_TOKEN),
            FeatureValue::Code(c) => write!(f, "{c}"),
        }
    }
}

impl FromStr for FeatureValue {
    type Err = EvalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_token(s).ok_or_else(|| EvalError::MalformedValue {
            feature: String::new(),
            value:   s.to_string(),
        })
    }
}

/// Lower-cased feature name → value, in name order
pub type FeatureMap = BTreeMap<String, FeatureValue>;

/// A fully parsed language record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    pub lang: LanguageMeta,
    pub features: FeatureMap,
}

impl Sample {
    pub fn new(lang: LanguageMeta, features: FeatureMap) -> Self {
        Self { lang, features }
    }

    pub fn id(&self) -> &str {
        &self.lang.id
    }

    /// Drop every entry whose value is known, keeping only "?" slots.
    ///
    /// Applied to samples of a blinded file this leaves exactly the
    /// slots that were hidden from participants. Calling it again is
    /// a no-op.
    pub fn retain_unknown(&mut self) {
        self.features.retain(|_, v| v.is_unknown());
    }

    /// Feature names whose value is "?", in name order
    pub fn unknown_features(&self) -> impl Iterator<Item = &str> {
        self.features
            .iter()
            .filter(|(_, v)| v.is_unknown())
            .map(|(k, _)| k.as_str())
    }

    /// Serialise back to the tab-separated record format.
    ///
    /// A sample without a genus came from an abbreviated record and is
    /// written as one (id, name, family, features); coordinates and
    /// countries are not kept in that shape. Everything else uses the
    /// full format. Feature values are written as bare tokens, so
    /// descriptive text that the parser discarded is not reproduced.
    pub fn to_record_line(&self) -> String {
        let features = self
            .features
            .iter()
            .map(|(k, v)| format!("{k}={v}"))
            .collect::<Vec<_>>()
            .join("|");

        let Some(genus) = &self.lang.genus else {
            return [
                self.lang.id.as_str(),
                self.lang.name.as_str(),
                self.lang.family.as_str(),
                features.as_str(),
            ]
            .join("\t");
        };

        let coord = |c: f64| if c.is_nan() { "nan".to_string() } else { c.to_string() };

        [
            self.lang.id.clone(),
            self.lang.name.clone(),
            coord(self.lang.latitude),
            coord(self.lang.longitude),
            genus.clone(),
            self.lang.family.clone(),
            self.lang.countries.join(" "),
            features,
        ]
        .join("\t")
    }
}
