// ============================================================
// Layer 5 — Averaging
// ============================================================
// A score pair is (correct masked slots, masked slots). Groups
// of pairs are reduced to one accuracy:
//
//   Micro  — pool all counts, then divide. NaN when nothing
//            was masked.
//   Macro  — mean of each pair's own ratio. A zero-slot pair
//            contributes NaN, which propagates into the result.
//   Single — exactly one pair; used for per-language accuracy.

use std::fmt;
use std::iter::Sum;
use std::ops::Add;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::error::{EvalError, EvalResult};

/// Correct and total masked slots for one language (or a sum of languages).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ScorePair {
    pub numerator: usize,
    pub denominator: usize,
}

impl ScorePair {
    pub fn new(numerator: usize, denominator: usize) -> Self {
        Self { numerator, denominator }
    }

    /// numerator / denominator, or NaN when nothing was scored
    pub fn ratio(&self) -> f64 {
        if self.denominator > 0 {
            self.numerator as f64 / self.denominator as f64
        } else {
            f64::NAN
        }
    }
}

impl Add for ScorePair {
    type Output = ScorePair;

    fn add(self, rhs: ScorePair) -> ScorePair {
        ScorePair::new(self.numerator + rhs.numerator, self.denominator + rhs.denominator)
    }
}

impl Sum for ScorePair {
    fn sum<I: Iterator<Item = ScorePair>>(iter: I) -> ScorePair {
        iter.fold(ScorePair::default(), Add::add)
    }
}

/// Averaging strategy
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Average {
    /// Pool numerators and denominators, then divide
    Micro,
    /// Unweighted mean of per-pair ratios
    Macro,
    /// Exactly one pair, reported as-is
    Single,
}

impl Average {
    pub fn as_str(&self) -> &'static str {
        match self {
            Average::Micro  => "micro",
            Average::Macro  => "macro",
            Average::Single => "single",
        }
    }

    /// Reduce `pairs` to one accuracy.
    pub fn apply(&self, pairs: &[ScorePair]) -> EvalResult<f64> {
        match self {
            Average::Micro => Ok(pairs.iter().copied().sum::<ScorePair>().ratio()),
            Average::Macro => {
                if pairs.is_empty() {
                    return Err(EvalError::EmptyAverage);
                }
                let total: f64 = pairs.iter().map(ScorePair::ratio).sum();
                Ok(total / pairs.len() as f64)
            }
            Average::Single => match pairs {
                [only] => Ok(only.ratio()),
                _ => Err(EvalError::SingleArity(pairs.len())),
            },
        }
    }
}

impl fmt::Display for Average {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Average {
    type Err = EvalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "micro"  => Ok(Average::Micro),
            "macro"  => Ok(Average::Macro),
            "single" => Ok(Average::Single),
            other    => Err(EvalError::InvalidAverage(other.to_string())),
        }
    }
}
