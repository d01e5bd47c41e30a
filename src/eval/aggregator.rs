// ============================================================
// Layer 5 — Group Aggregation
// ============================================================
// Every gold language is scored once; groups are then formed
// from the gold index and each group's pairs are reduced with
// an Average. Labels come from the gold tallies, so every
// reported group holds at least one language and the output is
// sorted by label.

use std::collections::BTreeMap;
use std::fmt;

use crate::data::dataset::{DatasetIndex, ValueCounts};
use crate::domain::error::EvalResult;
use crate::domain::language::LanguageField;
use crate::domain::sample::Sample;
use crate::eval::average::{Average, ScorePair};
use crate::eval::evaluation_set::EvaluationSet;
use crate::eval::ledger::MissingLedger;
use crate::eval::scorer::ScoreTable;

/// How languages are grouped before averaging.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Grouping {
    LanguageId,
    Family,
    Genus,
    ControlledGenus,
    /// Languages sharing the same gold value for this feature
    Feature(String),
}

impl Grouping {
    /// Group labels present in `gold`, with the number of languages behind each
    pub fn labels(&self, gold: &DatasetIndex) -> ValueCounts {
        match self.language_field() {
            Some(field) => gold.language_values(field),
            None => match self {
                Grouping::Feature(name) => gold.feature_values(name),
                _ => ValueCounts::new(),
            },
        }
    }

    /// The label `sample` falls under, if it has one
    pub fn label_of(&self, sample: &Sample) -> Option<String> {
        match self {
            Grouping::Feature(name) => sample.features.get(name).map(ToString::to_string),
            _ => self
                .language_field()
                .and_then(|field| sample.lang.field(field)),
        }
    }

    fn language_field(&self) -> Option<LanguageField> {
        match self {
            Grouping::LanguageId      => Some(LanguageField::Id),
            Grouping::Family          => Some(LanguageField::Family),
            Grouping::Genus           => Some(LanguageField::Genus),
            Grouping::ControlledGenus => Some(LanguageField::ControlledGenus),
            Grouping::Feature(_)      => None,
        }
    }
}

impl fmt::Display for Grouping {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Grouping::LanguageId      => f.write_str("id"),
            Grouping::Family          => f.write_str("family"),
            Grouping::Genus           => f.write_str("genus"),
            Grouping::ControlledGenus => f.write_str("controlled_genus"),
            Grouping::Feature(name)   => f.write_str(name),
        }
    }
}

/// One group's label and accuracy
pub type GroupAccuracy = (String, f64);

/// Scores of one evaluation set, ready to be grouped.
#[derive(Debug)]
pub struct Aggregator<'a> {
    set: &'a EvaluationSet,
    scores: ScoreTable,
}

impl<'a> Aggregator<'a> {
    /// Score every gold language of `set`, recording gaps in `ledger`.
    pub fn new(set: &'a EvaluationSet, ledger: &mut MissingLedger) -> EvalResult<Self> {
        let scores = set.score_all(ledger)?;
        Ok(Self { set, scores })
    }

    /// Accuracy per label of `grouping`, sorted by label.
    pub fn accuracy_per_field(
        &self,
        grouping: &Grouping,
        average: Average,
    ) -> EvalResult<Vec<GroupAccuracy>> {
        let gold = self.set.gold();

        let mut groups: BTreeMap<String, Vec<ScorePair>> = grouping
            .labels(gold)
            .into_keys()
            .map(|label| (label, Vec::new()))
            .collect();

        for sample in gold.samples() {
            let Some(label) = grouping.label_of(sample) else {
                continue;
            };
            if let (Some(pairs), Some(pair)) = (groups.get_mut(&label), self.scores.get(sample.id())) {
                pairs.push(*pair);
            }
        }

        groups
            .into_iter()
            .map(|(label, pairs)| -> EvalResult<GroupAccuracy> {
                Ok((label, average.apply(&pairs)?))
            })
            .collect()
    }

    /// Accuracy over every gold language
    pub fn overall(&self, average: Average) -> EvalResult<f64> {
        let pairs: Vec<ScorePair> = self.scores.values().copied().collect();
        average.apply(&pairs)
    }
}
