// ============================================================
// Layer 5 — Per-Language Scorer
// ============================================================
// For every "?" slot of a language in the masked file:
//
//   - the slot counts toward the denominator
//   - gold must hold a known value for it, else the run aborts
//   - no prediction for the slot (language absent, feature
//     absent, or a "?" answer) goes into the missing ledger and
//     is scored as wrong
//   - otherwise it is correct when the codes are equal

use std::collections::BTreeMap;

use crate::domain::error::{EvalError, EvalResult};
use crate::domain::sample::FeatureValue;
use crate::eval::average::ScorePair;
use crate::eval::evaluation_set::EvaluationSet;
use crate::eval::ledger::MissingLedger;

/// Language id → score pair, for every gold language
pub type ScoreTable = BTreeMap<String, ScorePair>;

impl EvaluationSet {
    /// Score one language. Unanswered slots are recorded in `ledger`
    /// under this set's submission name.
    pub fn score(&self, language: &str, ledger: &mut MissingLedger) -> EvalResult<ScorePair> {
        let slots = self
            .masked_slots(language)
            .ok_or_else(|| EvalError::MissingMaskedLanguage(language.to_string()))?;
        let gold = self.gold().get(language).map(|s| &s.features);
        let predicted = self.predicted().get(language).map(|s| &s.features);

        if predicted.is_none() {
            tracing::debug!("'{}' has no prediction for language '{}'", self.name(), language);
        }

        let mut pair = ScorePair::default();
        for feature in slots {
            pair.denominator += 1;

            let expected = match gold.and_then(|g| g.get(feature)) {
                Some(FeatureValue::Unknown) => {
                    return Err(EvalError::UnknownGoldValue {
                        language: language.to_string(),
                        feature:  feature.to_string(),
                    })
                }
                Some(value) => value,
                None => {
                    return Err(EvalError::MissingGoldFeature {
                        language: language.to_string(),
                        feature:  feature.to_string(),
                    })
                }
            };

            match predicted.and_then(|p| p.get(feature)) {
                None | Some(FeatureValue::Unknown) => {
                    ledger.record(self.name(), language, feature);
                }
                Some(answer) if answer == expected => pair.numerator += 1,
                Some(_) => {}
            }
        }

        Ok(pair)
    }

    /// Score every gold language, in id order.
    pub fn score_all(&self, ledger: &mut MissingLedger) -> EvalResult<ScoreTable> {
        self.gold()
            .samples()
            .map(|s| -> EvalResult<(String, ScorePair)> {
                Ok((s.id().to_string(), self.score(s.id(), ledger)?))
            })
            .collect()
    }
}
