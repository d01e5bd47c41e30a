// ============================================================
// Layer 5 — Evaluation Set
// ============================================================
// Gold, masked and predicted datasets for one submission.
//
// The blinded file given to participants contains every language
// of the test set, with some values replaced by "?". Diffing it
// against gold recovers the masked slots: after construction the
// masked index keeps only its "?" entries, and those are the only
// slots a submission is scored on.

use crate::data::dataset::DatasetIndex;
use crate::domain::language::{LanguageField, CONTROLLED_GENERA};

/// One submission's view of the test data.
#[derive(Debug, Clone)]
pub struct EvaluationSet {
    name: String,
    gold: DatasetIndex,
    masked: DatasetIndex,
    predicted: DatasetIndex,
}

impl EvaluationSet {
    /// Compose the three datasets and derive the masked slots.
    ///
    /// `masked` is consumed and stripped of every known value. `gold` and
    /// `predicted` are kept exactly as loaded.
    pub fn new(
        name: impl Into<String>,
        gold: DatasetIndex,
        mut masked: DatasetIndex,
        predicted: DatasetIndex,
    ) -> Self {
        derive_masking(&mut masked);
        let name = name.into();

        let unscored = predicted.samples().filter(|s| !gold.contains(s.id())).count();
        if unscored > 0 {
            tracing::debug!("'{}' predicts {} languages outside the gold set", name, unscored);
        }

        tracing::debug!(
            "Evaluation set '{}': {} gold, {} masked ({} slots), {} predicted languages",
            name,
            gold.len(),
            masked.len(),
            masked.samples().map(|s| s.features.len()).sum::<usize>(),
            predicted.len()
        );

        Self { name, gold, masked, predicted }
    }

    /// Submission name, used as the missing-ledger key
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn gold(&self) -> &DatasetIndex {
        &self.gold
    }

    pub fn predicted(&self) -> &DatasetIndex {
        &self.predicted
    }

    /// Masked feature names of one language, in name order
    pub fn masked_slots(&self, language: &str) -> Option<Vec<&str>> {
        self.masked
            .get(language)
            .map(|s| s.unknown_features().collect())
    }

    /// Number of masked slots across all languages
    pub fn total_masked_slots(&self) -> usize {
        self.masked
            .samples()
            .map(|s| s.unknown_features().count())
            .sum()
    }

    /// Number of languages in the masked file
    pub fn masked_language_count(&self) -> usize {
        self.masked.len()
    }

    /// Masked-file language count for each controlled-genus bucket, in taxonomy order
    pub fn controlled_genus_counts(&self) -> Vec<(String, usize)> {
        let counts = self.masked.language_values(LanguageField::ControlledGenus);
        CONTROLLED_GENERA
            .iter()
            .map(|g| (g.to_string(), counts.get(*g).copied().unwrap_or(0)))
            .collect()
    }
}

/// Strip every known value from a masked dataset. Idempotent.
pub fn derive_masking(masked: &mut DatasetIndex) {
    for sample in masked.samples_mut() {
        sample.retain_unknown();
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::loader::{load_index, LineSource};

    fn index(name: &str, text: &str) -> DatasetIndex {
        load_index(&LineSource::new(name, text)).unwrap()
    }

    fn set() -> EvaluationSet {
        EvaluationSet::new(
            "team",
            index("gold", "abc\tA\t1\t1\tMayan\tMayan\t\tx=3|y=1|z=2\ndef\tD\tFam\tx=1|y=2"),
            index("mask", "abc\tA\t1\t1\tMayan\tMayan\t\tx=?|y=1|z=?\ndef\tD\tFam\tx=1|y=?"),
            index("pred", "abc\tA\tMayan\tx=3|y=1|z=1"),
        )
    }

    #[test]
    fn test_masked_slots_are_the_question_marks() {
        let s = set();
        assert_eq!(s.masked_slots("abc"), Some(vec!["x", "z"]));
        assert_eq!(s.masked_slots("def"), Some(vec!["y"]));
        assert_eq!(s.masked_slots("zzz"), None);
        assert_eq!(s.total_masked_slots(), 3);
        assert_eq!(s.masked_language_count(), 2);
    }

    #[test]
    fn test_gold_and_predictions_are_untouched() {
        let s = set();
        assert_eq!(s.gold().get("abc").unwrap().features.len(), 3);
        assert_eq!(s.predicted().get("abc").unwrap().features.len(), 3);
    }

    #[test]
    fn test_masking_derivation_is_idempotent() {
        let mut masked = set().masked;
        let before: Vec<_> = masked.samples().map(|s| s.features.clone()).collect();
        derive_masking(&mut masked);
        let after: Vec<_> = masked.samples().map(|s| s.features.clone()).collect();
        assert_eq!(before, after);

        let (first, second) = (set(), set());
        assert_eq!(first.masked_slots("abc"), second.masked_slots("abc"));
    }

    #[test]
    fn test_controlled_genus_counts_follow_taxonomy() {
        let counts = set().controlled_genus_counts();
        assert_eq!(counts.len(), CONTROLLED_GENERA.len());
        assert_eq!(counts[2], ("Mayan".to_string(), 1));
        assert_eq!(counts[6], ("other genera".to_string(), 1));
        assert_eq!(counts[0], ("Madang".to_string(), 0));
    }
}
