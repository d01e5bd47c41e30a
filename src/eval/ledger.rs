// ============================================================
// Layer 5 — Missing-Answer Ledger
// ============================================================
// Record of masked slots that a submission never answered.
//
// One ledger is owned by the report driver and lent to every
// scoring call. Entries are keyed by submission name, so
// submissions scored into the same ledger never see each other's
// gaps. Recording the same slot twice is a no-op.

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

/// language id → unanswered feature names
pub type LanguageGaps = BTreeMap<String, BTreeSet<String>>;

#[derive(Debug, Clone, Default, Serialize)]
pub struct MissingLedger {
    entries: BTreeMap<String, LanguageGaps>,
}

impl MissingLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Note that `submission` gave no answer for `feature` of `language`.
    pub fn record(&mut self, submission: &str, language: &str, feature: &str) {
        self.entries
            .entry(submission.to_string())
            .or_default()
            .entry(language.to_string())
            .or_default()
            .insert(feature.to_string());
    }

    /// Gaps for one submission, if it has any
    pub fn gaps(&self, submission: &str) -> Option<&LanguageGaps> {
        self.entries.get(submission).filter(|g| !g.is_empty())
    }

    /// Total unanswered slots for a submission
    pub fn missing_features(&self, submission: &str) -> usize {
        self.gaps(submission)
            .map(|g| g.values().map(BTreeSet::len).sum())
            .unwrap_or(0)
    }

    /// Number of languages with at least one unanswered slot
    pub fn affected_languages(&self, submission: &str) -> usize {
        self.gaps(submission).map(BTreeMap::len).unwrap_or(0)
    }

}

#[cfg(test)]
impl MissingLedger {
    pub fn has_gaps(&self, submission: &str) -> bool {
        self.gaps(submission).is_some()
    }

    pub fn is_missing(&self, submission: &str, language: &str, feature: &str) -> bool {
        self.gaps(submission)
            .and_then(|g| g.get(language))
            .is_some_and(|f| f.contains(feature))
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_per_submission() {
        let mut ledger = MissingLedger::new();
        ledger.record("team_a", "abc", "x");
        ledger.record("team_a", "abc", "y");
        ledger.record("team_a", "def", "x");
        ledger.record("team_b", "abc", "x");

        assert_eq!(ledger.missing_features("team_a"), 3);
        assert_eq!(ledger.affected_languages("team_a"), 2);
        assert_eq!(ledger.missing_features("team_b"), 1);
        assert!(ledger.is_missing("team_b", "abc", "x"));
        assert!(!ledger.is_missing("team_b", "def", "x"));
    }

    #[test]
    fn test_recording_twice_is_idempotent() {
        let mut ledger = MissingLedger::new();
        ledger.record("s", "abc", "x");
        ledger.record("s", "abc", "x");
        assert_eq!(ledger.missing_features("s"), 1);
    }

    #[test]
    fn test_unknown_submission_has_no_gaps() {
        let ledger = MissingLedger::new();
        assert!(!ledger.has_gaps("nobody"));
        assert_eq!(ledger.missing_features("nobody"), 0);
        assert_eq!(ledger.affected_languages("nobody"), 0);
    }
}
