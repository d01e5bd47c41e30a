// ============================================================
// Layer 4 — Dataset Index
// ============================================================
// All samples of one file, keyed by language id, plus the
// value tallies used to enumerate group labels:
//
//   language_values[field][label]  → number of languages
//   feature_values[feature][value] → number of languages
//
// The tallies never feed into scoring. They only answer "which
// labels exist for this grouping and how many languages carry
// each one".
//
// Two invariants are enforced while indexing:
//   - a language id appears at most once
//   - a genus belongs to exactly one family

use std::collections::BTreeMap;

use crate::domain::error::{EvalError, EvalResult};
use crate::domain::language::LanguageField;
use crate::domain::sample::{FeatureValue, Sample};

/// label → number of samples carrying it
pub type ValueCounts = BTreeMap<String, usize>;

/// One loaded feature file.
#[derive(Debug, Clone, Default)]
pub struct DatasetIndex {
    /// Where the samples came from, for logs and error context
    name: String,

    /// Language id → sample, in id order
    samples: BTreeMap<String, Sample>,

    language_values: BTreeMap<LanguageField, ValueCounts>,

    feature_values: BTreeMap<String, BTreeMap<FeatureValue, usize>>,

    genus_family: BTreeMap<String, String>,
}

impl DatasetIndex {
    /// Create an empty index
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Build an index from already parsed samples.
    pub fn from_samples(
        name:    impl Into<String>,
        samples: impl IntoIterator<Item = Sample>,
    ) -> EvalResult<Self> {
        let mut index = Self::new(name);
        for sample in samples {
            index.insert(sample)?;
        }
        Ok(index)
    }

    /// Add one sample, updating tallies and checking invariants.
    pub fn insert(&mut self, sample: Sample) -> EvalResult<()> {
        let id = sample.id().to_string();
        if self.samples.contains_key(&id) {
            return Err(EvalError::DuplicateLanguage(id));
        }

        if let Some(genus) = &sample.lang.genus {
            match self.genus_family.get(genus) {
                Some(existing) if *existing != sample.lang.family => {
                    return Err(EvalError::GenusFamilyConflict {
                        genus:    genus.clone(),
                        existing: existing.clone(),
                        found:    sample.lang.family.clone(),
                    });
                }
                Some(_) => {}
                None => {
                    self.genus_family
                        .insert(genus.clone(), sample.lang.family.clone());
                }
            }
        }

        for field in LanguageField::ALL {
            if let Some(label) = sample.lang.field(field) {
                *self
                    .language_values
                    .entry(field)
                    .or_default()
                    .entry(label)
                    .or_insert(0) += 1;
            }
        }

        for (feature, value) in &sample.features {
            *self
                .feature_values
                .entry(feature.clone())
                .or_default()
                .entry(*value)
                .or_insert(0) += 1;
        }

        self.samples.insert(id, sample);
        Ok(())
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Sample> {
        self.samples.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.samples.contains_key(id)
    }

    /// Samples in language-id order
    pub fn samples(&self) -> impl Iterator<Item = &Sample> {
        self.samples.values()
    }

    pub(crate) fn samples_mut(&mut self) -> impl Iterator<Item = &mut Sample> {
        self.samples.values_mut()
    }

    /// Label tallies for a metadata field; empty if no sample carries it
    pub fn language_values(&self, field: LanguageField) -> ValueCounts {
        self.language_values
            .get(&field)
            .cloned()
            .unwrap_or_default()
    }

    /// Value tallies for a feature, keyed by the value's text form
    pub fn feature_values(&self, feature: &str) -> ValueCounts {
        self.feature_values
            .get(feature)
            .map(|counts| {
                counts
                    .iter()
                    .map(|(v, n)| (v.to_string(), *n))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Every feature name seen in this file, sorted
    pub fn feature_names(&self) -> impl Iterator<Item = &str> {
        self.feature_values.keys().map(String::as_str)
    }

    pub fn genus_family(&self) -> &BTreeMap<String, String> {
        &self.genus_family
    }
}
