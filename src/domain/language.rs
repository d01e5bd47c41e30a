// ============================================================
// Layer 3 — Language Metadata
// ============================================================
// The descriptive half of a sample: who the language is and
// where it sits in the genealogical tree.
//
// Abbreviated records carry no coordinates, genus or country
// codes. Coordinates then hold NaN and genus is None.
//
// The controlled-genus bucket is derived, never read from the
// file: a language is either in one of six tracked genera or
// in the catch-all "other genera" bucket.

use serde::{Deserialize, Serialize};

/// The catch-all controlled-genus bucket
pub const OTHER_GENERA: &str = "other genera";

/// The tracked genera plus the catch-all, in sorted (byte) order.
/// Upper-case names sort before "other genera".
pub const CONTROLLED_GENERA: [&str; 7] = [
    "Madang",
    "Mahakiranti",
    "Mayan",
    "Nilotic",
    "Northern Pama-Nyungan",
    "Tucanoan",
    OTHER_GENERA,
];

/// Map an optional genus onto its controlled-genus bucket.
pub fn controlled_genus(genus: Option<&str>) -> &'static str {
    genus
        .and_then(|g| {
            CONTROLLED_GENERA[..CONTROLLED_GENERA.len() - 1]
                .iter()
                .find(|c| **c == g)
                .copied()
        })
        .unwrap_or(OTHER_GENERA)
}

/// Metadata fields that the dataset index keeps value tallies for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum LanguageField {
    Id,
    Name,
    Latitude,
    Longitude,
    Genus,
    Family,
    Countries,
    ControlledGenus,
}

impl LanguageField {
    pub const ALL: [LanguageField; 8] = [
        LanguageField::Id,
        LanguageField::Name,
        LanguageField::Latitude,
        LanguageField::Longitude,
        LanguageField::Genus,
        LanguageField::Family,
        LanguageField::Countries,
        LanguageField::ControlledGenus,
    ];
}

/// Per-language metadata parsed from the leading record fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LanguageMeta {
    /// WALS code, unique within one file
    pub id: String,

    pub name: String,

    /// NaN when the record did not carry coordinates
    pub latitude: f64,
    pub longitude: f64,

    /// Absent for abbreviated records
    pub genus: Option<String>,

    pub family: String,

    /// ISO country codes, possibly empty
    pub countries: Vec<String>,

    /// One of CONTROLLED_GENERA
    pub controlled_genus: String,
}

impl LanguageMeta {
    /// Build metadata, deriving the controlled-genus bucket from `genus`.
    pub fn new(
        id:        impl Into<String>,
        name:      impl Into<String>,
        latitude:  f64,
        longitude: f64,
        genus:     Option<String>,
        family:    impl Into<String>,
        countries: Vec<String>,
    ) -> Self {
        let controlled = controlled_genus(genus.as_deref()).to_string();
        Self {
            id: id.into(),
            name: name.into(),
            latitude,
            longitude,
            genus,
            family: family.into(),
            countries,
            controlled_genus: controlled,
        }
    }

    /// Metadata for an abbreviated record: no coordinates, genus or countries.
    pub fn abbreviated(
        id:     impl Into<String>,
        name:   impl Into<String>,
        family: impl Into<String>,
    ) -> Self {
        Self::new(id, name, f64::NAN, f64::NAN, None, family, Vec::new())
    }

    /// The label this language carries for `field`, used for tallies and grouping.
    /// Returns None when the field is absent (a missing genus).
    pub fn field(&self, field: LanguageField) -> Option<String> {
        match field {
            LanguageField::Id              => Some(self.id.clone()),
            LanguageField::Name            => Some(self.name.clone()),
            LanguageField::Latitude        => Some(self.latitude.to_string()),
            LanguageField::Longitude       => Some(self.longitude.to_string()),
            LanguageField::Genus           => self.genus.clone(),
            LanguageField::Family          => Some(self.family.clone()),
            LanguageField::Countries       => Some(self.countries.join(" ")),
            LanguageField::ControlledGenus => Some(self.controlled_genus.clone()),
        }
    }
}
