//! Deterministic keyword generation from scenario parameters.
//!
//! Keyword order matters downstream: retrieval treats leading keywords as
//! higher-priority query terms, so the primary compound and region terms
//! always precede the secondary setting/focus vocabulary.

use serde::{Deserialize, Serialize};

use crate::region::BrainRegion;
use crate::scenario::ScenarioParams;

/// Fallback terms when no specific parameter maps to a keyword.
pub const DEFAULT_TERMS: &[&str] = &["psychedelics", "brain", "neuroplasticity"];

/// Ordered, case-insensitively deduplicated keyword sequence.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KeywordSet {
    terms: Vec<String>,
}

impl KeywordSet {
    /// Creates an empty keyword set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a term unless an equal term (case-insensitive) is already
    /// present. Blank terms are ignored.
    pub fn push(&mut self, term: impl AsRef<str>) {
        let term = term.as_ref().trim();
        if term.is_empty() {
            return;
        }
        if !self.contains(term) {
            self.terms.push(term.to_string());
        }
    }

    /// Case-insensitive membership test.
    #[must_use]
    pub fn contains(&self, term: &str) -> bool {
        self.terms.iter().any(|t| t.eq_ignore_ascii_case(term))
    }

    /// The terms, in priority order.
    #[must_use]
    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    /// Number of keywords.
    #[must_use]
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    /// Returns true if the set holds no keywords.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Iterates over the terms in priority order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.terms.iter().map(String::as_str)
    }
}

/// Generates the search keywords for a scenario.
///
/// Pure and deterministic: the same parameters always yield the same
/// ordered set. `region` is the resolved catalog entry for
/// `params.region`, if any. Falls back to [`DEFAULT_TERMS`] when nothing
/// maps.
#[must_use]
pub fn generate_keywords(params: &ScenarioParams, region: Option<&BrainRegion>) -> KeywordSet {
    let mut keywords = KeywordSet::new();

    keywords.push(&params.compound);

    if let Some(region) = region {
        keywords.push(&region.name);
        keywords.push(region.code.as_str());
    }

    for term in params.setting.vocabulary() {
        keywords.push(term);
    }

    if let Some(focus) = params.research_focus {
        for term in focus.terms() {
            keywords.push(term);
        }
    }

    if keywords.is_empty() {
        for term in DEFAULT_TERMS {
            keywords.push(term);
        }
    }

    keywords
}
