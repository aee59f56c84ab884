//! Literature records and the retrieval collaborator contract.
//!
//! The core never talks to a literature service directly; it consumes the
//! [`LiteratureSearch`] trait. Backends must return `Ok(vec![])` for "no
//! results" and reserve errors for the service itself being unreachable
//! or misbehaving, since callers need to tell those two situations apart.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::RetrievalError;
use crate::keywords::KeywordSet;

/// One retrieved literature record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LiteratureRecord {
    /// Identifier in the external literature service (e.g. a PMID or DOI).
    pub external_id: String,
    /// Article title.
    pub title: String,
    /// Abstract text. May be empty when the service withholds it.
    pub abstract_text: String,

    /// Publication date, when known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub publication_date: Option<DateTime<Utc>>,
}

impl LiteratureRecord {
    /// Creates a record without a publication date.
    #[must_use]
    pub fn new(
        external_id: impl Into<String>,
        title: impl Into<String>,
        abstract_text: impl Into<String>,
    ) -> Self {
        Self {
            external_id: external_id.into(),
            title: title.into(),
            abstract_text: abstract_text.into(),
            publication_date: None,
        }
    }

    /// Sets the publication date.
    #[must_use]
    pub fn with_publication_date(mut self, date: DateTime<Utc>) -> Self {
        self.publication_date = Some(date);
        self
    }

    /// Title and abstract joined for scanning and scoring.
    #[must_use]
    pub fn combined_text(&self) -> String {
        if self.abstract_text.is_empty() {
            self.title.clone()
        } else {
            format!("{}. {}", self.title, self.abstract_text)
        }
    }

    /// Stable content fingerprint, used to deduplicate records that
    /// different query terms retrieved more than once.
    #[must_use]
    pub fn fingerprint(&self) -> [u8; 32] {
        let mut hasher = blake3::Hasher::new();
        hasher.update(self.external_id.as_bytes());
        hasher.update(b"\x00");
        hasher.update(self.title.as_bytes());
        *hasher.finalize().as_bytes()
    }
}

/// Literature retrieval collaborator.
///
/// The engine treats `search` as a blocking call with a bounded result
/// count; any internal concurrency or paging is opaque to the core.
pub trait LiteratureSearch: Send + Sync {
    /// Searches for records matching the keywords, best matches first.
    ///
    /// # Errors
    ///
    /// Returns `RetrievalError` only when the service is unreachable,
    /// times out, or responds with garbage. An empty result set is `Ok`.
    fn search(
        &self,
        keywords: &KeywordSet,
        max_results: usize,
    ) -> Result<Vec<LiteratureRecord>, RetrievalError>;
}

/// In-memory reference backend: keyword substring search over a seeded
/// corpus. Used by tests and embedded callers.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCorpus {
    records: Vec<LiteratureRecord>,
}

impl InMemoryCorpus {
    /// Creates an empty corpus.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a corpus from existing records.
    #[must_use]
    pub fn with_records(records: Vec<LiteratureRecord>) -> Self {
        Self { records }
    }

    /// Adds a record to the corpus.
    pub fn add(&mut self, record: LiteratureRecord) {
        self.records.push(record);
    }

    /// Number of records in the corpus.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns true if the corpus holds no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    fn keyword_hits(record: &LiteratureRecord, keywords: &KeywordSet) -> usize {
        let text = record.combined_text().to_lowercase();
        keywords
            .iter()
            .filter(|k| text.contains(&k.to_lowercase()))
            .count()
    }
}

impl LiteratureSearch for InMemoryCorpus {
    fn search(
        &self,
        keywords: &KeywordSet,
        max_results: usize,
    ) -> Result<Vec<LiteratureRecord>, RetrievalError> {
        let mut hits: Vec<(usize, &LiteratureRecord)> = self
            .records
            .iter()
            .map(|r| (Self::keyword_hits(r, keywords), r))
            .filter(|&(hits, _)| hits > 0)
            .collect();

        // Best matches first; stable sort keeps corpus order on ties.
        hits.sort_by(|a, b| b.0.cmp(&a.0));

        Ok(hits
            .into_iter()
            .take(max_results)
            .map(|(_, r)| r.clone())
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keywords(terms: &[&str]) -> KeywordSet {
        let mut set = KeywordSet::new();
        for term in terms {
            set.push(term);
        }
        set
    }

    fn sample_corpus() -> InMemoryCorpus {
        InMemoryCorpus::with_records(vec![
            LiteratureRecord::new(
                "pmid-1",
                "Psilocybin and hippocampal plasticity",
                "Psilocybin increased synaptic plasticity in hippocampal CA1.",
            ),
            LiteratureRecord::new(
                "pmid-2",
                "Ketamine in treatment-resistant depression",
                "A randomized clinical trial of ketamine infusion.",
            ),
            LiteratureRecord::new(
                "pmid-3",
                "Gene expression atlas",
                "Transcriptomic survey of Slc6a4 expression.",
            ),
        ])
    }

    #[test]
    fn test_search_ranks_by_hits() {
        let corpus = sample_corpus();
        let results = corpus
            .search(&keywords(&["psilocybin", "plasticity", "ketamine"]), 10)
            .unwrap();

        assert_eq!(results[0].external_id, "pmid-1");
        assert!(results.iter().all(|r| r.external_id != "pmid-3"));
    }

    #[test]
    fn test_search_empty_result_is_ok() {
        let corpus = sample_corpus();
        let results = corpus.search(&keywords(&["zebrafish"]), 10).unwrap();
        assert!(results.is_empty());
    }

    #[test]
    fn test_search_respects_max_results() {
        let corpus = sample_corpus();
        let results = corpus
            .search(&keywords(&["psilocybin", "ketamine", "expression"]), 1)
            .unwrap();
        assert_eq!(results.len(), 1);
    }

    #[test]
    fn test_fingerprint_stability() {
        let a = LiteratureRecord::new("pmid-1", "Title", "Abstract");
        let b = LiteratureRecord::new("pmid-1", "Title", "different abstract");
        let c = LiteratureRecord::new("pmid-2", "Title", "Abstract");

        assert_eq!(a.fingerprint(), b.fingerprint());
        assert_ne!(a.fingerprint(), c.fingerprint());
    }

    #[test]
    fn test_combined_text_handles_missing_abstract() {
        let record = LiteratureRecord::new("pmid-9", "Only a title", "");
        assert_eq!(record.combined_text(), "Only a title");
    }

    #[test]
    fn test_record_serialization() {
        let record = LiteratureRecord::new("doi:10.1/abc", "T", "A")
            .with_publication_date(Utc::now());
        let json = serde_json::to_string(&record).unwrap();
        let back: LiteratureRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(record, back);
    }
}
