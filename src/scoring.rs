//! Relevance scoring of retrieved literature.
//!
//! One record plus the scenario's keywords plus the validator's verdicts
//! go in; a bounded relevance score comes out. Rejected mentions only
//! remove a would-be bonus, they never push the score below its keyword
//! base, and records with nothing going for them are excluded outright.

use serde::{Deserialize, Serialize};

use crate::keywords::KeywordSet;
use crate::literature::LiteratureRecord;
use crate::mention::MentionVerdict;

/// Owned summary of an accepted mention, kept on the scored reference
/// after the borrowing verdicts are gone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidMention {
    /// The alias as it appeared in the record text.
    pub alias: String,
    /// Byte offset of the match in the combined title+abstract text.
    pub position: usize,
}

/// A literature record with its relevance to one scenario.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredReference {
    /// The underlying record.
    pub record: LiteratureRecord,
    /// Relevance score in [0.0, 1.0].
    pub relevance_score: f32,
    /// Keywords found in the record's title or abstract.
    pub matched_keywords: Vec<String>,
    /// Region mentions the validator accepted.
    pub valid_mentions: Vec<ValidMention>,
}

/// Scorer configuration.
#[derive(Debug, Clone)]
pub struct ScorerConfig {
    /// Bonus added per valid region mention, cumulative, capped at 1.0
    /// total.
    pub mention_bonus: f32,
}

impl Default for ScorerConfig {
    fn default() -> Self {
        Self { mention_bonus: 0.1 }
    }
}

/// Scores one record against one scenario's keywords and verdicts.
#[derive(Debug, Clone, Default)]
pub struct RelevanceScorer {
    config: ScorerConfig,
}

impl RelevanceScorer {
    /// Creates a scorer with the given configuration.
    #[must_use]
    pub fn new(config: ScorerConfig) -> Self {
        Self { config }
    }

    /// Scores a record. Returns `None` when the record has zero keyword
    /// matches and zero valid mentions: zero-relevance records are not
    /// handed to the aggregator at all.
    #[must_use]
    pub fn score(
        &self,
        record: &LiteratureRecord,
        keywords: &KeywordSet,
        verdicts: &[MentionVerdict<'_>],
    ) -> Option<ScoredReference> {
        let text = record.combined_text().to_lowercase();

        let matched_keywords: Vec<String> = keywords
            .iter()
            .filter(|k| text.contains(&k.to_lowercase()))
            .map(str::to_string)
            .collect();

        let valid_mentions: Vec<ValidMention> = verdicts
            .iter()
            .filter(|v| v.is_valid)
            .map(|v| ValidMention {
                alias: v.candidate.alias.to_string(),
                position: v.candidate.position,
            })
            .collect();

        if matched_keywords.is_empty() && valid_mentions.is_empty() {
            return None;
        }

        let base = if keywords.is_empty() {
            0.0
        } else {
            matched_keywords.len() as f32 / keywords.len() as f32
        };

        let bonus = self.config.mention_bonus * valid_mentions.len() as f32;
        let relevance_score = (base.min(1.0) + bonus).min(1.0);

        Some(ScoredReference {
            record: record.clone(),
            relevance_score,
            matched_keywords,
            valid_mentions,
        })
    }
}
