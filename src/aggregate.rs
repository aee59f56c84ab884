//! Confidence aggregation over scored references.
//!
//! The aggregator turns the surviving reference set into one defensible
//! confidence number. An empty set is an explicit "no research found"
//! outcome, never a zero-confidence success.

use thiserror::Error;

use crate::scoring::ScoredReference;
use crate::simulation::Badge;

/// Zero references survived scoring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("no supporting research found")]
pub struct NoResearchFound;

/// Aggregator configuration.
#[derive(Debug, Clone)]
pub struct AggregatorConfig {
    /// How many of the top references feed the confidence score.
    pub top_k: usize,
}

impl Default for AggregatorConfig {
    fn default() -> Self {
        Self { top_k: 5 }
    }
}

/// The aggregated outcome of a reference set.
#[derive(Debug, Clone, PartialEq)]
pub struct Aggregate {
    /// Confidence in [0.0, 1.0].
    pub confidence_score: f32,
    /// Badge earned by the confidence score, if any.
    pub badge: Option<Badge>,
    /// All surviving references, ordered by descending relevance.
    pub references: Vec<ScoredReference>,
}

/// Aggregates scored references into a confidence score and badge.
#[derive(Debug, Clone, Default)]
pub struct ConfidenceAggregator {
    config: AggregatorConfig,
}

impl ConfidenceAggregator {
    /// Creates an aggregator with the given configuration.
    #[must_use]
    pub fn new(config: AggregatorConfig) -> Self {
        Self { config }
    }

    /// Aggregates a reference set.
    ///
    /// Confidence is the weighted mean of the top-K relevance scores
    /// with linearly descending rank weights, so the best reference
    /// dominates but is moderated by its supporting evidence. Fewer
    /// than K references average over what exists.
    ///
    /// # Errors
    ///
    /// Returns [`NoResearchFound`] for an empty input set.
    pub fn aggregate(
        &self,
        mut references: Vec<ScoredReference>,
    ) -> Result<Aggregate, NoResearchFound> {
        if references.is_empty() {
            return Err(NoResearchFound);
        }

        references.sort_by(|a, b| {
            b.relevance_score
                .partial_cmp(&a.relevance_score)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.record.external_id.cmp(&b.record.external_id))
        });

        let k = self.config.top_k.max(1).min(references.len());
        let mut weighted = 0.0f64;
        let mut total = 0.0f64;
        for (i, reference) in references.iter().take(k).enumerate() {
            let weight = (k - i) as f64;
            weighted += weight * f64::from(reference.relevance_score);
            total += weight;
        }

        #[allow(clippy::cast_possible_truncation)]
        let confidence_score = ((weighted / total) as f32).clamp(0.0, 1.0);

        Ok(Aggregate {
            confidence_score,
            badge: Badge::for_confidence(confidence_score),
            references,
        })
    }
}
