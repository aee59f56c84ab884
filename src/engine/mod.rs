//! Simulation pipeline executor.
//!
//! The engine wires the research-grounding pipeline together: keyword
//! generation, literature retrieval, mention validation, relevance
//! scoring, and confidence aggregation, each step fully consuming the
//! prior step's output. Control flow is synchronous; the retrieval
//! collaborator is treated as a blocking call with a bounded result
//! count and the whole pipeline runs under one deadline.

/// Bounded worker-pool runtime for concurrent simulation requests.
pub mod runtime;

use std::collections::HashSet;
use std::sync::Arc;
use std::time::{Duration, Instant};

use tracing::{debug, info, warn};

use crate::aggregate::ConfidenceAggregator;
use crate::error::{ExecutionError, NeuroResult, ValidationError};
use crate::keywords::generate_keywords;
use crate::literature::{LiteratureRecord, LiteratureSearch};
use crate::mention::{MentionScanner, MentionValidator};
use crate::region::{AliasDictionary, BrainRegion, RegionCode, RegionConnection};
use crate::scenario::{Scenario, ScenarioId, ScenarioParams};
use crate::scoring::{RelevanceScorer, ScoredReference};
use crate::simulation::{FailureReason, SimulationId, SimulationResult};
use crate::storage::{RegionStore, ScenarioStore, SimulationStore};

/// Engine configuration.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Maximum records requested from the retrieval collaborator.
    pub max_results: usize,
    /// Deadline for one full pipeline run.
    pub pipeline_timeout_ms: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_results: 25,
            pipeline_timeout_ms: 10_000,
        }
    }
}

/// Executes simulation runs against pluggable collaborators.
///
/// The alias dictionary and scan patterns are built once from the region
/// catalog at construction and shared read-only across runs.
#[derive(Clone)]
pub struct SimulationEngine {
    regions: Arc<dyn RegionStore>,
    scenarios: Arc<dyn ScenarioStore>,
    simulations: Arc<dyn SimulationStore>,
    retrieval: Arc<dyn LiteratureSearch>,
    dictionary: Arc<AliasDictionary>,
    scanner: Arc<MentionScanner>,
    validator: MentionValidator,
    scorer: RelevanceScorer,
    aggregator: ConfidenceAggregator,
    config: EngineConfig,
}

impl SimulationEngine {
    /// Creates an engine with default component configuration.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the region catalog cannot be listed.
    pub fn new(
        regions: Arc<dyn RegionStore>,
        scenarios: Arc<dyn ScenarioStore>,
        simulations: Arc<dyn SimulationStore>,
        retrieval: Arc<dyn LiteratureSearch>,
    ) -> NeuroResult<Self> {
        Self::with_config(
            regions,
            scenarios,
            simulations,
            retrieval,
            EngineConfig::default(),
        )
    }

    /// Creates an engine with an explicit configuration.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the region catalog cannot be listed.
    pub fn with_config(
        regions: Arc<dyn RegionStore>,
        scenarios: Arc<dyn ScenarioStore>,
        simulations: Arc<dyn SimulationStore>,
        retrieval: Arc<dyn LiteratureSearch>,
        config: EngineConfig,
    ) -> NeuroResult<Self> {
        let catalog = regions.list()?;
        let dictionary = Arc::new(AliasDictionary::from_regions(&catalog));
        let scanner = Arc::new(MentionScanner::from_dictionary(&dictionary));
        debug!(
            regions = catalog.len(),
            aliases = dictionary.len(),
            "engine initialized"
        );

        Ok(Self {
            regions,
            scenarios,
            simulations,
            retrieval,
            dictionary,
            scanner,
            validator: MentionValidator::default(),
            scorer: RelevanceScorer::default(),
            aggregator: ConfidenceAggregator::default(),
            config,
        })
    }

    /// The alias dictionary the engine was built with.
    #[must_use]
    pub fn dictionary(&self) -> &Arc<AliasDictionary> {
        &self.dictionary
    }

    /// Submits a scenario and runs the full pipeline synchronously.
    ///
    /// "No supporting research" and retrieval failures are not crate
    /// errors: they come back as a `Failed` result whose
    /// [`FailureReason`] distinguishes them. The returned result is
    /// always persisted.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::UnknownRegion` for a region code not in
    /// the catalog (rejected before any pipeline work), and storage
    /// errors if persisting the run fails.
    pub fn run_scenario(&self, params: ScenarioParams) -> NeuroResult<SimulationResult> {
        let region = self.resolve_region(&params)?;

        let scenario = Scenario::new(params);
        self.scenarios.insert(scenario.clone())?;

        let mut simulation = SimulationResult::pending(scenario.id);
        self.simulations.insert(simulation.clone())?;
        simulation.begin()?;
        self.simulations.update(simulation.clone())?;

        info!(
            scenario = %scenario.id,
            simulation = %simulation.id,
            compound = %scenario.params.compound,
            "simulation started"
        );

        if let Err(err) = self.execute(&scenario, region.as_ref(), &mut simulation) {
            // Unexpected failure: keep an audit record, no partial state.
            warn!(simulation = %simulation.id, error = %err, "internal failure");
            if !simulation.status.is_terminal() {
                simulation.fail(FailureReason::Internal {
                    message: err.to_string(),
                })?;
            }
        }

        self.simulations.update(simulation.clone())?;
        match &simulation.failure {
            None => info!(
                simulation = %simulation.id,
                confidence = simulation.confidence_score,
                references = simulation.references.len(),
                "simulation completed"
            ),
            Some(reason) => warn!(simulation = %simulation.id, %reason, "simulation failed"),
        }
        Ok(simulation)
    }

    /// Runs the pipeline stages, driving `simulation` to a terminal
    /// state. Expected failure modes (retrieval down, deadline elapsed,
    /// no research found) are recorded on the simulation; an `Err` from
    /// this function is an unexpected internal failure.
    fn execute(
        &self,
        scenario: &Scenario,
        region: Option<&BrainRegion>,
        simulation: &mut SimulationResult,
    ) -> NeuroResult<()> {
        let deadline = Instant::now() + Duration::from_millis(self.config.pipeline_timeout_ms);

        let keywords = generate_keywords(&scenario.params, region);
        debug!(keywords = keywords.len(), "keywords generated");

        let records = match self.retrieval.search(&keywords, self.config.max_results) {
            Ok(records) => records,
            Err(err) => {
                simulation.fail(FailureReason::Retrieval {
                    message: err.to_string(),
                })?;
                return Ok(());
            }
        };

        if self.expired(deadline) {
            simulation.fail(self.timeout_reason())?;
            return Ok(());
        }

        let records = dedup_by_fingerprint(records);
        debug!(records = records.len(), "records retrieved");

        let mut scored: Vec<ScoredReference> = Vec::new();
        for record in &records {
            let text = record.combined_text();
            let verdicts: Vec<_> = self
                .scanner
                .scan(&text)
                .into_iter()
                .map(|candidate| self.validator.validate(candidate))
                .collect();

            if let Some(reference) = self.scorer.score(record, &keywords, &verdicts) {
                scored.push(reference);
            }
        }

        if self.expired(deadline) {
            simulation.fail(self.timeout_reason())?;
            return Ok(());
        }

        match self.aggregator.aggregate(scored) {
            Ok(aggregate) => simulation.complete(
                aggregate.confidence_score,
                aggregate.badge,
                aggregate.references,
            )?,
            Err(_) => simulation.fail(FailureReason::NoResearchFound)?,
        }
        Ok(())
    }

    /// Fetches a prior simulation result by ID.
    ///
    /// # Errors
    ///
    /// Returns `ExecutionError::SimulationNotFound` if it does not exist.
    pub fn simulation(&self, id: SimulationId) -> NeuroResult<SimulationResult> {
        self.simulations
            .get(id)?
            .ok_or_else(|| ExecutionError::SimulationNotFound { id }.into())
    }

    /// Fetches a submitted scenario by ID.
    ///
    /// # Errors
    ///
    /// Returns `ExecutionError::ScenarioNotFound` if it does not exist.
    pub fn scenario(&self, id: ScenarioId) -> NeuroResult<Scenario> {
        self.scenarios
            .get(id)?
            .ok_or_else(|| ExecutionError::ScenarioNotFound { id }.into())
    }

    /// Lists prior simulations, most recent first.
    ///
    /// # Errors
    ///
    /// Returns storage errors only.
    pub fn history(&self, limit: usize) -> NeuroResult<Vec<SimulationResult>> {
        Ok(self.simulations.list_recent(limit)?)
    }

    /// Looks up a catalog region by code.
    ///
    /// # Errors
    ///
    /// Returns storage errors only.
    pub fn region(&self, code: &RegionCode) -> NeuroResult<Option<BrainRegion>> {
        Ok(self.regions.find_by_code(code)?)
    }

    /// Connections for a catalog region.
    ///
    /// # Errors
    ///
    /// Returns storage errors only.
    pub fn connections(&self, code: &RegionCode) -> NeuroResult<Vec<RegionConnection>> {
        Ok(self.regions.connections_for(code)?)
    }

    fn resolve_region(&self, params: &ScenarioParams) -> NeuroResult<Option<BrainRegion>> {
        match &params.region {
            None => Ok(None),
            Some(code) => match self.regions.find_by_code(code)? {
                Some(region) => Ok(Some(region)),
                None => Err(ValidationError::UnknownRegion {
                    code: code.to_string(),
                }
                .into()),
            },
        }
    }

    fn expired(&self, deadline: Instant) -> bool {
        Instant::now() >= deadline
    }

    fn timeout_reason(&self) -> FailureReason {
        FailureReason::Timeout {
            duration_ms: self.config.pipeline_timeout_ms,
        }
    }
}

/// Drops records whose content fingerprint was already seen, keeping the
/// first occurrence (retrieval returns best matches first).
fn dedup_by_fingerprint(records: Vec<LiteratureRecord>) -> Vec<LiteratureRecord> {
    let mut seen: HashSet<[u8; 32]> = HashSet::with_capacity(records.len());
    records
        .into_iter()
        .filter(|r| seen.insert(r.fingerprint()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::literature::InMemoryCorpus;
    use crate::storage::{InMemoryRegionStore, InMemoryScenarioStore, InMemorySimulationStore};

    fn engine_with_corpus(corpus: InMemoryCorpus) -> SimulationEngine {
        SimulationEngine::new(
            Arc::new(InMemoryRegionStore::with_builtin_catalog()),
            Arc::new(InMemoryScenarioStore::new()),
            Arc::new(InMemorySimulationStore::new()),
            Arc::new(corpus),
        )
        .unwrap()
    }

    #[test]
    fn test_unknown_region_rejected_before_pipeline() {
        let engine = engine_with_corpus(InMemoryCorpus::new());
        let params = ScenarioParams::builder()
            .compound("psilocybin")
            .region("NOPE")
            .build()
            .unwrap();

        let err = engine.run_scenario(params).unwrap_err();
        assert!(err.is_validation());
        // Nothing was persisted.
        assert!(engine.history(10).unwrap().is_empty());
    }

    #[test]
    fn test_elapsed_deadline_fails_without_partial_results() {
        let corpus = InMemoryCorpus::with_records(vec![LiteratureRecord::new(
            "pmid-1",
            "Psilocybin and hippocampal plasticity",
            "Hippocampal CA1 region showed enhanced synaptic plasticity.",
        )]);
        let engine = SimulationEngine::with_config(
            Arc::new(InMemoryRegionStore::with_builtin_catalog()),
            Arc::new(InMemoryScenarioStore::new()),
            Arc::new(InMemorySimulationStore::new()),
            Arc::new(corpus),
            EngineConfig {
                max_results: 10,
                pipeline_timeout_ms: 0,
            },
        )
        .unwrap();

        let params = ScenarioParams::builder()
            .compound("psilocybin")
            .region("CA1")
            .build()
            .unwrap();
        let result = engine.run_scenario(params).unwrap();

        assert_eq!(result.status, crate::simulation::SimulationStatus::Failed);
        assert!(matches!(
            result.failure,
            Some(FailureReason::Timeout { .. })
        ));
        assert!(result.references.is_empty());
        assert!(result.confidence_score.is_none());
    }

    #[test]
    fn test_dedup_by_fingerprint_keeps_first() {
        let records = vec![
            LiteratureRecord::new("pmid-1", "Title", "first copy"),
            LiteratureRecord::new("pmid-1", "Title", "second copy"),
            LiteratureRecord::new("pmid-2", "Other", ""),
        ];
        let deduped = dedup_by_fingerprint(records);
        assert_eq!(deduped.len(), 2);
        assert_eq!(deduped[0].abstract_text, "first copy");
    }
}
