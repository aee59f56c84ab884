use std::sync::Arc;

use neurosim::{
    InMemoryCorpus, InMemoryRegionStore, InMemoryScenarioStore, InMemorySimulationStore,
    KeywordSet, LiteratureRecord, LiteratureSearch, ResearchFocus, RetrievalError,
    ScenarioParams, Setting, SimulationEngine, SimulationStatus,
};

use neurosim::FailureReason;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Retrieval double that simulates an unreachable literature service.
struct UnreachableService;

impl LiteratureSearch for UnreachableService {
    fn search(
        &self,
        _keywords: &KeywordSet,
        _max_results: usize,
    ) -> Result<Vec<LiteratureRecord>, RetrievalError> {
        Err(RetrievalError::ServiceUnreachable {
            message: "connection refused".to_string(),
        })
    }
}

fn research_corpus() -> InMemoryCorpus {
    InMemoryCorpus::with_records(vec![
        LiteratureRecord::new(
            "pmid-101",
            "Psilocybin and hippocampal plasticity",
            "Hippocampal CA1 region showed enhanced synaptic plasticity after psilocybin \
             administration in a randomized clinical trial.",
        ),
        LiteratureRecord::new(
            "pmid-102",
            "Psilocybin therapy for depression",
            "Psilocybin-assisted psychotherapy reduced depression scores; fMRI showed \
             altered connectivity in prefrontal cortex.",
        ),
        LiteratureRecord::new(
            "pmid-103",
            "Nr4a1 expression profiling",
            "The v1 variant of the receptor showed increased Nr4a1 and Slc6a4 expression \
             after psilocybin exposure.",
        ),
        LiteratureRecord::new(
            "pmid-104",
            "Crop rotation in medieval Europe",
            "An agricultural history survey with no neuroscience content.",
        ),
    ])
}

fn engine_with(search: Arc<dyn LiteratureSearch>) -> SimulationEngine {
    SimulationEngine::new(
        Arc::new(InMemoryRegionStore::with_builtin_catalog()),
        Arc::new(InMemoryScenarioStore::new()),
        Arc::new(InMemorySimulationStore::new()),
        search,
    )
    .unwrap()
}

fn ca1_depression_params() -> ScenarioParams {
    ScenarioParams::builder()
        .compound("psilocybin")
        .setting(Setting::Clinical)
        .region("CA1")
        .research_focus(ResearchFocus::Depression)
        .build()
        .unwrap()
}

#[test]
fn completed_simulation_grounds_confidence_in_references() {
    init_tracing();
    let engine = engine_with(Arc::new(research_corpus()));

    let result = engine.run_scenario(ca1_depression_params()).unwrap();

    assert_eq!(result.status, SimulationStatus::Completed);
    let confidence = result.confidence_score.expect("completed run has confidence");
    assert!(confidence > 0.0 && confidence <= 1.0);
    assert!(!result.references.is_empty());
    assert!(result.failure.is_none());

    // References come back ordered by descending relevance.
    let scores: Vec<f32> = result
        .references
        .iter()
        .map(|r| r.relevance_score)
        .collect();
    let mut sorted = scores.clone();
    sorted.sort_by(|a, b| b.partial_cmp(a).unwrap());
    assert_eq!(scores, sorted);

    // The irrelevant record scored zero and was excluded entirely.
    assert!(result
        .references
        .iter()
        .all(|r| r.record.external_id != "pmid-104"));

    // Both the scenario and the simulation are persisted and fetchable.
    let stored = engine.simulation(result.id).unwrap();
    assert_eq!(stored.status, SimulationStatus::Completed);
    let scenario = engine.scenario(result.scenario_id).unwrap();
    assert_eq!(scenario.params.compound, "psilocybin");
}

#[test]
fn valid_mentions_earn_bonuses_and_gene_matches_do_not() {
    let engine = engine_with(Arc::new(research_corpus()));
    let result = engine.run_scenario(ca1_depression_params()).unwrap();

    let neuro_ref = result
        .references
        .iter()
        .find(|r| r.record.external_id == "pmid-101")
        .expect("CA1 plasticity record should survive scoring");
    assert!(
        !neuro_ref.valid_mentions.is_empty(),
        "CA1 in neuro context should validate"
    );

    // The gene-expression record may survive on keyword overlap, but its
    // alias matches must not be counted as region mentions.
    if let Some(gene_ref) = result
        .references
        .iter()
        .find(|r| r.record.external_id == "pmid-103")
    {
        assert!(gene_ref.valid_mentions.is_empty());
    }
}

#[test]
fn no_research_found_is_failed_not_zero_confidence() {
    let empty = InMemoryCorpus::with_records(vec![LiteratureRecord::new(
        "pmid-900",
        "Unrelated metallurgy study",
        "Nothing about the scenario at all.",
    )]);
    let engine = engine_with(Arc::new(empty));

    let params = ScenarioParams::builder()
        .compound("unobtainium")
        .setting(Setting::Laboratory)
        .build()
        .unwrap();
    let result = engine.run_scenario(params).unwrap();

    assert_eq!(result.status, SimulationStatus::Failed);
    assert_eq!(result.failure, Some(FailureReason::NoResearchFound));
    // A failure is never a zero-confidence success.
    assert!(result.confidence_score.is_none());
    assert!(result.references.is_empty());

    // The failed run is persisted as an audit record.
    let stored = engine.simulation(result.id).unwrap();
    assert_eq!(stored.failure, Some(FailureReason::NoResearchFound));
}

#[test]
fn retrieval_failure_is_distinguishable_from_no_results() {
    init_tracing();
    let engine = engine_with(Arc::new(UnreachableService));
    let result = engine.run_scenario(ca1_depression_params()).unwrap();

    assert_eq!(result.status, SimulationStatus::Failed);
    match result.failure {
        Some(FailureReason::Retrieval { ref message }) => {
            assert!(message.contains("connection refused"));
        }
        other => panic!("expected retrieval failure, got {other:?}"),
    }
    assert_ne!(result.failure, Some(FailureReason::NoResearchFound));
}

#[test]
fn history_lists_most_recent_first() {
    let engine = engine_with(Arc::new(research_corpus()));

    let first = engine.run_scenario(ca1_depression_params()).unwrap();
    let second = engine
        .run_scenario(
            ScenarioParams::builder()
                .compound("ketamine")
                .setting(Setting::Clinical)
                .research_focus(ResearchFocus::Depression)
                .build()
                .unwrap(),
        )
        .unwrap();

    let history = engine.history(10).unwrap();
    assert_eq!(history.len(), 2);
    assert_eq!(history[0].id, second.id);
    assert_eq!(history[1].id, first.id);

    let one = engine.history(1).unwrap();
    assert_eq!(one.len(), 1);
    assert_eq!(one[0].id, second.id);
}

#[test]
fn duplicate_retrieval_results_are_deduplicated() {
    let record = LiteratureRecord::new(
        "pmid-101",
        "Psilocybin and hippocampal plasticity",
        "Hippocampal CA1 region showed enhanced synaptic plasticity after psilocybin.",
    );
    let corpus = InMemoryCorpus::with_records(vec![record.clone(), record]);
    let engine = engine_with(Arc::new(corpus));

    let result = engine.run_scenario(ca1_depression_params()).unwrap();
    assert_eq!(result.status, SimulationStatus::Completed);
    assert_eq!(result.references.len(), 1);
}

#[test]
fn region_catalog_is_queryable_through_the_engine() {
    let engine = engine_with(Arc::new(research_corpus()));

    let code = neurosim::RegionCode::new("CA1");
    let region = engine.region(&code).unwrap().expect("CA1 in catalog");
    assert_eq!(region.name, "hippocampal CA1 subfield");

    let connections = engine.connections(&code).unwrap();
    assert!(!connections.is_empty());
}
