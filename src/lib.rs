//! # NeuroSim - Literature-Grounded Therapeutic Scenario Simulation
//!
//! NeuroSim simulates hypothetical therapeutic scenarios (a compound, a
//! setting, a target brain region, an optional research focus) and grounds
//! the simulated outcome in real biomedical literature: a confidence
//! score, a set of supporting references, and a narrative badge.
//!
//! ## Core Concepts
//!
//! - **Mention validation**: deciding whether a short alias ("A1", "V1",
//!   "CA1") genuinely denotes a brain region in a sentence, versus a gene
//!   symbol or list marker
//! - **Keyword generation**: deterministic search terms from scenario
//!   parameters
//! - **Relevance scoring**: bounded per-record scores from keyword matches
//!   and validated mentions
//! - **Confidence aggregation**: one defensible confidence number and
//!   badge from the scored reference set
//!
//! ## Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use neurosim::{
//!     InMemoryCorpus, InMemoryRegionStore, InMemoryScenarioStore,
//!     InMemorySimulationStore, ScenarioParams, Setting, SimulationEngine,
//! };
//!
//! let engine = SimulationEngine::new(
//!     Arc::new(InMemoryRegionStore::with_builtin_catalog()),
//!     Arc::new(InMemoryScenarioStore::new()),
//!     Arc::new(InMemorySimulationStore::new()),
//!     Arc::new(InMemoryCorpus::with_records(corpus)),
//! )?;
//!
//! let params = ScenarioParams::builder()
//!     .compound("psilocybin")
//!     .setting(Setting::Clinical)
//!     .region("CA1")
//!     .build()?;
//!
//! let result = engine.run_scenario(params)?;
//! println!("confidence: {:?}", result.confidence_score);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

// Core pipeline
pub mod aggregate;
pub mod error;
pub mod keywords;
pub mod mention;
pub mod region;
pub mod scenario;
pub mod scoring;
pub mod simulation;

// Collaborator contracts and backends
pub mod literature;
pub mod storage;

// Execution
pub mod engine;

// Re-export primary types at crate root for convenience
pub use aggregate::{Aggregate, AggregatorConfig, ConfidenceAggregator, NoResearchFound};
pub use engine::runtime::{PendingRun, RuntimeConfig, SimulationRuntime};
pub use engine::{EngineConfig, SimulationEngine};
pub use error::{ExecutionError, NeuroError, NeuroResult, RetrievalError, ValidationError};
pub use keywords::{generate_keywords, KeywordSet};
pub use literature::{InMemoryCorpus, LiteratureRecord, LiteratureSearch};
pub use mention::{
    MentionCandidate, MentionScanner, MentionValidator, MentionVerdict, ReasonCode,
    ValidatorConfig,
};
pub use region::{
    builtin_connections, builtin_regions, AliasDictionary, BrainRegion, RegionAlias, RegionCode,
    RegionConnection, RegionId, SHORT_ALIAS_MAX,
};
pub use scenario::{
    ResearchFocus, Scenario, ScenarioId, ScenarioParams, ScenarioParamsBuilder, Setting,
};
pub use scoring::{RelevanceScorer, ScoredReference, ScorerConfig, ValidMention};
pub use simulation::{
    Badge, FailureReason, SimulationId, SimulationResult, SimulationStatus,
};
pub use storage::{
    InMemoryRegionStore, InMemoryScenarioStore, InMemorySimulationStore, RegionStore,
    ScenarioStore, SimulationStore, StorageError,
};
