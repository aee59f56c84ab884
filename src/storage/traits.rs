//! Abstract storage traits.
//!
//! These traits are the narrow read/write contract between the core and
//! whatever persists scenarios, simulations, and the region catalog. The
//! core never talks to a database directly; in-memory backends serve
//! tests and embedded use.

use thiserror::Error;

use crate::region::{BrainRegion, RegionCode, RegionConnection, RegionId};
use crate::scenario::{Scenario, ScenarioId};
use crate::simulation::{SimulationId, SimulationResult};

/// Errors that can occur during storage operations.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Scenario not found.
    #[error("Scenario not found: {0}")]
    ScenarioNotFound(ScenarioId),

    /// Simulation not found.
    #[error("Simulation not found: {0}")]
    SimulationNotFound(SimulationId),

    /// Region not found.
    #[error("Region not found: {0}")]
    RegionNotFound(String),

    /// Key already exists.
    #[error("Duplicate key: {0}")]
    DuplicateKey(String),

    /// Backend error.
    #[error("Storage backend error: {0}")]
    Backend(String),
}

/// Storage for the static region/connection catalog.
///
/// The catalog is written once at startup and read-only afterwards.
pub trait RegionStore: Send + Sync {
    /// Insert a region. Returns an error if its code already exists.
    fn insert(&self, region: BrainRegion) -> Result<(), StorageError>;

    /// Get a region by ID.
    fn get(&self, id: RegionId) -> Result<Option<BrainRegion>, StorageError>;

    /// Find a region by canonical code.
    fn find_by_code(&self, code: &RegionCode) -> Result<Option<BrainRegion>, StorageError>;

    /// List all regions.
    fn list(&self) -> Result<Vec<BrainRegion>, StorageError>;

    /// Insert a connection between two catalog regions.
    fn insert_connection(&self, connection: RegionConnection) -> Result<(), StorageError>;

    /// Connections originating from or arriving at a region.
    fn connections_for(&self, code: &RegionCode) -> Result<Vec<RegionConnection>, StorageError>;
}

/// Storage for submitted scenarios.
pub trait ScenarioStore: Send + Sync {
    /// Insert a new scenario. Returns an error if the ID already exists.
    fn insert(&self, scenario: Scenario) -> Result<(), StorageError>;

    /// Get a scenario by ID.
    fn get(&self, id: ScenarioId) -> Result<Option<Scenario>, StorageError>;

    /// List scenarios, most recent first.
    fn list_recent(&self, limit: usize) -> Result<Vec<Scenario>, StorageError>;
}

/// Storage for simulation results (with their scored-reference children).
pub trait SimulationStore: Send + Sync {
    /// Insert a new simulation. Returns an error if the ID already exists.
    fn insert(&self, simulation: SimulationResult) -> Result<(), StorageError>;

    /// Get a simulation by ID.
    fn get(&self, id: SimulationId) -> Result<Option<SimulationResult>, StorageError>;

    /// Overwrite an existing simulation (status transitions).
    fn update(&self, simulation: SimulationResult) -> Result<(), StorageError>;

    /// List simulations, most recent first.
    fn list_recent(&self, limit: usize) -> Result<Vec<SimulationResult>, StorageError>;

    /// All simulations run for a scenario.
    fn find_by_scenario(&self, id: ScenarioId) -> Result<Vec<SimulationResult>, StorageError>;
}
