//! Storage layer: abstract traits and the in-memory backend.

mod memory;
mod traits;

pub use memory::{InMemoryRegionStore, InMemoryScenarioStore, InMemorySimulationStore};
pub use traits::{RegionStore, ScenarioStore, SimulationStore, StorageError};
