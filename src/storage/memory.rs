//! In-memory storage backend.
//!
//! Thread-safe reference implementations of the storage traits, used by
//! tests and embedded callers.

use std::collections::HashMap;
use std::sync::RwLock;

use crate::region::{BrainRegion, RegionCode, RegionConnection, RegionId};
use crate::scenario::{Scenario, ScenarioId};
use crate::simulation::{SimulationId, SimulationResult};
use crate::storage::traits::{
    RegionStore, ScenarioStore, SimulationStore, StorageError,
};

fn lock_err(context: &'static str) -> StorageError {
    StorageError::Backend(format!("poisoned lock: {context}"))
}

#[derive(Debug, Default)]
struct RegionState {
    by_id: HashMap<RegionId, BrainRegion>,
    by_code: HashMap<RegionCode, RegionId>,
    connections: Vec<RegionConnection>,
}

/// Thread-safe in-memory region store.
#[derive(Debug, Default)]
pub struct InMemoryRegionStore {
    state: RwLock<RegionState>,
}

impl InMemoryRegionStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store seeded with the built-in region and connection
    /// catalog.
    #[must_use]
    pub fn with_builtin_catalog() -> Self {
        let store = Self::new();
        for region in crate::region::builtin_regions() {
            // Codes in the built-in catalog are unique.
            let _ = store.insert(region);
        }
        for connection in crate::region::builtin_connections() {
            let _ = store.insert_connection(connection);
        }
        store
    }
}

impl RegionStore for InMemoryRegionStore {
    fn insert(&self, region: BrainRegion) -> Result<(), StorageError> {
        let mut state = self.state.write().map_err(|_| lock_err("region insert"))?;
        if state.by_code.contains_key(&region.code) {
            return Err(StorageError::DuplicateKey(region.code.to_string()));
        }
        state.by_code.insert(region.code.clone(), region.id);
        state.by_id.insert(region.id, region);
        Ok(())
    }

    fn get(&self, id: RegionId) -> Result<Option<BrainRegion>, StorageError> {
        let state = self.state.read().map_err(|_| lock_err("region get"))?;
        Ok(state.by_id.get(&id).cloned())
    }

    fn find_by_code(&self, code: &RegionCode) -> Result<Option<BrainRegion>, StorageError> {
        let state = self.state.read().map_err(|_| lock_err("region find"))?;
        Ok(state
            .by_code
            .get(code)
            .and_then(|id| state.by_id.get(id))
            .cloned())
    }

    fn list(&self) -> Result<Vec<BrainRegion>, StorageError> {
        let state = self.state.read().map_err(|_| lock_err("region list"))?;
        let mut regions: Vec<BrainRegion> = state.by_id.values().cloned().collect();
        regions.sort_by(|a, b| a.code.as_str().cmp(b.code.as_str()));
        Ok(regions)
    }

    fn insert_connection(&self, connection: RegionConnection) -> Result<(), StorageError> {
        let mut state = self
            .state
            .write()
            .map_err(|_| lock_err("connection insert"))?;
        if !state.by_code.contains_key(&connection.from) {
            return Err(StorageError::RegionNotFound(connection.from.to_string()));
        }
        if !state.by_code.contains_key(&connection.to) {
            return Err(StorageError::RegionNotFound(connection.to.to_string()));
        }
        state.connections.push(connection);
        Ok(())
    }

    fn connections_for(&self, code: &RegionCode) -> Result<Vec<RegionConnection>, StorageError> {
        let state = self.state.read().map_err(|_| lock_err("connection list"))?;
        Ok(state
            .connections
            .iter()
            .filter(|c| &c.from == code || &c.to == code)
            .cloned()
            .collect())
    }
}

/// Thread-safe in-memory scenario store.
#[derive(Debug, Default)]
pub struct InMemoryScenarioStore {
    // Insertion order doubles as recency order.
    state: RwLock<Vec<Scenario>>,
}

impl InMemoryScenarioStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl ScenarioStore for InMemoryScenarioStore {
    fn insert(&self, scenario: Scenario) -> Result<(), StorageError> {
        let mut state = self.state.write().map_err(|_| lock_err("scenario insert"))?;
        if state.iter().any(|s| s.id == scenario.id) {
            return Err(StorageError::DuplicateKey(scenario.id.to_string()));
        }
        state.push(scenario);
        Ok(())
    }

    fn get(&self, id: ScenarioId) -> Result<Option<Scenario>, StorageError> {
        let state = self.state.read().map_err(|_| lock_err("scenario get"))?;
        Ok(state.iter().find(|s| s.id == id).cloned())
    }

    fn list_recent(&self, limit: usize) -> Result<Vec<Scenario>, StorageError> {
        let state = self.state.read().map_err(|_| lock_err("scenario list"))?;
        Ok(state.iter().rev().take(limit).cloned().collect())
    }
}

/// Thread-safe in-memory simulation store.
#[derive(Debug, Default)]
pub struct InMemorySimulationStore {
    by_id: RwLock<HashMap<SimulationId, SimulationResult>>,
    // Insertion order doubles as recency order.
    order: RwLock<Vec<SimulationId>>,
}

impl InMemorySimulationStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl SimulationStore for InMemorySimulationStore {
    fn insert(&self, simulation: SimulationResult) -> Result<(), StorageError> {
        let mut by_id = self.by_id.write().map_err(|_| lock_err("simulation insert"))?;
        if by_id.contains_key(&simulation.id) {
            return Err(StorageError::DuplicateKey(simulation.id.to_string()));
        }
        let mut order = self.order.write().map_err(|_| lock_err("simulation order"))?;
        order.push(simulation.id);
        by_id.insert(simulation.id, simulation);
        Ok(())
    }

    fn get(&self, id: SimulationId) -> Result<Option<SimulationResult>, StorageError> {
        let by_id = self.by_id.read().map_err(|_| lock_err("simulation get"))?;
        Ok(by_id.get(&id).cloned())
    }

    fn update(&self, simulation: SimulationResult) -> Result<(), StorageError> {
        let mut by_id = self.by_id.write().map_err(|_| lock_err("simulation update"))?;
        if !by_id.contains_key(&simulation.id) {
            return Err(StorageError::SimulationNotFound(simulation.id));
        }
        by_id.insert(simulation.id, simulation);
        Ok(())
    }

    fn list_recent(&self, limit: usize) -> Result<Vec<SimulationResult>, StorageError> {
        let by_id = self.by_id.read().map_err(|_| lock_err("simulation list"))?;
        let order = self.order.read().map_err(|_| lock_err("simulation order"))?;
        Ok(order
            .iter()
            .rev()
            .take(limit)
            .filter_map(|id| by_id.get(id))
            .cloned()
            .collect())
    }

    fn find_by_scenario(&self, id: ScenarioId) -> Result<Vec<SimulationResult>, StorageError> {
        let by_id = self.by_id.read().map_err(|_| lock_err("simulation find"))?;
        let order = self.order.read().map_err(|_| lock_err("simulation order"))?;
        Ok(order
            .iter()
            .filter_map(|sim_id| by_id.get(sim_id))
            .filter(|s| s.scenario_id == id)
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scenario::ScenarioParams;

    fn scenario(compound: &str) -> Scenario {
        Scenario::new(
            ScenarioParams::builder()
                .compound(compound)
                .build()
                .unwrap(),
        )
    }

    #[test]
    fn test_region_store_insert_and_find() {
        let store = InMemoryRegionStore::new();
        let region = BrainRegion::new("CA1", "hippocampal CA1 subfield");
        let id = region.id;
        store.insert(region).unwrap();

        assert!(store.get(id).unwrap().is_some());
        let found = store.find_by_code(&RegionCode::new("ca1")).unwrap();
        assert_eq!(found.unwrap().id, id);
    }

    #[test]
    fn test_region_store_rejects_duplicate_code() {
        let store = InMemoryRegionStore::new();
        store
            .insert(BrainRegion::new("V1", "primary visual cortex"))
            .unwrap();
        let err = store.insert(BrainRegion::new("V1", "duplicate"));
        assert!(matches!(err, Err(StorageError::DuplicateKey(_))));
    }

    #[test]
    fn test_region_store_builtin_catalog() {
        let store = InMemoryRegionStore::with_builtin_catalog();
        assert!(!store.list().unwrap().is_empty());

        let ca1 = RegionCode::new("CA1");
        assert!(store.find_by_code(&ca1).unwrap().is_some());
        assert!(!store.connections_for(&ca1).unwrap().is_empty());
    }

    #[test]
    fn test_connection_requires_known_regions() {
        let store = InMemoryRegionStore::new();
        store
            .insert(BrainRegion::new("CA1", "hippocampal CA1 subfield"))
            .unwrap();
        let conn = RegionConnection::new("CA3", "CA1", 0.9).unwrap();
        assert!(matches!(
            store.insert_connection(conn),
            Err(StorageError::RegionNotFound(_))
        ));
    }

    #[test]
    fn test_scenario_store_round_trip() {
        let store = InMemoryScenarioStore::new();
        let s = scenario("psilocybin");
        let id = s.id;
        store.insert(s.clone()).unwrap();

        assert_eq!(store.get(id).unwrap(), Some(s));
        assert!(matches!(
            store.insert(scenario_with_id(id)),
            Err(StorageError::DuplicateKey(_))
        ));
    }

    fn scenario_with_id(id: ScenarioId) -> Scenario {
        let mut s = scenario("lsd");
        s.id = id;
        s
    }

    #[test]
    fn test_scenario_history_most_recent_first() {
        let store = InMemoryScenarioStore::new();
        let a = scenario("first");
        let b = scenario("second");
        let c = scenario("third");
        store.insert(a.clone()).unwrap();
        store.insert(b.clone()).unwrap();
        store.insert(c.clone()).unwrap();

        let recent = store.list_recent(2).unwrap();
        assert_eq!(recent.len(), 2);
        assert_eq!(recent[0].id, c.id);
        assert_eq!(recent[1].id, b.id);
    }

    #[test]
    fn test_simulation_store_update_and_history() {
        let store = InMemorySimulationStore::new();
        let scenario_id = ScenarioId::new();

        let mut first = SimulationResult::pending(scenario_id);
        let second = SimulationResult::pending(scenario_id);
        store.insert(first.clone()).unwrap();
        store.insert(second.clone()).unwrap();

        first.begin().unwrap();
        first
            .fail(crate::simulation::FailureReason::NoResearchFound)
            .unwrap();
        store.update(first.clone()).unwrap();

        let stored = store.get(first.id).unwrap().unwrap();
        assert_eq!(stored.status, crate::simulation::SimulationStatus::Failed);

        let recent = store.list_recent(10).unwrap();
        assert_eq!(recent[0].id, second.id);
        assert_eq!(recent[1].id, first.id);

        let for_scenario = store.find_by_scenario(scenario_id).unwrap();
        assert_eq!(for_scenario.len(), 2);
    }

    #[test]
    fn test_simulation_update_requires_existing() {
        let store = InMemorySimulationStore::new();
        let sim = SimulationResult::pending(ScenarioId::new());
        assert!(matches!(
            store.update(sim),
            Err(StorageError::SimulationNotFound(_))
        ));
    }
}
