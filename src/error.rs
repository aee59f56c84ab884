//! Error types for NeuroSim.
//!
//! All errors are strongly typed using thiserror. This enables pattern
//! matching on specific error conditions and provides clear error messages.
//! "No supporting research" and "retrieval failed" are deliberately not
//! errors at this level: they are recorded on the failed simulation itself
//! so callers can tell weak evidence apart from absent evidence.

use thiserror::Error;

use crate::scenario::ScenarioId;
use crate::simulation::{SimulationId, SimulationStatus};

/// Validation errors that occur before any pipeline work begins.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Compound cannot be empty")]
    EmptyCompound,

    #[error("Field '{field}' exceeds maximum length of {max_length}")]
    FieldTooLong { field: String, max_length: usize },

    #[error("Unknown brain region code: {code}")]
    UnknownRegion { code: String },

    #[error("Relevance score {value} is out of range [0.0, 1.0]")]
    RelevanceOutOfRange { value: f32 },

    #[error("Connection strength {value} is out of range [0.0, 1.0]")]
    ConnectionStrengthOutOfRange { value: f32 },
}

/// Execution errors that occur while running a simulation.
#[derive(Debug, Error)]
pub enum ExecutionError {
    #[error("Scenario not found: {id}")]
    ScenarioNotFound { id: ScenarioId },

    #[error("Simulation not found: {id}")]
    SimulationNotFound { id: SimulationId },

    #[error("Invalid simulation status transition: {from} -> {to}")]
    InvalidStatusTransition {
        from: SimulationStatus,
        to: SimulationStatus,
    },

    #[error("Simulation timed out after {duration_ms}ms")]
    Timeout { duration_ms: u64 },

    #[error("Simulation queue is full (capacity: {capacity})")]
    QueueFull { capacity: usize },

    #[error("Simulation runtime has shut down")]
    RuntimeShutDown,
}

/// Errors surfaced by the literature retrieval collaborator.
///
/// An empty result set is not an error; retrieval backends return
/// `Ok(vec![])` when nothing matches. These variants cover the service
/// itself being unavailable or misbehaving.
#[derive(Debug, Error)]
pub enum RetrievalError {
    #[error("Literature service unreachable: {message}")]
    ServiceUnreachable { message: String },

    #[error("Literature search timed out after {duration_ms}ms")]
    Timeout { duration_ms: u64 },

    #[error("Literature service returned a malformed response: {message}")]
    InvalidResponse { message: String },
}

/// Top-level error type for NeuroSim.
#[derive(Debug, Error)]
pub enum NeuroError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Execution error: {0}")]
    Execution(#[from] ExecutionError),

    #[error("Retrieval error: {0}")]
    Retrieval(#[from] RetrievalError),

    #[error("Storage error: {0}")]
    Storage(#[from] crate::storage::StorageError),

    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl NeuroError {
    /// Creates an internal error.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Returns true if this is a validation error.
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Returns true if this is an execution error.
    #[must_use]
    pub const fn is_execution(&self) -> bool {
        matches!(self, Self::Execution(_))
    }

    /// Returns true if this is a retrieval error.
    #[must_use]
    pub const fn is_retrieval(&self) -> bool {
        matches!(self, Self::Retrieval(_))
    }
}

/// Result type alias for NeuroSim operations.
pub type NeuroResult<T> = Result<T, NeuroError>;
