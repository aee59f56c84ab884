//! Simulation results, status state machine, and badges.
//!
//! A simulation moves `Pending -> Running -> Completed | Failed`; the
//! terminal states are final. A failed simulation carries a reason so
//! callers can tell "we found weak evidence" from "we found no evidence
//! at all" and from the literature service being down.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ExecutionError;
use crate::scenario::ScenarioId;
use crate::scoring::ScoredReference;

/// Globally unique simulation identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SimulationId(Uuid);

impl SimulationId {
    /// Creates a new random simulation ID.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SimulationId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SimulationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Lifecycle state of a simulation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SimulationStatus {
    /// Created, not yet started.
    Pending,
    /// Pipeline in progress.
    Running,
    /// Finished with a confidence score.
    Completed,
    /// Finished without a usable result.
    Failed,
}

impl SimulationStatus {
    /// Returns true if no further transition is allowed.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Failed)
    }

    /// Returns true if moving to `next` is a legal transition.
    #[must_use]
    pub const fn can_transition(self, next: Self) -> bool {
        matches!(
            (self, next),
            (Self::Pending, Self::Running)
                | (Self::Running, Self::Completed)
                | (Self::Running, Self::Failed)
        )
    }
}

impl fmt::Display for SimulationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Pending => "pending",
            Self::Running => "running",
            Self::Completed => "completed",
            Self::Failed => "failed",
        };
        write!(f, "{s}")
    }
}

/// Narrative badge earned by a completed simulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Badge {
    /// Confidence at or above [`Badge::STRONG_THRESHOLD`].
    StrongEvidence,
    /// Confidence at or above [`Badge::MODERATE_THRESHOLD`].
    ModerateEvidence,
}

impl Badge {
    /// Minimum confidence for the strong-evidence badge.
    pub const STRONG_THRESHOLD: f32 = 0.8;

    /// Minimum confidence for the moderate-evidence badge.
    pub const MODERATE_THRESHOLD: f32 = 0.5;

    /// Badge for a confidence score, if any. Pure and side-effect-free.
    #[must_use]
    pub fn for_confidence(score: f32) -> Option<Self> {
        if score >= Self::STRONG_THRESHOLD {
            Some(Self::StrongEvidence)
        } else if score >= Self::MODERATE_THRESHOLD {
            Some(Self::ModerateEvidence)
        } else {
            None
        }
    }
}

impl fmt::Display for Badge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::StrongEvidence => write!(f, "strongly supported by research"),
            Self::ModerateEvidence => write!(f, "moderately supported by research"),
        }
    }
}

/// Why a simulation failed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FailureReason {
    /// Zero references survived scoring. User-visible, not a fault.
    NoResearchFound,

    /// The literature collaborator was unreachable or timed out.
    Retrieval {
        /// Collaborator error message.
        message: String,
    },

    /// The pipeline deadline elapsed; no partial result is kept.
    Timeout {
        /// Configured deadline.
        duration_ms: u64,
    },

    /// Unexpected internal failure, kept as an audit record.
    Internal {
        /// Opaque failure description.
        message: String,
    },
}

impl fmt::Display for FailureReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoResearchFound => write!(f, "no supporting research found"),
            Self::Retrieval { message } => write!(f, "literature retrieval failed: {message}"),
            Self::Timeout { duration_ms } => {
                write!(f, "simulation timed out after {duration_ms}ms")
            }
            Self::Internal { message } => write!(f, "internal failure: {message}"),
        }
    }
}

/// The outcome of one simulation run.
///
/// Created `Pending`, mutated only through the transition methods, and
/// immutable once a terminal state is reached.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationResult {
    /// Stable identifier.
    pub id: SimulationId,
    /// The scenario this run simulated.
    pub scenario_id: ScenarioId,
    /// Current lifecycle state.
    pub status: SimulationStatus,

    /// Overall confidence in [0.0, 1.0]. `None` until completed and for
    /// failed runs; a failure is never reported as zero confidence.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence_score: Option<f32>,

    /// Earned badge, if the confidence cleared a threshold.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub badge: Option<Badge>,

    /// Supporting references, ordered by descending relevance.
    #[serde(default)]
    pub references: Vec<ScoredReference>,

    /// Failure audit record, for failed runs only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failure: Option<FailureReason>,

    /// When the run was created.
    pub created_at: DateTime<Utc>,

    /// When the run reached a terminal state.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
}

impl SimulationResult {
    /// Creates a pending run for a scenario.
    #[must_use]
    pub fn pending(scenario_id: ScenarioId) -> Self {
        Self {
            id: SimulationId::new(),
            scenario_id,
            status: SimulationStatus::Pending,
            confidence_score: None,
            badge: None,
            references: Vec::new(),
            failure: None,
            created_at: Utc::now(),
            completed_at: None,
        }
    }

    /// Transitions `Pending -> Running`.
    ///
    /// # Errors
    ///
    /// Returns `ExecutionError::InvalidStatusTransition` for any other
    /// starting state.
    pub fn begin(&mut self) -> Result<(), ExecutionError> {
        self.transition(SimulationStatus::Running)
    }

    /// Transitions `Running -> Completed` with the aggregated outcome.
    ///
    /// # Errors
    ///
    /// Returns `ExecutionError::InvalidStatusTransition` if the run is
    /// not currently `Running`.
    pub fn complete(
        &mut self,
        confidence_score: f32,
        badge: Option<Badge>,
        references: Vec<ScoredReference>,
    ) -> Result<(), ExecutionError> {
        self.transition(SimulationStatus::Completed)?;
        self.confidence_score = Some(confidence_score.clamp(0.0, 1.0));
        self.badge = badge;
        self.references = references;
        self.completed_at = Some(Utc::now());
        Ok(())
    }

    /// Transitions `Running -> Failed`, recording the reason. No partial
    /// references are kept.
    ///
    /// # Errors
    ///
    /// Returns `ExecutionError::InvalidStatusTransition` if the run is
    /// not currently `Running`.
    pub fn fail(&mut self, reason: FailureReason) -> Result<(), ExecutionError> {
        self.transition(SimulationStatus::Failed)?;
        self.confidence_score = None;
        self.badge = None;
        self.references = Vec::new();
        self.failure = Some(reason);
        self.completed_at = Some(Utc::now());
        Ok(())
    }

    fn transition(&mut self, next: SimulationStatus) -> Result<(), ExecutionError> {
        if !self.status.can_transition(next) {
            return Err(ExecutionError::InvalidStatusTransition {
                from: self.status,
                to: next,
            });
        }
        self.status = next;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pending() -> SimulationResult {
        SimulationResult::pending(ScenarioId::new())
    }

    #[test]
    fn test_happy_path_transitions() {
        let mut sim = pending();
        assert_eq!(sim.status, SimulationStatus::Pending);

        sim.begin().unwrap();
        assert_eq!(sim.status, SimulationStatus::Running);

        sim.complete(0.72, Badge::for_confidence(0.72), Vec::new())
            .unwrap();
        assert_eq!(sim.status, SimulationStatus::Completed);
        assert_eq!(sim.badge, Some(Badge::ModerateEvidence));
        assert!(sim.completed_at.is_some());
    }

    #[test]
    fn test_failure_path_clears_partial_state() {
        let mut sim = pending();
        sim.begin().unwrap();
        sim.fail(FailureReason::NoResearchFound).unwrap();

        assert_eq!(sim.status, SimulationStatus::Failed);
        assert!(sim.confidence_score.is_none());
        assert!(sim.badge.is_none());
        assert!(sim.references.is_empty());
        assert_eq!(sim.failure, Some(FailureReason::NoResearchFound));
    }

    #[test]
    fn test_terminal_states_are_final() {
        let mut sim = pending();
        sim.begin().unwrap();
        sim.complete(0.9, Badge::for_confidence(0.9), Vec::new())
            .unwrap();

        assert!(sim.begin().is_err());
        assert!(sim.fail(FailureReason::NoResearchFound).is_err());
        assert!(sim.complete(0.5, None, Vec::new()).is_err());
    }

    #[test]
    fn test_cannot_complete_from_pending() {
        let mut sim = pending();
        let err = sim.complete(0.5, None, Vec::new());
        assert!(matches!(
            err,
            Err(ExecutionError::InvalidStatusTransition { .. })
        ));
    }

    #[test]
    fn test_badge_thresholds() {
        assert_eq!(Badge::for_confidence(0.95), Some(Badge::StrongEvidence));
        assert_eq!(Badge::for_confidence(0.8), Some(Badge::StrongEvidence));
        assert_eq!(Badge::for_confidence(0.79), Some(Badge::ModerateEvidence));
        assert_eq!(Badge::for_confidence(0.5), Some(Badge::ModerateEvidence));
        assert_eq!(Badge::for_confidence(0.49), None);
        assert_eq!(Badge::for_confidence(0.0), None);
    }

    #[test]
    fn test_confidence_clamped_on_complete() {
        let mut sim = pending();
        sim.begin().unwrap();
        sim.complete(1.7, None, Vec::new()).unwrap();
        assert_eq!(sim.confidence_score, Some(1.0));
    }

    #[test]
    fn test_status_display() {
        assert_eq!(SimulationStatus::Pending.to_string(), "pending");
        assert_eq!(SimulationStatus::Failed.to_string(), "failed");
    }

    #[test]
    fn test_failure_reason_display() {
        assert!(FailureReason::NoResearchFound
            .to_string()
            .contains("no supporting research"));
        let retrieval = FailureReason::Retrieval {
            message: "503".to_string(),
        };
        assert!(retrieval.to_string().contains("503"));
    }

    #[test]
    fn test_result_serialization() {
        let mut sim = pending();
        sim.begin().unwrap();
        sim.complete(0.85, Badge::for_confidence(0.85), Vec::new())
            .unwrap();

        let json = serde_json::to_string(&sim).unwrap();
        let back: SimulationResult = serde_json::from_str(&json).unwrap();
        assert_eq!(sim, back);
    }
}
