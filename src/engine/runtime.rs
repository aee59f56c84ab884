//! Bounded worker-pool runtime for simulation requests.
//!
//! Each simulation run is synchronous and single-threaded in its control
//! flow; the runtime exists so concurrent callers get bounded queuing
//! and a caller-driven timeout at the request boundary. Nothing mutable
//! is shared between requests: workers share the engine, whose state is
//! read-only after construction.

use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crossbeam_channel::{bounded, Receiver, RecvTimeoutError, Sender, TrySendError};
use tracing::debug;

use crate::engine::SimulationEngine;
use crate::error::{ExecutionError, NeuroError, NeuroResult};
use crate::scenario::ScenarioParams;
use crate::simulation::SimulationResult;

/// Runtime configuration.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    /// Number of worker threads.
    pub workers: usize,
    /// Maximum queued requests.
    pub queue_capacity: usize,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            workers: 2,
            queue_capacity: 64,
        }
    }
}

struct Job {
    params: ScenarioParams,
    reply: Sender<NeuroResult<SimulationResult>>,
}

/// Handle to a submitted run.
#[derive(Debug)]
pub struct PendingRun {
    rx: Receiver<NeuroResult<SimulationResult>>,
}

impl PendingRun {
    /// Waits for the result with a caller-driven timeout.
    ///
    /// On timeout the worker keeps running and will still persist the
    /// run's terminal state; only this caller stops waiting.
    ///
    /// # Errors
    ///
    /// Returns `ExecutionError::Timeout` when the deadline elapses and
    /// `ExecutionError::RuntimeShutDown` if the runtime dropped the job.
    pub fn wait(self, timeout: Duration) -> NeuroResult<SimulationResult> {
        match self.rx.recv_timeout(timeout) {
            Ok(result) => result,
            Err(RecvTimeoutError::Timeout) => Err(ExecutionError::Timeout {
                duration_ms: timeout.as_millis().min(u128::from(u64::MAX)) as u64,
            }
            .into()),
            Err(RecvTimeoutError::Disconnected) => {
                Err(ExecutionError::RuntimeShutDown.into())
            }
        }
    }
}

/// Thread-based runtime over a [`SimulationEngine`].
pub struct SimulationRuntime {
    tx: Sender<Job>,
    workers: Vec<JoinHandle<()>>,
    queue_capacity: usize,
}

impl SimulationRuntime {
    /// Starts the worker pool.
    #[must_use]
    pub fn start(engine: Arc<SimulationEngine>, config: RuntimeConfig) -> Self {
        let workers = config.workers.max(1);
        let queue_capacity = config.queue_capacity.max(1);
        let (tx, rx) = bounded::<Job>(queue_capacity);

        let mut handles = Vec::with_capacity(workers);
        for idx in 0..workers {
            let rx: Receiver<Job> = rx.clone();
            let engine = Arc::clone(&engine);
            let thread_name = format!("neurosim-worker-{idx}");
            let handle = thread::Builder::new()
                .name(thread_name)
                .spawn(move || {
                    while let Ok(job) = rx.recv() {
                        let result = engine.run_scenario(job.params);
                        // Caller may have stopped waiting; that is fine.
                        let _ = job.reply.send(result);
                    }
                })
                .expect("failed to spawn neurosim worker");
            handles.push(handle);
        }

        debug!(workers, queue_capacity, "runtime started");
        Self {
            tx,
            workers: handles,
            queue_capacity,
        }
    }

    /// Submits a scenario without blocking.
    ///
    /// # Errors
    ///
    /// Returns `ExecutionError::QueueFull` when the bounded queue is at
    /// capacity and `ExecutionError::RuntimeShutDown` after shutdown.
    pub fn submit(&self, params: ScenarioParams) -> Result<PendingRun, NeuroError> {
        let (reply, rx) = bounded(1);
        match self.tx.try_send(Job { params, reply }) {
            Ok(()) => Ok(PendingRun { rx }),
            Err(TrySendError::Full(_)) => Err(ExecutionError::QueueFull {
                capacity: self.queue_capacity,
            }
            .into()),
            Err(TrySendError::Disconnected(_)) => Err(ExecutionError::RuntimeShutDown.into()),
        }
    }

    /// Closes the queue and joins the workers. Queued jobs are drained
    /// before the threads exit.
    pub fn shutdown(self) {
        drop(self.tx);
        for handle in self.workers {
            let _ = handle.join();
        }
    }
}
