//! Progress and result sink.
//!
//! The runner reports plain data; rendering it is up to the observer.

use std::time::Duration;

use tracing::info;

use super::runner::RunState;

/// Snapshot emitted every `report_interval` generations.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ProgressEvent {
    /// Generations completed so far.
    pub generation: usize,
    /// Length of the best tour seen so far.
    pub best_length: f64,
    /// Fitness of the best tour seen so far.
    pub best_fitness: f64,
    /// Consecutive generations without strict improvement.
    pub stagnation: usize,
}

/// Final outcome, emitted once when the run reaches a terminal state.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RunReport {
    /// Terminal state that ended the run.
    pub state: RunState,
    /// Total generations executed.
    pub generations: usize,
    /// Best tour as city indices in visiting order.
    pub best_tour: Vec<usize>,
    /// Total length of the best tour.
    pub best_length: f64,
    /// Wall-clock time since the runner was created.
    pub elapsed: Duration,
}

/// Receives progress and completion events from [`GaRunner`](super::GaRunner).
///
/// Both methods default to no-ops.
pub trait GaObserver {
    /// Called every `report_interval` generations.
    fn on_progress(&mut self, _event: &ProgressEvent) {}

    /// Called once after the run terminates.
    fn on_finish(&mut self, _report: &RunReport) {}
}

/// Discards all events.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl GaObserver for NoopObserver {}

/// Logs events through `tracing` at `info` level.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl GaObserver for TracingObserver {
    fn on_progress(&mut self, event: &ProgressEvent) {
        info!(
            generation = event.generation,
            best_length = event.best_length,
            stagnation = event.stagnation,
            "progress"
        );
    }

    fn on_finish(&mut self, report: &RunReport) {
        info!(
            state = ?report.state,
            generations = report.generations,
            best_length = report.best_length,
            elapsed_ms = report.elapsed.as_millis() as u64,
            tour = ?report.best_tour,
            "run finished"
        );
    }
}

/// Records every event; handy for tests and for post-run plotting.
#[derive(Debug, Clone, Default)]
pub struct CollectingObserver {
    /// Progress events in emission order.
    pub progress: Vec<ProgressEvent>,
    /// The final report, once the run has finished.
    pub report: Option<RunReport>,
}

impl GaObserver for CollectingObserver {
    fn on_progress(&mut self, event: &ProgressEvent) {
        self.progress.push(event.clone());
    }

    fn on_finish(&mut self, report: &RunReport) {
        self.report = Some(report.clone());
    }
}

impl<O: GaObserver + ?Sized> GaObserver for &mut O {
    fn on_progress(&mut self, event: &ProgressEvent) {
        (**self).on_progress(event);
    }

    fn on_finish(&mut self, report: &RunReport) {
        (**self).on_finish(report);
    }
}
