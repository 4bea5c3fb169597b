//! Solver observer: hooks for logging, profiling, and debugging.
//!
//! Observers receive notifications at state transitions and after every
//! iteration without coupling to solver logic.

use super::power::SolverState;

/// Callbacks fired by [`super::power::PowerIteration::run_with_observer`]
///
/// All methods default to no-ops so implementors only override what they
/// need.
pub trait IterationObserver {
    /// Called on entering each solver state.
    fn on_state(&mut self, _state: SolverState) {}

    /// Called after each iteration with the 1-based iteration number, the
    /// norm of the change, and the updated scores.
    fn on_iteration(&mut self, _iteration: usize, _delta: f32, _scores: &[f32]) {}
}

/// Observer that ignores everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl IterationObserver for NoopObserver {}

/// Records the state transitions plus per-iteration delta and mass.
#[derive(Debug, Clone, Default)]
pub struct ConvergenceTrace {
    pub states: Vec<SolverState>,
    pub deltas: Vec<f32>,
    pub masses: Vec<f32>,
}

impl ConvergenceTrace {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of iterations observed
    pub fn len(&self) -> usize {
        self.deltas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.deltas.is_empty()
    }

    /// Last state entered, if any
    pub fn final_state(&self) -> Option<SolverState> {
        self.states.last().copied()
    }
}

impl IterationObserver for ConvergenceTrace {
    fn on_state(&mut self, state: SolverState) {
        self.states.push(state);
    }

    fn on_iteration(&mut self, _iteration: usize, delta: f32, scores: &[f32]) {
        self.deltas.push(delta);
        self.masses.push(scores.iter().sum());
    }
}
