//! Damped power iteration over a dense link matrix
//!
//! The solver pre-weights the link matrix by `1 - d` and the uniform
//! teleport vector by `d` once, then repeats
//!
//! ```text
//! s ← (1-d)·M·s + d·(1/N)
//! ```
//!
//! until the Euclidean norm of the change drops to the tolerance. Dangling
//! columns are left as the builder produced them.

use log::{debug, info, warn};

use super::observer::{IterationObserver, NoopObserver};
use super::PageRankResult;
use crate::config::RankConfig;
use crate::error::{RankError, Result};
use crate::matrix::{ops, DenseMatrix};

/// Enter a tracing span for a solver phase (when the `tracing` feature is
/// enabled). When disabled, this is a no-op and the compiler eliminates it.
macro_rules! trace_phase {
    ($name:expr) => {
        #[cfg(feature = "tracing")]
        let _span = tracing::info_span!("power_iteration", phase = $name).entered();
    };
}

/// Where the solver is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolverState {
    /// Buffers allocated, weighting not yet applied
    Initializing,
    /// Weighted and stepping toward the fixed point
    Iterating,
    /// Last step moved the scores by no more than the tolerance
    Converged,
    /// Iteration cap reached before converging
    Exhausted,
}

impl SolverState {
    /// Whether the solver has stopped
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Converged | Self::Exhausted)
    }
}

/// Power-iteration PageRank solver
///
/// Owns the link matrix handed over by the builder and every working
/// buffer. The matrix and teleport vector are read-only once weighted.
#[derive(Debug, Clone)]
pub struct PowerIteration {
    damping: f32,
    threshold: f32,
    max_iterations: Option<usize>,
    matrix: DenseMatrix,
    mean: Vec<f32>,
    scores: Vec<f32>,
    diff: Vec<f32>,
    product: Vec<f32>,
    state: SolverState,
    iterations: usize,
    delta: f32,
}

impl PowerIteration {
    /// Take ownership of `matrix` and prepare uniform starting vectors
    ///
    /// The config is checked against the matrix size; a non-square matrix
    /// is rejected. Config warnings are left to whoever loaded the config.
    pub fn new(matrix: DenseMatrix, config: &RankConfig) -> Result<Self> {
        if !matrix.is_square() {
            return Err(RankError::DimensionMismatch {
                op: "power_iteration",
                expected: matrix.rows(),
                actual: matrix.cols(),
            });
        }
        let n = matrix.rows();
        config.check(Some(n))?;

        let uniform = 1.0 / n as f32;
        Ok(Self {
            damping: config.damping,
            threshold: config.tolerance,
            max_iterations: config.max_iterations,
            matrix,
            mean: vec![uniform; n],
            scores: vec![uniform; n],
            diff: vec![0.0; n],
            product: vec![0.0; n],
            state: SolverState::Initializing,
            iterations: 0,
            delta: f32::MAX,
        })
    }

    /// Current lifecycle state
    pub fn state(&self) -> SolverState {
        self.state
    }

    /// Iterations performed so far
    pub fn iterations(&self) -> usize {
        self.iterations
    }

    /// Norm of the most recent change (`f32::MAX` before the first step)
    pub fn delta(&self) -> f32 {
        self.delta
    }

    /// Current score vector
    pub fn scores(&self) -> &[f32] {
        &self.scores
    }

    /// Number of pages
    pub fn num_pages(&self) -> usize {
        self.scores.len()
    }

    /// Scale the link matrix by `1 - d` and the teleport vector by `d`
    fn initialize(&mut self) {
        ops::scale(self.matrix.as_mut_slice(), 1.0 - self.damping);
        ops::scale(&mut self.mean, self.damping);
        self.state = SolverState::Iterating;
    }

    /// Perform one update and return the norm of the change
    ///
    /// Applies the initial weighting first if it hasn't happened yet.
    /// Stepping a stopped solver is allowed and re-evaluates its state: a
    /// step that doesn't converge at or past `max_iterations` leaves the
    /// solver `Exhausted`.
    pub fn step(&mut self) -> Result<f32> {
        if self.state == SolverState::Initializing {
            self.initialize();
        }

        self.diff.copy_from_slice(&self.scores);

        // Product goes to its own buffer; every row reads the old scores.
        ops::mat_vec_into(&self.matrix, &self.scores, &mut self.product)?;
        std::mem::swap(&mut self.scores, &mut self.product);

        ops::add_assign(&mut self.scores, &self.mean)?;

        ops::scale(&mut self.diff, -1.0);
        ops::add_assign(&mut self.diff, &self.scores)?;
        let delta = ops::norm(&self.diff);

        self.iterations += 1;
        self.delta = delta;
        let capped = self.max_iterations.is_some_and(|max| self.iterations >= max);
        self.state = if delta <= self.threshold {
            SolverState::Converged
        } else if capped {
            SolverState::Exhausted
        } else {
            SolverState::Iterating
        };

        debug!("iteration {}: delta = {delta:e}", self.iterations);
        Ok(delta)
    }

    /// Iterate to convergence (or the iteration cap)
    pub fn run(self) -> Result<PageRankResult> {
        self.run_with_observer(&mut NoopObserver)
    }

    /// Iterate to convergence, reporting each state and iteration
    ///
    /// Without an iteration cap this only returns once the scores converge.
    /// A solver that has already stopped is returned as is, with no
    /// observer callbacks.
    pub fn run_with_observer<O>(mut self, observer: &mut O) -> Result<PageRankResult>
    where
        O: IterationObserver + ?Sized,
    {
        if self.state == SolverState::Initializing {
            trace_phase!("initialize");
            observer.on_state(SolverState::Initializing);
            self.initialize();
        }

        if !self.state.is_terminal() {
            trace_phase!("iterate");
            observer.on_state(SolverState::Iterating);
            while !self.state.is_terminal() {
                let delta = self.step()?;
                observer.on_iteration(self.iterations, delta, &self.scores);
            }
            observer.on_state(self.state);
        }

        let converged = self.state == SolverState::Converged;
        if converged {
            info!(
                "converged after {} iterations (delta {:e} <= {:e})",
                self.iterations, self.delta, self.threshold
            );
        } else {
            warn!(
                "stopped after {} iterations without converging (delta {:e} > {:e})",
                self.iterations, self.delta, self.threshold
            );
        }

        Ok(PageRankResult::new(
            self.scores,
            self.iterations,
            self.delta,
            converged,
        ))
    }
}
