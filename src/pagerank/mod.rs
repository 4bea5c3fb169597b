//! PageRank by damped power iteration
//!
//! [`power::PowerIteration`] owns the link matrix and working vectors and
//! drives them to a fixed point; [`observer`] exposes per-iteration hooks.

pub mod observer;
pub mod power;

use serde::Serialize;

/// Result of a PageRank computation
#[derive(Debug, Clone, Serialize)]
pub struct PageRankResult {
    /// Scores for each page (0-based index)
    pub scores: Vec<f32>,
    /// Number of iterations performed
    pub iterations: usize,
    /// Norm of the last successive-iterate difference
    pub delta: f32,
    /// Whether the algorithm converged
    pub converged: bool,
}

impl PageRankResult {
    /// Create a new PageRank result
    pub fn new(scores: Vec<f32>, iterations: usize, delta: f32, converged: bool) -> Self {
        Self {
            scores,
            iterations,
            delta,
            converged,
        }
    }

    /// Get the top N pages by score, ties broken by lower page index
    pub fn top_n(&self, n: usize) -> Vec<(usize, f32)> {
        let mut indexed: Vec<_> = self.scores.iter().copied().enumerate().collect();
        indexed.sort_by(|a, b| b.1.total_cmp(&a.1));
        indexed.truncate(n);
        indexed
    }

    /// Get the score for a specific page
    pub fn score(&self, page: usize) -> f32 {
        self.scores.get(page).copied().unwrap_or(0.0)
    }

    /// Sum of all scores
    ///
    /// Stays near 1 when every page links somewhere; dangling pages under
    /// the leak policy pull it below 1.
    pub fn total_mass(&self) -> f32 {
        self.scores.iter().sum()
    }
}
