//! Standings: the final score vector turned into an ordered ranking
//!
//! Selection repeatedly picks the highest remaining score and zeroes it, so
//! [`Standings::take`] leaves the vector it was given all zeros. Use
//! [`Standings::from_scores`] to keep the scores around.

use std::io::Write;

use serde::Serialize;

use crate::pagerank::PageRankResult;

/// One line of the ranking
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Standing {
    /// 1-based position in the ranking
    pub rank: usize,
    /// 1-based page number
    pub page: usize,
    pub score: f32,
}

/// Pages ordered from highest to lowest score
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Standings(Vec<Standing>);

impl Standings {
    /// Rank `scores`, zeroing each entry once it has been reported
    ///
    /// Ties go to the lower page number. A page is never reported twice,
    /// even when the remaining scores are all zero.
    pub fn take(scores: &mut [f32]) -> Self {
        let mut taken = vec![false; scores.len()];
        let mut standings = Vec::with_capacity(scores.len());

        for rank in 1..=scores.len() {
            let mut best: Option<usize> = None;
            for (page, &score) in scores.iter().enumerate() {
                if taken[page] {
                    continue;
                }
                match best {
                    Some(b) if score <= scores[b] => {}
                    _ => best = Some(page),
                }
            }

            let Some(page) = best else { break };
            standings.push(Standing {
                rank,
                page: page + 1,
                score: scores[page],
            });
            taken[page] = true;
            scores[page] = 0.0;
        }

        Self(standings)
    }

    /// Rank a copy of `scores`
    pub fn from_scores(scores: &[f32]) -> Self {
        let mut copy = scores.to_vec();
        Self::take(&mut copy)
    }

    /// Keep only the first `k` standings
    pub fn truncate(&mut self, k: usize) {
        self.0.truncate(k);
    }

    pub fn iter(&self) -> impl Iterator<Item = &Standing> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Print `"{rank}. Page {page}: {score}"` lines
    pub fn write_text<W: Write + ?Sized>(&self, out: &mut W) -> std::io::Result<()> {
        for s in &self.0 {
            writeln!(out, "{}. Page {}: {:.6}", s.rank, s.page, s.score)?;
        }
        Ok(())
    }
}

/// Machine-readable summary of a run
#[derive(Debug, Clone, Serialize)]
pub struct RankReport {
    pub standings: Standings,
    pub iterations: usize,
    pub delta: f32,
    pub converged: bool,
    pub total_mass: f32,
    pub elapsed_secs: f64,
}

impl RankReport {
    pub fn new(result: &PageRankResult, standings: Standings, elapsed_secs: f64) -> Self {
        Self {
            standings,
            iterations: result.iterations,
            delta: result.delta,
            converged: result.converged,
            total_mass: result.total_mass(),
            elapsed_secs,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_take_orders_and_zeroes() {
        let mut scores = vec![0.5, 0.2, 0.3];
        let standings = Standings::take(&mut scores);

        let pages: Vec<_> = standings.iter().map(|s| s.page).collect();
        assert_eq!(pages, vec![1, 3, 2]);
        let values: Vec<_> = standings.iter().map(|s| s.score).collect();
        assert_eq!(values, vec![0.5, 0.3, 0.2]);
        assert!(scores.iter().all(|&s| s == 0.0));
    }

    #[test]
    fn test_from_scores_leaves_input_alone() {
        let scores = vec![0.1, 0.9];
        let standings = Standings::from_scores(&scores);
        assert_eq!(standings.iter().next().unwrap().page, 2);
        assert_eq!(scores, vec![0.1, 0.9]);
    }

    #[test]
    fn test_ties_prefer_lower_page() {
        let standings = Standings::from_scores(&[0.25, 0.5, 0.25]);
        let pages: Vec<_> = standings.iter().map(|s| s.page).collect();
        assert_eq!(pages, vec![2, 1, 3]);
    }

    #[test]
    fn test_zero_scores_reported_once_each() {
        let standings = Standings::from_scores(&[0.0, 1.0, 0.0]);
        let pages: Vec<_> = standings.iter().map(|s| s.page).collect();
        assert_eq!(pages, vec![2, 1, 3]);
        assert_eq!(standings.iter().map(|s| s.rank).collect::<Vec<_>>(), vec![1, 2, 3]);
    }

    #[test]
    fn test_write_text() {
        let mut standings = Standings::from_scores(&[0.5, 0.2, 0.3]);
        standings.truncate(2);

        let mut out = Vec::new();
        standings.write_text(&mut out).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "1. Page 1: 0.500000\n2. Page 3: 0.300000\n"
        );
    }

    #[test]
    fn test_empty_scores() {
        let standings = Standings::from_scores(&[]);
        assert!(standings.is_empty());
    }

    #[test]
    fn test_report_json_shape() {
        let result = PageRankResult::new(vec![0.5, 0.5], 1, 0.0, true);
        let report = RankReport::new(&result, Standings::from_scores(&result.scores), 0.25);
        let json = serde_json::to_value(&report).unwrap();

        assert_eq!(json["standings"][0]["page"], 1);
        assert_eq!(json["standings"][1]["rank"], 2);
        assert_eq!(json["converged"], true);
        assert_eq!(json["iterations"], 1);
    }
}
