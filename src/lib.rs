//! Dense PageRank over a small web of linked pages
//!
//! Reads each page's outbound links, builds the column-stochastic link
//! matrix, and runs damped power iteration to a fixed point:
//!
//! ```
//! use webrank::{rank_links, LinkList, RankConfig};
//!
//! // Page 1 links to pages 2 and 3; both link back to page 1
//! let links = LinkList::parse("2 2 3\n1 1\n1 1\n", 3).unwrap();
//! let result = rank_links(&links, &RankConfig::default()).unwrap();
//!
//! assert!(result.converged);
//! assert_eq!(result.top_n(1)[0].0, 0);
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod graph;
pub mod input;
pub mod matrix;
pub mod pagerank;
pub mod ranking;

pub use config::{DanglingPolicy, RankConfig};
pub use error::{RankError, Result};
pub use graph::builder::LinkMatrixBuilder;
pub use graph::links::LinkList;
pub use matrix::DenseMatrix;
pub use pagerank::power::{PowerIteration, SolverState};
pub use pagerank::PageRankResult;
pub use ranking::{Standing, Standings};

/// Validate `config`, build the link matrix for `links` and iterate it to
/// convergence
pub fn rank_links(links: &LinkList, config: &RankConfig) -> Result<PageRankResult> {
    config.validate(Some(links.pages_described()))?;
    let matrix = LinkMatrixBuilder::new(links.pages_described())
        .with_dangling(config.dangling)
        .build(links)?;
    PowerIteration::new(matrix, config)?.run()
}
