//! Link matrix construction
//!
//! Turns a [`LinkList`] into the dense column-stochastic transition matrix
//! the solver iterates on: `M[i][j] = 1 / out_degree(j)` when page `j` links
//! to page `i`.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use log::debug;

use super::links::LinkList;
use crate::config::DanglingPolicy;
use crate::error::{RankError, Result};
use crate::matrix::DenseMatrix;

/// Builds the dense link matrix for a fixed number of pages
#[derive(Debug, Clone)]
pub struct LinkMatrixBuilder {
    num_pages: usize,
    dangling: DanglingPolicy,
}

impl LinkMatrixBuilder {
    /// Create a builder for `num_pages` pages, leaking dangling mass
    pub fn new(num_pages: usize) -> Self {
        Self {
            num_pages,
            dangling: DanglingPolicy::Leak,
        }
    }

    /// Set the dangling-page policy
    pub fn with_dangling(mut self, dangling: DanglingPolicy) -> Self {
        self.dangling = dangling;
        self
    }

    /// Number of pages the builder produces a matrix for
    pub fn num_pages(&self) -> usize {
        self.num_pages
    }

    /// Populate a zeroed `N × N` matrix from `links`
    ///
    /// Column `j` gets `1/k` in every row page `j` links to, where `k` is
    /// the declared link count. Repeating a destination rewrites the same
    /// cell, so such a column sums to less than one.
    pub fn build(&self, links: &LinkList) -> Result<DenseMatrix> {
        let n = self.num_pages;
        if links.pages_described() != n {
            return Err(RankError::DimensionMismatch {
                op: "build_link_matrix",
                expected: n,
                actual: links.pages_described(),
            });
        }

        let mut matrix = DenseMatrix::square(n);
        let mut dangling = 0usize;

        for page in 0..n {
            let degree = links.degree(page);
            if degree == 0 {
                dangling += 1;
                if self.dangling == DanglingPolicy::Redistribute {
                    let share = 1.0 / n as f32;
                    for row in 0..n {
                        matrix.set(row, page, share);
                    }
                }
                continue;
            }

            let weight = 1.0 / degree as f32;
            for (i, dest) in links.links(page).enumerate() {
                // Lists assembled through `push_page` skip the parser's range check
                if dest >= n {
                    return Err(RankError::Parse {
                        page: page + 1,
                        position: i + 2,
                        message: format!("linked page {} is outside 1..={n}", dest + 1),
                    });
                }
                matrix.set(dest, page, weight);
            }
        }

        debug!(
            "built {n}x{n} link matrix from {} links ({dangling} dangling pages, policy {})",
            links.num_links(),
            self.dangling.as_str()
        );

        Ok(matrix)
    }

    /// Parse a link list from `reader` and build its matrix
    pub fn from_reader(&self, reader: impl std::io::Read) -> Result<DenseMatrix> {
        let links = LinkList::from_reader(reader, self.num_pages)?;
        self.build(&links)
    }

    /// Open `path`, parse it and build the matrix
    pub fn from_path(&self, path: &Path) -> Result<DenseMatrix> {
        let file = File::open(path).map_err(|e| RankError::io(e, path))?;
        self.from_reader(BufReader::new(file)).map_err(|e| match e {
            RankError::Io { source, .. } => RankError::io(source, path),
            other => other,
        })
    }
}
