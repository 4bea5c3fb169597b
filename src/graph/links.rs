//! Outbound-link lists in Compressed Sparse Row (CSR) form
//!
//! The textual link format lists, for every page in order, an out-degree `k`
//! followed by `k` 1-based destination pages, all whitespace-delimited:
//!
//! ```text
//! 2 2 3
//! 1 1
//! 1 1
//! ```
//!
//! Internally pages are 0-based and each page's destinations are stored
//! contiguously.

use std::io::Read;

use log::warn;
use rustc_hash::FxHashSet;

use crate::error::{RankError, Result};

/// Per-page outbound links in CSR format
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkList {
    /// Number of pages
    pub num_pages: usize,
    /// Row pointers: page i's links are at `targets[row_ptr[i]..row_ptr[i+1]]`
    row_ptr: Vec<usize>,
    /// 0-based destination pages
    targets: Vec<u32>,
}

impl LinkList {
    /// Start an empty list sized for `num_pages` pages
    pub fn with_capacity(num_pages: usize) -> Self {
        let mut row_ptr = Vec::with_capacity(num_pages + 1);
        row_ptr.push(0);
        Self {
            num_pages,
            row_ptr,
            targets: Vec::new(),
        }
    }

    /// Build from per-page 0-based destination lists
    ///
    /// Destinations outside `0..pages.len()` are rejected.
    pub fn from_adjacency(pages: &[Vec<usize>]) -> Result<Self> {
        let mut list = Self::with_capacity(pages.len());
        for (page, dests) in pages.iter().enumerate() {
            if let Some(&bad) = dests.iter().find(|&&d| d >= pages.len()) {
                return Err(RankError::Parse {
                    page: page + 1,
                    position: 0,
                    message: format!("destination {} is not a page", bad + 1),
                });
            }
            list.push_page(dests.iter().map(|&d| d as u32));
        }
        Ok(list)
    }

    /// Parse the textual link format for exactly `num_pages` pages
    ///
    /// Anything after the last page is ignored with a warning.
    pub fn parse(text: &str, num_pages: usize) -> Result<Self> {
        let mut tokens = text.split_whitespace().enumerate().map(|(i, t)| (i + 1, t));
        let mut list = Self::with_capacity(num_pages);
        let mut last_position = 0;

        for page in 1..=num_pages {
            let (position, count) = next_number(&mut tokens, page, last_position, "link count")?;
            last_position = position;

            let mut dests = Vec::with_capacity(count.min(num_pages));
            let mut seen = FxHashSet::default();
            for _ in 0..count {
                let (position, dest) = next_number(&mut tokens, page, last_position, "linked page")?;
                last_position = position;

                if dest == 0 || dest > num_pages {
                    return Err(RankError::Parse {
                        page,
                        position,
                        message: format!("linked page {dest} is outside 1..={num_pages}"),
                    });
                }
                if !seen.insert(dest) {
                    warn!("page {page} links to page {dest} more than once");
                }
                dests.push((dest - 1) as u32);
            }
            list.push_page(dests);
        }

        let trailing = tokens.count();
        if trailing > 0 {
            warn!("ignoring {trailing} trailing tokens after page {num_pages}");
        }

        Ok(list)
    }

    /// Read everything from `reader` and parse it
    pub fn from_reader(mut reader: impl Read, num_pages: usize) -> Result<Self> {
        let mut text = String::new();
        reader.read_to_string(&mut text)?;
        Self::parse(&text, num_pages)
    }

    /// Append the next page's destinations
    pub fn push_page(&mut self, dests: impl IntoIterator<Item = u32>) {
        self.targets.extend(dests);
        self.row_ptr.push(self.targets.len());
    }

    /// Iterate over the destinations of `page`, duplicates included
    pub fn links(&self, page: usize) -> impl Iterator<Item = usize> + '_ {
        let start = self.row_ptr[page];
        let end = self.row_ptr[page + 1];
        self.targets[start..end].iter().map(|&t| t as usize)
    }

    /// Declared out-degree of `page`
    pub fn degree(&self, page: usize) -> usize {
        self.row_ptr[page + 1] - self.row_ptr[page]
    }

    /// Whether `page` links nowhere
    pub fn is_dangling(&self, page: usize) -> bool {
        self.degree(page) == 0
    }

    /// Pages with no outbound links
    pub fn dangling_pages(&self) -> Vec<usize> {
        (0..self.pages_described())
            .filter(|&p| self.is_dangling(p))
            .collect()
    }

    /// Total number of links
    pub fn num_links(&self) -> usize {
        self.targets.len()
    }

    /// How many pages have been pushed so far
    pub fn pages_described(&self) -> usize {
        self.row_ptr.len() - 1
    }
}

/// Pull the next token and parse it as a non-negative integer
fn next_number<'a>(
    tokens: &mut impl Iterator<Item = (usize, &'a str)>,
    page: usize,
    last_position: usize,
    what: &str,
) -> Result<(usize, usize)> {
    let (position, token) = tokens.next().ok_or_else(|| RankError::Parse {
        page,
        position: last_position + 1,
        message: format!("unexpected end of input, expected {what}"),
    })?;

    let value = token.parse::<usize>().map_err(|_| RankError::Parse {
        page,
        position,
        message: format!("expected {what}, found {token:?}"),
    })?;

    Ok((position, value))
}
