//! Ranking configuration
//!
//! [`RankConfig`] replaces what would otherwise be compile-time constants
//! (page bounds, damping, tolerance) so builder and solver can be
//! parameterised per run. It can be loaded from TOML:
//!
//! ```toml
//! min_pages = 2
//! max_pages = 800
//! damping = 0.15
//! tolerance = 0.0001
//! max_iterations = 10000
//! dangling = "leak"
//! ```

pub mod validation;

use std::collections::HashMap;
use std::path::Path;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::{RankError, Result};
use validation::{ValidationEngine, ValidationReport};

/// Smallest web the solver accepts
pub const DEFAULT_MIN_PAGES: usize = 2;
/// Largest web accepted unless configured otherwise
pub const DEFAULT_MAX_PAGES: usize = 800;
/// Teleportation weight
pub const DEFAULT_DAMPING: f32 = 0.15;
/// Convergence threshold on the L2 norm of successive iterates
pub const DEFAULT_TOLERANCE: f32 = 0.0001;

/// What to do with the column of a page that links nowhere
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DanglingPolicy {
    /// Keep the all-zero column; the page's mass leaks out every iteration.
    #[default]
    Leak,
    /// Treat the page as linking to every page, 1/N each.
    Redistribute,
}

impl DanglingPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Leak => "leak",
            Self::Redistribute => "redistribute",
        }
    }
}

/// Parameters shared by the link-matrix builder and the solver
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RankConfig {
    /// Inclusive lower bound on the page count
    pub min_pages: usize,
    /// Inclusive upper bound on the page count
    pub max_pages: usize,
    /// Teleportation weight `d`; links carry `1 - d`
    pub damping: f32,
    /// Stop once `‖s_k - s_{k-1}‖₂ <= tolerance`
    pub tolerance: f32,
    /// Optional safety cap; `None` iterates until convergence
    pub max_iterations: Option<usize>,
    /// Dangling-page handling
    pub dangling: DanglingPolicy,
    /// If `true`, unrecognized fields are errors; if `false`, warnings.
    pub strict: bool,

    /// Captures any fields not recognized by the schema.
    #[serde(flatten)]
    pub unknown_fields: HashMap<String, serde_json::Value>,
}

impl Default for RankConfig {
    fn default() -> Self {
        Self {
            min_pages: DEFAULT_MIN_PAGES,
            max_pages: DEFAULT_MAX_PAGES,
            damping: DEFAULT_DAMPING,
            tolerance: DEFAULT_TOLERANCE,
            max_iterations: None,
            dangling: DanglingPolicy::Leak,
            strict: false,
            unknown_fields: HashMap::new(),
        }
    }
}

impl RankConfig {
    /// Create a config with the default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the teleportation weight
    pub fn with_damping(mut self, damping: f32) -> Self {
        self.damping = damping;
        self
    }

    /// Set the convergence threshold
    pub fn with_tolerance(mut self, tolerance: f32) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Cap the number of iterations
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = Some(max_iterations);
        self
    }

    /// Set the accepted page-count range
    pub fn with_page_bounds(mut self, min_pages: usize, max_pages: usize) -> Self {
        self.min_pages = min_pages;
        self.max_pages = max_pages;
        self
    }

    /// Set the dangling-page policy
    pub fn with_dangling(mut self, dangling: DanglingPolicy) -> Self {
        self.dangling = dangling;
        self
    }

    /// Parse a config from TOML text
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: RankConfig = toml::from_str(text)?;
        debug!("Config: {:?}", config);
        Ok(config)
    }

    /// Read and parse a TOML config file
    pub fn from_toml_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| RankError::io(e, path))?;
        Self::from_toml_str(&text)
    }

    /// Whether `pages` lies within `[min_pages, max_pages]`
    pub fn accepts_page_count(&self, pages: usize) -> bool {
        (self.min_pages..=self.max_pages).contains(&pages)
    }

    /// Run the default validation rules, failing on any error diagnostic
    ///
    /// Warnings are logged and otherwise ignored.
    pub fn validate(&self, pages: Option<usize>) -> Result<()> {
        for warning in self.check(pages)?.warnings() {
            log::warn!("{warning}");
        }
        Ok(())
    }

    /// Like [`validate`](Self::validate), but hands the warnings back
    /// instead of logging them
    pub fn check(&self, pages: Option<usize>) -> Result<ValidationReport> {
        let report = ValidationEngine::with_defaults().validate(self, pages);
        if report.has_errors() {
            return Err(RankError::InvalidConfig(
                report.errors().map(|e| e.to_string()).collect(),
            ));
        }
        Ok(report)
    }
}
