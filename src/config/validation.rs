//! Validation engine for ranking configurations.
//!
//! The engine runs its [`ValidationRule`]s against a
//! [`RankConfig`] and collects every diagnostic into a [`ValidationReport`].
//! It never short-circuits on the first error, so users see all problems at
//! once.
//!
//! ```rust,ignore
//! use webrank::config::validation::ValidationEngine;
//!
//! let report = ValidationEngine::with_defaults().validate(&cfg, Some(pages));
//! if report.has_errors() {
//!     for err in report.errors() {
//!         eprintln!("{err}");
//!     }
//! }
//! ```

use std::fmt;

use serde::Serialize;

use super::RankConfig;

// ─── Error codes ────────────────────────────────────────────────────────────

/// Stable, machine-readable category of a configuration problem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    /// A value lies outside its permitted range.
    OutOfRange,
    /// Two settings contradict each other.
    InvalidCombo,
    /// A field the schema doesn't know.
    UnknownField,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::OutOfRange => "out_of_range",
            Self::InvalidCombo => "invalid_combo",
            Self::UnknownField => "unknown_field",
        }
    }
}

// ─── Issue ──────────────────────────────────────────────────────────────────

/// One problem found in a config: code, field path, message and an optional
/// hint on how to fix it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConfigIssue {
    pub code: ErrorCode,
    pub path: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

impl ConfigIssue {
    pub fn new(code: ErrorCode, path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code,
            path: path.into(),
            message: message.into(),
            hint: None,
        }
    }

    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

impl fmt::Display for ConfigIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.code.as_str(), self.path, self.message)?;
        if let Some(hint) = &self.hint {
            write!(f, " ({hint})")?;
        }
        Ok(())
    }
}

// ─── Severity / diagnostic ──────────────────────────────────────────────────

/// Whether a diagnostic is a hard error or a soft warning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Error,
    Warning,
}

/// A single validation finding.
#[derive(Debug, Clone, Serialize)]
pub struct ValidationDiagnostic {
    pub severity: Severity,
    #[serde(flatten)]
    pub issue: ConfigIssue,
}

impl ValidationDiagnostic {
    pub fn error(issue: ConfigIssue) -> Self {
        Self {
            severity: Severity::Error,
            issue,
        }
    }

    pub fn warning(issue: ConfigIssue) -> Self {
        Self {
            severity: Severity::Warning,
            issue,
        }
    }
}

// ─── Report ─────────────────────────────────────────────────────────────────

/// Collected diagnostics from running all validation rules.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ValidationReport {
    pub diagnostics: Vec<ValidationDiagnostic>,
}

impl ValidationReport {
    /// Iterate over error-severity diagnostics.
    pub fn errors(&self) -> impl Iterator<Item = &ConfigIssue> {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == Severity::Error)
            .map(|d| &d.issue)
    }

    /// Iterate over warning-severity diagnostics.
    pub fn warnings(&self) -> impl Iterator<Item = &ConfigIssue> {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == Severity::Warning)
            .map(|d| &d.issue)
    }

    /// Returns `true` if any diagnostic is an error.
    pub fn has_errors(&self) -> bool {
        self.diagnostics
            .iter()
            .any(|d| d.severity == Severity::Error)
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }
}

// ─── Rule trait ─────────────────────────────────────────────────────────────

/// A single validation rule.
///
/// `pages` is the page count about to be used, when one is known; rules that
/// don't care about it ignore it.
pub trait ValidationRule: Send + Sync {
    /// Inspect `config` and return any findings.
    fn validate(&self, config: &RankConfig, pages: Option<usize>) -> Vec<ValidationDiagnostic>;
}

// ─── Engine ─────────────────────────────────────────────────────────────────

/// Runs a set of [`ValidationRule`]s and collects all diagnostics.
pub struct ValidationEngine {
    rules: Vec<Box<dyn ValidationRule>>,
}

impl ValidationEngine {
    /// Create an engine loaded with the default rule set.
    pub fn with_defaults() -> Self {
        Self {
            rules: vec![
                Box::new(PageBoundsRule),
                Box::new(PageCountRule),
                Box::new(DampingRangeRule),
                Box::new(ToleranceRule),
                Box::new(IterationCapRule),
                Box::new(UnknownFieldsRule),
            ],
        }
    }

    /// Run all rules and return the collected report.
    pub fn validate(&self, config: &RankConfig, pages: Option<usize>) -> ValidationReport {
        let mut report = ValidationReport::default();
        for rule in &self.rules {
            report.diagnostics.extend(rule.validate(config, pages));
        }
        report
    }
}

impl Default for ValidationEngine {
    fn default() -> Self {
        Self::with_defaults()
    }
}

// ═══════════════════════════════════════════════════════════════════════════
//  Concrete rules
// ═══════════════════════════════════════════════════════════════════════════

// ─── 1. min_pages >= 2 and min_pages <= max_pages ───────────────────────────

struct PageBoundsRule;

impl ValidationRule for PageBoundsRule {
    fn validate(&self, config: &RankConfig, _pages: Option<usize>) -> Vec<ValidationDiagnostic> {
        let mut out = Vec::new();

        if config.min_pages < super::DEFAULT_MIN_PAGES {
            out.push(ValidationDiagnostic::error(
                ConfigIssue::new(
                    ErrorCode::OutOfRange,
                    "/min_pages",
                    format!("min_pages must be at least 2, got {}", config.min_pages),
                )
                .with_hint("A web needs two pages for links to mean anything"),
            ));
        }

        if config.min_pages > config.max_pages {
            out.push(ValidationDiagnostic::error(
                ConfigIssue::new(
                    ErrorCode::InvalidCombo,
                    "/max_pages",
                    format!(
                        "max_pages ({}) is smaller than min_pages ({})",
                        config.max_pages, config.min_pages
                    ),
                )
                .with_hint("Raise max_pages or lower min_pages"),
            ));
        }

        out
    }
}

// ─── 2. page count within bounds ────────────────────────────────────────────

struct PageCountRule;

impl ValidationRule for PageCountRule {
    fn validate(&self, config: &RankConfig, pages: Option<usize>) -> Vec<ValidationDiagnostic> {
        match pages {
            Some(n) if !config.accepts_page_count(n) => vec![ValidationDiagnostic::error(
                ConfigIssue::new(
                    ErrorCode::OutOfRange,
                    "/pages",
                    format!(
                        "page count {n} is outside [{}, {}]",
                        config.min_pages, config.max_pages
                    ),
                ),
            )],
            _ => vec![],
        }
    }
}

// ─── 3. damping strictly inside (0, 1) ──────────────────────────────────────

struct DampingRangeRule;

impl ValidationRule for DampingRangeRule {
    fn validate(&self, config: &RankConfig, _pages: Option<usize>) -> Vec<ValidationDiagnostic> {
        let d = config.damping;
        if d > 0.0 && d < 1.0 {
            return vec![];
        }
        vec![ValidationDiagnostic::error(
            ConfigIssue::new(
                ErrorCode::OutOfRange,
                "/damping",
                format!("damping must lie strictly between 0 and 1, got {d}"),
            )
            .with_hint("0.15 is the usual teleportation weight"),
        )]
    }
}

// ─── 4. tolerance positive and finite ───────────────────────────────────────

struct ToleranceRule;

impl ValidationRule for ToleranceRule {
    fn validate(&self, config: &RankConfig, _pages: Option<usize>) -> Vec<ValidationDiagnostic> {
        let eps = config.tolerance;
        if eps.is_finite() && eps > 0.0 {
            return vec![];
        }
        vec![ValidationDiagnostic::error(
            ConfigIssue::new(
                ErrorCode::OutOfRange,
                "/tolerance",
                format!("tolerance must be a positive finite number, got {eps}"),
            )
            .with_hint("0.0001 is a reasonable default"),
        )]
    }
}

// ─── 5. iteration cap positive when set ─────────────────────────────────────

struct IterationCapRule;

impl ValidationRule for IterationCapRule {
    fn validate(&self, config: &RankConfig, _pages: Option<usize>) -> Vec<ValidationDiagnostic> {
        if config.max_iterations == Some(0) {
            vec![ValidationDiagnostic::error(
                ConfigIssue::new(
                    ErrorCode::OutOfRange,
                    "/max_iterations",
                    "max_iterations must be greater than 0",
                )
                .with_hint("Remove max_iterations to iterate until convergence"),
            )]
        } else {
            vec![]
        }
    }
}

// ─── 6. Unknown fields (strict → error, non-strict → warning) ──────────────

struct UnknownFieldsRule;

impl ValidationRule for UnknownFieldsRule {
    fn validate(&self, config: &RankConfig, _pages: Option<usize>) -> Vec<ValidationDiagnostic> {
        let mut keys: Vec<_> = config.unknown_fields.keys().collect();
        keys.sort();

        keys.into_iter()
            .map(|key| {
                let diag_fn = if config.strict {
                    ValidationDiagnostic::error
                } else {
                    ValidationDiagnostic::warning
                };
                diag_fn(
                    ConfigIssue::new(
                        ErrorCode::UnknownField,
                        format!("/{key}"),
                        format!("unrecognized field \"{key}\""),
                    )
                    .with_hint("Check spelling or remove this field"),
                )
            })
            .collect()
    }
}

// ═══════════════════════════════════════════════════════════════════════════
//  Tests
// ═══════════════════════════════════════════════════════════════════════════
