//! Validation engine for pipeline configuration.
//!
//! The engine runs all registered [`ValidationRule`]s against a
//! [`TextRankConfig`] and collects every diagnostic into a
//! [`ValidationReport`]. It never stops at the first error, so users see
//! all problems at once.
//!
//! # Quick start
//!
//! ```rust
//! use textrank_summarizer::pipeline::validation::ValidationEngine;
//! use textrank_summarizer::TextRankConfig;
//!
//! let report = ValidationEngine::with_defaults().validate(&TextRankConfig::default());
//! assert!(report.is_valid());
//! ```

use std::fmt;

use serde::Serialize;

use crate::errors::{Result, TextRankError};
use crate::types::{PosTag, TextRankConfig};

// ─── Severity ───────────────────────────────────────────────────────────────

/// Whether a diagnostic is a hard error or a soft warning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Error,
    Warning,
}

// ─── Diagnostic ─────────────────────────────────────────────────────────────

/// A single validation finding attached to a config field.
#[derive(Debug, Clone, Serialize)]
pub struct ValidationDiagnostic {
    pub severity: Severity,
    /// JSON pointer to the offending field (e.g. `/damping`)
    pub path: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

impl ValidationDiagnostic {
    pub fn error(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            path: path.into(),
            message: message.into(),
            hint: None,
        }
    }

    pub fn warning(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            ..Self::error(path, message)
        }
    }

    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

impl fmt::Display for ValidationDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path, self.message)?;
        if let Some(hint) = &self.hint {
            write!(f, " ({hint})")?;
        }
        Ok(())
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
    pub fn errors(&self) -> impl Iterator<Item = &ValidationDiagnostic> {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == Severity::Error)
    }

    /// Iterate over warning-severity diagnostics.
    pub fn warnings(&self) -> impl Iterator<Item = &ValidationDiagnostic> {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == Severity::Warning)
    }

    /// Returns `true` if any diagnostic is an error.
    pub fn has_errors(&self) -> bool {
        self.errors().next().is_some()
    }

    /// Returns `true` if there are no errors (warnings are acceptable).
    pub fn is_valid(&self) -> bool {
        !self.has_errors()
    }

    /// Total number of diagnostics (errors + warnings).
    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    /// Returns `true` if there are no diagnostics at all.
    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// Log warnings and turn errors into [`TextRankError::InvalidConfig`].
    pub fn into_result(self) -> Result<()> {
        for warning in self.warnings() {
            tracing::warn!(path = %warning.path, "{}", warning.message);
        }
        if self.is_valid() {
            return Ok(());
        }
        let message = self
            .errors()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("; ");
        Err(TextRankError::InvalidConfig(message))
    }
}

// ─── Rule trait ─────────────────────────────────────────────────────────────

/// A single validation rule that inspects a [`TextRankConfig`] and returns
/// zero or more diagnostics.
pub trait ValidationRule: Send + Sync {
    /// Short, stable identifier for this rule (e.g., `"ranker_params"`).
    fn name(&self) -> &str;

    /// Inspect `config` and return any findings.
    fn validate(&self, config: &TextRankConfig) -> Vec<ValidationDiagnostic>;
}

// ─── Engine ─────────────────────────────────────────────────────────────────

/// Runs a set of [`ValidationRule`]s against a [`TextRankConfig`] and
/// collects all diagnostics into a [`ValidationReport`].
pub struct ValidationEngine {
    rules: Vec<Box<dyn ValidationRule>>,
}

impl ValidationEngine {
    /// Create an empty engine with no rules.
    pub fn new() -> Self {
        Self { rules: Vec::new() }
    }

    /// Create an engine pre-loaded with the default rule set.
    pub fn with_defaults() -> Self {
        let mut engine = Self::new();
        engine.add_rule(Box::new(RankerParamsRule));
        engine.add_rule(Box::new(SelectionRule));
        engine.add_rule(Box::new(RuntimeLimitsRule));
        engine.add_rule(Box::new(UnknownFieldsRule));
        engine
    }

    /// Register an additional rule.
    pub fn add_rule(&mut self, rule: Box<dyn ValidationRule>) {
        self.rules.push(rule);
    }

    /// Names of the registered rules, in execution order.
    pub fn rule_names(&self) -> Vec<&str> {
        self.rules.iter().map(|r| r.name()).collect()
    }

    /// Run all rules against `config` and return the collected report.
    pub fn validate(&self, config: &TextRankConfig) -> ValidationReport {
        let mut report = ValidationReport::default();
        for rule in &self.rules {
            report.diagnostics.extend(rule.validate(config));
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

// ─── 1. Damping, iteration cap and tolerance ────────────────────────────────

struct RankerParamsRule;

impl ValidationRule for RankerParamsRule {
    fn name(&self) -> &str {
        "ranker_params"
    }

    fn validate(&self, config: &TextRankConfig) -> Vec<ValidationDiagnostic> {
        let mut out = Vec::new();

        if !(config.damping > 0.0 && config.damping < 1.0) {
            out.push(
                ValidationDiagnostic::error(
                    "/damping",
                    format!("damping must lie strictly between 0 and 1, got {}", config.damping),
                )
                .with_hint("0.85 is the conventional value"),
            );
        }

        if config.max_iterations == 0 {
            out.push(ValidationDiagnostic::error(
                "/max_iterations",
                "max_iterations must be greater than 0",
            ));
        }

        if config.threshold.is_nan() || config.threshold < 0.0 {
            out.push(ValidationDiagnostic::error(
                "/threshold",
                format!("threshold must be non-negative, got {}", config.threshold),
            ));
        } else if config.threshold == 0.0 {
            out.push(
                ValidationDiagnostic::warning(
                    "/threshold",
                    "threshold 0 only stops at the iteration cap",
                )
                .with_hint("Use a small positive tolerance such as 1e-4"),
            );
        }

        out
    }
}

// ─── 2. Keyphrase and summary selection ─────────────────────────────────────

struct SelectionRule;

impl ValidationRule for SelectionRule {
    fn name(&self) -> &str {
        "selection"
    }

    fn validate(&self, config: &TextRankConfig) -> Vec<ValidationDiagnostic> {
        let mut out = Vec::new();

        if config.keyword_divisor == 0 {
            out.push(
                ValidationDiagnostic::error(
                    "/keyword_divisor",
                    "keyword_divisor must be greater than 0",
                )
                .with_hint("3 keeps a third of the candidate words"),
            );
        }

        if config.candidate_tags.is_empty() {
            out.push(ValidationDiagnostic::error(
                "/candidate_tags",
                "candidate_tags is empty, no word can become a keyphrase",
            ));
        } else if config.candidate_tags.contains(&PosTag::Punctuation) {
            out.push(ValidationDiagnostic::warning(
                "/candidate_tags",
                "punctuation tokens are normalized away and never become candidates",
            ));
        }

        if config.summary_length == 0 {
            out.push(ValidationDiagnostic::warning(
                "/summary_length",
                "summary_length 0 always produces an empty summary",
            ));
        }

        out
    }
}

// ─── 3. Runtime limits must be positive when set ────────────────────────────

struct RuntimeLimitsRule;

impl ValidationRule for RuntimeLimitsRule {
    fn name(&self) -> &str {
        "runtime_limits"
    }

    fn validate(&self, config: &TextRankConfig) -> Vec<ValidationDiagnostic> {
        let mut out = Vec::new();

        if config.max_nodes == Some(0) {
            out.push(
                ValidationDiagnostic::error("/max_nodes", "max_nodes must be greater than 0")
                    .with_hint("Remove max_nodes to disable the limit or set it above 0"),
            );
        }

        if config.parallel_threshold == 0 {
            out.push(ValidationDiagnostic::warning(
                "/parallel_threshold",
                "parallel_threshold 0 parallelizes even single-node graphs",
            ));
        }

        out
    }
}

// ─── 4. Unknown fields ──────────────────────────────────────────────────────

struct UnknownFieldsRule;

impl ValidationRule for UnknownFieldsRule {
    fn name(&self) -> &str {
        "unknown_fields"
    }

    fn validate(&self, config: &TextRankConfig) -> Vec<ValidationDiagnostic> {
        let mut keys: Vec<&String> = config.unknown_fields.keys().collect();
        keys.sort();
        keys.into_iter()
            .map(|key| {
                let message = format!("unrecognized field \"{key}\"");
                ValidationDiagnostic::warning(format!("/{key}"), message)
                    .with_hint("Check spelling or remove this field")
            })
            .collect()
    }
}

/// Validate with the default rule set.
pub fn validate(config: &TextRankConfig) -> ValidationReport {
    ValidationEngine::with_defaults().validate(config)
}

// ═══════════════════════════════════════════════════════════════════════════
//  Tests
// ═══════════════════════════════════════════════════════════════════════════
