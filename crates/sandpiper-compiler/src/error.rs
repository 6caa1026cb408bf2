//! Error types for the Sandpiper compiler.
//!
//! Failures are contained at unit granularity: a unit that fails to
//! transform degrades to empty output and is reported through the
//! per-invocation [`Diagnostic`] side channel, never by aborting sibling
//! compilations. The only fatal condition for a whole `compile` call is a
//! missing entry unit.

use std::fmt;

use thiserror::Error;

/// Errors that fail a whole driver invocation.
#[derive(Error, Debug)]
pub enum CompileError {
    /// The designated entry unit is not present in the unit set.
    #[error("entry unit not found: {0}")]
    MissingEntry(String),
}

/// Errors transforming a single unit.
///
/// Never propagated out of the driver: the unit compiler logs the failure,
/// records a diagnostic and substitutes empty output.
#[derive(Error, Debug)]
pub enum TransformError {
    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Transform error: {0}")]
    Transform(String),

    #[error("Codegen error: {0}")]
    Codegen(String),
}

/// What a diagnostic is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagnosticKind {
    /// A unit failed to parse or emit and was replaced with empty output.
    Transform,
    /// A unit was revisited while still being compiled; the revisiting edge
    /// was short-circuited to an empty module.
    ImportCycle,
}

/// One entry in the per-invocation side channel.
///
/// Collected while a compilation runs and returned on the
/// [`CompileOutput`](crate::compile::CompileOutput); a broken unit shows up
/// here instead of crashing the preview.
#[derive(Debug, Clone)]
pub struct Diagnostic {
    /// Name of the unit the diagnostic is about.
    pub unit: String,
    pub kind: DiagnosticKind,
    pub message: String,
}

impl Diagnostic {
    pub(crate) fn transform(unit: &str, err: &TransformError) -> Self {
        Self {
            unit: unit.to_string(),
            kind: DiagnosticKind::Transform,
            message: err.to_string(),
        }
    }

    pub(crate) fn cycle(unit: &str) -> Self {
        Self {
            unit: unit.to_string(),
            kind: DiagnosticKind::ImportCycle,
            message: format!("import cycle through '{}'; substituted an empty module", unit),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.unit, self.message)
    }
}
