//! Non-fatal diagnostics collected while processing a table.
//!
//! A [`Diagnostics`] value is passed explicitly through every operation
//! instead of living in global state. Each entry is also emitted as a
//! `tracing` event so it reaches whatever subscriber the binary installed.

use serde::Serialize;
use tracing::{info, warn};

/// Severity of a diagnostic entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DiagnosticLevel {
    Info,
    Warning,
}

/// A single diagnostic message
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Diagnostic {
    pub level: DiagnosticLevel,
    /// Name of the operation that produced this entry
    pub operation: String,
    pub message: String,
}

/// Collector for diagnostics raised during one run
#[derive(Debug, Clone, Default, Serialize)]
pub struct Diagnostics {
    /// What is being processed (a file or chart name), attached to every event
    pub context: String,
    entries: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new(context: impl Into<String>) -> Self {
        Self {
            context: context.into(),
            entries: Vec::new(),
        }
    }

    pub fn entries(&self) -> &[Diagnostic] {
        &self.entries
    }

    pub fn warnings(&self) -> impl Iterator<Item = &Diagnostic> {
        self.entries
            .iter()
            .filter(|d| d.level == DiagnosticLevel::Warning)
    }

    pub fn has_warnings(&self) -> bool {
        self.warnings().next().is_some()
    }

    /// Record an informational note
    pub fn info(&mut self, operation: &str, message: impl Into<String>) {
        let message = message.into();
        info!(
            context = %self.context,
            operation = operation,
            "{}",
            message
        );
        self.entries.push(Diagnostic {
            level: DiagnosticLevel::Info,
            operation: operation.to_string(),
            message,
        });
    }

    /// Record a warning
    pub fn warn(&mut self, operation: &str, message: impl Into<String>) {
        let message = message.into();
        warn!(
            context = %self.context,
            operation = operation,
            "{}",
            message
        );
        self.entries.push(Diagnostic {
            level: DiagnosticLevel::Warning,
            operation: operation.to_string(),
            message,
        });
    }

    /// Record that an operation ended up with fewer real values than it started with
    pub fn data_loss(&mut self, operation: &str, column: &str, before: usize, after: usize) {
        let lost = before.saturating_sub(after);
        self.warn(
            operation,
            format!(
                "Data loss in column '{}': {} real values before, {} after ({} lost)",
                column, before, after, lost
            ),
        );
    }
}
