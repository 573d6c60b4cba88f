//! Diagnostics channel for ingestion.
//!
//! Validation findings never interrupt control flow. Every component
//! records them through an injected [`DiagnosticSink`], which lets tests
//! assert on exactly what was reported and lets callers surface the
//! accumulated messages after a run.

use std::sync::{Mutex, PoisonError};

/// Severity of a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    /// Progress information.
    Info,
    /// A safe default was substituted or a likely mistake was spotted.
    Warning,
    /// A row, reference or field was rejected.
    Error,
}

/// What a diagnostic is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiagnosticKind {
    /// A workbook is being ingested.
    ReadingCodebook,
    /// A concept id was already present in the codebook.
    DuplicateIdentifier,
    /// The mandatory `code` cell is empty.
    MissingCode,
    /// The mandatory `codesystem` cell is empty.
    MissingCodesystem,
    /// The mandatory `description_code` cell is empty.
    MissingCodeDescription,
    /// The codesystem looks like a misspelling of a known one.
    ProbableTypo,
    /// A `codelist_ref` names a sheet that does not exist.
    MissingCodeList,
    /// A referenced code-list sheet has no header row.
    EmptyCodeList,
    /// The Info sheet's effective date could not be parsed.
    InvalidEffectiveDate,
    /// The Info sheet has no effective date.
    MissingEffectiveDate,
    /// The version label is not a number.
    InvalidVersionLabel,
}

/// A single finding recorded during ingestion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// Severity.
    pub severity: Severity,
    /// Raw version label of the codebook being read (may be empty).
    pub version_label: String,
    /// Category.
    pub kind: DiagnosticKind,
    /// Human-readable message.
    pub message: String,
}

impl Diagnostic {
    /// Creates an error diagnostic.
    pub fn error(version_label: &str, kind: DiagnosticKind, message: impl Into<String>) -> Self {
        Self::with_severity(Severity::Error, version_label, kind, message)
    }

    /// Creates a warning diagnostic.
    pub fn warning(version_label: &str, kind: DiagnosticKind, message: impl Into<String>) -> Self {
        Self::with_severity(Severity::Warning, version_label, kind, message)
    }

    /// Creates an info diagnostic.
    pub fn info(version_label: &str, kind: DiagnosticKind, message: impl Into<String>) -> Self {
        Self::with_severity(Severity::Info, version_label, kind, message)
    }

    fn with_severity(
        severity: Severity,
        version_label: &str,
        kind: DiagnosticKind,
        message: impl Into<String>,
    ) -> Self {
        Self {
            severity,
            version_label: version_label.to_string(),
            kind,
            message: message.into(),
        }
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "codebook version: {}; {}",
            self.version_label, self.message
        )
    }
}

/// Receiver for ingestion diagnostics.
pub trait DiagnosticSink {
    /// Records one diagnostic.
    fn record(&self, diagnostic: Diagnostic);
}

impl<S: DiagnosticSink + ?Sized> DiagnosticSink for &S {
    fn record(&self, diagnostic: Diagnostic) {
        (**self).record(diagnostic);
    }
}

/// Forwards diagnostics to `tracing` events.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn record(&self, diagnostic: Diagnostic) {
        let Diagnostic {
            severity,
            version_label,
            kind,
            message,
        } = diagnostic;
        match severity {
            Severity::Info => tracing::info!(version = %version_label, ?kind, "{}", message),
            Severity::Warning => tracing::warn!(version = %version_label, ?kind, "{}", message),
            Severity::Error => tracing::error!(version = %version_label, ?kind, "{}", message),
        }
    }
}

/// Collects diagnostics in memory.
#[derive(Debug, Default)]
pub struct MemorySink {
    entries: Mutex<Vec<Diagnostic>>,
}

impl MemorySink {
    /// Creates an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of everything recorded so far.
    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Returns the kinds recorded at `severity`, in recording order.
    pub fn kinds(&self, severity: Severity) -> Vec<DiagnosticKind> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .filter(|d| d.severity == severity)
            .map(|d| d.kind)
            .collect()
    }

    /// Counts diagnostics of `kind`.
    pub fn count(&self, kind: DiagnosticKind) -> usize {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .filter(|d| d.kind == kind)
            .count()
    }

    /// Counts diagnostics at `severity`.
    pub fn count_severity(&self, severity: Severity) -> usize {
        self.kinds(severity).len()
    }

    /// Removes and returns everything recorded so far.
    pub fn take(&self) -> Vec<Diagnostic> {
        std::mem::take(&mut *self.entries.lock().unwrap_or_else(PoisonError::into_inner))
    }
}

impl DiagnosticSink for MemorySink {
    fn record(&self, diagnostic: Diagnostic) {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(diagnostic);
    }
}

/// Sends every diagnostic to two sinks.
#[derive(Debug, Clone, Copy)]
pub struct Tee<A, B>(pub A, pub B);

impl<A: DiagnosticSink, B: DiagnosticSink> DiagnosticSink for Tee<A, B> {
    fn record(&self, diagnostic: Diagnostic) {
        self.0.record(diagnostic.clone());
        self.1.record(diagnostic);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_sink_collects_in_order() {
        let sink = MemorySink::new();
        sink.record(Diagnostic::error("1", DiagnosticKind::MissingCode, "a"));
        sink.record(Diagnostic::warning("1", DiagnosticKind::ProbableTypo, "b"));
        sink.record(Diagnostic::error("1", DiagnosticKind::MissingCodesystem, "c"));

        assert_eq!(
            sink.kinds(Severity::Error),
            vec![DiagnosticKind::MissingCode, DiagnosticKind::MissingCodesystem]
        );
        assert_eq!(sink.count(DiagnosticKind::ProbableTypo), 1);
        assert_eq!(sink.count_severity(Severity::Warning), 1);
        assert_eq!(sink.take().len(), 3);
        assert!(sink.diagnostics().is_empty());
    }

    #[test]
    fn test_tee_records_to_both() {
        let left = MemorySink::new();
        let right = MemorySink::new();
        let tee = Tee(&left, &right);
        tee.record(Diagnostic::info("", DiagnosticKind::ReadingCodebook, "x.xlsx"));

        assert_eq!(left.diagnostics().len(), 1);
        assert_eq!(right.diagnostics(), left.diagnostics());
    }

    #[test]
    fn test_display_includes_version() {
        let diagnostic = Diagnostic::error("33", DiagnosticKind::MissingCode, "Mandatory code missing");
        assert_eq!(
            diagnostic.to_string(),
            "codebook version: 33; Mandatory code missing"
        );
    }
}
