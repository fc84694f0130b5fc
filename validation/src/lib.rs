#![no_std]

//! SNIP-style severity classification for the diagnostics a document parse
//! accumulates in lenient mode.
//!
//! [`x12_document::parse`] never aborts on a non-fatal condition under
//! [`x12_document::StrictMode::Warn`] or [`StrictMode::Off`]; instead it
//! collects [`x12_document::Diagnostic`]s. This crate assigns each one a
//! SNIP level and a [`Severity`], and summarizes a batch of them, so a
//! caller can decide whether a lenient parse's output is trustworthy enough
//! to act on.

extern crate alloc;

use alloc::vec::Vec;

use x12_document::{Diagnostic, DiagnosticKind};

/// How serious a classified diagnostic is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    /// Informational; does not call the parse's correctness into question.
    Info,
    /// Non-standard but processable; the binder made a reasonable substitution.
    Warning,
    /// Violates the hierarchy or schema badly enough that downstream
    /// consumers should not trust the affected part of the tree.
    Error,
}

/// Which SNIP (Strategic National Implementation Process) tier a
/// [`DiagnosticKind`] corresponds to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnipLevel {
    /// Level 1: segment and element syntax.
    Syntax,
    /// Level 4: external code set / schema-enumerated values.
    CodeSet,
    /// Level 7: inter-segment and hierarchical structure.
    InterSegment,
}

/// The classification a single diagnostic carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification {
    pub severity: Severity,
    pub snip_level: SnipLevel,
}

/// Map a diagnostic's kind to its SNIP level and severity.
pub fn classify(kind: DiagnosticKind) -> Classification {
    match kind {
        DiagnosticKind::SchemaError => Classification {
            severity: Severity::Error,
            snip_level: SnipLevel::CodeSet,
        },
        DiagnosticKind::UnexpectedSegment => Classification {
            severity: Severity::Warning,
            snip_level: SnipLevel::Syntax,
        },
        DiagnosticKind::AmbiguousHierarchy => Classification {
            severity: Severity::Error,
            snip_level: SnipLevel::InterSegment,
        },
        DiagnosticKind::NoApplicableRule => Classification {
            severity: Severity::Warning,
            snip_level: SnipLevel::InterSegment,
        },
    }
}

/// A diagnostic paired with its classification, carried by reference so a
/// report can be built without cloning the diagnostics it summarizes.
#[derive(Debug, Clone, Copy)]
pub struct ClassifiedDiagnostic<'a> {
    pub diagnostic: &'a Diagnostic,
    pub classification: Classification,
}

/// Severity counts across a batch of diagnostics, plus the worst one seen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ValidationReport {
    pub info: usize,
    pub warning: usize,
    pub error: usize,
}

impl ValidationReport {
    /// True iff nothing classified as [`Severity::Error`] was found.
    pub fn is_clean(&self) -> bool {
        self.error == 0
    }

    pub fn total(&self) -> usize {
        self.info + self.warning + self.error
    }
}

/// Classify every diagnostic and summarize the counts by severity.
pub fn summarize(diagnostics: &[Diagnostic]) -> ValidationReport {
    let mut report = ValidationReport::default();
    for d in diagnostics {
        match classify(d.kind).severity {
            Severity::Info => report.info += 1,
            Severity::Warning => report.warning += 1,
            Severity::Error => report.error += 1,
        }
    }
    report
}

/// Classify every diagnostic, retaining a reference to each.
pub fn classify_all(diagnostics: &[Diagnostic]) -> Vec<ClassifiedDiagnostic<'_>> {
    diagnostics
        .iter()
        .map(|diagnostic| ClassifiedDiagnostic {
            diagnostic,
            classification: classify(diagnostic.kind),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::String;
    use pretty_assertions::assert_eq;

    fn diag(kind: DiagnosticKind) -> Diagnostic {
        Diagnostic {
            kind,
            segment_index: 1,
            segment_name: String::from("NM1"),
            message: String::from("test"),
        }
    }

    #[test]
    fn schema_errors_are_errors() {
        assert_eq!(classify(DiagnosticKind::SchemaError).severity, Severity::Error);
    }

    #[test]
    fn unexpected_segment_is_a_warning() {
        assert_eq!(
            classify(DiagnosticKind::UnexpectedSegment).severity,
            Severity::Warning
        );
    }

    #[test]
    fn summarize_counts_by_severity() {
        let diagnostics = alloc::vec![
            diag(DiagnosticKind::SchemaError),
            diag(DiagnosticKind::UnexpectedSegment),
            diag(DiagnosticKind::UnexpectedSegment),
        ];
        let report = summarize(&diagnostics);
        assert_eq!(report.error, 1);
        assert_eq!(report.warning, 2);
        assert!(!report.is_clean());
    }

    #[test]
    fn empty_batch_is_clean() {
        assert!(summarize(&[]).is_clean());
    }
}
