//! The diagnostic record shared by the lexer, parser and evaluator.
//! 词法分析器、语法分析器和求值器共用的诊断记录。

use std::fmt;

use crate::ErrorCode;
use fwjs_common::Span;

/// Which phase produced a diagnostic. Lexer and parser problems are
/// syntax errors; evaluation problems are runtime errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagnosticKind {
    Lexer,
    Parser,
    Eval,
}

impl DiagnosticKind {
    /// Heading used when the diagnostic is rendered.
    pub fn heading(self) -> &'static str {
        match self {
            DiagnosticKind::Lexer | DiagnosticKind::Parser => "syntax error",
            DiagnosticKind::Eval => "runtime error",
        }
    }
}

/// A message attached to a span of source.
#[derive(Debug, Clone)]
pub struct Label {
    pub span: Span,
    pub message: String,
}

/// Every FWJS diagnostic is fatal for its phase and carries a code.
#[derive(Debug, Clone)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub code: ErrorCode,
    pub message: String,
    pub span: Span,
    pub labels: Vec<Label>,
    pub notes: Vec<String>,
}

impl Diagnostic {
    pub fn new(
        kind: DiagnosticKind,
        code: ErrorCode,
        span: Span,
        message: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            code,
            message: message.into(),
            span,
            labels: Vec::new(),
            notes: Vec::new(),
        }
    }

    pub fn with_label(mut self, span: Span, message: impl Into<String>) -> Self {
        self.labels.push(Label {
            span,
            message: message.into(),
        });
        self
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }

    /// Suggested fix, derived from the error code.
    pub fn help(&self) -> Option<&'static str> {
        self.code.suggestion()
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code.as_str(), self.message)
    }
}
