//! Evaluation errors.

use fwjs_common::Span;
use fwjs_diagnostic::{Diagnostic, DiagnosticKind, ErrorCode};
use thiserror::Error;

/// Evaluation errors. Each one aborts the whole evaluation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EvalError {
    #[error("variable `{name}` is already declared in this scope")]
    DuplicateVariable { name: String, span: Span },

    #[error("type error: {message}")]
    TypeError { message: String, span: Span },

    #[error("division by zero")]
    DivisionByZero { span: Span },

    #[error("cannot call a value of type {type_name}")]
    NotCallable { type_name: &'static str, span: Span },

    #[error("call stack exhausted: more than {limit} nested calls")]
    StackExhaustion { limit: usize, span: Span },
}

/// Result of evaluating an expression.
pub type EvalResult<T = crate::Value> = Result<T, EvalError>;

impl EvalError {
    pub(crate) fn type_error(message: impl Into<String>, span: Span) -> Self {
        EvalError::TypeError {
            message: message.into(),
            span,
        }
    }

    /// Location of the expression that failed.
    pub fn span(&self) -> Span {
        match self {
            EvalError::DuplicateVariable { span, .. }
            | EvalError::TypeError { span, .. }
            | EvalError::DivisionByZero { span }
            | EvalError::NotCallable { span, .. }
            | EvalError::StackExhaustion { span, .. } => *span,
        }
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            EvalError::DuplicateVariable { .. } => ErrorCode::DuplicateVariable,
            EvalError::TypeError { .. } => ErrorCode::TypeMismatch,
            EvalError::DivisionByZero { .. } => ErrorCode::DivisionByZero,
            EvalError::NotCallable { .. } => ErrorCode::NotCallable,
            EvalError::StackExhaustion { .. } => ErrorCode::StackExhaustion,
        }
    }

    /// Convert into a diagnostic labelled at the failing expression.
    pub fn to_diagnostic(&self) -> Diagnostic {
        let span = self.span();
        let label = match self {
            EvalError::DuplicateVariable { .. } => "declared again here",
            EvalError::TypeError { .. } => "this operand has the wrong type",
            EvalError::DivisionByZero { .. } => "right operand is zero",
            EvalError::NotCallable { .. } => "this is not a function",
            EvalError::StackExhaustion { .. } => "in this call",
        };
        Diagnostic::new(DiagnosticKind::Eval, self.code(), span, self.to_string())
            .with_label(span, label)
    }
}
