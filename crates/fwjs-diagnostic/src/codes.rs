//! Error codes for FWJS diagnostics.

/// Error codes for categorizing diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    // Lexer errors (E0001 - E0099)
    UnexpectedCharacter,
    IntegerOverflow,

    // Parser errors (E0100 - E0199)
    UnexpectedToken,
    ExpectedExpression,
    ExpectedIdentifier,
    UnclosedDelimiter,
    MissingSemicolon,

    // Eval errors (E0300 - E0399)
    DivisionByZero,
    TypeMismatch,
    DuplicateVariable,
    NotCallable,
    StackExhaustion,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            // Lexer
            ErrorCode::UnexpectedCharacter => "E0001",
            ErrorCode::IntegerOverflow => "E0002",

            // Parser
            ErrorCode::UnexpectedToken => "E0100",
            ErrorCode::ExpectedExpression => "E0101",
            ErrorCode::ExpectedIdentifier => "E0102",
            ErrorCode::UnclosedDelimiter => "E0103",
            ErrorCode::MissingSemicolon => "E0104",

            // Eval
            ErrorCode::DivisionByZero => "E0300",
            ErrorCode::TypeMismatch => "E0301",
            ErrorCode::DuplicateVariable => "E0302",
            ErrorCode::NotCallable => "E0303",
            ErrorCode::StackExhaustion => "E0304",
        }
    }

    /// Get a suggested fix for the error, if available.
    pub fn suggestion(&self) -> Option<&'static str> {
        match self {
            ErrorCode::MissingSemicolon => Some("add `;` at the end of the statement"),
            ErrorCode::UnclosedDelimiter => Some("add the matching closing delimiter"),
            ErrorCode::DuplicateVariable => {
                Some("use `name = value` to assign to the existing variable")
            }
            ErrorCode::StackExhaustion => {
                Some("check that the recursion has a reachable base case")
            }
            _ => None,
        }
    }
}
