//! Parser for FWJS.
//!
//! This crate provides a recursive descent parser that converts
//! tokens into the expression tree consumed by the evaluator.
//!
//! ## Error Recovery
//!
//! The parser never stops at the first error. After a syntax error it
//! skips to the next statement boundary and keeps going, so a single
//! pass reports every problem in the file. The returned tree is only
//! meaningful when no diagnostics were produced.

mod parser;
mod recovery;

pub use parser::Parser;

use fwjs_diagnostic::Diagnostic;
use fwjs_lexer::Lexer;
use fwjs_syntax::Expr;

/// Parse a whole program into a single expression.
///
/// The statements of the program are folded into a chain of `Seq`
/// nodes; an empty program is the `null` literal.
#[tracing::instrument(level = "debug", skip_all, fields(bytes = source.len()))]
pub fn parse(source: &str) -> (Expr, Vec<Diagnostic>) {
    let lexer = Lexer::new(source);
    let (tokens, mut diagnostics) = lexer.tokenize();

    let mut parser = Parser::new(tokens);
    let program = parser.parse_program();

    diagnostics.extend(parser.diagnostics());
    tracing::debug!(diagnostics = diagnostics.len(), "parsed program");
    (program, diagnostics)
}
