//! CLI command implementations.

pub mod check;
pub mod eval;
pub mod repl;
pub mod run;

use fwjs_diagnostic::{Diagnostic, emit};
use fwjs_eval::{Interpreter, Value};
use fwjs_syntax::Expr;

/// Options shared by every command.
pub struct Settings {
    pub verbose: bool,
    pub max_call_depth: usize,
}

impl Settings {
    /// An interpreter printing to stdout with the configured call depth.
    pub fn interpreter(&self) -> Interpreter {
        Interpreter::new().with_max_call_depth(self.max_call_depth)
    }
}

/// Parse `source`, emitting every diagnostic. Returns the tree only when
/// parsing was clean.
pub fn parse_or_report(source: &str, filename: &str) -> Result<Expr, usize> {
    let (program, diagnostics) = fwjs_parser::parse(source);
    report_all(source, filename, &diagnostics);
    if diagnostics.is_empty() {
        Ok(program)
    } else {
        Err(diagnostics.len())
    }
}

pub fn report_all(source: &str, filename: &str, diagnostics: &[Diagnostic]) {
    for diag in diagnostics {
        emit(source, filename, diag);
    }
}

/// Run `program`, rendering an evaluation error against `source`.
pub fn run_program(
    interp: &mut Interpreter,
    program: &Expr,
    source: &str,
    filename: &str,
) -> Result<Value, String> {
    interp.run(program).map_err(|e| {
        emit(source, filename, &e.to_diagnostic());
        "evaluation error".to_string()
    })
}
