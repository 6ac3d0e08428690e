//! Tree-walking evaluator for FWJS.
//!
//! The evaluator walks an [`Expr`](fwjs_syntax::Expr) tree directly.
//! Scoping is lexical: a closure keeps a shared reference to the
//! environment its function literal was evaluated in, so later
//! assignments to captured variables are visible inside the body.
//!
//! Every failure aborts the whole evaluation and is returned as an
//! [`EvalError`]; nothing is caught internally.

mod env;
mod error;
mod interpreter;
mod operators;
mod print_handler;
pub mod value;

pub use env::{DuplicateVariable, Environment};
pub use error::{EvalError, EvalResult};
pub use interpreter::{DEFAULT_MAX_CALL_DEPTH, Interpreter, evaluate};
pub use print_handler::{
    BufferPrintHandler, PrintHandlerImpl, SharedPrintHandler, StdoutPrintHandler,
    buffer_handler, silent_handler, stdout_handler,
};
pub use value::{Closure, Value};
