//! Expression tree definitions for FWJS.
//!
//! Everything in FWJS is an expression, so this crate has a single node
//! type, [`Expr`], shared by the parser (which builds trees) and the
//! evaluator (which walks them).

mod expr;
mod ops;

pub use expr::*;
pub use ops::BinOp;
