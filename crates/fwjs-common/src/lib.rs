//! Common utilities and data structures for FWJS.
//!
//! This crate provides the foundational types shared by the front end,
//! the diagnostics renderer and the evaluator:
//! - `Span`: Source code location tracking
//! - `BytePos`: Byte offsets into a source file

mod span;

pub use span::{BytePos, LineCol, Span};
