//! Integration tests for fwjs-common crate.

use fwjs_common::{BytePos, LineCol, Span};

#[test]
fn test_span_merge() {
    let a = Span::from_usize(10, 20);
    let b = Span::from_usize(15, 30);
    let merged = a.merge(b);
    assert_eq!(merged.start.0, 10);
    assert_eq!(merged.end.0, 30);
}

#[test]
fn test_span_len() {
    let span = Span::from_usize(5, 15);
    assert_eq!(span.len(), 10);
}

#[test]
fn test_span_is_empty() {
    let empty = Span::from_usize(5, 5);
    let non_empty = Span::from_usize(5, 10);
    assert!(empty.is_empty());
    assert!(!non_empty.is_empty());
}

#[test]
fn test_span_range() {
    let span = Span::from_usize(5, 15);
    assert_eq!(span.range(), 5..15);
    assert_eq!(Span::from(5..15), span);
}

#[test]
fn test_byte_pos_offset() {
    let pos = BytePos(10);
    assert_eq!(pos.offset(5), BytePos(15));
}

#[test]
fn test_line_col() {
    let source = "var x = 1;\nvar y = x;\n";
    let span = Span::from_usize(15, 16);
    assert_eq!(span.line_col(source), LineCol { line: 2, column: 5 });
    assert_eq!(span.line_col(source).to_string(), "2:5");
}
