//! Integration tests for fwjs-parser crate.

use fwjs_diagnostic::{Diagnostic, ErrorCode};
use fwjs_parser::parse;
use fwjs_syntax::{Expr, ExprKind, Literal};
use pretty_assertions::assert_eq;

/// Render a tree as an s-expression so shapes can be compared as text.
fn sexpr(expr: &Expr) -> String {
    match &expr.kind {
        ExprKind::Literal(Literal::Int(n)) => n.to_string(),
        ExprKind::Literal(Literal::Bool(b)) => b.to_string(),
        ExprKind::Literal(Literal::Null) => "null".to_string(),
        ExprKind::Var(name) => name.clone(),
        ExprKind::Print(inner) => format!("(print {})", sexpr(inner)),
        ExprKind::Binary { op, left, right } => {
            format!("({op} {} {})", sexpr(left), sexpr(right))
        }
        ExprKind::If {
            condition,
            then_branch,
            else_branch,
        } => match else_branch {
            Some(els) => format!(
                "(if {} {} {})",
                sexpr(condition),
                sexpr(then_branch),
                sexpr(els)
            ),
            None => format!("(if {} {})", sexpr(condition), sexpr(then_branch)),
        },
        ExprKind::While { condition, body } => {
            format!("(while {} {})", sexpr(condition), sexpr(body))
        }
        ExprKind::Seq { first, second } => format!("(seq {} {})", sexpr(first), sexpr(second)),
        ExprKind::VarDecl { name, value } => format!("(var {} {})", name.name, sexpr(value)),
        ExprKind::Assign { name, value } => format!("(= {} {})", name.name, sexpr(value)),
        ExprKind::Function(def) => {
            let params: Vec<_> = def.param_names().collect();
            format!("(function ({}) {})", params.join(" "), sexpr(&def.body))
        }
        ExprKind::Call { func, args } => {
            let mut out = format!("(call {}", sexpr(func));
            for arg in args {
                out.push(' ');
                out.push_str(&sexpr(arg));
            }
            out.push(')');
            out
        }
    }
}

fn parse_ok(source: &str) -> String {
    let (expr, diagnostics) = parse(source);
    assert!(diagnostics.is_empty(), "unexpected diagnostics: {diagnostics:?}");
    sexpr(&expr)
}

fn parse_err(source: &str) -> Vec<Diagnostic> {
    let (_, diagnostics) = parse(source);
    assert!(!diagnostics.is_empty(), "expected diagnostics for {source:?}");
    diagnostics
}

fn codes(diagnostics: &[Diagnostic]) -> Vec<ErrorCode> {
    diagnostics.iter().map(|d| d.code).collect()
}

// ============================================================================
// Expressions
// ============================================================================

#[test]
fn test_empty_program() {
    assert_eq!(parse_ok(""), "null");
    assert_eq!(parse_ok("  // nothing\n"), "null");
}

#[test]
fn test_literals() {
    assert_eq!(parse_ok("42;"), "42");
    assert_eq!(parse_ok("true;"), "true");
    assert_eq!(parse_ok("null;"), "null");
}

#[test]
fn test_precedence() {
    assert_eq!(parse_ok("1 + 2 * 3;"), "(+ 1 (* 2 3))");
    assert_eq!(parse_ok("(1 + 2) * 3;"), "(* (+ 1 2) 3)");
    assert_eq!(parse_ok("1 + 2 < 3 * 4;"), "(< (+ 1 2) (* 3 4))");
    assert_eq!(parse_ok("a % b / c;"), "(/ (% a b) c)");
}

#[test]
fn test_left_associativity() {
    assert_eq!(parse_ok("10 - 3 - 2;"), "(- (- 10 3) 2)");
    assert_eq!(parse_ok("8 / 4 / 2;"), "(/ (/ 8 4) 2)");
    assert_eq!(parse_ok("a == b == c;"), "(== (== a b) c)");
}

#[test]
fn test_all_comparison_operators() {
    assert_eq!(
        parse_ok("a > b; a >= b; a < b; a <= b;"),
        "(seq (seq (seq (> a b) (>= a b)) (< a b)) (<= a b))"
    );
}

#[test]
fn test_statements_fold_left() {
    assert_eq!(parse_ok("1; 2; 3;"), "(seq (seq 1 2) 3)");
}

#[test]
fn test_empty_statements_are_dropped() {
    assert_eq!(parse_ok(";1;;2;;"), "(seq 1 2)");
}

#[test]
fn test_var_and_assign() {
    assert_eq!(parse_ok("var x = 1 + 2;"), "(var x (+ 1 2))");
    assert_eq!(parse_ok("x = y = 3;"), "(= x (= y 3))");
}

#[test]
fn test_print_is_an_expression() {
    assert_eq!(parse_ok("print(1) + print(2);"), "(+ (print 1) (print 2))");
}

// ============================================================================
// Control flow and functions
// ============================================================================

#[test]
fn test_if_else() {
    assert_eq!(
        parse_ok("if (x < 1) { 1; } else { 2; }"),
        "(if (< x 1) 1 2)"
    );
    assert_eq!(parse_ok("if (b) print(1);"), "(if b (print 1))");
}

#[test]
fn test_else_if_chain() {
    assert_eq!(
        parse_ok("if (a) { 1; } else if (b) { 2; } else { 3; }"),
        "(if a 1 (if b 2 3))"
    );
}

#[test]
fn test_if_as_expression() {
    assert_eq!(
        parse_ok("var m = if (a > b) { a; } else { b; };"),
        "(var m (if (> a b) a b))"
    );
}

#[test]
fn test_while() {
    assert_eq!(
        parse_ok("while (i < 3) { print(i); i = i + 1; }"),
        "(while (< i 3) (seq (print i) (= i (+ i 1))))"
    );
}

#[test]
fn test_empty_block_is_null() {
    assert_eq!(parse_ok("while (false) { }"), "(while false null)");
}

#[test]
fn test_function_literal_and_calls() {
    assert_eq!(
        parse_ok("var add = function(a, b) { a + b; };"),
        "(var add (function (a b) (+ a b)))"
    );
    assert_eq!(parse_ok("f();"), "(call f)");
    assert_eq!(parse_ok("f(1, g(2))(3);"), "(call (call f 1 (call g 2)) 3)");
    assert_eq!(
        parse_ok("(function(x) { x; })(7);"),
        "(call (function (x) x) 7)"
    );
}

// ============================================================================
// Diagnostics and recovery
// ============================================================================

#[test]
fn test_missing_semicolon() {
    let diagnostics = parse_err("var x = 1 var y = 2;");
    assert_eq!(codes(&diagnostics), vec![ErrorCode::MissingSemicolon]);
}

#[test]
fn test_expected_expression() {
    let diagnostics = parse_err("var x = ;");
    assert_eq!(codes(&diagnostics), vec![ErrorCode::ExpectedExpression]);
}

#[test]
fn test_expected_identifier() {
    let diagnostics = parse_err("var 1 = 2;");
    assert_eq!(codes(&diagnostics)[0], ErrorCode::ExpectedIdentifier);
}

#[test]
fn test_unclosed_paren() {
    let diagnostics = parse_err("print(1;");
    assert_eq!(codes(&diagnostics)[0], ErrorCode::UnclosedDelimiter);
    assert_eq!(diagnostics[0].labels[0].span.range(), 5..6);
}

#[test]
fn test_unmatched_closing_brace() {
    let diagnostics = parse_err("1; } 2;");
    assert_eq!(codes(&diagnostics), vec![ErrorCode::UnexpectedToken]);
}

#[test]
fn test_recovery_reports_every_statement() {
    let diagnostics = parse_err("var = 1;\nvar ok = 2;\nvar y = ;\n");
    assert_eq!(
        codes(&diagnostics),
        vec![ErrorCode::ExpectedIdentifier, ErrorCode::ExpectedExpression]
    );
}

#[test]
fn test_lexer_errors_are_not_duplicated() {
    let diagnostics = parse_err("var x = #;");
    assert_eq!(codes(&diagnostics), vec![ErrorCode::UnexpectedCharacter]);
}
