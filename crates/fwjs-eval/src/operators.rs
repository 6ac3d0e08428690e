//! Binary operator evaluation.
//!
//! All operators work on 32-bit integers with two's-complement wrapping,
//! so results do not depend on the host: `i32::MIN / -1` is `i32::MIN`
//! and `i32::MIN % -1` is `0`. Division and remainder truncate toward
//! zero.

use fwjs_common::Span;
use fwjs_syntax::BinOp;

use crate::{EvalError, EvalResult, Value};

/// Apply `op` to two already-evaluated operands.
pub fn eval_binary(op: BinOp, left: Value, right: Value, span: Span) -> EvalResult {
    let (a, b) = match (&left, &right) {
        (Value::Int(a), Value::Int(b)) => (*a, *b),
        _ => {
            return Err(EvalError::type_error(
                format!(
                    "operator `{op}` expects int operands, found {} and {}",
                    left.type_name(),
                    right.type_name()
                ),
                span,
            ));
        }
    };

    let value = match op {
        BinOp::Add => Value::Int(a.wrapping_add(b)),
        BinOp::Sub => Value::Int(a.wrapping_sub(b)),
        BinOp::Mul => Value::Int(a.wrapping_mul(b)),
        BinOp::Div => {
            if b == 0 {
                return Err(EvalError::DivisionByZero { span });
            }
            Value::Int(a.wrapping_div(b))
        }
        BinOp::Mod => {
            if b == 0 {
                return Err(EvalError::DivisionByZero { span });
            }
            Value::Int(a.wrapping_rem(b))
        }
        BinOp::Gt => Value::Bool(a > b),
        BinOp::Ge => Value::Bool(a >= b),
        BinOp::Lt => Value::Bool(a < b),
        BinOp::Le => Value::Bool(a <= b),
        BinOp::Eq => Value::Bool(a == b),
    };

    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn int(op: BinOp, a: i32, b: i32) -> EvalResult {
        eval_binary(op, Value::Int(a), Value::Int(b), Span::DUMMY)
    }

    #[test]
    fn test_arithmetic() {
        assert_eq!(int(BinOp::Add, 2, 3), Ok(Value::Int(5)));
        assert_eq!(int(BinOp::Sub, 2, 3), Ok(Value::Int(-1)));
        assert_eq!(int(BinOp::Mul, -4, 3), Ok(Value::Int(-12)));
    }

    #[test]
    fn test_division_truncates_toward_zero() {
        assert_eq!(int(BinOp::Div, 7, 2), Ok(Value::Int(3)));
        assert_eq!(int(BinOp::Div, -7, 2), Ok(Value::Int(-3)));
        assert_eq!(int(BinOp::Mod, -7, 2), Ok(Value::Int(-1)));
        assert_eq!(int(BinOp::Mod, 7, -2), Ok(Value::Int(1)));
    }

    #[test]
    fn test_overflow_wraps() {
        assert_eq!(int(BinOp::Add, i32::MAX, 1), Ok(Value::Int(i32::MIN)));
        assert_eq!(int(BinOp::Mul, i32::MAX, 2), Ok(Value::Int(-2)));
        assert_eq!(int(BinOp::Div, i32::MIN, -1), Ok(Value::Int(i32::MIN)));
        assert_eq!(int(BinOp::Mod, i32::MIN, -1), Ok(Value::Int(0)));
    }

    #[test]
    fn test_comparisons() {
        assert_eq!(int(BinOp::Gt, 2, 1), Ok(Value::Bool(true)));
        assert_eq!(int(BinOp::Ge, 1, 1), Ok(Value::Bool(true)));
        assert_eq!(int(BinOp::Lt, 2, 1), Ok(Value::Bool(false)));
        assert_eq!(int(BinOp::Le, 2, 2), Ok(Value::Bool(true)));
        assert_eq!(int(BinOp::Eq, 3, 4), Ok(Value::Bool(false)));
    }

    #[test]
    fn test_zero_divisor() {
        let span = Span::from_usize(0, 5);
        assert_eq!(
            eval_binary(BinOp::Div, Value::Int(1), Value::Int(0), span),
            Err(EvalError::DivisionByZero { span })
        );
        assert_eq!(
            int(BinOp::Mod, 1, 0),
            Err(EvalError::DivisionByZero { span: Span::DUMMY })
        );
    }

    #[test]
    fn test_non_int_operands() {
        for (left, right) in [
            (Value::Bool(true), Value::Int(1)),
            (Value::Int(1), Value::Null),
            (Value::Null, Value::Null),
        ] {
            let result = eval_binary(BinOp::Add, left, right, Span::DUMMY);
            assert!(matches!(result, Err(EvalError::TypeError { .. })));
        }
    }

    #[test]
    fn test_equality_requires_ints() {
        let result = eval_binary(BinOp::Eq, Value::Bool(true), Value::Bool(true), Span::DUMMY);
        assert!(matches!(result, Err(EvalError::TypeError { .. })));
    }
}
