//! The evaluator proper.
//! 求值器。

use std::rc::Rc;

use fwjs_common::Span;
use fwjs_stack::ensure_sufficient_stack;
use fwjs_syntax::{Expr, ExprKind, Ident};

use crate::operators::eval_binary;
use crate::{Closure, Environment, EvalError, EvalResult, SharedPrintHandler, Value};

/// Nested FWJS calls allowed before evaluation fails with
/// [`EvalError::StackExhaustion`].
pub const DEFAULT_MAX_CALL_DEPTH: usize = 10_000;

/// Evaluates expression trees against a persistent global environment.
///
/// Successive [`run`](Interpreter::run) calls share the global scope,
/// which is what the REPL relies on.
pub struct Interpreter {
    global: Environment,
    print: SharedPrintHandler,
    max_call_depth: usize,
    call_depth: usize,
}

impl Interpreter {
    /// An interpreter that prints to stdout.
    pub fn new() -> Self {
        Self {
            global: Environment::new(),
            print: crate::stdout_handler(),
            max_call_depth: DEFAULT_MAX_CALL_DEPTH,
            call_depth: 0,
        }
    }

    pub fn with_print_handler(mut self, handler: SharedPrintHandler) -> Self {
        self.print = handler;
        self
    }

    pub fn with_max_call_depth(mut self, depth: usize) -> Self {
        self.max_call_depth = depth;
        self
    }

    pub fn global(&self) -> &Environment {
        &self.global
    }

    pub fn print_handler(&self) -> &SharedPrintHandler {
        &self.print
    }

    /// Evaluate a whole program in the global environment.
    pub fn run(&mut self, program: &Expr) -> EvalResult {
        self.call_depth = 0;
        let global = self.global.clone();
        self.eval(program, &global)
    }

    /// Evaluate `expr` in `env`.
    pub fn eval(&mut self, expr: &Expr, env: &Environment) -> EvalResult {
        ensure_sufficient_stack(|| self.eval_inner(expr, env))
    }

    fn eval_inner(&mut self, expr: &Expr, env: &Environment) -> EvalResult {
        match &expr.kind {
            ExprKind::Literal(lit) => Ok(Value::from(*lit)),

            ExprKind::Var(name) => Ok(env.resolve_var(name)),

            ExprKind::Print(inner) => {
                let value = self.eval(inner, env)?;
                self.print.println(&value.to_string());
                Ok(value)
            }

            ExprKind::Binary { op, left, right } => {
                let left = self.eval(left, env)?;
                let right = self.eval(right, env)?;
                eval_binary(*op, left, right, expr.span)
            }

            ExprKind::If {
                condition,
                then_branch,
                else_branch,
            } => {
                if self.eval_condition(condition, env, "if")? {
                    self.eval(then_branch, env)
                } else if let Some(else_branch) = else_branch {
                    self.eval(else_branch, env)
                } else {
                    Ok(Value::Null)
                }
            }

            ExprKind::While { condition, body } => {
                let mut last = Value::Null;
                while self.eval_condition(condition, env, "while")? {
                    last = self.eval(body, env)?;
                }
                Ok(last)
            }

            ExprKind::Seq { first, second } => {
                self.eval(first, env)?;
                self.eval(second, env)
            }

            ExprKind::VarDecl { name, value } => {
                let value = self.eval(value, env)?;
                declare(env, name, value)?;
                Ok(env.resolve_var(&name.name))
            }

            ExprKind::Assign { name, value } => {
                let value = self.eval(value, env)?;
                env.update_var(&name.name, value);
                Ok(env.resolve_var(&name.name))
            }

            ExprKind::Function(def) => Ok(Value::Closure(Rc::new(Closure::new(
                Rc::clone(def),
                env.clone(),
            )))),

            ExprKind::Call { func, args } => {
                let callee = self.eval(func, env)?;
                let Value::Closure(closure) = callee else {
                    return Err(EvalError::NotCallable {
                        type_name: callee.type_name(),
                        span: func.span,
                    });
                };

                let mut values = Vec::with_capacity(args.len());
                for arg in args {
                    values.push(self.eval(arg, env)?);
                }
                self.apply(&closure, values, expr.span)
            }
        }
    }

    fn eval_condition(
        &mut self,
        condition: &Expr,
        env: &Environment,
        construct: &str,
    ) -> EvalResult<bool> {
        match self.eval(condition, env)? {
            Value::Bool(b) => Ok(b),
            other => Err(EvalError::type_error(
                format!(
                    "`{construct}` condition must be bool, found {}",
                    other.type_name()
                ),
                condition.span,
            )),
        }
    }

    /// Call `closure` with already-evaluated arguments.
    ///
    /// Parameters are bound in a fresh child of the captured environment.
    /// Missing arguments bind as `Null`; extra arguments are dropped.
    #[tracing::instrument(level = "trace", skip_all, fields(arity = closure.arity()))]
    fn apply(&mut self, closure: &Closure, args: Vec<Value>, span: Span) -> EvalResult {
        if self.call_depth >= self.max_call_depth {
            tracing::warn!(limit = self.max_call_depth, "call depth limit reached");
            return Err(EvalError::StackExhaustion {
                limit: self.max_call_depth,
                span,
            });
        }

        if args.len() != closure.arity() {
            tracing::debug!(
                expected = closure.arity(),
                got = args.len(),
                "argument count mismatch"
            );
        }

        let frame = closure.env().child();
        let mut args = args.into_iter();
        for param in &closure.def().params {
            declare(&frame, param, args.next().unwrap_or(Value::Null))?;
        }

        self.call_depth += 1;
        let result = self.eval(closure.body(), &frame);
        self.call_depth -= 1;
        result
    }
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new()
    }
}

fn declare(env: &Environment, name: &Ident, value: Value) -> EvalResult<()> {
    env.create_var(&name.name, value)
        .map_err(|dup| EvalError::DuplicateVariable {
            name: dup.0,
            span: name.span,
        })
}

/// Evaluate `program` in a fresh global environment, printing to stdout.
pub fn evaluate(program: &Expr) -> EvalResult {
    Interpreter::new().run(program)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffer_handler;
    use fwjs_syntax::BinOp;
    use pretty_assertions::assert_eq;

    fn run(source: &str) -> (EvalResult, Vec<String>) {
        let (program, diagnostics) = fwjs_parser::parse(source);
        assert!(diagnostics.is_empty(), "parse errors: {diagnostics:?}");
        let output = buffer_handler();
        let mut interp = Interpreter::new().with_print_handler(output.clone());
        let result = interp.run(&program);
        (result, output.lines())
    }

    #[test]
    fn test_literals_and_arithmetic() {
        let expr = Expr::binary(
            BinOp::Add,
            Expr::int(1),
            Expr::binary(BinOp::Mul, Expr::int(2), Expr::int(3)),
        );
        assert_eq!(evaluate(&expr), Ok(Value::Int(7)));
    }

    #[test]
    fn test_if_without_else_is_null() {
        let expr = Expr::if_else(Expr::bool(false), Expr::int(1), None);
        assert_eq!(evaluate(&expr), Ok(Value::Null));
    }

    #[test]
    fn test_if_condition_must_be_bool() {
        let expr = Expr::if_else(Expr::int(1), Expr::int(1), Some(Expr::int(2)));
        assert!(matches!(evaluate(&expr), Err(EvalError::TypeError { .. })));
    }

    #[test]
    fn test_while_returns_last_body_value() {
        let (result, _) = run("var i = 0; while (i < 3) { i = i + 1; }");
        assert_eq!(result, Ok(Value::Int(3)));

        let (result, _) = run("while (false) { 1; }");
        assert_eq!(result, Ok(Value::Null));
    }

    #[test]
    fn test_var_decl_and_assign_return_value() {
        assert_eq!(run("var x = 4;").0, Ok(Value::Int(4)));
        assert_eq!(run("var x = 4; x = x * 2;").0, Ok(Value::Int(8)));
    }

    #[test]
    fn test_print_returns_its_value() {
        let (result, output) = run("print(print(2) + 1);");
        assert_eq!(result, Ok(Value::Int(3)));
        assert_eq!(output, vec!["2", "3"]);
    }

    #[test]
    fn test_closure_application() {
        let (result, _) = run("var add = function(a, b) { a + b; }; add(2, 5);");
        assert_eq!(result, Ok(Value::Int(7)));
    }

    #[test]
    fn test_not_callable_skips_arguments() {
        let (result, output) = run("var x = 3; x(print(1));");
        assert!(matches!(
            result,
            Err(EvalError::NotCallable {
                type_name: "int",
                ..
            })
        ));
        assert!(output.is_empty());
    }

    #[test]
    fn test_duplicate_parameter_fails_on_call() {
        let (result, _) = run("var f = function(a, a) { a; }; f(1, 2);");
        assert!(matches!(
            result,
            Err(EvalError::DuplicateVariable { ref name, .. }) if name == "a"
        ));
    }

    #[test]
    fn test_stack_exhaustion_leaves_interpreter_usable() {
        let (program, _) = fwjs_parser::parse("var f = function(n) { f(n + 1); }; f(0);");
        let mut interp = Interpreter::new()
            .with_print_handler(crate::silent_handler())
            .with_max_call_depth(50);

        assert!(matches!(
            interp.run(&program),
            Err(EvalError::StackExhaustion { limit: 50, .. })
        ));

        let (next, _) = fwjs_parser::parse("f = function(n) { n * 2; }; f(21);");
        assert_eq!(interp.run(&next), Ok(Value::Int(42)));
    }
}
