//! Expression tree nodes.
//! 表达式树节点。

use std::rc::Rc;

use crate::BinOp;
use fwjs_common::Span;

/// An identifier.
/// 标识符。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ident {
    pub name: String,
    pub span: Span,
}

impl Ident {
    pub fn new(name: impl Into<String>, span: Span) -> Self {
        Self {
            name: name.into(),
            span,
        }
    }
}

/// A constant written directly in the source.
/// 源码中直接写出的常量。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Literal {
    Int(i32),
    Bool(bool),
    Null,
}

/// A function literal: parameter names and a body.
///
/// Held behind an `Rc` so every closure created from the same literal
/// shares one copy of the body.
#[derive(Debug, Clone)]
pub struct FunctionDef {
    pub params: Vec<Ident>,
    pub body: Expr,
}

impl FunctionDef {
    pub fn param_names(&self) -> impl Iterator<Item = &str> {
        self.params.iter().map(|p| p.name.as_str())
    }
}

/// An expression.
/// 表达式。
#[derive(Debug, Clone)]
pub struct Expr {
    pub kind: ExprKind,
    pub span: Span,
}

/// Expression kind.
/// 表达式类型。
#[derive(Debug, Clone)]
pub enum ExprKind {
    /// `42`, `true`, `null` / 字面量
    Literal(Literal),

    /// Variable reference / 变量引用
    Var(String),

    /// `print(e)` / 打印表达式
    Print(Box<Expr>),

    /// Binary operation `a + b` / 二元运算
    Binary {
        op: BinOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },

    /// `if (c) { .. } else { .. }` / 条件表达式
    If {
        condition: Box<Expr>,
        then_branch: Box<Expr>,
        else_branch: Option<Box<Expr>>,
    },

    /// `while (c) { .. }` / 循环表达式
    While {
        condition: Box<Expr>,
        body: Box<Expr>,
    },

    /// Two expressions in sequence; the value is the second one's.
    /// 顺序表达式
    Seq { first: Box<Expr>, second: Box<Expr> },

    /// `var x = e` / 变量声明
    VarDecl { name: Ident, value: Box<Expr> },

    /// `x = e` / 赋值
    Assign { name: Ident, value: Box<Expr> },

    /// `function(a, b) { .. }` / 函数字面量
    Function(Rc<FunctionDef>),

    /// `f(x, y)` / 函数调用
    Call { func: Box<Expr>, args: Vec<Expr> },
}

impl Expr {
    pub fn new(kind: ExprKind, span: Span) -> Self {
        Self { kind, span }
    }

    // Constructors for building trees without a parser. All of them use
    // `Span::DUMMY`.

    pub fn int(n: i32) -> Self {
        Self::dummy(ExprKind::Literal(Literal::Int(n)))
    }

    pub fn bool(b: bool) -> Self {
        Self::dummy(ExprKind::Literal(Literal::Bool(b)))
    }

    pub fn null() -> Self {
        Self::dummy(ExprKind::Literal(Literal::Null))
    }

    pub fn var(name: impl Into<String>) -> Self {
        Self::dummy(ExprKind::Var(name.into()))
    }

    pub fn print(expr: Expr) -> Self {
        Self::dummy(ExprKind::Print(Box::new(expr)))
    }

    pub fn binary(op: BinOp, left: Expr, right: Expr) -> Self {
        Self::dummy(ExprKind::Binary {
            op,
            left: Box::new(left),
            right: Box::new(right),
        })
    }

    pub fn if_else(condition: Expr, then_branch: Expr, else_branch: Option<Expr>) -> Self {
        Self::dummy(ExprKind::If {
            condition: Box::new(condition),
            then_branch: Box::new(then_branch),
            else_branch: else_branch.map(Box::new),
        })
    }

    pub fn while_loop(condition: Expr, body: Expr) -> Self {
        Self::dummy(ExprKind::While {
            condition: Box::new(condition),
            body: Box::new(body),
        })
    }

    pub fn seq(first: Expr, second: Expr) -> Self {
        Self::dummy(ExprKind::Seq {
            first: Box::new(first),
            second: Box::new(second),
        })
    }

    pub fn var_decl(name: impl Into<String>, value: Expr) -> Self {
        Self::dummy(ExprKind::VarDecl {
            name: Ident::new(name, Span::DUMMY),
            value: Box::new(value),
        })
    }

    pub fn assign(name: impl Into<String>, value: Expr) -> Self {
        Self::dummy(ExprKind::Assign {
            name: Ident::new(name, Span::DUMMY),
            value: Box::new(value),
        })
    }

    pub fn function<S: Into<String>>(params: impl IntoIterator<Item = S>, body: Expr) -> Self {
        let params = params
            .into_iter()
            .map(|p| Ident::new(p, Span::DUMMY))
            .collect();
        Self::dummy(ExprKind::Function(Rc::new(FunctionDef { params, body })))
    }

    pub fn call(func: Expr, args: Vec<Expr>) -> Self {
        Self::dummy(ExprKind::Call {
            func: Box::new(func),
            args,
        })
    }

    /// Fold statements left into nested `Seq` nodes:
    /// `[a, b, c]` becomes `Seq(Seq(a, b), c)`. An empty list is `null`.
    pub fn sequence(exprs: impl IntoIterator<Item = Expr>) -> Self {
        let mut exprs = exprs.into_iter();
        let Some(first) = exprs.next() else {
            return Self::null();
        };
        exprs.fold(first, |acc, next| {
            let span = acc.span.merge(next.span);
            Expr::new(
                ExprKind::Seq {
                    first: Box::new(acc),
                    second: Box::new(next),
                },
                span,
            )
        })
    }

    fn dummy(kind: ExprKind) -> Self {
        Self::new(kind, Span::DUMMY)
    }
}

// A program is one left-leaning `Seq` chain as long as its statement
// count, so the derived recursive drop would overflow the stack on long
// programs. Children are detached onto a worklist and freed one level at
// a time instead.
impl Drop for Expr {
    fn drop(&mut self) {
        let mut pending = Vec::new();
        detach_children(&mut self.kind, &mut pending);
        while let Some(mut expr) = pending.pop() {
            detach_children(&mut expr.kind, &mut pending);
        }
    }
}

/// Move the direct children of `kind` onto `out`, leaving a leaf behind.
fn detach_children(kind: &mut ExprKind, out: &mut Vec<Expr>) {
    let leaf = ExprKind::Literal(Literal::Null);
    match std::mem::replace(kind, leaf) {
        ExprKind::Literal(_) | ExprKind::Var(_) => {}
        ExprKind::Print(inner) => out.push(*inner),
        ExprKind::Binary { left, right, .. } => {
            out.push(*left);
            out.push(*right);
        }
        ExprKind::If {
            condition,
            then_branch,
            else_branch,
        } => {
            out.push(*condition);
            out.push(*then_branch);
            if let Some(else_branch) = else_branch {
                out.push(*else_branch);
            }
        }
        ExprKind::While { condition, body } => {
            out.push(*condition);
            out.push(*body);
        }
        ExprKind::Seq { first, second } => {
            out.push(*first);
            out.push(*second);
        }
        ExprKind::VarDecl { value, .. } | ExprKind::Assign { value, .. } => out.push(*value),
        // Closures may still share the definition; only the last owner
        // takes the body apart.
        ExprKind::Function(def) => {
            if let Ok(def) = Rc::try_unwrap(def) {
                out.push(def.body);
            }
        }
        ExprKind::Call { func, args } => {
            out.push(*func);
            out.extend(args);
        }
    }
}
