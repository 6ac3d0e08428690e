//! Runtime values.

use std::fmt;
use std::rc::Rc;

use crate::Environment;
use fwjs_syntax::{FunctionDef, Literal};

/// A runtime value.
#[derive(Clone)]
pub enum Value {
    /// 32-bit integer
    Int(i32),
    /// Boolean value
    Bool(bool),
    /// Absence of a value; also what an undeclared variable reads as
    Null,
    /// A function together with the environment it was created in
    Closure(Rc<Closure>),
}

/// A function value.
///
/// The captured environment is shared, not copied: the scope a function
/// was defined in may be referenced by many closures and call frames at
/// once, and lives as long as the longest of them.
pub struct Closure {
    def: Rc<FunctionDef>,
    env: Environment,
}

impl Closure {
    pub fn new(def: Rc<FunctionDef>, env: Environment) -> Self {
        Self { def, env }
    }

    pub fn def(&self) -> &FunctionDef {
        &self.def
    }

    pub fn params(&self) -> impl Iterator<Item = &str> {
        self.def.param_names()
    }

    pub fn arity(&self) -> usize {
        self.def.params.len()
    }

    pub fn body(&self) -> &fwjs_syntax::Expr {
        &self.def.body
    }

    /// The environment the function literal was evaluated in.
    pub fn env(&self) -> &Environment {
        &self.env
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(n) => write!(f, "Int({n})"),
            Value::Bool(b) => write!(f, "Bool({b})"),
            Value::Null => write!(f, "Null"),
            Value::Closure(closure) => write!(f, "Closure({closure})"),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(n) => write!(f, "{n}"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Null => write!(f, "null"),
            Value::Closure(closure) => write!(f, "{closure}"),
        }
    }
}

impl fmt::Display for Closure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "function(")?;
        for (i, param) in self.params().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{param}")?;
        }
        write!(f, ")")
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Null, Value::Null) => true,
            // Closures are never equal
            _ => false,
        }
    }
}

impl From<Literal> for Value {
    fn from(lit: Literal) -> Self {
        match lit {
            Literal::Int(n) => Value::Int(n),
            Literal::Bool(b) => Value::Bool(b),
            Literal::Null => Value::Null,
        }
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Int(n)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl Value {
    /// Name of the variant, for error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Int(_) => "int",
            Value::Bool(_) => "bool",
            Value::Null => "null",
            Value::Closure(_) => "function",
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Try to get as integer.
    pub fn as_int(&self) -> Option<i32> {
        match self {
            Value::Int(n) => Some(*n),
            _ => None,
        }
    }

    /// Try to get as bool.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Try to get as closure.
    pub fn as_closure(&self) -> Option<&Rc<Closure>> {
        match self {
            Value::Closure(c) => Some(c),
            _ => None,
        }
    }
}
