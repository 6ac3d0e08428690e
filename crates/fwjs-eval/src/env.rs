//! Evaluation environment.
//!
//! Scopes form a chain that only points outward: a function call creates
//! a child of the closure's captured scope, and nothing ever refers to
//! its children. `Environment` is a cheap handle; clones share the same
//! bindings, so a mutation through one handle is seen by every closure
//! holding another.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use thiserror::Error;

use crate::Value;

/// Returned by [`Environment::create_var`] when the name is already bound
/// in the same scope.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("variable `{0}` is already declared in this scope")]
pub struct DuplicateVariable(pub String);

/// A scope: local bindings plus an optional outer scope.
#[derive(Clone, Default)]
pub struct Environment {
    bindings: Rc<RefCell<HashMap<String, Value>>>,
    outer: Option<Rc<Environment>>,
}

impl Environment {
    /// Create a new global environment.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a child environment whose outer scope is `self`.
    pub fn child(&self) -> Self {
        Self {
            bindings: Rc::new(RefCell::new(HashMap::new())),
            outer: Some(Rc::new(self.clone())),
        }
    }

    pub fn outer(&self) -> Option<&Environment> {
        self.outer.as_deref()
    }

    pub fn is_global(&self) -> bool {
        self.outer.is_none()
    }

    /// Whether two handles refer to the same scope.
    pub fn same_scope(&self, other: &Environment) -> bool {
        Rc::ptr_eq(&self.bindings, &other.bindings)
    }

    /// Look `name` up in this scope and then outward. Undeclared names
    /// read as `Null`.
    pub fn resolve_var(&self, name: &str) -> Value {
        let mut scope = self;
        loop {
            if let Some(value) = scope.get_var(name) {
                return value;
            }
            match scope.outer() {
                Some(outer) => scope = outer,
                None => return Value::Null,
            }
        }
    }

    /// Overwrite the nearest binding of `name`.
    ///
    /// If no scope binds `name`, the variable is created in the global
    /// scope, even when the assignment happens inside a function.
    pub fn update_var(&self, name: &str, value: Value) {
        let mut scope = self;
        while !scope.has_local(name) {
            match scope.outer() {
                Some(outer) => scope = outer,
                None => {
                    tracing::debug!(name, "assignment to undeclared variable creates a global");
                    break;
                }
            }
        }
        scope.set_var(name, value);
    }

    /// Bind `name` in this scope only. Outer scopes are not consulted, so
    /// shadowing an outer variable is always allowed.
    pub fn create_var(&self, name: &str, value: Value) -> Result<(), DuplicateVariable> {
        let mut bindings = self.bindings.borrow_mut();
        if bindings.contains_key(name) {
            return Err(DuplicateVariable(name.to_string()));
        }
        bindings.insert(name.to_string(), value);
        Ok(())
    }

    /// Local lookup, no outward search.
    pub fn get_var(&self, name: &str) -> Option<Value> {
        self.bindings.borrow().get(name).cloned()
    }

    /// Local insert or overwrite, no outward search.
    pub fn set_var(&self, name: &str, value: Value) {
        self.bindings.borrow_mut().insert(name.to_string(), value);
    }

    pub fn has_local(&self, name: &str) -> bool {
        self.bindings.borrow().contains_key(name)
    }

    /// Names bound in this scope, sorted.
    pub fn local_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.bindings.borrow().keys().cloned().collect();
        names.sort();
        names
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_resolve_undeclared_is_null_at_every_depth() {
        let global = Environment::new();
        let inner = global.child().child();
        assert!(global.resolve_var("missing").is_null());
        assert!(inner.resolve_var("missing").is_null());
    }

    #[test]
    fn test_resolve_searches_outward() {
        let global = Environment::new();
        global.create_var("x", Value::Int(1)).unwrap();
        let inner = global.child().child();
        assert_eq!(inner.resolve_var("x"), Value::Int(1));
        assert_eq!(inner.get_var("x"), None);
    }

    #[test]
    fn test_create_var_rejects_local_duplicate() {
        let env = Environment::new();
        env.create_var("x", Value::Int(1)).unwrap();
        assert_eq!(
            env.create_var("x", Value::Int(2)),
            Err(DuplicateVariable("x".to_string()))
        );
        assert_eq!(env.get_var("x"), Some(Value::Int(1)));
    }

    #[test]
    fn test_create_var_allows_shadowing() {
        let global = Environment::new();
        global.create_var("x", Value::Int(1)).unwrap();
        let inner = global.child();
        inner.create_var("x", Value::Int(2)).unwrap();

        assert_eq!(inner.resolve_var("x"), Value::Int(2));
        inner.update_var("x", Value::Int(3));
        assert_eq!(inner.resolve_var("x"), Value::Int(3));
        assert_eq!(global.resolve_var("x"), Value::Int(1));
    }

    #[test]
    fn test_update_var_hits_nearest_binding() {
        let global = Environment::new();
        global.create_var("x", Value::Int(1)).unwrap();
        let middle = global.child();
        middle.create_var("x", Value::Int(10)).unwrap();
        let inner = middle.child();

        inner.update_var("x", Value::Int(11));
        assert_eq!(middle.get_var("x"), Some(Value::Int(11)));
        assert_eq!(global.get_var("x"), Some(Value::Int(1)));
        assert!(!inner.has_local("x"));
    }

    #[test]
    fn test_update_var_creates_global_when_unbound() {
        let global = Environment::new();
        let inner = global.child().child();

        inner.update_var("fresh", Value::Bool(true));
        assert_eq!(global.get_var("fresh"), Some(Value::Bool(true)));
        assert!(!inner.has_local("fresh"));
    }

    #[test]
    fn test_clones_share_bindings() {
        let env = Environment::new();
        let handle = env.clone();
        handle.set_var("y", Value::Int(5));
        assert_eq!(env.get_var("y"), Some(Value::Int(5)));
        assert!(env.same_scope(&handle));
        assert!(!env.same_scope(&env.child()));
    }

    #[test]
    fn test_outer_chain() {
        let global = Environment::new();
        let inner = global.child();
        assert!(global.is_global());
        assert!(!inner.is_global());
        assert!(inner.outer().is_some_and(|o| o.same_scope(&global)));
    }

    #[test]
    fn test_local_names_sorted() {
        let env = Environment::new();
        env.set_var("b", Value::Null);
        env.set_var("a", Value::Null);
        env.child().set_var("c", Value::Null);
        assert_eq!(env.local_names(), vec!["a".to_string(), "b".to_string()]);
    }
}
