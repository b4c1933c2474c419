//! Lexical environments.
//!
//! An [`Environment`] is a name-to-value mapping chained to an optional
//! enclosing environment. Lookup walks outward through the chain;
//! assignment always writes into the receiving environment's own store —
//! there is no mutation of an outer binding (see [`crate::evaluator`]'s
//! `Let` handling for how recursive closures rely on this).

use crate::object::Value;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

/// Shared handle to an [`Environment`]. Environments and the `Function`
/// values they capture can form reference cycles (a recursive `let`-bound
/// function's environment holds the function that holds the environment);
/// this is accepted rather than broken, since a Lak process's environments
/// all drop together when the process exits.
pub type Env = Rc<RefCell<Environment>>;

#[derive(Debug)]
pub struct Environment {
    store: HashMap<String, Value>,
    outer: Option<Env>,
}

impl Environment {
    pub fn new() -> Env {
        Rc::new(RefCell::new(Environment {
            store: HashMap::new(),
            outer: None,
        }))
    }

    /// Creates a new environment whose lookups fall back to `outer`.
    pub fn new_enclosed(outer: Env) -> Env {
        Rc::new(RefCell::new(Environment {
            store: HashMap::new(),
            outer: Some(outer),
        }))
    }

    pub fn get(&self, name: &str) -> Option<Value> {
        match self.store.get(name) {
            Some(value) => Some(value.clone()),
            None => self.outer.as_ref().and_then(|outer| outer.borrow().get(name)),
        }
    }

    pub fn set(&mut self, name: impl Into<String>, value: Value) {
        self.store.insert(name.into(), value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_falls_back_to_outer() {
        let outer = Environment::new();
        outer.borrow_mut().set("x", Value::Integer(5));
        let inner = Environment::new_enclosed(outer);
        assert!(matches!(inner.borrow().get("x"), Some(Value::Integer(5))));
    }

    #[test]
    fn inner_binding_shadows_outer() {
        let outer = Environment::new();
        outer.borrow_mut().set("x", Value::Integer(5));
        let inner = Environment::new_enclosed(outer.clone());
        inner.borrow_mut().set("x", Value::Integer(10));
        assert!(matches!(inner.borrow().get("x"), Some(Value::Integer(10))));
        assert!(matches!(outer.borrow().get("x"), Some(Value::Integer(5))));
    }

    #[test]
    fn unbound_lookup_is_none() {
        let env = Environment::new();
        assert!(env.borrow().get("missing").is_none());
    }
}
