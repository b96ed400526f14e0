//! Lexical environments.
//!
//! An environment is a chain of frames. Each frame owns its bindings and a
//! strong reference to its parent, so a frame lives as long as any closure
//! or call still holds it. Lookup walks outward and stops at the first frame
//! that binds the symbol; shadowing hides outer bindings without touching
//! them.

use rustc_hash::FxHashMap;
use skim_ir::Symbol;
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use crate::errors::{arity_mismatch, unbound_variable, EvalError};
use crate::value::{Formals, Value};

struct Frame {
    bindings: FxHashMap<Symbol, Value>,
    parent: Option<Environment>,
}

/// Shared handle to one frame of an environment chain.
#[derive(Clone)]
pub struct Environment(Rc<RefCell<Frame>>);

impl Environment {
    /// Create a global (parentless) environment.
    pub fn new() -> Self {
        Self::with_parent(None)
    }

    fn with_parent(parent: Option<Environment>) -> Self {
        Environment(Rc::new(RefCell::new(Frame {
            bindings: FxHashMap::default(),
            parent,
        })))
    }

    /// Create an empty frame whose parent is `self`.
    #[must_use]
    pub fn child(&self) -> Environment {
        Self::with_parent(Some(self.clone()))
    }

    /// Bind `symbol` in this frame, overwriting any binding already here.
    pub fn define(&self, symbol: Symbol, value: Value) {
        self.0.borrow_mut().bindings.insert(symbol, value);
    }

    /// Find the value bound to `symbol` in the nearest defining frame.
    pub fn lookup(&self, symbol: &Symbol) -> Result<Value, EvalError> {
        let mut env = self.clone();
        loop {
            let parent = {
                let frame = env.0.borrow();
                if let Some(value) = frame.bindings.get(symbol) {
                    return Ok(value.clone());
                }
                frame.parent.clone()
            };
            match parent {
                Some(parent) => env = parent,
                None => return Err(unbound_variable(symbol.name())),
            }
        }
    }

    /// Replace the value of the nearest existing binding of `symbol`.
    ///
    /// Never creates a binding.
    pub fn set(&self, symbol: &Symbol, value: Value) -> Result<(), EvalError> {
        let mut env = self.clone();
        loop {
            let parent = {
                let mut frame = env.0.borrow_mut();
                if let Some(slot) = frame.bindings.get_mut(symbol) {
                    *slot = value;
                    return Ok(());
                }
                frame.parent.clone()
            };
            match parent {
                Some(parent) => env = parent,
                None => return Err(unbound_variable(symbol.name())),
            }
        }
    }

    /// Create a child frame binding `formals` to `args`, left to right.
    ///
    /// Variadic formals collect the surplus arguments into a fresh list.
    pub fn extend(&self, formals: &Formals, args: Vec<Value>) -> Result<Environment, EvalError> {
        let arity = formals.arity();
        if !arity.accepts(args.len()) {
            return Err(arity_mismatch("", arity, args.len()));
        }

        let env = self.child();
        {
            let mut frame = env.0.borrow_mut();
            let mut args = args.into_iter();
            match formals {
                Formals::Fixed(fixed) => {
                    for (symbol, value) in fixed.iter().zip(&mut args) {
                        frame.bindings.insert(symbol.clone(), value);
                    }
                }
                Formals::Variadic { fixed, rest } => {
                    for (symbol, value) in fixed.iter().zip(&mut args) {
                        frame.bindings.insert(symbol.clone(), value);
                    }
                    frame.bindings.insert(rest.clone(), Value::list(args));
                }
            }
        }
        Ok(env)
    }

    /// Whether this is the outermost frame.
    pub fn is_global(&self) -> bool {
        self.0.borrow().parent.is_none()
    }

    /// Number of frames between this one and the global frame.
    pub fn depth(&self) -> usize {
        let mut depth = 0;
        let mut parent = self.0.borrow().parent.clone();
        while let Some(env) = parent {
            depth += 1;
            parent = env.0.borrow().parent.clone();
        }
        depth
    }

    /// Whether this frame itself (not a parent) binds `symbol`.
    pub fn defines_locally(&self, symbol: &Symbol) -> bool {
        self.0.borrow().bindings.contains_key(symbol)
    }

    /// Whether both handles refer to the same frame.
    pub fn ptr_eq(&self, other: &Environment) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl Default for Environment {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Environment {
    // Bindings may contain closures over this frame; print only the shape.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Environment")
            .field("depth", &self.depth())
            .field("bindings", &self.0.borrow().bindings.len())
            .finish()
    }
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests;
