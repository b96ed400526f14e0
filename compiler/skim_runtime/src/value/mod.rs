//! Runtime values for the Skim interpreter.
//!
//! `Value` is a closed enum; every consumer dispatches with an exhaustive
//! `match`. Heap payloads are shared through `Rc`, so cloning a value is
//! always cheap. Pairs are the only mutable values.
//!
//! # Equality
//!
//! `PartialEq`/`Hash` implement structural equality (`equal?`): pairs are
//! compared element-wise, strings by content, symbols and procedures by
//! identity. [`Value::eqv`] implements `eq?`, which compares pairs by
//! identity too. Both walks use an explicit work list, so deep lists never
//! recurse on the native stack.

mod pair;
mod printing;
mod procedure;

use skim_ir::Symbol;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::rc::Rc;

use crate::errors::{type_mismatch, EvalError};

pub use pair::{ListIter, Pair};
pub use procedure::{Arity, Builtin, BuiltinFn, Formals, Lambda, Syntax, SyntaxFn};

/// A Skim runtime value.
#[derive(Clone)]
pub enum Value {
    /// The empty list `()`.
    Nil,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(Rc<str>),
    Symbol(Symbol),
    Pair(Pair),
    Builtin(Rc<Builtin>),
    Syntax(Rc<Syntax>),
    Lambda(Rc<Lambda>),
    /// Result of forms evaluated only for effect.
    Unspecified,
}

// Factory methods

impl Value {
    #[inline]
    pub fn int(n: i64) -> Self {
        Value::Int(n)
    }

    #[inline]
    pub fn float(f: f64) -> Self {
        Value::Float(f)
    }

    #[inline]
    pub fn bool(b: bool) -> Self {
        Value::Bool(b)
    }

    pub fn string(s: impl AsRef<str>) -> Self {
        Value::Str(Rc::from(s.as_ref()))
    }

    #[inline]
    pub fn symbol(symbol: Symbol) -> Self {
        Value::Symbol(symbol)
    }

    pub fn cons(first: Value, rest: Value) -> Self {
        Value::Pair(Pair::new(first, rest))
    }

    /// Build a proper list.
    pub fn list(items: impl IntoIterator<Item = Value>) -> Self {
        Self::list_with_tail(items, Value::Nil)
    }

    /// Build a list ending in `tail` (a dotted list unless `tail` is `()`).
    pub fn list_with_tail(items: impl IntoIterator<Item = Value>, tail: Value) -> Self {
        let items: Vec<Value> = items.into_iter().collect();
        items
            .into_iter()
            .rev()
            .fold(tail, |rest, first| Value::cons(first, rest))
    }

    pub fn builtin(name: impl Into<String>, arity: Arity, func: BuiltinFn) -> Self {
        Value::Builtin(Rc::new(Builtin {
            name: name.into(),
            arity,
            func,
        }))
    }

    pub fn syntax(name: impl Into<String>, rule: SyntaxFn) -> Self {
        Value::Syntax(Rc::new(Syntax {
            name: name.into(),
            rule,
        }))
    }

    pub fn lambda(lambda: Lambda) -> Self {
        Value::Lambda(Rc::new(lambda))
    }
}

// Classification

impl Value {
    #[inline]
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Nil)
    }

    #[inline]
    pub fn is_pair(&self) -> bool {
        matches!(self, Value::Pair(_))
    }

    #[inline]
    pub fn is_symbol(&self) -> bool {
        matches!(self, Value::Symbol(_))
    }

    #[inline]
    pub fn is_number(&self) -> bool {
        matches!(self, Value::Int(_) | Value::Float(_))
    }

    #[inline]
    pub fn is_procedure(&self) -> bool {
        matches!(self, Value::Builtin(_) | Value::Lambda(_))
    }

    #[inline]
    pub fn is_unspecified(&self) -> bool {
        matches!(self, Value::Unspecified)
    }

    /// Everything except `#f` counts as true.
    #[inline]
    pub fn is_true(&self) -> bool {
        !matches!(self, Value::Bool(false))
    }

    /// Whether this is a finite, `()`-terminated list.
    pub fn is_list(&self) -> bool {
        pair::proper_length(self).is_some()
    }

    /// Type name used in error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Nil => "null",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Str(_) => "string",
            Value::Symbol(_) => "symbol",
            Value::Pair(_) => "pair",
            Value::Builtin(_) | Value::Lambda(_) => "procedure",
            Value::Syntax(_) => "syntax",
            Value::Unspecified => "void",
        }
    }
}

// Narrowing

impl Value {
    #[inline]
    pub fn as_pair(&self) -> Option<&Pair> {
        match self {
            Value::Pair(pair) => Some(pair),
            _ => None,
        }
    }

    #[inline]
    pub fn as_symbol(&self) -> Option<&Symbol> {
        match self {
            Value::Symbol(symbol) => Some(symbol),
            _ => None,
        }
    }

    #[inline]
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(n) => Some(*n),
            _ => None,
        }
    }

    /// Numeric value as a float; integers are promoted.
    #[expect(
        clippy::cast_precision_loss,
        reason = "integer to float promotion is the arithmetic contract"
    )]
    #[inline]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Int(n) => Some(*n as f64),
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }

    #[inline]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    #[inline]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn expect_pair(&self) -> Result<&Pair, EvalError> {
        self.as_pair().ok_or_else(|| type_mismatch("pair", self))
    }

    pub fn expect_symbol(&self) -> Result<&Symbol, EvalError> {
        self.as_symbol().ok_or_else(|| type_mismatch("symbol", self))
    }

    pub fn expect_int(&self) -> Result<i64, EvalError> {
        self.as_int().ok_or_else(|| type_mismatch("int", self))
    }

    pub fn expect_f64(&self) -> Result<f64, EvalError> {
        self.as_f64().ok_or_else(|| type_mismatch("number", self))
    }

    pub fn expect_str(&self) -> Result<&str, EvalError> {
        self.as_str().ok_or_else(|| type_mismatch("string", self))
    }
}

// Lists

impl Value {
    /// Iterate over a proper list; an improper tail yields one `Err`.
    pub fn iter_list(&self) -> ListIter {
        ListIter::new(self.clone())
    }

    /// Collect a proper list into a vector.
    pub fn to_vec(&self) -> Result<Vec<Value>, EvalError> {
        self.iter_list().collect()
    }

    /// Length of a proper list; `None` for improper or cyclic structure.
    pub fn list_length(&self) -> Option<usize> {
        pair::proper_length(self)
    }
}

// Equality

impl Value {
    /// `eq?`: identity for pairs, symbols and procedures; value equality for
    /// numbers, strings, booleans and `()`.
    pub fn eqv(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Pair(a), Value::Pair(b)) => a.ptr_eq(b),
            _ => self.atom_eq(other),
        }
    }

    /// Equality of two values where at least one is not a pair.
    fn atom_eq(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Nil, Value::Nil) | (Value::Unspecified, Value::Unspecified) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a.to_bits() == b.to_bits(),
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::Symbol(a), Value::Symbol(b)) => a.ptr_eq(b),
            (Value::Builtin(a), Value::Builtin(b)) => Rc::ptr_eq(a, b),
            (Value::Syntax(a), Value::Syntax(b)) => Rc::ptr_eq(a, b),
            (Value::Lambda(a), Value::Lambda(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        let mut work = vec![(self.clone(), other.clone())];
        while let Some((a, b)) = work.pop() {
            if let (Value::Pair(x), Value::Pair(y)) = (&a, &b) {
                if !x.ptr_eq(y) {
                    work.push((x.rest(), y.rest()));
                    work.push((x.first(), y.first()));
                }
            } else if !a.atom_eq(&b) {
                return false;
            }
        }
        true
    }
}

impl Eq for Value {}

impl Hash for Value {
    fn hash<H: Hasher>(&self, state: &mut H) {
        let mut work = vec![self.clone()];
        while let Some(value) = work.pop() {
            std::mem::discriminant(&value).hash(state);
            match &value {
                Value::Nil | Value::Unspecified => {}
                Value::Bool(b) => b.hash(state),
                Value::Int(n) => n.hash(state),
                Value::Float(f) => f.to_bits().hash(state),
                Value::Str(s) => s.hash(state),
                Value::Symbol(s) => s.hash(state),
                Value::Pair(pair) => {
                    work.push(pair.rest());
                    work.push(pair.first());
                }
                Value::Builtin(b) => std::ptr::hash(Rc::as_ptr(b), state),
                Value::Syntax(s) => std::ptr::hash(Rc::as_ptr(s), state),
                Value::Lambda(l) => std::ptr::hash(Rc::as_ptr(l), state),
            }
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}
