//! Mutable cons cells and list traversal.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use super::Value;
use crate::errors::{type_mismatch, EvalError};

struct PairCell {
    first: RefCell<Value>,
    rest: RefCell<Value>,
}

impl Drop for PairCell {
    // Unlink nested cells through a work list so dropping a long or deeply
    // nested list does not recurse once per cell.
    fn drop(&mut self) {
        let mut pending: Vec<Pair> = Vec::new();
        for slot in [self.first.get_mut(), self.rest.get_mut()] {
            if let Value::Pair(pair) = std::mem::replace(slot, Value::Nil) {
                pending.push(pair);
            }
        }
        while let Some(pair) = pending.pop() {
            // Cells still shared elsewhere are left to their other owners.
            if let Ok(mut cell) = Rc::try_unwrap(pair.0) {
                for slot in [cell.first.get_mut(), cell.rest.get_mut()] {
                    if let Value::Pair(pair) = std::mem::replace(slot, Value::Nil) {
                        pending.push(pair);
                    }
                }
            }
        }
    }
}

/// A shared, mutable cons cell.
///
/// Cloning a `Pair` clones the handle: both handles see `set_first` and
/// `set_rest` through either one.
#[derive(Clone)]
pub struct Pair(Rc<PairCell>);

impl Pair {
    pub fn new(first: Value, rest: Value) -> Self {
        Pair(Rc::new(PairCell {
            first: RefCell::new(first),
            rest: RefCell::new(rest),
        }))
    }

    #[inline]
    pub fn first(&self) -> Value {
        self.0.first.borrow().clone()
    }

    #[inline]
    pub fn rest(&self) -> Value {
        self.0.rest.borrow().clone()
    }

    pub fn set_first(&self, value: Value) {
        *self.0.first.borrow_mut() = value;
    }

    pub fn set_rest(&self, value: Value) {
        *self.0.rest.borrow_mut() = value;
    }

    /// Whether both handles refer to the same cell.
    #[inline]
    pub fn ptr_eq(&self, other: &Pair) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    /// Cell address, for identity-keyed sets.
    #[inline]
    pub(crate) fn addr(&self) -> *const () {
        Rc::as_ptr(&self.0).cast()
    }
}

impl fmt::Debug for Pair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Pair")
            .field(&Value::Pair(self.clone()))
            .finish()
    }
}

/// Iterator over the elements of a proper list.
///
/// Yields `Err` once, and then stops, if the list ends in anything other
/// than the empty list.
pub struct ListIter {
    current: Value,
    done: bool,
}

impl ListIter {
    pub(super) fn new(list: Value) -> Self {
        ListIter {
            current: list,
            done: false,
        }
    }
}

impl Iterator for ListIter {
    type Item = Result<Value, EvalError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match std::mem::replace(&mut self.current, Value::Nil) {
            Value::Nil => {
                self.done = true;
                None
            }
            Value::Pair(pair) => {
                self.current = pair.rest();
                Some(Ok(pair.first()))
            }
            tail => {
                self.done = true;
                Some(Err(type_mismatch("list", &tail)
                    .with_note(format!("improper list tail: {tail}"))))
            }
        }
    }
}

/// Length of a proper list, or `None` for an improper or cyclic one.
///
/// Floyd's tortoise and hare: the hare moves two cells per step and meets the
/// tortoise only if the spine loops.
pub(super) fn proper_length(list: &Value) -> Option<usize> {
    let mut length = 0usize;
    let mut slow = list.clone();
    let mut fast = list.clone();

    loop {
        match fast {
            Value::Nil => return Some(length),
            Value::Pair(pair) => {
                fast = pair.rest();
                length += 1;
            }
            _ => return None,
        }
        match fast {
            Value::Nil => return Some(length),
            Value::Pair(pair) => {
                fast = pair.rest();
                length += 1;
            }
            _ => return None,
        }

        slow = match slow {
            Value::Pair(pair) => pair.rest(),
            _ => return None,
        };
        if let (Value::Pair(a), Value::Pair(b)) = (&slow, &fast) {
            if a.ptr_eq(b) {
                return None;
            }
        }
    }
}
