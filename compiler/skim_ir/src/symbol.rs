//! Interned symbol.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// An interned, immutable name.
///
/// Symbols are created exclusively by [`SymbolTable`](crate::SymbolTable).
/// Equality and hashing use the address of the shared allocation, never the
/// text: the table already guarantees one allocation per distinct name.
#[derive(Clone)]
pub struct Symbol(Arc<str>);

impl Symbol {
    /// Allocate a fresh symbol. Only the symbol table may call this.
    pub(crate) fn new(name: &str) -> Self {
        Symbol(Arc::from(name))
    }

    /// The symbol's text.
    #[inline]
    pub fn name(&self) -> &str {
        &self.0
    }

    /// Whether two handles refer to the same interned symbol.
    #[inline]
    pub fn ptr_eq(&self, other: &Symbol) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl PartialEq for Symbol {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl Eq for Symbol {}

impl Hash for Symbol {
    #[inline]
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::ptr::hash(Arc::as_ptr(&self.0), state);
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Debug for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Symbol({})", &*self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_text_different_allocation_is_not_equal() {
        // Bypasses the table on purpose: identity, not text, decides equality.
        let a = Symbol::new("x");
        let b = Symbol::new("x");
        assert_ne!(a, b);
        assert_eq!(a, a.clone());
    }

    #[test]
    fn display_is_bare_name() {
        assert_eq!(Symbol::new("set-car!").to_string(), "set-car!");
        assert_eq!(format!("{:?}", Symbol::new("foo")), "Symbol(foo)");
    }
}
