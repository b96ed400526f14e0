//! Open-addressing symbol table.
//!
//! Guarantees symbol identity: [`SymbolTable::get_or_add`] returns the one
//! canonical [`Symbol`] for a name, creating it on first use.
//!
//! # Probing
//!
//! The probe starts at `hash(name) % capacity` and advances by one slot
//! (wrapping) until it finds either an empty slot (insert) or a slot whose
//! symbol has the same text (hit). Coming back to the start index means the
//! probe sequence is exhausted, which is a fatal internal error.
//!
//! # Growth
//!
//! After every insertion, if more than 3/4 of the slots are occupied the
//! table is rehashed into `2 * (capacity + 1) - 1` slots. Insertion is
//! all-or-nothing: if the rehash cannot complete, the new symbol is removed
//! again and the table is left exactly as it was before the call.

use parking_lot::Mutex;
use rustc_hash::FxHasher;
use std::fmt;
use std::hash::Hasher;
use std::sync::Arc;

use crate::Symbol;

/// Initial slot count for tables built with [`SymbolTable::new`].
pub const DEFAULT_CAPACITY: usize = 511;

/// Hash function used to pick the first probe slot.
///
/// Exists so tests can force collisions deterministically.
pub trait SymbolHasher: Send + Sync {
    fn hash(&self, name: &str) -> u64;
}

/// Default hasher, backed by `FxHasher`.
#[derive(Clone, Copy, Debug, Default)]
pub struct FxSymbolHasher;

impl SymbolHasher for FxSymbolHasher {
    #[inline]
    fn hash(&self, name: &str) -> u64 {
        let mut hasher = FxHasher::default();
        hasher.write(name.as_bytes());
        hasher.finish()
    }
}

/// Fatal symbol table failure.
///
/// Never caused by user input in a correctly sized table; seeing one means
/// every later symbol resolution is suspect.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SymbolTableError {
    /// The probe sequence wrapped around without finding a free slot.
    #[error("symbol table problem: no free slot for `{name}` (capacity {capacity})")]
    NoFreeSlot { name: String, capacity: usize },
    /// The next capacity overflows or exceeds the configured maximum.
    #[error("symbol table problem: cannot grow beyond capacity {capacity}")]
    CapacityExceeded { capacity: usize },
}

/// Next table size in the `2 * (n + 1) - 1` growth series.
///
/// Returns `None` on arithmetic overflow.
pub fn next_capacity(capacity: usize) -> Option<usize> {
    capacity.checked_add(1)?.checked_mul(2)?.checked_sub(1)
}

/// Interning table mapping names to canonical symbols.
pub struct SymbolTable {
    slots: Vec<Option<Symbol>>,
    occupied: usize,
    max_capacity: usize,
    hasher: Box<dyn SymbolHasher>,
}

impl SymbolTable {
    /// Create a table with [`DEFAULT_CAPACITY`] slots and the Fx hasher.
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Create a table with `capacity` slots (at least one) and the Fx hasher.
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_hasher(capacity, FxSymbolHasher)
    }

    /// Create a table with a custom hash function.
    pub fn with_hasher(capacity: usize, hasher: impl SymbolHasher + 'static) -> Self {
        let capacity = capacity.max(1);
        SymbolTable {
            slots: vec![None; capacity],
            occupied: 0,
            max_capacity: usize::MAX,
            hasher: Box::new(hasher),
        }
    }

    /// Refuse to grow past `max_capacity` slots.
    #[must_use]
    pub fn with_max_capacity(mut self, max_capacity: usize) -> Self {
        self.max_capacity = max_capacity;
        self
    }

    /// Return the canonical symbol for `name`, interning it if absent.
    pub fn get_or_add(&mut self, name: &str) -> Result<Symbol, SymbolTableError> {
        let capacity = self.slots.len();
        let start = self.start_index(name, capacity);
        let mut index = start;

        loop {
            match &self.slots[index] {
                None => return self.insert_at(index, name),
                Some(existing) if existing.name() == name => {
                    tracing::trace!(symbol = name, slot = index, "symbol already interned");
                    return Ok(existing.clone());
                }
                Some(_) => {}
            }

            index = (index + 1) % capacity;
            if index == start {
                tracing::error!(symbol = name, capacity, "symbol table probe exhausted");
                return Err(SymbolTableError::NoFreeSlot {
                    name: name.to_string(),
                    capacity,
                });
            }
        }
    }

    /// Find an already interned symbol without inserting.
    pub fn lookup(&self, name: &str) -> Option<Symbol> {
        let capacity = self.slots.len();
        let start = self.start_index(name, capacity);
        let mut index = start;

        loop {
            match &self.slots[index] {
                None => return None,
                Some(existing) if existing.name() == name => return Some(existing.clone()),
                Some(_) => {}
            }
            index = (index + 1) % capacity;
            if index == start {
                return None;
            }
        }
    }

    /// Number of interned symbols.
    #[inline]
    pub fn len(&self) -> usize {
        self.occupied
    }

    /// Whether no symbol has been interned yet.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.occupied == 0
    }

    /// Current slot count.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Iterate over interned symbols in slot order.
    pub fn iter(&self) -> impl Iterator<Item = &Symbol> {
        self.slots.iter().flatten()
    }

    #[expect(
        clippy::cast_possible_truncation,
        reason = "the remainder is below capacity, which is a usize"
    )]
    fn start_index(&self, name: &str, capacity: usize) -> usize {
        (self.hasher.hash(name) % capacity as u64) as usize
    }

    fn insert_at(&mut self, index: usize, name: &str) -> Result<Symbol, SymbolTableError> {
        let symbol = Symbol::new(name);
        self.slots[index] = Some(symbol.clone());
        self.occupied += 1;
        tracing::debug!(symbol = name, slot = index, "interned new symbol");

        if self.needs_rehash() {
            if let Err(err) = self.rehash() {
                // Undo the insertion; the slot was empty before this call.
                self.slots[index] = None;
                self.occupied -= 1;
                return Err(err);
            }
        }
        Ok(symbol)
    }

    /// `occupied > 0.75 * capacity`, in integer arithmetic.
    #[inline]
    fn needs_rehash(&self) -> bool {
        self.occupied.saturating_mul(4) > self.slots.len().saturating_mul(3)
    }

    fn rehash(&mut self) -> Result<(), SymbolTableError> {
        let old_capacity = self.slots.len();
        let new_capacity = next_capacity(old_capacity)
            .filter(|&c| c <= self.max_capacity)
            .ok_or(SymbolTableError::CapacityExceeded {
                capacity: old_capacity,
            })?;

        tracing::debug!(old_capacity, new_capacity, "rehashing symbol table");

        let mut slots: Vec<Option<Symbol>> = vec![None; new_capacity];
        for symbol in self.slots.iter().flatten() {
            let start = self.start_index(symbol.name(), new_capacity);
            let mut index = start;
            while slots[index].is_some() {
                index = (index + 1) % new_capacity;
                if index == start {
                    // `self.slots` is untouched until the swap below.
                    return Err(SymbolTableError::NoFreeSlot {
                        name: symbol.name().to_string(),
                        capacity: new_capacity,
                    });
                }
            }
            slots[index] = Some(symbol.clone());
        }

        self.slots = slots;
        Ok(())
    }
}

impl Default for SymbolTable {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for SymbolTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SymbolTable")
            .field("len", &self.occupied)
            .field("capacity", &self.slots.len())
            .finish_non_exhaustive()
    }
}

/// Symbol table shared between the reader, the evaluator and other threads.
///
/// Every `get_or_add` (and the rehash it may trigger) runs under one lock, so
/// concurrent interning of the same name still yields a single symbol.
#[derive(Clone, Default)]
pub struct SharedSymbolTable(Arc<Mutex<SymbolTable>>);

impl SharedSymbolTable {
    /// Share an existing table.
    pub fn new(table: SymbolTable) -> Self {
        SharedSymbolTable(Arc::new(Mutex::new(table)))
    }

    /// Return the canonical symbol for `name`, interning it if absent.
    pub fn get_or_add(&self, name: &str) -> Result<Symbol, SymbolTableError> {
        self.0.lock().get_or_add(name)
    }

    /// Find an already interned symbol without inserting.
    pub fn lookup(&self, name: &str) -> Option<Symbol> {
        self.0.lock().lookup(name)
    }

    /// Number of interned symbols.
    pub fn len(&self) -> usize {
        self.0.lock().len()
    }

    /// Whether no symbol has been interned yet.
    pub fn is_empty(&self) -> bool {
        self.0.lock().is_empty()
    }

    /// Current slot count.
    pub fn capacity(&self) -> usize {
        self.0.lock().capacity()
    }
}

impl fmt::Debug for SharedSymbolTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("SharedSymbolTable").field(&*self.0.lock()).finish()
    }
}
