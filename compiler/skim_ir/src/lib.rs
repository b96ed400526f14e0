//! Skim IR - symbols and symbol interning.
//!
//! This crate holds the one piece of state every other Skim crate agrees on:
//! the symbol table. A `Symbol` is only ever created by a [`SymbolTable`], so
//! two symbols with the same name obtained from the same table are the same
//! object and compare in O(1) by identity.
//!
//! - [`Symbol`]: identity-compared interned name
//! - [`SymbolTable`]: open-addressing table with linear probing and rehash
//! - [`SharedSymbolTable`]: lock-guarded handle shared by reader and evaluator
//! - [`SymbolHasher`]: pluggable hash function (tests force collisions with it)

mod symbol;
mod symbol_table;

pub use symbol::Symbol;
pub use symbol_table::{
    next_capacity, FxSymbolHasher, SharedSymbolTable, SymbolHasher, SymbolTable,
    SymbolTableError, DEFAULT_CAPACITY,
};
