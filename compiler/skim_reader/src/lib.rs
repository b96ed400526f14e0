//! Skim Reader - turns source text into `Value` trees.
//!
//! Two layers:
//! - [`CharReader`]: character cursor with pushback, whitespace/comment
//!   skipping and number lookahead; end of input is the [`EOF_CHAR`] sentinel
//! - [`Reader`]: datum reader for strings, numbers, booleans, symbols, proper
//!   and dotted lists, and the `'x` quote shorthand
//!
//! Symbols are interned through the [`SharedSymbolTable`](skim_ir::SharedSymbolTable)
//! handed to the reader, the same table the interpreter uses.

mod char_reader;
mod error;
mod reader;

pub use char_reader::{is_delimiter, CharReader, EOF_CHAR};
pub use error::ReadError;
pub use reader::Reader;
