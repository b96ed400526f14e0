//! Datum reader: source text to `Value` trees.
//!
//! Lists are assembled on an explicit stack of open frames, so arbitrarily
//! deep nesting never recurses. Atoms are read by the object readers in
//! `atoms`.

mod atoms;

use skim_ir::{SharedSymbolTable, Symbol};
use skim_runtime::Value;

use crate::char_reader::CharReader;
use crate::error::ReadError;

/// An unfinished form on the reader stack.
enum Open {
    List {
        items: Vec<Value>,
        /// Set once a `.` has been read.
        dotted: bool,
        tail: Option<Value>,
    },
    /// `'` waiting for its datum.
    Quote,
}

/// Reads successive data from one source text.
pub struct Reader<'a> {
    chars: CharReader<'a>,
    symbols: SharedSymbolTable,
    quote: Option<Symbol>,
}

impl<'a> Reader<'a> {
    pub fn new(source: &'a str, symbols: SharedSymbolTable) -> Self {
        Reader {
            chars: CharReader::new(source),
            symbols,
            quote: None,
        }
    }

    /// Read the next datum, or `None` once only whitespace and comments remain.
    pub fn read(&mut self) -> Result<Option<Value>, ReadError> {
        self.chars.skip_whitespace();
        if self.chars.is_eof() {
            return Ok(None);
        }
        self.read_datum().map(Some)
    }

    /// Read every remaining datum.
    pub fn read_all(&mut self) -> Result<Vec<Value>, ReadError> {
        let mut data = Vec::new();
        while let Some(datum) = self.read()? {
            data.push(datum);
        }
        Ok(data)
    }

    /// Byte offset where the next `read` starts.
    pub fn offset(&self) -> usize {
        self.chars.offset()
    }

    /// Discard the rest of the input, e.g. after an error in the REPL.
    pub fn clear(&mut self) {
        self.chars.clear();
    }

    fn read_datum(&mut self) -> Result<Value, ReadError> {
        let mut stack: Vec<Open> = Vec::new();

        loop {
            self.chars.skip_whitespace();
            if self.chars.is_eof() {
                let context = match stack.last() {
                    Some(Open::Quote) => "expected datum after quote",
                    _ => "list must end with ')'",
                };
                return Err(self.eof(context));
            }

            let value = match self.chars.peek() {
                '(' => {
                    self.chars.next_char();
                    stack.push(Open::List {
                        items: Vec::new(),
                        dotted: false,
                        tail: None,
                    });
                    continue;
                }
                '\'' => {
                    self.chars.next_char();
                    stack.push(Open::Quote);
                    continue;
                }
                ')' => {
                    let line = self.chars.line();
                    self.chars.next_char();
                    match stack.pop() {
                        Some(Open::List { items, dotted, tail }) => match (dotted, tail) {
                            (false, _) => Value::list(items),
                            (true, Some(tail)) => Value::list_with_tail(items, tail),
                            (true, None) => {
                                return Err(ReadError::BadDottedList {
                                    reason: "expected datum after '.'",
                                    line,
                                })
                            }
                        },
                        _ => return Err(ReadError::UnexpectedChar { ch: ')', line }),
                    }
                }
                '.' if self.chars.next_is_lone_dot() => {
                    let line = self.chars.line();
                    self.chars.next_char();
                    match stack.last_mut() {
                        Some(Open::List { items, dotted, .. })
                            if !items.is_empty() && !*dotted =>
                        {
                            *dotted = true;
                            continue;
                        }
                        Some(Open::List { .. }) => {
                            return Err(ReadError::BadDottedList {
                                reason: "'.' must follow at least one datum, once",
                                line,
                            })
                        }
                        _ => return Err(ReadError::UnexpectedChar { ch: '.', line }),
                    }
                }
                _ => self.read_atom()?,
            };

            if let Some(done) = self.complete(&mut stack, value)? {
                return Ok(done);
            }
        }
    }

    /// Hand a finished value to the innermost open form. Returns the datum
    /// once the outermost form is complete.
    fn complete(
        &mut self,
        stack: &mut Vec<Open>,
        mut value: Value,
    ) -> Result<Option<Value>, ReadError> {
        loop {
            match stack.last_mut() {
                None => return Ok(Some(value)),
                Some(Open::Quote) => {
                    stack.pop();
                    let quote = self.quote_symbol()?;
                    value = Value::list([Value::symbol(quote), value]);
                }
                Some(Open::List { items, dotted, tail }) => {
                    if tail.is_some() {
                        return Err(ReadError::BadDottedList {
                            reason: "more than one datum after '.'",
                            line: self.chars.line(),
                        });
                    }
                    if *dotted {
                        *tail = Some(value);
                    } else {
                        items.push(value);
                    }
                    return Ok(None);
                }
            }
        }
    }

    fn quote_symbol(&mut self) -> Result<Symbol, ReadError> {
        if let Some(quote) = &self.quote {
            return Ok(quote.clone());
        }
        let quote = self.symbols.get_or_add("quote")?;
        self.quote = Some(quote.clone());
        Ok(quote)
    }

    fn eof(&self, context: &'static str) -> ReadError {
        ReadError::UnexpectedEof {
            context,
            line: self.chars.line(),
        }
    }
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests;
