//! Object readers for atoms: strings, numbers, booleans and symbols.

use skim_runtime::Value;

use super::Reader;
use crate::error::ReadError;

impl Reader<'_> {
    pub(super) fn read_atom(&mut self) -> Result<Value, ReadError> {
        match self.chars.peek() {
            '"' => self.read_string(),
            '#' => self.read_hash(),
            _ if self.chars.next_is_number() => self.read_number(),
            _ => self.read_symbol(),
        }
    }

    /// `"..."` with `\n \t \r \\ \"` escapes.
    fn read_string(&mut self) -> Result<Value, ReadError> {
        self.chars.next_char();
        let mut text = String::new();

        loop {
            if self.chars.is_eof() {
                return Err(self.eof("string must end with '\"'"));
            }
            match self.chars.next_char() {
                '"' => break,
                '\\' => {
                    if self.chars.is_eof() {
                        return Err(self.eof("escape sequence at end of input"));
                    }
                    let escaped = self.chars.next_char();
                    text.push(match escaped {
                        'n' => '\n',
                        't' => '\t',
                        'r' => '\r',
                        '\\' => '\\',
                        '"' => '"',
                        other => {
                            return Err(ReadError::InvalidEscape {
                                ch: other,
                                line: self.chars.line(),
                            })
                        }
                    });
                }
                c => text.push(c),
            }
        }

        tracing::trace!(len = text.len(), "read string literal");
        Ok(Value::string(text))
    }

    /// `#t`, `#f`, `#true`, `#false`.
    fn read_hash(&mut self) -> Result<Value, ReadError> {
        let line = self.chars.line();
        let token = self.chars.read_token();
        match token.as_str() {
            "#t" | "#true" => Ok(Value::Bool(true)),
            "#f" | "#false" => Ok(Value::Bool(false)),
            _ => Err(ReadError::UnexpectedChar { ch: '#', line }),
        }
    }

    /// Integers and decimals with an optional sign. The token must run up to
    /// a delimiter: `12abc` is an invalid number, not `12` then `abc`.
    fn read_number(&mut self) -> Result<Value, ReadError> {
        let line = self.chars.line();
        let token = self.chars.read_token();

        let invalid = || ReadError::InvalidNumber {
            token: token.clone(),
            line,
        };

        let digits = token
            .strip_prefix(|c: char| c == '+' || c == '-')
            .unwrap_or(token.as_str());
        let dots = digits.chars().filter(|&c| c == '.').count();
        if dots > 1 || !digits.chars().all(|c| c == '.' || c.is_ascii_digit()) {
            return Err(invalid());
        }

        if dots == 0 {
            token.parse::<i64>().map(Value::Int).map_err(|_| invalid())
        } else {
            token.parse::<f64>().map(Value::Float).map_err(|_| invalid())
        }
    }

    /// Any other token, case preserved, interned through the shared table.
    fn read_symbol(&mut self) -> Result<Value, ReadError> {
        let line = self.chars.line();
        let token = self.chars.read_token();
        if token.is_empty() {
            // Delimiters are consumed by the list reader; reaching one here
            // means it cannot start a datum.
            let ch = self.chars.next_char();
            return Err(ReadError::UnexpectedChar { ch, line });
        }
        let symbol = self.symbols.get_or_add(&token)?;
        Ok(Value::symbol(symbol))
    }
}
