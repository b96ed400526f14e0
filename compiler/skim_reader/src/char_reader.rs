//! Character cursor with pushback over source text.
//!
//! End of input is reported as [`EOF_CHAR`] (`'\0'`), never as an error.
//! Source text may itself contain `'\0'`; [`CharReader::is_eof`] tells the
//! two apart by checking whether any input is left.

/// Sentinel returned once the input is exhausted.
pub const EOF_CHAR: char = '\0';

/// Single-character reader with an unbounded pushback stack.
pub struct CharReader<'a> {
    source: &'a str,
    pos: usize,
    pushback: Vec<char>,
    line: usize,
}

impl<'a> CharReader<'a> {
    pub fn new(source: &'a str) -> Self {
        CharReader {
            source,
            pos: 0,
            pushback: Vec::new(),
            line: 1,
        }
    }

    /// Consume and return the next character, or [`EOF_CHAR`] at the end.
    pub fn next_char(&mut self) -> char {
        let c = match self.pushback.pop() {
            Some(c) => c,
            None => match self.source[self.pos..].chars().next() {
                Some(c) => {
                    self.pos += c.len_utf8();
                    c
                }
                None => return EOF_CHAR,
            },
        };
        if c == '\n' {
            self.line += 1;
        }
        c
    }

    /// The next character without consuming it.
    pub fn peek(&self) -> char {
        match self.pushback.last() {
            Some(&c) => c,
            None => self.source[self.pos..].chars().next().unwrap_or(EOF_CHAR),
        }
    }

    /// Push `c` back so the next read returns it.
    ///
    /// Unreading the end-of-input sentinel at the end of input is a no-op.
    pub fn unread(&mut self, c: char) {
        if c == EOF_CHAR && self.is_eof() {
            return;
        }
        if c == '\n' {
            self.line = self.line.saturating_sub(1);
        }
        self.pushback.push(c);
    }

    /// Whether `c` is the next character.
    pub fn next_char_is(&self, c: char) -> bool {
        self.peek() == c && !(c == EOF_CHAR && self.is_eof())
    }

    /// Whether all input, including pushed-back characters, is consumed.
    pub fn is_eof(&self) -> bool {
        self.pushback.is_empty() && self.pos >= self.source.len()
    }

    /// Skip whitespace and `;` line comments.
    pub fn skip_whitespace(&mut self) {
        loop {
            let c = self.peek();
            if self.is_eof() {
                return;
            }
            if c.is_whitespace() {
                self.next_char();
            } else if c == ';' {
                while !self.is_eof() && self.next_char() != '\n' {}
            } else {
                return;
            }
        }
    }

    /// Whether the upcoming characters start a number: an optional sign,
    /// then a digit or a `.` followed by a digit.
    pub fn next_is_number(&self) -> bool {
        let mut lookahead = self.upcoming();
        let mut c = lookahead.next();
        if matches!(c, Some('+' | '-')) {
            c = lookahead.next();
        }
        match c {
            Some(d) if d.is_ascii_digit() => true,
            Some('.') => lookahead.next().is_some_and(|d| d.is_ascii_digit()),
            _ => false,
        }
    }

    /// Whether the next token is a lone `.`, as in a dotted list.
    pub fn next_is_lone_dot(&self) -> bool {
        let mut lookahead = self.upcoming();
        lookahead.next() == Some('.') && lookahead.next().map_or(true, is_delimiter)
    }

    /// Consume characters up to (not including) the next delimiter.
    pub fn read_token(&mut self) -> String {
        let mut token = String::new();
        while !self.is_eof() && !is_delimiter(self.peek()) {
            token.push(self.next_char());
        }
        token
    }

    /// Discard all remaining input.
    pub fn clear(&mut self) {
        self.pushback.clear();
        self.pos = self.source.len();
    }

    /// Byte offset in the source of the next character to be read.
    pub fn offset(&self) -> usize {
        let pushed: usize = self.pushback.iter().map(|c| c.len_utf8()).sum();
        self.pos.saturating_sub(pushed)
    }

    /// Current line, starting at 1.
    pub fn line(&self) -> usize {
        self.line
    }

    fn upcoming(&self) -> impl Iterator<Item = char> + '_ {
        self.pushback
            .iter()
            .rev()
            .copied()
            .chain(self.source[self.pos..].chars())
    }
}

/// Characters that end a number or symbol token.
pub fn is_delimiter(c: char) -> bool {
    c.is_whitespace() || matches!(c, '(' | ')' | '"' | ';' | '\'')
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests;
