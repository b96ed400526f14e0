//! Source-notation printing.
//!
//! A top-level list prints with a leading quote (`'(1 (2 3))`); nested lists
//! do not repeat it. The walk keeps pending output on an explicit stack.
//!
//! A pair reached again while a list containing it is still open is a cycle
//! and prints as `...`, so every value prints in finite time. Shared but
//! acyclic structure prints in full each time it appears.

use rustc_hash::FxHashSet;
use std::fmt::{self, Write};

use super::Value;

const CYCLE: &str = "...";

#[derive(Clone, Copy, PartialEq, Eq)]
enum Mode {
    /// Strings quoted and escaped, as `Display` prints them.
    Write,
    /// Strings raw, as the `display` procedure prints them.
    Display,
}

enum Item {
    Value(Value),
    Text(&'static str),
    /// A list is finished; its spine cells are no longer open.
    Close(Vec<*const ()>),
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        print(self, Mode::Write, f)
    }
}

impl Value {
    /// Printed form for the `display` procedure: strings appear unquoted.
    pub fn display_string(&self) -> String {
        let mut out = String::new();
        // Writing into a String cannot fail.
        let _ = print(self, Mode::Display, &mut out);
        out
    }
}

fn print(value: &Value, mode: Mode, out: &mut impl Write) -> fmt::Result {
    if matches!(value, Value::Pair(_) | Value::Nil) {
        out.write_char('\'')?;
    }

    let mut open: FxHashSet<*const ()> = FxHashSet::default();
    let mut stack = vec![Item::Value(value.clone())];
    while let Some(item) = stack.pop() {
        match item {
            Item::Text(text) => out.write_str(text)?,
            Item::Close(cells) => {
                for cell in &cells {
                    open.remove(cell);
                }
            }
            Item::Value(Value::Pair(pair)) if open.contains(&pair.addr()) => {
                out.write_str(CYCLE)?;
            }
            Item::Value(Value::Pair(pair)) => {
                out.write_char('(')?;

                open.insert(pair.addr());
                let mut cells = vec![pair.addr()];
                let mut elements = vec![pair.first()];
                let mut tail = pair.rest();
                loop {
                    let next = match &tail {
                        Value::Pair(next) if !open.contains(&next.addr()) => next.clone(),
                        _ => break,
                    };
                    open.insert(next.addr());
                    cells.push(next.addr());
                    elements.push(next.first());
                    tail = next.rest();
                }

                stack.push(Item::Close(cells));
                stack.push(Item::Text(")"));
                if !tail.is_null() {
                    stack.push(Item::Value(tail));
                    stack.push(Item::Text(" . "));
                }
                for (i, element) in elements.into_iter().enumerate().rev() {
                    stack.push(Item::Value(element));
                    if i > 0 {
                        stack.push(Item::Text(" "));
                    }
                }
            }
            Item::Value(atom) => print_atom(&atom, mode, out)?,
        }
    }
    Ok(())
}

fn print_atom(value: &Value, mode: Mode, out: &mut impl Write) -> fmt::Result {
    match value {
        Value::Nil => out.write_str("()"),
        Value::Bool(true) => out.write_str("#t"),
        Value::Bool(false) => out.write_str("#f"),
        Value::Int(n) => write!(out, "{n}"),
        Value::Float(f) => print_float(*f, out),
        Value::Str(s) => match mode {
            Mode::Write => print_escaped(s, out),
            Mode::Display => out.write_str(s),
        },
        Value::Symbol(symbol) => out.write_str(symbol.name()),
        Value::Builtin(builtin) => write!(out, "#<procedure:{}>", builtin.name),
        Value::Lambda(lambda) => match &lambda.name {
            Some(name) => write!(out, "#<procedure:{name}>"),
            None => out.write_str("#<procedure>"),
        },
        Value::Syntax(syntax) => write!(out, "#<syntax:{}>", syntax.name),
        Value::Unspecified => out.write_str("#<void>"),
        // Pairs are expanded by `print`.
        Value::Pair(_) => out.write_str("(...)"),
    }
}

fn print_float(f: f64, out: &mut impl Write) -> fmt::Result {
    if f.is_nan() {
        return out.write_str("+nan.0");
    }
    if f.is_infinite() {
        return out.write_str(if f > 0.0 { "+inf.0" } else { "-inf.0" });
    }
    // `f64` Display never uses exponent notation, so a missing '.' means
    // the value is integral.
    let text = f.to_string();
    out.write_str(&text)?;
    if !text.contains('.') {
        out.write_str(".0")?;
    }
    Ok(())
}

fn print_escaped(s: &str, out: &mut impl Write) -> fmt::Result {
    out.write_char('"')?;
    for c in s.chars() {
        match c {
            '\n' => out.write_str("\\n")?,
            '\t' => out.write_str("\\t")?,
            '\r' => out.write_str("\\r")?,
            '\\' => out.write_str("\\\\")?,
            '"' => out.write_str("\\\"")?,
            c => out.write_char(c)?,
        }
    }
    out.write_char('"')
}
