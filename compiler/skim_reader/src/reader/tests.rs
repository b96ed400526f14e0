use super::*;
use pretty_assertions::assert_eq;

fn read_one(source: &str) -> Result<Value, ReadError> {
    let mut reader = Reader::new(source, SharedSymbolTable::default());
    reader.read().map(|datum| datum.unwrap_or(Value::Unspecified))
}

fn printed(source: &str) -> String {
    read_one(source).unwrap().to_string()
}

// === Strings ===

#[test]
fn test_string_escape_reads_real_newline() {
    let value = read_one(r#""a\nb""#).unwrap();
    assert_eq!(value.as_str(), Some("a\nb"));
}

#[test]
fn test_string_escapes() {
    let value = read_one(r#""tab\there \"q\" back\\slash\r""#).unwrap();
    assert_eq!(value.as_str(), Some("tab\there \"q\" back\\slash\r"));
}

#[test]
fn test_unterminated_string_is_eof_error() {
    let err = read_one("\"abc").unwrap_err();
    assert!(err.is_incomplete());
    assert_eq!(
        err,
        ReadError::UnexpectedEof {
            context: "string must end with '\"'",
            line: 1
        }
    );
}

#[test]
fn test_backslash_at_end_of_input() {
    let err = read_one("\"abc\\").unwrap_err();
    assert!(err.is_incomplete());
}

#[test]
fn test_unknown_escape_is_rejected() {
    let err = read_one(r#""\q""#).unwrap_err();
    assert_eq!(err, ReadError::InvalidEscape { ch: 'q', line: 1 });
}

// === Numbers, booleans, symbols ===

#[test]
fn test_numbers() {
    assert_eq!(read_one("42").unwrap(), Value::int(42));
    assert_eq!(read_one("-17").unwrap(), Value::int(-17));
    assert_eq!(read_one("+5").unwrap(), Value::int(5));
    assert_eq!(read_one("2.5").unwrap(), Value::float(2.5));
    assert_eq!(read_one("-.5").unwrap(), Value::float(-0.5));
}

#[test]
fn test_number_must_end_at_delimiter() {
    assert!(matches!(
        read_one("12abc"),
        Err(ReadError::InvalidNumber { .. })
    ));
    assert!(matches!(
        read_one("1.2.3"),
        Err(ReadError::InvalidNumber { .. })
    ));
    assert!(matches!(
        read_one("99999999999999999999"),
        Err(ReadError::InvalidNumber { .. })
    ));
}

#[test]
fn test_booleans() {
    assert_eq!(read_one("#t").unwrap(), Value::Bool(true));
    assert_eq!(read_one("#false").unwrap(), Value::Bool(false));
    assert!(matches!(
        read_one("#x"),
        Err(ReadError::UnexpectedChar { ch: '#', .. })
    ));
}

#[test]
fn test_symbols_are_interned_and_case_preserved() {
    let symbols = SharedSymbolTable::default();
    let mut reader = Reader::new("Foo foo Foo - ... set-car!", symbols.clone());
    let data = reader.read_all().unwrap();

    assert_eq!(data.len(), 6);
    assert!(data[0].eqv(&data[2]));
    assert!(!data[0].eqv(&data[1]));
    assert_eq!(data[3].to_string(), "-");
    assert_eq!(data[4].to_string(), "...");
    assert!(symbols.lookup("set-car!").is_some());
}

// === Lists ===

#[test]
fn test_lists() {
    assert_eq!(printed("(42 43)"), "'(42 43)");
    assert_eq!(printed("()"), "'()");
    assert_eq!(printed("(1 (2 3) \"s\")"), "'(1 (2 3) \"s\")");
    assert_eq!(
        printed("(\"foobar\" \"fizzbuzz\" . 42)"),
        "'(\"foobar\" \"fizzbuzz\" . 42)"
    );
    assert_eq!(printed("(+ 1 2)"), "'(+ 1 2)");
}

#[test]
fn test_quote_shorthand() {
    assert_eq!(printed("'x"), "'(quote x)");
    assert_eq!(printed("'(1 'b)"), "'(quote (1 (quote b)))");
    assert_eq!(printed("''a"), "'(quote (quote a))");
}

#[test]
fn test_bad_dotted_lists() {
    for source in ["(. 1)", "(1 . )", "(1 . 2 3)", "(1 . 2 . 3)"] {
        assert!(
            matches!(read_one(source), Err(ReadError::BadDottedList { .. })),
            "source: {source}"
        );
    }
}

#[test]
fn test_unbalanced_input() {
    assert!(read_one("(1 2").unwrap_err().is_incomplete());
    assert!(read_one("'").unwrap_err().is_incomplete());
    assert!(matches!(
        read_one(")"),
        Err(ReadError::UnexpectedChar { ch: ')', line: 1 })
    ));
}

#[test]
fn test_read_all_and_comments() {
    let mut reader = Reader::new(
        "; leading comment\n(define x 1) ; trailing\n\n x\n",
        SharedSymbolTable::default(),
    );
    let data = reader.read_all().unwrap();
    assert_eq!(data.len(), 2);
    assert_eq!(data[0].to_string(), "'(define x 1)");
    assert!(reader.read().unwrap().is_none());
}

#[test]
fn test_offset_marks_start_of_unfinished_datum() {
    let source = "(a b) (c";
    let mut reader = Reader::new(source, SharedSymbolTable::default());
    assert_eq!(reader.read().unwrap().unwrap().to_string(), "'(a b)");
    let start = reader.offset();
    assert!(reader.read().unwrap_err().is_incomplete());
    assert_eq!(&source[start..], " (c");
}

#[test]
fn test_error_line_numbers() {
    let err = read_one("(1\n2\n\"\\z\")").unwrap_err();
    assert_eq!(err, ReadError::InvalidEscape { ch: 'z', line: 3 });
}

#[test]
fn test_deep_nesting_does_not_recurse() {
    let depth = 50_000;
    let source = format!("{}{}", "(".repeat(depth), ")".repeat(depth));
    let value = read_one(&source).unwrap();
    assert!(value.is_pair());
}

#[test]
fn test_read_error_converts_to_eval_error() {
    let err: skim_runtime::EvalError = read_one("\"open").unwrap_err().into();
    assert!(!err.is_fatal());
    assert!(err.message.starts_with("read error: unexpected end of input"));
}
