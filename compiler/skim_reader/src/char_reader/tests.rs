use super::*;

// === Basic Navigation ===

#[test]
fn test_next_char_and_eof_sentinel() {
    let mut reader = CharReader::new("ab");
    assert_eq!(reader.next_char(), 'a');
    assert_eq!(reader.next_char(), 'b');
    assert!(reader.is_eof());
    assert_eq!(reader.next_char(), EOF_CHAR);
    assert_eq!(reader.next_char(), EOF_CHAR);
}

#[test]
fn test_interior_nul_is_not_eof() {
    let mut reader = CharReader::new("a\0b");
    reader.next_char();
    assert_eq!(reader.peek(), '\0');
    assert!(!reader.is_eof());
    assert!(reader.next_char_is('\0'));
    assert_eq!(reader.next_char(), '\0');
    assert_eq!(reader.next_char(), 'b');
    assert!(!CharReader::new("").next_char_is(EOF_CHAR));
}

#[test]
fn test_unread_pushes_back_in_order() {
    let mut reader = CharReader::new("xyz");
    let x = reader.next_char();
    let y = reader.next_char();
    reader.unread(y);
    reader.unread(x);
    assert_eq!(reader.peek(), 'x');
    assert_eq!(reader.next_char(), 'x');
    assert_eq!(reader.next_char(), 'y');
    assert_eq!(reader.next_char(), 'z');
}

#[test]
fn test_offset_accounts_for_pushback() {
    let mut reader = CharReader::new("héllo");
    assert_eq!(reader.offset(), 0);
    reader.next_char();
    let e = reader.next_char();
    assert_eq!(reader.offset(), 3);
    reader.unread(e);
    assert_eq!(reader.offset(), 1);
}

#[test]
fn test_unread_eof_is_noop() {
    let mut reader = CharReader::new("");
    let c = reader.next_char();
    reader.unread(c);
    assert!(reader.is_eof());
}

#[test]
fn test_multibyte_characters() {
    let mut reader = CharReader::new("λx");
    assert_eq!(reader.next_char(), 'λ');
    assert_eq!(reader.next_char(), 'x');
    assert!(reader.is_eof());
}

// === Whitespace and comments ===

#[test]
fn test_skip_whitespace_and_comments() {
    let mut reader = CharReader::new("  \t\n ; comment (ignored)\n  foo");
    reader.skip_whitespace();
    assert_eq!(reader.peek(), 'f');
    assert_eq!(reader.line(), 3);
}

#[test]
fn test_comment_at_end_of_input() {
    let mut reader = CharReader::new("; only a comment");
    reader.skip_whitespace();
    assert!(reader.is_eof());
}

#[test]
fn test_unread_newline_restores_line() {
    let mut reader = CharReader::new("\nx");
    let c = reader.next_char();
    assert_eq!(reader.line(), 2);
    reader.unread(c);
    assert_eq!(reader.line(), 1);
}

// === Lookahead ===

#[test]
fn test_next_is_number() {
    let cases = [
        ("42", true),
        ("-7", true),
        ("+3", true),
        (".5", true),
        ("-.5", true),
        ("-", false),
        ("+abc", false),
        ("...", false),
        ("abc", false),
        ("", false),
    ];
    for (source, expected) in cases {
        assert_eq!(
            CharReader::new(source).next_is_number(),
            expected,
            "source: {source:?}"
        );
    }
}

#[test]
fn test_lookahead_sees_pushback() {
    let mut reader = CharReader::new("5");
    let c = reader.next_char();
    reader.unread(c);
    reader.unread('-');
    assert!(reader.next_is_number());
    assert_eq!(reader.read_token(), "-5");
}

#[test]
fn test_next_is_lone_dot() {
    assert!(CharReader::new(". 2)").next_is_lone_dot());
    assert!(CharReader::new(".").next_is_lone_dot());
    assert!(CharReader::new(".)").next_is_lone_dot());
    assert!(!CharReader::new("...").next_is_lone_dot());
    assert!(!CharReader::new(".5").next_is_lone_dot());
}

#[test]
fn test_read_token_stops_at_delimiter() {
    let mut reader = CharReader::new("foo-bar)baz");
    assert_eq!(reader.read_token(), "foo-bar");
    assert_eq!(reader.next_char(), ')');
    assert_eq!(reader.read_token(), "baz");
    assert!(reader.is_eof());
}

#[test]
fn test_clear_discards_input() {
    let mut reader = CharReader::new("abc");
    reader.next_char();
    reader.unread('a');
    reader.clear();
    assert!(reader.is_eof());
}

// === Property tests ===

mod proptest_reader {
    use super::super::{CharReader, EOF_CHAR};
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn reads_back_every_char(source in "\\PC{0,64}") {
            let mut reader = CharReader::new(&source);
            let mut out = String::new();
            while !reader.is_eof() {
                out.push(reader.next_char());
            }
            prop_assert_eq!(&out, &source);
            prop_assert_eq!(reader.next_char(), EOF_CHAR);
        }
    }
}
