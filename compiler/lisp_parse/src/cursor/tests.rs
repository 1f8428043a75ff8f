use super::Cursor;

#[test]
fn current_is_zero_at_eof() {
    let mut cursor = Cursor::new("a");
    assert_eq!(cursor.current(), b'a');
    cursor.advance();
    assert!(cursor.is_eof());
    assert_eq!(cursor.current(), 0);
    cursor.advance();
    assert_eq!(cursor.pos(), 1);
}

#[test]
fn skips_all_whitespace_kinds() {
    let mut cursor = Cursor::new(" \t\r\n  x");
    cursor.skip_whitespace();
    assert_eq!(cursor.current(), b'x');
    assert_eq!(cursor.pos(), 6);
}

#[test]
fn eat_while_and_slice() {
    let mut cursor = Cursor::new("12345)");
    let start = cursor.pos();
    cursor.eat_while(|b| b.is_ascii_digit());
    assert_eq!(cursor.slice_from(start), "12345");
    assert_eq!(cursor.current(), b')');
}

#[test]
fn interior_nul_is_not_eof() {
    let cursor = Cursor::new("\0");
    assert_eq!(cursor.current(), 0);
    assert!(!cursor.is_eof());
}

#[test]
fn current_char_decodes_utf8() {
    let cursor = Cursor::new("λx");
    assert_eq!(cursor.current_char(), Some('λ'));
    assert_eq!(Cursor::new("").current_char(), None);
}
