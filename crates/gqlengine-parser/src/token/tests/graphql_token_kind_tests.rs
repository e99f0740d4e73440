//! Tests for `GraphQLTokenKind` classification and literal decoding.

use crate::GraphQLStringParsingError;
use crate::token::GraphQLTokenKind;

/// Verifies that every punctuator reports its source text and that literal
/// kinds are not classified as punctuators.
#[test]
fn punctuator_classification() {
    assert_eq!(GraphQLTokenKind::Ellipsis.as_punctuator_str(), Some("..."));
    assert_eq!(GraphQLTokenKind::CurlyBraceOpen.as_punctuator_str(), Some("{"));
    assert!(GraphQLTokenKind::Bang.is_punctuator());
    assert!(!GraphQLTokenKind::name_borrowed("foo").is_punctuator());
    assert!(!GraphQLTokenKind::True.is_punctuator());
    assert!(!GraphQLTokenKind::Eof.is_punctuator());
}

#[test]
fn int_and_float_values_parse() {
    let int = GraphQLTokenKind::int_value_borrowed("-42");
    assert_eq!(int.parse_int_value().map(|r| r.ok()), Some(Some(-42)));

    let float = GraphQLTokenKind::float_value_borrowed("1.5e3");
    assert_eq!(float.parse_float_value().map(|r| r.ok()), Some(Some(1500.0)));

    // Wrong kinds yield `None` rather than an error.
    assert!(int.parse_float_value().is_none());
    assert!(GraphQLTokenKind::Null.parse_int_value().is_none());
}

/// Verifies that standard escape sequences in single-line strings are
/// decoded.
#[test]
fn string_value_escapes() {
    let kind = GraphQLTokenKind::string_value_borrowed(r#""a\nb\t\"c\"\\\/""#);
    assert_eq!(
        kind.parse_string_value(),
        Some(Ok("a\nb\t\"c\"\\/".to_string())),
    );
}

#[test]
fn string_value_unicode_escapes() {
    let fixed = GraphQLTokenKind::string_value_borrowed(r#""caf\u00e9""#);
    assert_eq!(fixed.parse_string_value(), Some(Ok("café".to_string())));

    let braced = GraphQLTokenKind::string_value_borrowed(r#""\u{1F600}""#);
    assert_eq!(braced.parse_string_value(), Some(Ok("😀".to_string())));
}

#[test]
fn string_value_invalid_escape() {
    let kind = GraphQLTokenKind::string_value_borrowed(r#""\q""#);
    assert_eq!(
        kind.parse_string_value(),
        Some(Err(GraphQLStringParsingError::InvalidEscapeSequence("\\q".to_string()))),
    );

    let kind = GraphQLTokenKind::string_value_borrowed(r#""\u00G0""#);
    assert!(matches!(
        kind.parse_string_value(),
        Some(Err(GraphQLStringParsingError::InvalidUnicodeEscape(_))),
    ));
}

/// Verifies that block strings strip common indentation and surrounding
/// blank lines.
#[test]
fn block_string_indentation_is_stripped() {
    let raw = "\"\"\"\n    Hello,\n      World!\n\n    Yours\n  \"\"\"";
    let kind = GraphQLTokenKind::string_value_borrowed(raw);
    assert_eq!(
        kind.parse_string_value(),
        Some(Ok("Hello,\n  World!\n\nYours".to_string())),
    );
}

#[test]
fn block_string_escaped_triple_quote() {
    let raw = r#""""say \""" please""""#;
    let kind = GraphQLTokenKind::string_value_borrowed(raw);
    assert_eq!(
        kind.parse_string_value(),
        Some(Ok(r#"say """ please"#.to_string())),
    );
}
