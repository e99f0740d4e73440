//! Tests for `StrGraphQLTokenSource`.

use crate::token::GraphQLToken;
use crate::token::GraphQLTokenKind;
use crate::token_source::StrGraphQLTokenSource;

fn lex(source: &str) -> Vec<GraphQLToken<'_>> {
    StrGraphQLTokenSource::new(source).collect()
}

fn lex_kinds(source: &str) -> Vec<GraphQLTokenKind<'_>> {
    lex(source).into_iter().map(|token| token.kind).collect()
}

#[test]
fn lexes_all_punctuators() {
    assert_eq!(
        lex_kinds("! $ & ( ) ... : = @ [ ] { | }"),
        vec![
            GraphQLTokenKind::Bang,
            GraphQLTokenKind::Dollar,
            GraphQLTokenKind::Ampersand,
            GraphQLTokenKind::ParenOpen,
            GraphQLTokenKind::ParenClose,
            GraphQLTokenKind::Ellipsis,
            GraphQLTokenKind::Colon,
            GraphQLTokenKind::Equals,
            GraphQLTokenKind::At,
            GraphQLTokenKind::SquareBracketOpen,
            GraphQLTokenKind::SquareBracketClose,
            GraphQLTokenKind::CurlyBraceOpen,
            GraphQLTokenKind::Pipe,
            GraphQLTokenKind::CurlyBraceClose,
            GraphQLTokenKind::Eof,
        ],
    );
}

/// Verifies that `true`, `false`, and `null` get their own kinds while other
/// words are names.
#[test]
fn lexes_names_and_keywords() {
    assert_eq!(
        lex_kinds("query true false null _under9"),
        vec![
            GraphQLTokenKind::name_borrowed("query"),
            GraphQLTokenKind::True,
            GraphQLTokenKind::False,
            GraphQLTokenKind::Null,
            GraphQLTokenKind::name_borrowed("_under9"),
            GraphQLTokenKind::Eof,
        ],
    );
}

#[test]
fn lexes_numbers() {
    assert_eq!(
        lex_kinds("0 -12 3.25 1e10 -4.5E-3"),
        vec![
            GraphQLTokenKind::int_value_borrowed("0"),
            GraphQLTokenKind::int_value_borrowed("-12"),
            GraphQLTokenKind::float_value_borrowed("3.25"),
            GraphQLTokenKind::float_value_borrowed("1e10"),
            GraphQLTokenKind::float_value_borrowed("-4.5E-3"),
            GraphQLTokenKind::Eof,
        ],
    );
}

#[test]
fn leading_zero_is_an_error() {
    let kinds = lex_kinds("007");
    assert!(kinds[0].is_error(), "expected an error token, got {:?}", kinds[0]);
}

#[test]
fn exponent_without_digits_is_an_error() {
    assert!(lex_kinds("1e")[0].is_error());
}

/// Verifies that commas and comments are skipped as ignored tokens.
#[test]
fn commas_and_comments_are_ignored() {
    assert_eq!(
        lex_kinds("a, b # trailing comment\n,c"),
        vec![
            GraphQLTokenKind::name_borrowed("a"),
            GraphQLTokenKind::name_borrowed("b"),
            GraphQLTokenKind::name_borrowed("c"),
            GraphQLTokenKind::Eof,
        ],
    );
}

#[test]
fn strings_keep_raw_text() {
    assert_eq!(
        lex_kinds(r#""hi\n" """block""""#),
        vec![
            GraphQLTokenKind::string_value_borrowed(r#""hi\n""#),
            GraphQLTokenKind::string_value_borrowed(r#""""block""""#),
            GraphQLTokenKind::Eof,
        ],
    );
}

#[test]
fn unterminated_string_is_an_error() {
    let kinds = lex_kinds("\"abc\n\"");
    match &kinds[0] {
        GraphQLTokenKind::Error { message, .. } => {
            assert_eq!(message, "Unterminated string literal");
        },
        other => panic!("expected an error token, got {other:?}"),
    }
}

#[test]
fn two_dots_are_an_error_with_a_hint() {
    match &lex_kinds("..")[0] {
        GraphQLTokenKind::Error { error_notes, .. } => assert_eq!(error_notes.len(), 1),
        other => panic!("expected an error token, got {other:?}"),
    }
}

#[test]
fn invalid_character_is_an_error() {
    match &lex_kinds("?")[0] {
        GraphQLTokenKind::Error { message, .. } => {
            assert_eq!(message, "Unexpected character `?`");
        },
        other => panic!("expected an error token, got {other:?}"),
    }
}

/// Verifies that line and column tracking treats `\r\n` as one line
/// terminator and counts characters rather than bytes.
#[test]
fn positions_track_lines_and_columns() {
    let tokens = lex("{\r\n  é b\n}");
    let starts: Vec<(usize, usize, usize)> = tokens
        .iter()
        .map(|t| {
            let pos = t.span.start_inclusive;
            (pos.line(), pos.col(), pos.byte_offset())
        })
        .collect();

    // `é` is not a name character, so it lexes as an error token.
    assert_eq!(starts[0], (0, 0, 0));
    assert_eq!(starts[1], (1, 2, 5));
    assert_eq!(starts[2], (1, 4, 8));
    assert_eq!(starts[3], (2, 0, 10));
}

#[test]
fn iterator_ends_after_eof() {
    let mut source = StrGraphQLTokenSource::new("");
    assert_eq!(source.next().map(|t| t.kind), Some(GraphQLTokenKind::Eof));
    assert!(source.next().is_none());
}
