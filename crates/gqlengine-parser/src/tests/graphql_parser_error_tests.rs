//! Tests for syntax errors. Parsing stops at the first error, so each input
//! yields exactly one.

use crate::GraphQLParseErrorKind;
use crate::Location;
use crate::tests::utils;

/// Verifies that a lone `{` reports a single error at end of input.
#[test]
fn test_unclosed_brace_reports_one_error_at_eof() {
    let err = utils::parse_err("{");
    assert_eq!(err.location(), Location::new(1, 2));
    assert_eq!(err.message(), "expected `name`, found end of input");
    assert!(matches!(
        err.kind(),
        GraphQLParseErrorKind::UnexpectedEof { expected } if expected == &vec!["name".to_string()]
    ));
}

#[test]
fn test_empty_selection_set() {
    let err = utils::parse_err("{ }");
    assert_eq!(
        err.kind(),
        &GraphQLParseErrorKind::InvalidEmptyConstruct {
            construct: "selection set".to_string(),
        },
    );
    assert_eq!(err.location(), Location::new(1, 1));
}

#[test]
fn test_empty_argument_list() {
    let err = utils::parse_err("{ f() }");
    assert_eq!(
        err.kind(),
        &GraphQLParseErrorKind::InvalidEmptyConstruct {
            construct: "argument list".to_string(),
        },
    );
}

#[test]
fn test_empty_variable_definitions() {
    let err = utils::parse_err("query Q() { f }");
    assert!(matches!(
        err.kind(),
        GraphQLParseErrorKind::InvalidEmptyConstruct { construct } if construct == "variable definitions"
    ));
}

#[test]
fn test_fragment_named_on() {
    let err = utils::parse_err("fragment on on T { f }");
    assert_eq!(err.message(), "fragment name cannot be `on`");
    assert_eq!(err.location(), Location::new(1, 10));
}

#[test]
fn test_fragment_missing_type_condition() {
    let err = utils::parse_err("fragment F { f }");
    assert_eq!(err.message(), "expected `on`, found `{`");
}

/// Verifies that unknown top-level words list every definition keyword.
#[test]
fn test_unknown_definition_keyword() {
    let err = utils::parse_err("schema { query: Q }");
    assert_eq!(
        err.message(),
        "expected one of `{`, `query`, `mutation`, `subscription`, or `fragment`, found `schema`",
    );
}

#[test]
fn test_missing_colon_in_argument() {
    let err = utils::parse_err("{ f(a 1) }");
    assert_eq!(err.message(), "expected `:`, found `1`");
    assert_eq!(err.location(), Location::new(1, 7));
}

#[test]
fn test_lexer_error_surfaces_as_parse_error() {
    let err = utils::parse_err("{ f(a: 01) }");
    assert_eq!(err.kind(), &GraphQLParseErrorKind::LexerError);
    assert_eq!(err.message(), "Invalid number: leading zeros are not allowed: `01`");
}

/// Verifies that deeply nested selection sets are rejected instead of
/// overflowing the stack, while moderately deep ones still parse.
#[test]
fn test_nesting_depth_limit() {
    let nested = |depth: usize| {
        let mut source = String::new();
        for _ in 0..depth {
            source.push_str("{ a ");
        }
        for _ in 0..depth {
            source.push_str("} ");
        }
        source
    };

    utils::parse_ok(&nested(64));

    let err = utils::parse_err(&nested(65));
    assert_eq!(err.message(), "maximum nesting depth exceeded");
    assert_eq!(err.kind(), &GraphQLParseErrorKind::InvalidSyntax);
}

#[test]
fn test_deeply_nested_list_value_is_rejected() {
    let source = format!("{{ f(a: {}1{}) }}", "[".repeat(200), "]".repeat(200));
    let err = utils::parse_err(&source);
    assert_eq!(err.message(), "maximum nesting depth exceeded");
}
