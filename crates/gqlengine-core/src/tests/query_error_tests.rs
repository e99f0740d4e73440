use crate::PathSegment;
use crate::QueryError;
use crate::QueryErrorKind;
use crate::QueryErrors;
use gqlengine_parser::Location;
use serde_json::json;

/// Verifies the wire shape: empty locations and paths are omitted, and the
/// rule and kind never appear.
#[test]
fn test_query_error_serialization() {
    let bare = QueryError::validation("UniqueOperationNames", "boom");
    assert_eq!(serde_json::to_value(&bare).unwrap(), json!({ "message": "boom" }));

    let full = QueryError::new(QueryErrorKind::FieldExecution, "bad")
        .with_location(Location::new(2, 5))
        .with_path(vec!["users".into(), 1.into(), "name".into()])
        .with_extension("code", json!("E1"));
    assert_eq!(
        serde_json::to_value(&full).unwrap(),
        json!({
            "message": "bad",
            "locations": [{ "line": 2, "column": 5 }],
            "path": ["users", 1, "name"],
            "extensions": { "code": "E1" },
        }),
    );
}

/// Verifies the human-readable form used by the CLI and `QueryErrors`.
#[test]
fn test_query_error_display() {
    let err = QueryError::new(QueryErrorKind::FieldExecution, "bad")
        .with_location(Location::new(3, 7))
        .with_path(vec![PathSegment::from("a"), PathSegment::from(0)]);
    assert_eq!(err.to_string(), "bad (line 3, column 7) at a.0");

    let errors = QueryErrors(vec![
        QueryError::new(QueryErrorKind::Validation, "first"),
        QueryError::new(QueryErrorKind::Validation, "second"),
    ]);
    assert_eq!(errors.to_string(), "first\nsecond");
    assert_eq!(errors.len(), 2);
}

/// Verifies which phases abort a request.
#[test]
fn test_query_error_kind_is_request_error() {
    assert!(QueryErrorKind::Syntax.is_request_error());
    assert!(QueryErrorKind::Validation.is_request_error());
    assert!(QueryErrorKind::OperationSelection.is_request_error());
    assert!(QueryErrorKind::VariableType.is_request_error());
    assert!(!QueryErrorKind::FieldExecution.is_request_error());
    assert!(!QueryErrorKind::Cancellation.is_request_error());
}

/// Verifies that syntax errors keep the parser's location.
#[test]
fn test_query_error_from_syntax_error() {
    let parse_err = gqlengine_parser::parse_executable("{").unwrap_err();
    let err = QueryError::syntax(&parse_err);
    assert!(err.message.starts_with("syntax error: "));
    assert_eq!(err.locations, vec![parse_err.location()]);
    assert_eq!(err.kind, QueryErrorKind::Syntax);
}
