//! Tests for GraphQLTokenStream.

use crate::GraphQLTokenStream;
use crate::tests::utils;
use crate::token::GraphQLTokenKind;

/// Verifies that peek() returns the next token without consuming it.
#[test]
fn test_peek_without_consuming() {
    let tokens = vec![
        utils::mock_name_token("query"),
        utils::mock_name_token("Q"),
        utils::mock_eof_token(),
    ];
    let mut stream = GraphQLTokenStream::new(utils::MockTokenSource::new(tokens));

    let first_peek = stream.peek().map(|t| t.kind.clone());
    let second_peek = stream.peek().map(|t| t.kind.clone());
    assert_eq!(first_peek, second_peek);
    assert!(matches!(first_peek, Some(GraphQLTokenKind::Name(ref name)) if name == "query"));

    let consumed = stream.consume().map(|t| t.kind);
    assert_eq!(first_peek, consumed);
}

/// Verifies that peek_nth() fills the buffer only as far as requested.
#[test]
fn test_peek_nth_buffers_lazily() {
    let tokens = vec![
        utils::mock_name_token("a"),
        utils::mock_name_token("b"),
        utils::mock_name_token("c"),
        utils::mock_eof_token(),
    ];
    let mut stream = GraphQLTokenStream::new(utils::MockTokenSource::new(tokens));
    assert_eq!(stream.current_buffer_len(), 0);

    let third = stream.peek_nth(2).map(|t| t.kind.clone());
    assert_eq!(third, Some(GraphQLTokenKind::name_borrowed("c")));
    assert_eq!(stream.current_buffer_len(), 3);

    stream.consume();
    assert_eq!(stream.current_buffer_len(), 2);
}

#[test]
fn test_is_at_end() {
    let tokens = vec![utils::mock_name_token("a"), utils::mock_eof_token()];
    let mut stream = GraphQLTokenStream::new(utils::MockTokenSource::new(tokens));
    assert!(!stream.is_at_end());
    stream.consume();
    assert!(stream.is_at_end());
    stream.consume();
    assert!(stream.is_at_end());
    assert!(stream.consume().is_none());
}
