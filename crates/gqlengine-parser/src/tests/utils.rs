//! Various test utils.

use crate::GraphQLParseError;
use crate::GraphQLSourceSpan;
use crate::SourcePosition;
use crate::ast;
use crate::parse_executable;
use crate::token::GraphQLToken;
use crate::token::GraphQLTokenKind;

/// Creates a mock token with the given kind and an empty span at the origin.
pub fn mock_token(kind: GraphQLTokenKind<'static>) -> GraphQLToken<'static> {
    let pos = SourcePosition::new(0, 0, 0);
    GraphQLToken::new(kind, GraphQLSourceSpan::new(pos, pos))
}

pub fn mock_name_token(name: &'static str) -> GraphQLToken<'static> {
    mock_token(GraphQLTokenKind::name_borrowed(name))
}

pub fn mock_eof_token() -> GraphQLToken<'static> {
    mock_token(GraphQLTokenKind::Eof)
}

/// A mock token source that produces tokens from a Vec.
pub struct MockTokenSource {
    tokens: std::vec::IntoIter<GraphQLToken<'static>>,
}

impl MockTokenSource {
    pub fn new(tokens: Vec<GraphQLToken<'static>>) -> Self {
        Self {
            tokens: tokens.into_iter(),
        }
    }
}

impl Iterator for MockTokenSource {
    type Item = GraphQLToken<'static>;

    fn next(&mut self) -> Option<Self::Item> {
        self.tokens.next()
    }
}

/// Parses `source`, panicking with the formatted error on failure.
pub fn parse_ok(source: &str) -> ast::Document {
    match parse_executable(source) {
        Ok(doc) => doc,
        Err(err) => panic!("unexpected parse error:\n{}", err.format_detailed(Some(source))),
    }
}

/// Parses `source`, panicking if it succeeds.
pub fn parse_err(source: &str) -> GraphQLParseError {
    match parse_executable(source) {
        Ok(doc) => panic!("expected a parse error, got: {doc:?}"),
        Err(err) => err,
    }
}

/// Returns the field at `selections[index]`, panicking on any other kind of
/// selection.
pub fn field_at(selections: &[ast::Selection], index: usize) -> &ast::Field {
    match &selections[index] {
        ast::Selection::Field(field) => field,
        other => panic!("expected a field at index {index}, got: {other:?}"),
    }
}

/// Response keys of the direct field selections in `selections`.
pub fn response_keys(selections: &[ast::Selection]) -> Vec<&str> {
    selections
        .iter()
        .filter_map(|sel| match sel {
            ast::Selection::Field(field) => Some(field.response_key()),
            _ => None,
        })
        .collect()
}
