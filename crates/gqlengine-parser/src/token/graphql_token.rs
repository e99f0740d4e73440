use crate::GraphQLSourceSpan;
use crate::token::GraphQLTokenKind;

/// A lexed token together with the span of source text it covers.
///
/// Ignored tokens (whitespace, commas, comments) never surface as
/// `GraphQLToken`s; the lexer skips them.
#[derive(Clone, Debug, PartialEq)]
pub struct GraphQLToken<'src> {
    pub kind: GraphQLTokenKind<'src>,
    pub span: GraphQLSourceSpan,
}

impl<'src> GraphQLToken<'src> {
    pub fn new(kind: GraphQLTokenKind<'src>, span: GraphQLSourceSpan) -> Self {
        Self { kind, span }
    }
}
