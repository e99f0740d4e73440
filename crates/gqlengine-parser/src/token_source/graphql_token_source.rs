use crate::token::GraphQLToken;

/// Marker trait for [`GraphQLToken`] lexers (iterators that generate
/// [`GraphQLToken`]).
///
/// Implementors produce tokens one at a time; all lookahead and buffering is
/// handled by [`GraphQLTokenStream`](crate::GraphQLTokenStream). Lexers must
/// skip ignored tokens, emit
/// [`GraphQLTokenKind::Error`](crate::token::GraphQLTokenKind::Error) for
/// malformed input, and finish with a single
/// [`GraphQLTokenKind::Eof`](crate::token::GraphQLTokenKind::Eof) token.
pub trait GraphQLTokenSource<'src>: Iterator<Item = GraphQLToken<'src>> {}

impl<'src, T> GraphQLTokenSource<'src> for T where T: Iterator<Item = GraphQLToken<'src>> {}
