/// Categorizes parse errors for programmatic handling.
///
/// The `#[error(...)]` messages are concise; the full human-readable message
/// lives in [`GraphQLParseError::message()`](crate::GraphQLParseError::message).
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GraphQLParseErrorKind {
    /// Expected specific token(s) but found something else.
    #[error("unexpected token: `{found}`")]
    UnexpectedToken {
        expected: Vec<String>,
        found: String,
    },

    /// The document ended before a complete construct was parsed.
    #[error("unexpected end of input")]
    UnexpectedEof {
        expected: Vec<String>,
    },

    /// The lexer produced an error token.
    #[error("lexer error")]
    LexerError,

    /// A construct that must be non-empty was empty (e.g. `{}` or `()`).
    #[error("invalid empty construct: {construct}")]
    InvalidEmptyConstruct {
        construct: String,
    },

    /// Syntax that is well-tokenized but not allowed (nesting too deep,
    /// variables in a const context, a fragment named `on`, ...).
    #[error("invalid syntax")]
    InvalidSyntax,
}
