//! GraphQL request parsing: a lexer over `&str`, an executable-document AST
//! with late-bound fragment spreads, and a recursive descent parser that
//! stops at the first syntax error.

pub mod ast;
mod graphql_parse_error;
mod graphql_parse_error_kind;
mod graphql_parser;
mod graphql_source_span;
mod graphql_string_parsing_error;
mod graphql_token_stream;
mod source_position;
pub mod token;
pub mod token_source;

pub use graphql_parse_error::GraphQLParseError;
pub use graphql_parse_error_kind::GraphQLParseErrorKind;
pub use graphql_parser::GraphQLParser;
pub use graphql_parser::parse_executable;
pub use graphql_source_span::GraphQLSourceSpan;
pub use graphql_string_parsing_error::GraphQLStringParsingError;
pub use graphql_token_stream::GraphQLTokenStream;
pub use smallvec::SmallVec;
pub use smallvec::smallvec;
pub use source_position::Location;
pub use source_position::SourcePosition;

/// Help notes attached to lexer and parser errors. Most errors carry zero to
/// two, so they stay inline.
pub type GraphQLErrorNotes = SmallVec<[String; 2]>;

#[cfg(test)]
mod tests;
