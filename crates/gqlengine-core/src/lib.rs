//! Schema, validation, and input coercion for `gqlengine`.
//!
//! A [`Schema`] is built from SDL with [`SchemaBuilder`]. A parsed request
//! [`Document`](gqlengine_parser::ast::Document) is then checked by a
//! [`Validator`](validation::Validator), which also binds every field node to
//! its schema field in a [`FieldBindings`](validation::FieldBindings) side
//! table. [`coercion`] turns raw variables and argument literals into values
//! of their declared input types.

pub mod coercion;
pub mod loc;
mod query_error;
mod schema;
mod sdl;
pub mod types;
pub mod validation;

pub use query_error::PathSegment;
pub use query_error::QueryError;
pub use query_error::QueryErrorKind;
pub use query_error::QueryErrors;
pub use schema::Schema;
pub use schema::SchemaBuildError;
pub use schema::SchemaBuilder;
pub use schema::TypeResolutionError;

#[cfg(test)]
mod tests;
