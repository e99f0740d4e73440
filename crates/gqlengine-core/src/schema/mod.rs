#[allow(clippy::module_inception)]
mod schema;
pub(crate) mod schema_builder;
mod type_resolution_error;

pub use schema::Schema;
pub use schema_builder::NamedTypeDefLocation;
pub use schema_builder::SchemaBuildError;
pub use schema_builder::SchemaBuilder;
pub use type_resolution_error::TypeResolutionError;
