//! A GraphQL execution engine.
//!
//! An [`Engine`] owns a [`Schema`] and turns an [`EngineRequest`] into an
//! [`EngineResponse`]: it parses the query, validates it, selects the
//! operation to run, and then resolves the selection set
//! through a [`ResolverFactory`] with a per-request bound on concurrent
//! resolver calls.
//!
//! ```no_run
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! use gqlengine::Engine;
//! use gqlengine::SchemaBuilder;
//! use std::sync::Arc;
//!
//! let schema = SchemaBuilder::new()
//!     .load_str(None, "type Query { hello: String! }")?
//!     .build()?;
//! let engine = Engine::new(schema)
//!     .with_root_value(Arc::new(serde_json::json!({"hello": "Hello, World!"})));
//! let data = engine.exec("{ hello }", serde_json::Map::new()).await?;
//! assert_eq!(data["hello"], "Hello, World!");
//! # Ok(())
//! # }
//! ```

mod engine;
mod engine_config;
mod engine_request;
mod engine_response;
mod execution;
mod field_error;
mod operation_selection_error;
pub mod resolver;
mod tracer;
mod variables;

pub use engine::Engine;
pub use engine_config::EngineConfig;
pub use engine_request::EngineRequest;
pub use engine_response::EngineResponse;
pub use field_error::FieldError;
pub use operation_selection_error::OperationSelectionError;
pub use resolver::JsonResolverFactory;
pub use resolver::ParentValue;
pub use resolver::ResolveContext;
pub use resolver::Resolved;
pub use resolver::ResolverFactory;
pub use resolver::ResolverInput;
pub use resolver::ResolverMap;
pub use tracer::NoopTracer;
pub use tracer::TraceFinish;
pub use tracer::Tracer;
pub use tracer::TracingTracer;

pub use gqlengine_core::PathSegment;
pub use gqlengine_core::QueryError;
pub use gqlengine_core::QueryErrorKind;
pub use gqlengine_core::QueryErrors;
pub use gqlengine_core::Schema;
pub use gqlengine_core::SchemaBuildError;
pub use gqlengine_core::SchemaBuilder;
pub use gqlengine_core::coercion::Arguments;
pub use gqlengine_core::validation::FieldBinding;
pub use tokio_util::sync::CancellationToken;

/// Schema types, validation, and coercion.
pub mod core {
    pub use gqlengine_core::*;
}

/// The request lexer, parser, and AST.
pub mod parser {
    pub use gqlengine_parser::*;
}

#[cfg(test)]
mod tests;
