//! The seam between the engine and the caller's data.
//!
//! A [`ResolverFactory`] produces the value of one field given its parent
//! value and coerced arguments. The engine never inspects parent values
//! itself: it hands them back to the factory, and asks the factory for the
//! concrete object type of values returned for interface and union fields.

mod json_resolver_factory;
mod resolve_context;
mod resolved;
mod resolver_map;

pub use json_resolver_factory::JsonResolverFactory;
pub use resolve_context::ResolveContext;
pub use resolved::ParentValue;
pub use resolved::Resolved;
pub use resolver_map::ResolverInput;
pub use resolver_map::ResolverMap;

use crate::FieldError;
use futures::future::BoxFuture;
use gqlengine_core::coercion::Arguments;
use gqlengine_core::validation::FieldBinding;

/// Produces field values for the engine.
pub trait ResolverFactory: Send + Sync {
    /// Resolves one field of `parent`. Child selections of an
    /// [`Resolved::Object`] are resolved by later calls with that object as
    /// the parent.
    fn resolve<'a>(
        &'a self,
        ctx: &'a ResolveContext<'a>,
        parent: &'a ParentValue,
        binding: &'a FieldBinding<'a>,
        args: &'a Arguments,
    ) -> BoxFuture<'a, Result<Resolved, FieldError>>;

    /// The concrete object type of `value`, which was returned for a field
    /// of the interface or union type `abstract_type`. `None` means the
    /// type cannot be determined, which is a field error.
    fn runtime_type(&self, value: &ParentValue, abstract_type: &str) -> Option<String>;
}
