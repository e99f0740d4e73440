use crate::FieldError;
use crate::resolver::JsonResolverFactory;
use crate::resolver::ParentValue;
use crate::resolver::ResolveContext;
use crate::resolver::Resolved;
use crate::resolver::ResolverFactory;
use futures::FutureExt;
use futures::future::BoxFuture;
use gqlengine_core::PathSegment;
use gqlengine_core::coercion::Arguments;
use gqlengine_core::validation::FieldBinding;
use serde_json::Value;
use std::any::Any;
use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

/// Everything a registered field resolver receives. Owned, so resolvers can
/// be `'static` async closures.
#[derive(Clone)]
pub struct ResolverInput {
    pub parent: ParentValue,
    pub args: Arguments,
    pub path: Vec<PathSegment>,
    pub alias: String,
    pub object_type: String,
    pub cancellation: CancellationToken,
}

impl ResolverInput {
    /// The parent value downcast to `T`.
    pub fn parent_as<T: Any>(&self) -> Option<&T> {
        self.parent.downcast_ref::<T>()
    }

    pub fn parent_json(&self) -> Option<&Value> {
        self.parent_as::<Value>()
    }

    pub fn arg(&self, name: &str) -> Option<&Value> {
        self.args.get(name)
    }
}

type FieldResolverFn =
    dyn Fn(ResolverInput) -> BoxFuture<'static, Result<Resolved, FieldError>> + Send + Sync;

/// Resolvers registered per `(type, field)`, with a fallback factory for
/// everything else.
///
/// A field is looked up first on the concrete object type it is being
/// resolved on, then on the type it was selected through (an interface,
/// say), and finally handed to the fallback, which defaults to
/// [`JsonResolverFactory`].
///
/// ```
/// use gqlengine::FieldError;
/// use gqlengine::Resolved;
/// use gqlengine::ResolverMap;
///
/// let resolvers = ResolverMap::new()
///     .field("Query", "hello", |_input| async {
///         Ok::<_, FieldError>(Resolved::Leaf("Hello, World!".into()))
///     });
/// ```
pub struct ResolverMap {
    resolvers: HashMap<String, HashMap<String, Arc<FieldResolverFn>>>,
    fallback: Arc<dyn ResolverFactory>,
}

impl ResolverMap {
    pub fn new() -> Self {
        Self::with_fallback(JsonResolverFactory)
    }

    pub fn with_fallback(fallback: impl ResolverFactory + 'static) -> Self {
        Self {
            resolvers: HashMap::new(),
            fallback: Arc::new(fallback),
        }
    }

    /// Registers `resolver` for `type_name.field_name`, replacing any
    /// earlier registration.
    pub fn field<F, Fut>(mut self, type_name: &str, field_name: &str, resolver: F) -> Self
    where
        F: Fn(ResolverInput) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<Resolved, FieldError>> + Send + 'static,
    {
        self.resolvers
            .entry(type_name.to_string())
            .or_default()
            .insert(field_name.to_string(), Arc::new(move |input| resolver(input).boxed()));
        self
    }

    fn lookup(&self, type_name: &str, field_name: &str) -> Option<&Arc<FieldResolverFn>> {
        self.resolvers.get(type_name)?.get(field_name)
    }
}

impl Default for ResolverMap {
    fn default() -> Self {
        Self::new()
    }
}

impl ResolverFactory for ResolverMap {
    fn resolve<'a>(
        &'a self,
        ctx: &'a ResolveContext<'a>,
        parent: &'a ParentValue,
        binding: &'a FieldBinding<'a>,
        args: &'a Arguments,
    ) -> BoxFuture<'a, Result<Resolved, FieldError>> {
        let field_name = binding.field.name();
        let resolver = self
            .lookup(ctx.object_type, field_name)
            .or_else(|| self.lookup(binding.parent_type, field_name));
        match resolver {
            Some(resolver) => resolver(ResolverInput {
                parent: parent.clone(),
                args: args.clone(),
                path: ctx.path.to_vec(),
                alias: ctx.alias.to_string(),
                object_type: ctx.object_type.to_string(),
                cancellation: ctx.cancellation.clone(),
            }),
            None => self.fallback.resolve(ctx, parent, binding, args),
        }
    }

    fn runtime_type(&self, value: &ParentValue, abstract_type: &str) -> Option<String> {
        self.fallback.runtime_type(value, abstract_type)
    }
}
