use crate::FieldError;
use crate::resolver::ParentValue;
use crate::resolver::ResolveContext;
use crate::resolver::Resolved;
use crate::resolver::ResolverFactory;
use futures::FutureExt;
use futures::future::BoxFuture;
use gqlengine_core::coercion::Arguments;
use gqlengine_core::validation::FieldBinding;
use serde_json::Value;

/// Serves fields straight out of JSON parent values.
///
/// A field reads the parent object's member of the same name; a missing
/// member is `null`. Arguments are ignored. The concrete type of an
/// abstract-typed value is its `__typename` member.
#[derive(Clone, Copy, Debug, Default)]
pub struct JsonResolverFactory;

impl ResolverFactory for JsonResolverFactory {
    fn resolve<'a>(
        &'a self,
        _ctx: &'a ResolveContext<'a>,
        parent: &'a ParentValue,
        binding: &'a FieldBinding<'a>,
        _args: &'a Arguments,
    ) -> BoxFuture<'a, Result<Resolved, FieldError>> {
        let result = match parent.downcast_ref::<Value>() {
            Some(Value::Object(members)) => Ok(members
                .get(binding.field.name())
                .cloned()
                .map_or(Resolved::Null, Resolved::from_json)),
            Some(_) => Err(FieldError::new(format!(
                "cannot read field \"{}\" from a non-object JSON value",
                binding.field.name(),
            ))),
            None => Err(FieldError::new("parent value is not JSON")),
        };
        futures::future::ready(result).boxed()
    }

    fn runtime_type(&self, value: &ParentValue, _abstract_type: &str) -> Option<String> {
        value
            .downcast_ref::<Value>()?
            .get("__typename")?
            .as_str()
            .map(str::to_string)
    }
}
