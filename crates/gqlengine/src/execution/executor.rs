use crate::Tracer;
use crate::execution::Bubble;
use crate::execution::FieldResult;
use crate::execution::NULL;
use crate::execution::ResponsePath;
use crate::execution::leaf_value;
use crate::resolver::ParentValue;
use crate::resolver::ResolveContext;
use crate::resolver::Resolved;
use crate::resolver::ResolverFactory;
use futures::FutureExt;
use futures::future::BoxFuture;
use futures::future::join_all;
use gqlengine_core::QueryError;
use gqlengine_core::QueryErrorKind;
use gqlengine_core::Schema;
use gqlengine_core::coercion::VariableTypes;
use gqlengine_core::coercion::coerce_arguments;
use gqlengine_core::types::Field;
use gqlengine_core::types::GraphQLType;
use gqlengine_core::types::TypeAnnotation;
use gqlengine_core::validation::FieldBinding;
use gqlengine_core::validation::FieldBindings;
use gqlengine_parser::ast;
use gqlengine_parser::ast::Document;
use gqlengine_parser::ast::OperationKind;
use gqlengine_parser::ast::Selection;
use parking_lot::Mutex;
use serde_json::Map;
use serde_json::Value;
use std::panic::AssertUnwindSafe;
use tokio::sync::Semaphore;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

/// State shared by every field of one executing request.
pub(crate) struct Executor<'a> {
    pub schema: &'a Schema,
    pub document: &'a Document,
    pub bindings: &'a FieldBindings<'a>,

    /// Raw request variables with declared defaults filled in. Coerced
    /// against `var_types` wherever an argument references them.
    pub variables: &'a Map<String, Value>,
    pub var_types: &'a VariableTypes,

    pub factory: &'a dyn ResolverFactory,
    pub tracer: &'a dyn Tracer,

    /// Permits for resolver calls in flight. One permit is held for the
    /// duration of each resolver call and nothing else.
    pub limiter: Semaphore,

    pub cancellation: CancellationToken,
    pub deadline: Option<Instant>,

    /// Recorded errors keyed by their position in the response.
    pub errors: Mutex<Vec<(Vec<usize>, QueryError)>>,
}

/// The field being completed, shared by every position under it.
struct FieldSite<'a> {
    /// First occurrence among the fields merged under one response key.
    field: &'a ast::Field,
    field_def: &'a Field,
    object_type: &'a str,

    /// Child selection sets of every merged occurrence.
    child_sets: Vec<&'a [Selection]>,
}

impl<'a> Executor<'a> {
    /// Resolves `operation` starting at `root` and returns its serialized
    /// data, `null` if a failure propagated to the root.
    pub async fn execute_operation(&self, operation: &'a ast::Operation, root: ParentValue) -> Vec<u8> {
        let Some(root_type) = self.schema.root_operation_type(operation.kind) else {
            let err = QueryError::new(
                QueryErrorKind::FieldExecution,
                format!("schema has no root type for {} operations", operation.kind),
            )
            .with_location(operation.location);
            self.record(&ResponsePath::default(), err);
            return NULL.to_vec();
        };

        let serial = operation.kind == OperationKind::Mutation;
        let result = self
            .execute_selection_set(
                root_type.name(),
                root,
                vec![operation.selections.as_slice()],
                ResponsePath::default(),
                serial,
            )
            .await;
        result.unwrap_or_else(|Bubble| NULL.to_vec())
    }

    /// Recorded errors in response order.
    pub fn into_errors(self) -> Vec<QueryError> {
        let mut errors = self.errors.into_inner();
        errors.sort_by(|(a, _), (b, _)| a.cmp(b));
        errors.into_iter().map(|(_, err)| err).collect()
    }

    fn execute_selection_set<'b>(
        &'b self,
        object_type: &'a str,
        parent: ParentValue,
        selection_sets: Vec<&'a [Selection]>,
        path: ResponsePath,
        serial: bool,
    ) -> BoxFuture<'b, FieldResult> {
        async move {
            let collected = self.collect_fields(object_type, &selection_sets);
            let mut members = Vec::with_capacity(collected.len());

            if serial {
                for (position, (key, fields)) in collected.into_iter().enumerate() {
                    let field_path = path.key(key, position);
                    let value = self.execute_field(object_type, &parent, fields, field_path).await?;
                    members.push((key, value));
                }
            } else {
                let parent = &parent;
                let pending = collected.into_iter().enumerate().map(|(position, (key, fields))| {
                    let field_path = path.key(key, position);
                    async move { (key, self.execute_field(object_type, parent, fields, field_path).await) }
                });
                for (key, value) in join_all(pending).await {
                    members.push((key, value?));
                }
            }

            Ok(write_object(members))
        }
        .boxed()
    }

    async fn execute_field(
        &self,
        object_type: &'a str,
        parent: &ParentValue,
        fields: Vec<&'a ast::Field>,
        path: ResponsePath,
    ) -> FieldResult {
        let Some(&field) = fields.first() else {
            return Ok(NULL.to_vec());
        };
        let field_name = field.name.as_str();
        if field_name == "__typename" {
            return Ok(json_string(object_type));
        }

        let Some(binding) = self.bindings.get(field.id) else {
            let err = QueryError::new(
                QueryErrorKind::FieldExecution,
                format!("field \"{field_name}\" is not bound to the schema"),
            )
            .with_location(field.location());
            self.record(&path, err);
            return Ok(NULL.to_vec());
        };
        // The static binding may name an interface field; the object's own
        // definition decides the completed type.
        let field_def = self.schema.field(object_type, field_name).unwrap_or(binding.field);
        let binding = FieldBinding {
            parent_type: binding.parent_type,
            field: field_def,
        };
        let annot = field_def.type_annotation();

        let site = FieldSite {
            field,
            field_def,
            object_type,
            child_sets: fields.iter().map(|f| f.selections.as_slice()).collect(),
        };
        match self.resolve_field(&site, parent, &binding, &path).await {
            Ok(resolved) => self.complete_value(annot, &site, resolved, path).await,
            Err(err) => {
                self.record(&path, err);
                absorb(annot, Err(Bubble))
            },
        }
    }

    /// Coerces arguments, waits for a permit, and calls the resolver.
    async fn resolve_field(
        &self,
        site: &FieldSite<'a>,
        parent: &ParentValue,
        binding: &FieldBinding<'a>,
        path: &ResponsePath,
    ) -> Result<Resolved, QueryError> {
        let location = site.field.location();
        if self.cancellation.is_cancelled() {
            return Err(self.cancellation_error().with_location(location));
        }

        let args = coerce_arguments(
            site.field_def.parameters(),
            &site.field.arguments,
            location,
            self.variables,
            self.var_types,
            self.schema,
        )
        .map_err(|(err, err_location)| {
            QueryError::new(QueryErrorKind::Coercion, err.message).with_location(err_location)
        })?;

        let permit = tokio::select! {
            biased;
            _ = self.cancellation.cancelled() =>
                return Err(self.cancellation_error().with_location(location)),
            permit = self.limiter.acquire() => permit,
        };
        let Ok(permit) = permit else {
            return Err(self.cancellation_error().with_location(location));
        };

        let ctx = ResolveContext {
            cancellation: &self.cancellation,
            path: &path.segments,
            alias: site.field.response_key(),
            object_type: site.object_type,
        };
        let finish = self.tracer.start_field(&ctx, site.field.name.as_str());
        let outcome = AssertUnwindSafe(async { self.factory.resolve(&ctx, parent, binding, &args).await })
            .catch_unwind()
            .await;
        drop(permit);

        let result = match outcome {
            Ok(Ok(resolved)) => Ok(resolved),
            Ok(Err(field_err)) => {
                let mut err = QueryError::new(QueryErrorKind::FieldExecution, field_err.message)
                    .with_location(location);
                err.extensions = field_err.extensions;
                Err(err)
            },
            Err(_) => {
                tracing::error!(
                    object_type = site.object_type,
                    field = site.field.name.as_str(),
                    "resolver panicked",
                );
                Err(QueryError::new(QueryErrorKind::FieldExecution, "internal error while resolving field")
                    .with_location(location))
            },
        };
        finish(result.as_ref().err().map(std::slice::from_ref).unwrap_or_default());
        result
    }

    /// Completes `resolved` for a position of type `annot`, recursing into
    /// lists and objects. A failure here is absorbed as `null` if `annot`
    /// is nullable.
    fn complete_value<'b>(
        &'b self,
        annot: &'a TypeAnnotation,
        site: &'b FieldSite<'a>,
        resolved: Resolved,
        path: ResponsePath,
    ) -> BoxFuture<'b, FieldResult> {
        async move {
            if resolved.is_null() {
                if annot.is_nullable() {
                    return Ok(NULL.to_vec());
                }
                self.record_field_error(site, &path, format!(
                    "Cannot return null for non-nullable field {}.{}.",
                    site.object_type,
                    site.field.name,
                ));
                return Err(Bubble);
            }

            let result = match annot {
                TypeAnnotation::List { inner, .. } => self.complete_list(inner, site, resolved, &path).await,
                TypeAnnotation::Named { type_name, .. } =>
                    self.complete_named(type_name, site, resolved, &path).await,
            };
            absorb(annot, result)
        }
        .boxed()
    }

    async fn complete_list(
        &self,
        item_annot: &'a TypeAnnotation,
        site: &FieldSite<'a>,
        resolved: Resolved,
        path: &ResponsePath,
    ) -> FieldResult {
        let Resolved::List(items) = resolved else {
            self.record_field_error(site, path, format!(
                "Expected Iterable, but did not find one for field \"{}.{}\".",
                site.object_type,
                site.field.name,
            ));
            return Err(Bubble);
        };

        let pending = items
            .into_iter()
            .enumerate()
            .map(|(idx, item)| self.complete_value(item_annot, site, item, path.index(idx)));
        let mut out = vec![b'['];
        for (idx, item) in join_all(pending).await.into_iter().enumerate() {
            if idx > 0 {
                out.push(b',');
            }
            out.extend_from_slice(&item?);
        }
        out.push(b']');
        Ok(out)
    }

    async fn complete_named(
        &self,
        type_name: &'a str,
        site: &FieldSite<'a>,
        resolved: Resolved,
        path: &ResponsePath,
    ) -> FieldResult {
        let Some(named_type) = self.schema.lookup_type(type_name) else {
            self.record_field_error(site, path, format!("Unknown type \"{type_name}\"."));
            return Err(Bubble);
        };

        if named_type.is_leaf() {
            let completed = match resolved.to_leaf_json() {
                Some(json) => leaf_value::complete_leaf(named_type, json),
                None => Err(format!(
                    "Expected a value of type \"{type_name}\" for field \"{}.{}\", found an object.",
                    site.object_type,
                    site.field.name,
                )),
            };
            return match completed {
                Ok(value) => Ok(value.to_string().into_bytes()),
                Err(message) => {
                    self.record_field_error(site, path, message);
                    Err(Bubble)
                },
            };
        }

        let Resolved::Object(value) = resolved else {
            self.record_field_error(site, path, format!(
                "Expected an object of type \"{type_name}\" for field \"{}.{}\".",
                site.object_type,
                site.field.name,
            ));
            return Err(Bubble);
        };
        let object_type = match named_type {
            GraphQLType::Object(object_type) => object_type.name(),
            abstract_type => self.runtime_object_type(abstract_type, &value, site, path)?,
        };
        self.execute_selection_set(object_type, value, site.child_sets.clone(), path.clone(), false)
            .await
    }

    /// Asks the resolver factory which object type `value` is, and checks
    /// that the answer belongs to `abstract_type`.
    fn runtime_object_type(
        &self,
        abstract_type: &'a GraphQLType,
        value: &ParentValue,
        site: &FieldSite<'a>,
        path: &ResponsePath,
    ) -> Result<&'a str, Bubble> {
        let abstract_name = abstract_type.name();
        let Some(runtime_name) = self.factory.runtime_type(value, abstract_name) else {
            self.record_field_error(site, path, format!(
                "Abstract type \"{abstract_name}\" must resolve to an Object type at runtime for \
                field \"{}.{}\".",
                site.object_type,
                site.field.name,
            ));
            return Err(Bubble);
        };
        match self.schema.lookup_type(&runtime_name) {
            Some(GraphQLType::Object(object_type))
                if self.schema.is_possible_type(abstract_name, object_type.name()) =>
                Ok(object_type.name()),
            _ => {
                self.record_field_error(site, path, format!(
                    "Runtime Object type \"{runtime_name}\" is not a possible type for \
                    \"{abstract_name}\".",
                ));
                Err(Bubble)
            },
        }
    }

    fn cancellation_error(&self) -> QueryError {
        let timed_out = self.deadline.is_some_and(|deadline| Instant::now() >= deadline);
        let message = if timed_out { "request timed out" } else { "request cancelled" };
        QueryError::new(QueryErrorKind::Cancellation, message)
    }

    fn record(&self, path: &ResponsePath, err: QueryError) {
        let err = err.with_path(path.segments.clone());
        self.errors.lock().push((path.order.clone(), err));
    }

    fn record_field_error(&self, site: &FieldSite<'a>, path: &ResponsePath, message: String) {
        let err = QueryError::new(QueryErrorKind::FieldExecution, message).with_location(site.field.location());
        self.record(path, err);
    }
}

/// Turns a bubble into `null` at a nullable position.
fn absorb(annot: &TypeAnnotation, result: FieldResult) -> FieldResult {
    match result {
        Err(Bubble) if annot.is_nullable() => Ok(NULL.to_vec()),
        other => other,
    }
}

fn json_string(value: &str) -> Vec<u8> {
    Value::String(value.to_string()).to_string().into_bytes()
}

fn write_object(members: Vec<(&str, Vec<u8>)>) -> Vec<u8> {
    let len = members.iter().map(|(key, value)| key.len() + value.len() + 4).sum::<usize>() + 2;
    let mut out = Vec::with_capacity(len);
    out.push(b'{');
    for (idx, (key, value)) in members.into_iter().enumerate() {
        if idx > 0 {
            out.push(b',');
        }
        out.extend_from_slice(&json_string(key));
        out.push(b':');
        out.extend_from_slice(&value);
    }
    out.push(b'}');
    out
}
