use crate::EngineConfig;
use crate::EngineRequest;
use crate::EngineResponse;
use crate::OperationSelectionError;
use crate::execution::Executor;
use crate::resolver::JsonResolverFactory;
use crate::resolver::ParentValue;
use crate::resolver::ResolverFactory;
use crate::tracer::Tracer;
use crate::tracer::TracingTracer;
use crate::variables;
use gqlengine_core::QueryError;
use gqlengine_core::QueryErrorKind;
use gqlengine_core::QueryErrors;
use gqlengine_core::Schema;
use gqlengine_core::validation::DefaultValidator;
use gqlengine_core::validation::Validator;
use gqlengine_parser::ast::Document;
use gqlengine_parser::ast::Operation;
use parking_lot::Mutex;
use serde_json::Map;
use serde_json::Value;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

/// Executes requests against one schema.
///
/// Each call to [`Engine::execute()`] is independent: the concurrency
/// limit, cancellation, and error list are per request. An `Engine` can be
/// shared between tasks.
pub struct Engine {
    schema: Arc<Schema>,
    config: EngineConfig,
    resolver_factory: Arc<dyn ResolverFactory>,
    validator: Arc<dyn Validator>,
    tracer: Arc<dyn Tracer>,
    root_value: ParentValue,
}

impl Engine {
    /// An engine with the default config, [`JsonResolverFactory`],
    /// [`DefaultValidator`], [`TracingTracer`], and `{}` as the root value.
    pub fn new(schema: impl Into<Arc<Schema>>) -> Self {
        Self {
            schema: schema.into(),
            config: EngineConfig::default(),
            resolver_factory: Arc::new(JsonResolverFactory),
            validator: Arc::new(DefaultValidator),
            tracer: Arc::new(TracingTracer),
            root_value: Arc::new(Value::Object(Map::new())),
        }
    }

    pub fn with_config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_resolver_factory(mut self, resolver_factory: impl ResolverFactory + 'static) -> Self {
        self.resolver_factory = Arc::new(resolver_factory);
        self
    }

    pub fn with_validator(mut self, validator: impl Validator + 'static) -> Self {
        self.validator = Arc::new(validator);
        self
    }

    pub fn with_tracer(mut self, tracer: impl Tracer + 'static) -> Self {
        self.tracer = Arc::new(tracer);
        self
    }

    /// The root value used when a request does not bring its own.
    pub fn with_root_value(mut self, root_value: ParentValue) -> Self {
        self.root_value = root_value;
        self
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub async fn execute(&self, request: &EngineRequest, root: Option<ParentValue>) -> EngineResponse {
        self.execute_with_cancellation(request, root, CancellationToken::new()).await
    }

    /// Like [`Engine::execute()`], but stops issuing resolver calls once
    /// `cancellation` fires. Fields not yet started report
    /// `"request cancelled"`.
    pub async fn execute_with_cancellation(
        &self,
        request: &EngineRequest,
        root: Option<ParentValue>,
        cancellation: CancellationToken,
    ) -> EngineResponse {
        let finish = self.tracer.start_request(request);
        let response = self.run(request, root, cancellation).await;
        finish(&response.errors);
        response
    }

    /// Executes `query` with `variables` against the default root and
    /// returns the decoded data, or every error if there were any.
    pub async fn exec(&self, query: &str, variables: Map<String, Value>) -> Result<Value, QueryErrors> {
        let request = EngineRequest::new(query).with_variables(variables);
        let response = self.execute(&request, None).await;
        response.error()?;
        response.data_json().map(Option::unwrap_or_default).map_err(|err| {
            QueryError::new(QueryErrorKind::FieldExecution, format!("invalid response data: {err}")).into()
        })
    }

    async fn run(
        &self,
        request: &EngineRequest,
        root: Option<ParentValue>,
        cancellation: CancellationToken,
    ) -> EngineResponse {
        let document = match gqlengine_parser::parse_executable(&request.query) {
            Ok(document) => document,
            Err(err) => {
                tracing::debug!(error = err.message(), "request failed to parse");
                return EngineResponse::from_errors(vec![QueryError::syntax(&err)]);
            },
        };

        let finish_validation = self.tracer.start_validation();
        let outcome = self.validator.validate(&self.schema, &document, self.config.max_depth);
        finish_validation(&outcome.errors);
        if !outcome.is_valid() {
            tracing::debug!(errors = outcome.errors.len(), "request failed validation");
            return EngineResponse::from_errors(outcome.errors);
        }

        let operation_name = request.operation_name.as_deref().filter(|name| !name.is_empty());
        let operation = match select_operation(&document, operation_name) {
            Ok(operation) => operation,
            Err(err) => return EngineResponse::from_errors(vec![err.into()]),
        };
        let var_types = match variables::resolve_variable_types(&self.schema, operation) {
            Ok(var_types) => var_types,
            Err(err) => return EngineResponse::from_errors(vec![err]),
        };
        let variables = variables::with_defaults(operation, &request.variables);

        let deadline = self.config.timeout.map(|timeout| Instant::now() + timeout);
        let executor = Executor {
            schema: &self.schema,
            document: &document,
            bindings: &outcome.bindings,
            variables: &variables,
            var_types: &var_types,
            factory: self.resolver_factory.as_ref(),
            tracer: self.tracer.as_ref(),
            limiter: Semaphore::new(self.config.parallelism()),
            cancellation: cancellation.child_token(),
            deadline,
            errors: Mutex::default(),
        };
        tracing::debug!(
            operation = operation.name.as_ref().map_or("", |name| name.as_str()),
            kind = %operation.kind,
            "executing operation",
        );

        let root = root.unwrap_or_else(|| self.root_value.clone());
        let data = {
            let execution = executor.execute_operation(operation, root);
            match deadline {
                None => execution.await,
                Some(deadline) => {
                    tokio::pin!(execution);
                    tokio::select! {
                        biased;
                        data = &mut execution => data,
                        _ = tokio::time::sleep_until(deadline) => {
                            tracing::debug!("request deadline reached");
                            executor.cancellation.cancel();
                            execution.await
                        },
                    }
                },
            }
        };

        EngineResponse {
            errors: executor.into_errors(),
            data: Some(data),
            extensions: None,
        }
    }
}

/// Picks the operation to run: the one named `operation_name`, or the only
/// one in the document.
pub(crate) fn select_operation<'d>(
    document: &'d Document,
    operation_name: Option<&str>,
) -> Result<&'d Operation, OperationSelectionError> {
    if document.operations.is_empty() {
        return Err(OperationSelectionError::NoOperations);
    }
    match operation_name {
        Some(name) => document
            .operation(name)
            .ok_or_else(|| OperationSelectionError::UnknownOperation(name.to_string())),
        None => match document.operations.as_slice() {
            [operation] => Ok(operation),
            _ => Err(OperationSelectionError::AmbiguousOperation),
        },
    }
}
