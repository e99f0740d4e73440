use crate::EngineRequest;
use crate::resolver::ResolveContext;
use gqlengine_core::QueryError;

/// Ends a span. The engine calls it exactly once, with the errors the
/// traced step produced (empty on success).
pub type TraceFinish = Box<dyn FnOnce(&[QueryError]) + Send>;

/// Hooks around the request, its validation phase, and each resolver call.
pub trait Tracer: Send + Sync {
    fn start_request(&self, request: &EngineRequest) -> TraceFinish;
    fn start_validation(&self) -> TraceFinish;
    fn start_field(&self, ctx: &ResolveContext<'_>, field_name: &str) -> TraceFinish;
}

/// Emits `tracing` spans: `graphql.request`, `graphql.validation`, and
/// `graphql.field`, each recording its error count when it ends.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingTracer;

impl Tracer for TracingTracer {
    fn start_request(&self, request: &EngineRequest) -> TraceFinish {
        let span = tracing::info_span!(
            "graphql.request",
            operation_name = request.operation_name.as_deref().unwrap_or(""),
            variables = request.variables.len(),
            errors = tracing::field::Empty,
        );
        finish_span(span)
    }

    fn start_validation(&self) -> TraceFinish {
        finish_span(tracing::debug_span!("graphql.validation", errors = tracing::field::Empty))
    }

    fn start_field(&self, ctx: &ResolveContext<'_>, field_name: &str) -> TraceFinish {
        let span = tracing::trace_span!(
            "graphql.field",
            object_type = ctx.object_type,
            field = field_name,
            alias = ctx.alias,
            errors = tracing::field::Empty,
        );
        finish_span(span)
    }
}

fn finish_span(span: tracing::Span) -> TraceFinish {
    Box::new(move |errors: &[QueryError]| {
        span.record("errors", errors.len());
        span.in_scope(|| {
            for err in errors {
                tracing::debug!(error = %err, "span finished with error");
            }
        });
    })
}

/// Does nothing.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopTracer;

impl Tracer for NoopTracer {
    fn start_request(&self, _request: &EngineRequest) -> TraceFinish {
        Box::new(|_| ())
    }

    fn start_validation(&self) -> TraceFinish {
        Box::new(|_| ())
    }

    fn start_field(&self, _ctx: &ResolveContext<'_>, _field_name: &str) -> TraceFinish {
        Box::new(|_| ())
    }
}
