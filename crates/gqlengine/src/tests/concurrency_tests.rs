use crate::CancellationToken;
use crate::Engine;
use crate::EngineConfig;
use crate::EngineRequest;
use crate::FieldBinding;
use crate::FieldError;
use crate::JsonResolverFactory;
use crate::ParentValue;
use crate::QueryErrorKind;
use crate::ResolveContext;
use crate::Resolved;
use crate::ResolverFactory;
use crate::ResolverMap;
use crate::tests::test_utils::data_text;
use crate::tests::test_utils::execute;
use crate::tests::test_utils::leaf;
use crate::tests::test_utils::messages;
use crate::tests::test_utils::test_schema;
use futures::FutureExt;
use futures::future::BoxFuture;
use gqlengine_core::coercion::Arguments;
use rand::Rng;
use serde_json::Value;
use serde_json::json;
use std::sync::Arc;
use std::sync::atomic::AtomicI64;
use std::sync::atomic::AtomicUsize;
use std::sync::atomic::Ordering;
use std::time::Duration;

#[derive(Default)]
struct InFlight {
    current: AtomicUsize,
    peak: AtomicUsize,
    calls: AtomicUsize,
}

/// Wraps [`JsonResolverFactory`], adding a random delay to every call and
/// recording how many calls were in flight at once.
struct TrackingFactory {
    stats: Arc<InFlight>,
    max_latency_ms: u64,
}

impl ResolverFactory for TrackingFactory {
    fn resolve<'a>(
        &'a self,
        ctx: &'a ResolveContext<'a>,
        parent: &'a ParentValue,
        binding: &'a FieldBinding<'a>,
        args: &'a Arguments,
    ) -> BoxFuture<'a, Result<Resolved, FieldError>> {
        async move {
            let now = self.stats.current.fetch_add(1, Ordering::SeqCst) + 1;
            self.stats.peak.fetch_max(now, Ordering::SeqCst);
            self.stats.calls.fetch_add(1, Ordering::SeqCst);

            let delay = rand::thread_rng().gen_range(0..=self.max_latency_ms);
            tokio::time::sleep(Duration::from_millis(delay)).await;
            let result = JsonResolverFactory.resolve(ctx, parent, binding, args).await;

            self.stats.current.fetch_sub(1, Ordering::SeqCst);
            result
        }
        .boxed()
    }

    fn runtime_type(&self, value: &ParentValue, abstract_type: &str) -> Option<String> {
        JsonResolverFactory.runtime_type(value, abstract_type)
    }
}

fn user_graph(count: usize) -> Value {
    let users: Vec<Value> = (0..count)
        .map(|i| {
            let friends: Vec<Value> = (0..3)
                .map(|f| json!({"id": format!("{i}-{f}"), "name": format!("friend{i}-{f}")}))
                .collect();
            json!({"id": i.to_string(), "name": format!("user{i}"), "friends": friends})
        })
        .collect();
    json!({"hello": "hi", "count": 7, "users": users})
}

const USERS_QUERY: &str = "{ count hello users { name friends { name id } id } }";

/// `USERS_QUERY`'s expected data, keys in selection order.
fn expected_users_data(count: usize) -> String {
    let users: Vec<Value> = (0..count)
        .map(|i| {
            let friends: Vec<Value> = (0..3)
                .map(|f| json!({"name": format!("friend{i}-{f}"), "id": format!("{i}-{f}")}))
                .collect();
            json!({"name": format!("user{i}"), "friends": friends, "id": i.to_string()})
        })
        .collect();
    json!({"count": 7, "hello": "hi", "users": users}).to_string()
}

fn tracking_engine(max_parallelism: usize, max_latency_ms: u64) -> (Engine, Arc<InFlight>) {
    let stats = Arc::new(InFlight::default());
    let engine = Engine::new(test_schema())
        .with_config(EngineConfig::default().with_max_parallelism(max_parallelism))
        .with_resolver_factory(TrackingFactory {
            stats: stats.clone(),
            max_latency_ms,
        })
        .with_root_value(Arc::new(user_graph(8)));
    (engine, stats)
}

#[tokio::test]
async fn test_concurrency_bound_holds_at_every_depth() {
    let (engine, stats) = tracking_engine(3, 4);
    let response = execute(&engine, USERS_QUERY).await;

    assert!(response.errors.is_empty(), "{:?}", response.errors);
    // count + hello + users + 8 * (name + friends + id) + 24 * (name + id)
    assert_eq!(stats.calls.load(Ordering::SeqCst), 75);
    let peak = stats.peak.load(Ordering::SeqCst);
    assert!(peak <= 3, "peak in-flight resolver calls was {peak}");
    assert!(peak > 1, "resolver calls never overlapped");
    assert_eq!(stats.current.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_parallelism_below_one_behaves_as_one() {
    let (engine, stats) = tracking_engine(0, 1);
    let response = execute(&engine, "{ count hello }").await;

    assert_eq!(data_text(&response).as_deref(), Some(r#"{"count":7,"hello":"hi"}"#));
    assert_eq!(stats.peak.load(Ordering::SeqCst), 1);
}

/// Verifies that output order is selection order however the randomized
/// resolver latencies make calls finish.
#[tokio::test]
async fn test_output_order_independent_of_completion_order() {
    let expected = expected_users_data(8);
    for _ in 0..5 {
        let (engine, _) = tracking_engine(10, 8);
        let response = execute(&engine, USERS_QUERY).await;
        assert_eq!(data_text(&response).as_deref(), Some(expected.as_str()));
    }
}

#[tokio::test]
async fn test_errors_sorted_by_response_position() {
    let resolvers = ResolverMap::new().field("Query", "slow", |input| async move {
        let ms = input.arg("ms").and_then(Value::as_u64).unwrap_or(0);
        tokio::time::sleep(Duration::from_millis(ms)).await;
        Err::<Resolved, _>(FieldError::new(format!("failed after {ms}")))
    });
    let engine = Engine::new(test_schema()).with_resolver_factory(resolvers);
    let response = execute(&engine, "{ a: slow(ms: 40) b: slow(ms: 1) c: slow(ms: 20) }").await;

    assert_eq!(data_text(&response).as_deref(), Some(r#"{"a":null,"b":null,"c":null}"#));
    assert_eq!(messages(&response), vec!["failed after 40", "failed after 1", "failed after 20"]);
}

#[tokio::test]
async fn test_mutation_fields_run_serially() {
    let counter = Arc::new(AtomicI64::new(0));
    let (a, b) = (counter.clone(), counter.clone());
    let resolvers = ResolverMap::new()
        .field("Mutation", "incrementA", move |_| {
            let a = a.clone();
            async move {
                tokio::time::sleep(Duration::from_millis(20)).await;
                leaf(a.fetch_add(1, Ordering::SeqCst) + 1)
            }
        })
        .field("Mutation", "incrementB", move |_| {
            let b = b.clone();
            async move { leaf(b.load(Ordering::SeqCst)) }
        });
    let engine = Engine::new(test_schema()).with_resolver_factory(resolvers);

    for round in 1..=3 {
        let data = engine.exec("mutation { incrementA incrementB }", Default::default()).await.unwrap();
        assert_eq!(data, json!({"incrementA": round, "incrementB": round}));
    }
}

mod cancellation {
    use super::*;

    /// `slow(ms:)` sleeps without watching for cancellation.
    fn stubborn_engine(config: EngineConfig) -> Engine {
        let resolvers = ResolverMap::new().field("Query", "slow", |input| async move {
            let ms = input.arg("ms").and_then(Value::as_u64).unwrap_or(0);
            tokio::time::sleep(Duration::from_millis(ms)).await;
            leaf(ms)
        });
        Engine::new(test_schema()).with_resolver_factory(resolvers).with_config(config)
    }

    /// Verifies that an in-flight call finishes while a call still waiting
    /// for a permit reports the timeout.
    #[tokio::test]
    async fn test_timeout_fills_pending_positions() {
        let config = EngineConfig::default()
            .with_max_parallelism(1)
            .with_timeout(Duration::from_millis(50));
        let engine = stubborn_engine(config);
        let response = execute(&engine, "{ a: slow(ms: 150) b: slow(ms: 150) }").await;

        assert_eq!(data_text(&response).as_deref(), Some(r#"{"a":150,"b":null}"#));
        assert_eq!(messages(&response), vec!["request timed out"]);
        assert_eq!(response.errors[0].kind, QueryErrorKind::Cancellation);
    }

    #[tokio::test]
    async fn test_already_cancelled_request_resolves_nothing() {
        let engine = stubborn_engine(EngineConfig::default());
        let token = CancellationToken::new();
        token.cancel();
        let response = engine
            .execute_with_cancellation(&EngineRequest::new("{ count role }"), None, token)
            .await;

        assert_eq!(data_text(&response).as_deref(), Some(r#"{"count":null,"role":null}"#));
        assert_eq!(messages(&response), vec!["request cancelled", "request cancelled"]);
    }

    /// Verifies that resolvers see the cancellation through their context.
    #[tokio::test]
    async fn test_caller_cancellation_mid_request() {
        let resolvers = ResolverMap::new().field("Query", "slow", |input| async move {
            let ms = input.arg("ms").and_then(Value::as_u64).unwrap_or(0);
            tokio::select! {
                _ = tokio::time::sleep(Duration::from_millis(ms)) => leaf(ms),
                _ = input.cancellation.cancelled() => Err(FieldError::new("gave up")),
            }
        });
        let engine = Engine::new(test_schema())
            .with_resolver_factory(resolvers)
            .with_config(EngineConfig::default().with_max_parallelism(1));

        let token = CancellationToken::new();
        let canceller = token.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(30)).await;
            canceller.cancel();
        });
        let request = EngineRequest::new("{ a: slow(ms: 5000) b: slow(ms: 5000) }");
        let response = engine.execute_with_cancellation(&request, None, token).await;

        assert_eq!(data_text(&response).as_deref(), Some(r#"{"a":null,"b":null}"#));
        assert_eq!(messages(&response), vec!["gave up", "request cancelled"]);
    }
}
