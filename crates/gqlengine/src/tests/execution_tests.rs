use crate::Engine;
use crate::FieldError;
use crate::PathSegment;
use crate::QueryErrorKind;
use crate::Resolved;
use crate::ResolverMap;
use crate::tests::test_utils::data_text;
use crate::tests::test_utils::execute;
use crate::tests::test_utils::json_engine;
use crate::tests::test_utils::leaf;
use crate::tests::test_utils::messages;
use crate::tests::test_utils::test_schema;
use serde_json::Value;
use serde_json::json;

fn path(segments: &[Value]) -> Vec<PathSegment> {
    segments
        .iter()
        .map(|seg| match seg {
            Value::String(key) => PathSegment::Key(key.clone()),
            Value::Number(idx) => PathSegment::Index(idx.as_u64().unwrap() as usize),
            other => panic!("bad path segment {other}"),
        })
        .collect()
}

mod null_propagation {
    use super::*;

    #[tokio::test]
    async fn test_nullable_parent_absorbs() {
        let engine = json_engine(json!({"user": {"id": "1", "name": null}, "hello": "hi"}));
        let response = execute(&engine, "{ user(id: 1) { id name } hello }").await;

        assert_eq!(data_text(&response).as_deref(), Some(r#"{"user":null,"hello":"hi"}"#));
        assert_eq!(messages(&response), vec!["Cannot return null for non-nullable field User.name."]);
        assert_eq!(response.errors[0].path, path(&[json!("user"), json!("name")]));
        assert_eq!(response.errors[0].locations.len(), 1);
    }

    /// Verifies that a violation climbs through several non-null levels and
    /// is reported once, at the field where it happened.
    #[tokio::test]
    async fn test_propagates_through_non_null_chain() {
        let engine = json_engine(json!({
            "user": {"best": {"best": {"name": null}}},
        }));
        let response = execute(&engine, "{ user(id: 1) { best { best { name } } } }").await;

        assert_eq!(data_text(&response).as_deref(), Some(r#"{"user":null}"#));
        assert_eq!(response.errors.len(), 1);
        assert_eq!(
            response.errors[0].path,
            path(&[json!("user"), json!("best"), json!("best"), json!("name")]),
        );
    }

    #[tokio::test]
    async fn test_root_becomes_null() {
        let engine = json_engine(json!({"strictUser": {"name": null}, "hello": "hi"}));
        let response = execute(&engine, "{ hello strictUser { name } }").await;

        assert_eq!(data_text(&response).as_deref(), Some("null"));
        assert_eq!(response.errors.len(), 1);
        assert_eq!(
            String::from_utf8(response.to_json_bytes().unwrap()).unwrap(),
            concat!(
                r#"{"errors":[{"message":"Cannot return null for non-nullable field User.name.","#,
                r#""locations":[{"line":1,"column":22}],"path":["strictUser","name"]}],"data":null}"#,
            ),
        );
    }

    #[tokio::test]
    async fn test_nullable_list_items() {
        let engine = json_engine(json!({
            "maybeUsers": [{"name": "Ann"}, {"name": null}, null],
        }));
        let response = execute(&engine, "{ maybeUsers { name } }").await;

        assert_eq!(
            data_text(&response).as_deref(),
            Some(r#"{"maybeUsers":[{"name":"Ann"},null,null]}"#),
        );
        assert_eq!(response.errors.len(), 1);
        assert_eq!(response.errors[0].path, path(&[json!("maybeUsers"), json!(1), json!("name")]));
    }

    #[tokio::test]
    async fn test_non_null_list_item_propagates_to_list() {
        let engine = json_engine(json!({
            "user": {"friends": [{"id": "2"}, null]},
        }));
        let response = execute(&engine, "{ user(id: 1) { friends { id } } }").await;

        assert_eq!(data_text(&response).as_deref(), Some(r#"{"user":{"friends":null}}"#));
        assert_eq!(
            messages(&response),
            vec!["Cannot return null for non-nullable field User.friends."],
        );
        assert_eq!(response.errors[0].path, path(&[json!("user"), json!("friends"), json!(1)]));
    }

    #[tokio::test]
    async fn test_resolver_error_on_nullable_field() {
        let resolvers = ResolverMap::new()
            .field("Query", "fail", |_| async {
                Err::<Resolved, _>(FieldError::new("boom").with_extension("code", json!("E_BOOM")))
            })
            .field("Query", "hello", |_| async { leaf("hi") });
        let engine = Engine::new(test_schema()).with_resolver_factory(resolvers);
        let response = execute(&engine, "{ fail hello }").await;

        assert_eq!(data_text(&response).as_deref(), Some(r#"{"fail":null,"hello":"hi"}"#));
        assert_eq!(response.errors.len(), 1);
        assert_eq!(response.errors[0].kind, QueryErrorKind::FieldExecution);
        assert_eq!(
            serde_json::to_value(&response.errors[0]).unwrap(),
            json!({
                "message": "boom",
                "locations": [{"line": 1, "column": 3}],
                "path": ["fail"],
                "extensions": {"code": "E_BOOM"},
            }),
        );
    }

    #[tokio::test]
    async fn test_resolver_error_on_non_null_root_field() {
        let resolvers = ResolverMap::new()
            .field("Query", "failStrict", |_| async { Err::<Resolved, _>(FieldError::new("boom")) });
        let engine = Engine::new(test_schema()).with_resolver_factory(resolvers);
        let response = execute(&engine, "{ failStrict }").await;

        assert_eq!(data_text(&response).as_deref(), Some("null"));
        assert_eq!(messages(&response), vec!["boom"]);
    }
}

mod selection {
    use super::*;

    #[tokio::test]
    async fn test_aliases_and_typename() {
        let engine = json_engine(json!({"hello": "hi", "user": {"id": "1"}}));
        let response = execute(&engine, "{ a: hello b: hello __typename user(id: 1) { t: __typename id } }").await;

        assert!(response.errors.is_empty());
        assert_eq!(
            data_text(&response).as_deref(),
            Some(r#"{"a":"hi","b":"hi","__typename":"Query","user":{"t":"User","id":"1"}}"#),
        );
    }

    #[tokio::test]
    async fn test_same_response_key_merges() {
        let engine = json_engine(json!({"user": {"id": "1", "name": "Ann", "best": {"id": "2"}}}));
        let query = "{ user(id: 1) { id best { id } } hello: user(id: 1) { name } user(id: 1) { name id } }";
        let response = execute(&engine, query).await;

        // `hello` is a separate key here, aliasing `user`.
        assert_eq!(
            data_text(&response).as_deref(),
            Some(r#"{"user":{"id":"1","best":{"id":"2"},"name":"Ann"},"hello":{"name":"Ann"}}"#),
        );
    }

    #[tokio::test]
    async fn test_skip_and_include() {
        let engine = json_engine(json!({"hello": "hi", "count": 1, "role": "ADMIN"}));
        let request = crate::EngineRequest::new(
            "query Q($skip: Boolean!) { \
               hello @skip(if: $skip) \
               count @include(if: false) \
               ... @include(if: true) { role } \
               ...Frag @skip(if: true) \
             } \
             fragment Frag on Query { count }",
        )
        .with_variables(crate::tests::test_utils::vars(json!({"skip": true})));
        let response = engine.execute(&request, None).await;

        assert!(response.errors.is_empty(), "{:?}", response.errors);
        assert_eq!(data_text(&response).as_deref(), Some(r#"{"role":"ADMIN"}"#));
    }

    #[tokio::test]
    async fn test_fragments_expand_in_place() {
        let engine = json_engine(json!({"hello": "hi", "count": 3, "role": "MEMBER"}));
        let response = execute(&engine, "{ hello ...F role } fragment F on Query { count hello }").await;
        assert_eq!(
            data_text(&response).as_deref(),
            Some(r#"{"hello":"hi","count":3,"role":"MEMBER"}"#),
        );
    }
}

mod abstract_types {
    use super::*;

    #[tokio::test]
    async fn test_union_members_by_typename() {
        let engine = json_engine(json!({
            "search": [
                {"__typename": "User", "id": "1", "name": "Ann"},
                {"__typename": "Post", "id": "2", "title": "Hi"},
            ],
        }));
        let query = "{ search(text: \"x\") { __typename ... on User { name } ... on Post { title } } }";
        let response = execute(&engine, query).await;

        assert!(response.errors.is_empty(), "{:?}", response.errors);
        assert_eq!(
            data_text(&response).as_deref(),
            Some(r#"{"search":[{"__typename":"User","name":"Ann"},{"__typename":"Post","title":"Hi"}]}"#),
        );
    }

    #[tokio::test]
    async fn test_interface_fields_and_conditions() {
        let engine = json_engine(json!({"node": {"__typename": "Post", "id": "2", "title": "Hi"}}));
        let response =
            execute(&engine, "{ node(id: 2) { id ... on User { name } ... on Post { title } } }").await;
        assert_eq!(data_text(&response).as_deref(), Some(r#"{"node":{"id":"2","title":"Hi"}}"#));
    }

    #[tokio::test]
    async fn test_unknown_runtime_type() {
        let engine = json_engine(json!({"node": {"id": "2"}}));
        let response = execute(&engine, "{ node(id: 2) { id } }").await;

        assert_eq!(data_text(&response).as_deref(), Some(r#"{"node":null}"#));
        assert_eq!(
            messages(&response),
            vec!["Abstract type \"Node\" must resolve to an Object type at runtime for field \"Query.node\"."],
        );
    }

    #[tokio::test]
    async fn test_runtime_type_not_a_member() {
        let engine = json_engine(json!({"node": {"__typename": "Query"}}));
        let response = execute(&engine, "{ node(id: 2) { id } }").await;

        assert_eq!(data_text(&response).as_deref(), Some(r#"{"node":null}"#));
        assert_eq!(
            messages(&response),
            vec!["Runtime Object type \"Query\" is not a possible type for \"Node\"."],
        );
    }
}

mod leaf_values {
    use super::*;

    #[tokio::test]
    async fn test_values_checked_before_emission() {
        let engine = json_engine(json!({
            "count": 3_000_000_000i64,
            "role": "BOSS",
            "user": {"id": 7, "name": 12},
        }));
        let response = execute(&engine, "{ count role user(id: 7) { id name } }").await;

        assert_eq!(
            data_text(&response).as_deref(),
            Some(r#"{"count":null,"role":null,"user":null}"#),
        );
        assert_eq!(
            messages(&response),
            vec![
                "Int cannot represent non 32-bit signed integer value: 3000000000",
                "Enum \"Role\" cannot represent value: \"BOSS\"",
                "String cannot represent value: 12",
            ],
        );
    }

    #[tokio::test]
    async fn test_integer_ids_serialize_as_strings() {
        let engine = json_engine(json!({"user": {"id": 7, "name": "Ann"}}));
        let response = execute(&engine, "{ user(id: 7) { id name } }").await;
        assert_eq!(data_text(&response).as_deref(), Some(r#"{"user":{"id":"7","name":"Ann"}}"#));
    }

    #[tokio::test]
    async fn test_object_in_leaf_position() {
        let engine = json_engine(json!({"hello": {"nested": true}}));
        let response = execute(&engine, "{ hello }").await;

        assert_eq!(data_text(&response).as_deref(), Some("null"));
        assert_eq!(
            messages(&response),
            vec![r#"String cannot represent value: {"nested":true}"#],
        );
    }
}

mod panics {
    use super::*;

    fn explode() -> Result<Resolved, FieldError> {
        panic!("resolver exploded")
    }

    #[tokio::test]
    async fn test_panicking_resolver_becomes_field_error() {
        let resolvers = ResolverMap::new()
            .field("Query", "panic", |_| async { explode() })
            .field("Query", "count", |_| async { leaf(5) });
        let engine = Engine::new(test_schema()).with_resolver_factory(resolvers);
        let response = execute(&engine, "{ panic count }").await;

        assert_eq!(data_text(&response).as_deref(), Some(r#"{"panic":null,"count":5}"#));
        assert_eq!(messages(&response), vec!["internal error while resolving field"]);
        assert_eq!(response.errors[0].path, vec![PathSegment::from("panic")]);
    }
}
