//! Tests for parsing fields, aliases, inline fragments, and fragment spreads.

use crate::Location;
use crate::ast;
use crate::tests::utils;

#[test]
fn test_fields_keep_source_order() {
    let doc = utils::parse_ok("{ zeta alpha mid }");
    let op = &doc.operations[0];
    assert_eq!(utils::response_keys(&op.selections), vec!["zeta", "alpha", "mid"]);
}

/// Verifies that an alias becomes the response key while `name` keeps the
/// schema field name.
#[test]
fn test_alias_is_response_key() {
    let doc = utils::parse_ok("{ greeting: hello plain }");
    let aliased = utils::field_at(&doc.operations[0].selections, 0);
    assert_eq!(aliased.response_key(), "greeting");
    assert_eq!(aliased.name.value, "hello");
    assert!(aliased.has_alias());

    let plain = utils::field_at(&doc.operations[0].selections, 1);
    assert_eq!(plain.response_key(), "plain");
    assert!(!plain.has_alias());
}

/// Verifies that `hello: hello` counts as an explicit alias even though it
/// names the same field.
#[test]
fn test_alias_equal_to_name_is_still_an_alias() {
    let doc = utils::parse_ok("{ hello: hello }");
    assert!(utils::field_at(&doc.operations[0].selections, 0).has_alias());
}

#[test]
fn test_nested_selection_sets() {
    let doc = utils::parse_ok("{ user { name friends { name } } }");
    let user = utils::field_at(&doc.operations[0].selections, 0);
    assert_eq!(user.selection_set_location, Some(Location::new(1, 8)));
    assert_eq!(utils::response_keys(&user.selections), vec!["name", "friends"]);

    let friends = utils::field_at(&user.selections, 1);
    assert_eq!(utils::response_keys(&friends.selections), vec!["name"]);
    let leaf = utils::field_at(&friends.selections, 0);
    assert!(leaf.selections.is_empty());
    assert_eq!(leaf.selection_set_location, None);
}

#[test]
fn test_field_arguments_and_directives() {
    let doc = utils::parse_ok("{ user(id: 4, name: \"x\") @include(if: $show) { id } }");
    let user = utils::field_at(&doc.operations[0].selections, 0);
    assert_eq!(user.arguments.len(), 2);
    assert_eq!(user.argument("id").map(|a| &a.value), Some(&ast::Value::Int(4)));
    assert_eq!(user.directives.len(), 1);
    assert_eq!(user.directives[0].name.value, "include");
    assert!(matches!(
        user.directives[0].argument("if").map(|a| &a.value),
        Some(ast::Value::Variable(name)) if name.value == "show"
    ));
}

#[test]
fn test_inline_fragments() {
    let doc = utils::parse_ok("{ ... on User { id } ... @skip(if: true) { name } }");
    let selections = &doc.operations[0].selections;

    match &selections[0] {
        ast::Selection::InlineFragment(inline) => {
            assert_eq!(inline.type_condition.as_ref().map(|n| n.as_str()), Some("User"));
            assert_eq!(inline.location, Location::new(1, 3));
            assert_eq!(utils::response_keys(&inline.selections), vec!["id"]);
        },
        other => panic!("expected inline fragment, got {other:?}"),
    }
    match &selections[1] {
        ast::Selection::InlineFragment(inline) => {
            assert!(inline.type_condition.is_none());
            assert_eq!(inline.directives.len(), 1);
        },
        other => panic!("expected inline fragment, got {other:?}"),
    }
}

/// Verifies that a spread only records the fragment's name; the fragment's
/// selections stay in the document's fragment table.
#[test]
fn test_fragment_spread_is_a_reference() {
    let doc = utils::parse_ok("{ ...UserFields @include(if: true) }\nfragment UserFields on User { id name }");
    match &doc.operations[0].selections[0] {
        ast::Selection::FragmentSpread(spread) => {
            assert_eq!(spread.fragment_name.value, "UserFields");
            assert_eq!(spread.directives.len(), 1);
        },
        other => panic!("expected fragment spread, got {other:?}"),
    }

    let decl = doc.fragment("UserFields").expect("fragment should be declared");
    assert_eq!(decl.type_condition.value, "User");
    assert_eq!(decl.location, Location::new(2, 1));
    assert_eq!(utils::response_keys(&decl.selections), vec!["id", "name"]);
}

/// Verifies that keywords such as `query`, `on`, and `null` are usable as
/// field names.
#[test]
fn test_keywords_as_field_names() {
    let doc = utils::parse_ok("{ query fragment on null true }");
    assert_eq!(
        utils::response_keys(&doc.operations[0].selections),
        vec!["query", "fragment", "on", "null", "true"],
    );
}

/// Verifies that field ids are dense and follow source order across
/// operations and fragments.
#[test]
fn test_field_ids_are_dense_in_source_order() {
    let doc = utils::parse_ok("{ a { b } }\nfragment F on T { c }\nquery Q { d }");
    assert_eq!(doc.field_count(), 4);

    let a = utils::field_at(&doc.operations[0].selections, 0);
    let b = utils::field_at(&a.selections, 0);
    let fragment = doc.fragment("F").expect("fragment F");
    let c = utils::field_at(&fragment.selections, 0);
    let d = utils::field_at(&doc.operations[1].selections, 0);
    let ids: Vec<usize> = [a, b, c, d].iter().map(|f| f.id.index()).collect();
    assert_eq!(ids, vec![0, 1, 2, 3]);
}
