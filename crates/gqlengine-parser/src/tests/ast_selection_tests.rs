//! Tests for late-bound fragment spreads: a spread's children are whatever
//! its fragment declares at the time they are read.

use crate::ast;
use crate::tests::utils;

#[test]
fn test_spread_selections_come_from_fragment_table() {
    let doc = utils::parse_ok("{ ...F }\nfragment F on T { a b }");
    let spread = &doc.operations[0].selections[0];
    assert_eq!(utils::response_keys(spread.selections(&doc.fragments)), vec!["a", "b"]);
}

#[test]
fn test_undefined_spread_has_no_selections() {
    let doc = utils::parse_ok("{ ...Missing }");
    let spread = &doc.operations[0].selections[0];
    assert!(spread.selections(&doc.fragments).is_empty());
}

/// Verifies that replacing a spread's selections rewrites the shared
/// fragment, so every other spread of that fragment sees the change.
#[test]
fn test_set_selections_through_spread_updates_fragment() {
    let mut doc = utils::parse_ok("{ ...F y { ...F } }\nfragment F on T { a }");
    let replacement = utils::parse_ok("{ b c }").operations.remove(0).selections;

    let mut first = doc.operations[0].selections[0].clone();
    first.set_selections(&mut doc.fragments, replacement);

    let y = utils::field_at(&doc.operations[0].selections, 1);
    let nested_spread = &y.selections[0];
    assert_eq!(
        utils::response_keys(nested_spread.selections(&doc.fragments)),
        vec!["b", "c"],
    );
}

#[test]
fn test_set_selections_on_field_and_inline_fragment() {
    let mut doc = utils::parse_ok("{ f { a } ... on T { b } }");
    let replacement = utils::parse_ok("{ z }").operations.remove(0).selections;

    let mut fragments = std::mem::take(&mut doc.fragments);
    for selection in doc.operations[0].selections.iter_mut() {
        selection.set_selections(&mut fragments, replacement.clone());
    }

    for selection in &doc.operations[0].selections {
        assert_eq!(utils::response_keys(selection.selections(&fragments)), vec!["z"]);
    }
}

#[test]
fn test_selection_location_and_directives() {
    let doc = utils::parse_ok("{ alias: f @a ...S @b }");
    let selections = &doc.operations[0].selections;

    // A field's location is its name, not its alias.
    assert_eq!(selections[0].location(), crate::Location::new(1, 10));
    assert_eq!(selections[0].directives()[0].name.value, "a");

    assert!(matches!(selections[1], ast::Selection::FragmentSpread(_)));
    assert_eq!(selections[1].location(), crate::Location::new(1, 15));
    assert_eq!(selections[1].directives()[0].name.value, "b");
}
