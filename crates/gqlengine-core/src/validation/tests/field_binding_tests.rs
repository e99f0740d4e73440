use crate::tests::test_utils::parse;
use crate::tests::test_utils::validate;
use crate::types::Field;
use gqlengine_parser::ast::Selection;

/// Verifies that every field node is bound to its schema field and the
/// static type it was selected on.
#[test]
fn test_bindings_record_parent_type() {
    let document = parse("{ node(id: 1) { id ... on User { name } __typename } }");
    let outcome = validate(&document, 0);
    assert!(outcome.is_valid(), "{:?}", outcome.errors);
    assert_eq!(outcome.bindings.len(), document.field_count());

    let Selection::Field(node) = &document.operations[0].selections[0] else {
        panic!("expected a field");
    };
    let node_binding = outcome.bindings.get(node.id).expect("node bound");
    assert_eq!(node_binding.parent_type, "Query");
    assert_eq!(node_binding.field.name(), "node");

    let children = &node.selections;
    let Selection::Field(id) = &children[0] else { panic!("expected a field") };
    assert_eq!(outcome.bindings.get(id.id).map(|b| b.parent_type), Some("Node"));

    let Selection::InlineFragment(inline) = &children[1] else { panic!("expected an inline fragment") };
    let Selection::Field(name) = &inline.selections[0] else { panic!("expected a field") };
    assert_eq!(outcome.bindings.get(name.id).map(|b| b.parent_type), Some("User"));

    let Selection::Field(typename) = &children[2] else { panic!("expected a field") };
    let typename_binding = outcome.bindings.get(typename.id).expect("__typename bound");
    assert!(std::ptr::eq(typename_binding.field, Field::typename_meta_field()));
}

/// Verifies that fields that fail `FieldsOnCorrectType` stay unbound.
#[test]
fn test_unknown_fields_are_not_bound() {
    let document = parse("{ hello nope }");
    let outcome = validate(&document, 0);
    assert_eq!(outcome.bindings.len(), 1);
}
