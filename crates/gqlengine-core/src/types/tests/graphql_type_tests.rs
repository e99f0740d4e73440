//! Tests for [`crate::types::GraphQLType`] kind predicates.

use crate::tests::test_utils::test_schema;
use crate::types::GraphQLType;

fn lookup(name: &str) -> &'static GraphQLType {
    test_schema().lookup_type(name).expect("type exists")
}

/// Verifies the kind predicates for every kind of type in the test schema.
#[test]
fn test_kind_predicates() {
    let cases = [
        // name, composite, abstract, leaf, input, output
        ("Int", false, false, true, true, true),
        ("DateTime", false, false, true, true, true),
        ("Role", false, false, true, true, true),
        ("EchoInput", false, false, false, true, false),
        ("User", true, false, false, false, true),
        ("Node", true, true, false, false, true),
        ("SearchResult", true, true, false, false, true),
    ];
    for (name, composite, abstract_, leaf, input, output) in cases {
        let type_ = lookup(name);
        assert_eq!(type_.is_composite(), composite, "{name} composite");
        assert_eq!(type_.is_abstract(), abstract_, "{name} abstract");
        assert_eq!(type_.is_leaf(), leaf, "{name} leaf");
        assert_eq!(type_.is_input_type(), input, "{name} input");
        assert_eq!(type_.is_output_type(), output, "{name} output");
    }
}

/// Verifies the names and kind names used in messages.
#[test]
fn test_names() {
    assert_eq!(lookup("Boolean").name(), "Boolean");
    assert_eq!(lookup("Boolean").kind_name(), "scalar");
    assert_eq!(lookup("EchoInput").kind_name(), "input object");
    assert_eq!(lookup("Node").kind_name(), "interface");
    assert!(lookup("User").fields().is_some_and(|fields| fields.contains_key("friends")));
    assert!(lookup("SearchResult").fields().is_none());
}
