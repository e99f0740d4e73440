use crate::tests::test_utils::rule_errors;

#[test]
fn test_fields_on_correct_type() {
    assert_eq!(
        rule_errors("{ user(id: 1) { nope } }", "FieldsOnCorrectType"),
        vec!["Cannot query field \"nope\" on type \"User\"."],
    );
    assert_eq!(
        rule_errors("{ search(text: \"x\") { id } }", "FieldsOnCorrectType"),
        vec!["Cannot query field \"id\" on type \"SearchResult\"."],
    );
    assert!(rule_errors(
        "{ search(text: \"x\") { __typename ... on User { id } ... on Post { title } } }",
        "FieldsOnCorrectType",
    )
    .is_empty());
}

/// Verifies fields inside fragments are checked against the fragment's type
/// condition.
#[test]
fn test_fields_on_fragment_type_condition() {
    assert_eq!(
        rule_errors("{ node(id: 1) { ...F } } fragment F on Post { title name }", "FieldsOnCorrectType"),
        vec!["Cannot query field \"name\" on type \"Post\"."],
    );
}

#[test]
fn test_scalar_leafs() {
    assert_eq!(
        rule_errors("{ hello { x } }", "ScalarLeafs"),
        vec!["Field \"hello\" must not have a selection since type \"String\" has no subfields."],
    );
    assert_eq!(
        rule_errors("{ users }", "ScalarLeafs"),
        vec!["Field \"users\" of type \"[User!]!\" must have a selection of subfields. Did you mean \"users { ... }\"?"],
    );
}

#[test]
fn test_field_arguments() {
    assert_eq!(
        rule_errors("{ user { id } }", "ProvidedRequiredArguments"),
        vec!["Field \"user\" argument \"id\" of type \"ID!\" is required but not provided."],
    );
    // A default makes a non-null argument optional; a nullable one is
    // always optional.
    assert!(rule_errors("{ users { id } }", "ProvidedRequiredArguments").is_empty());
    assert_eq!(
        rule_errors("{ user(id: 1, extra: 2) { id } }", "KnownArgumentNames"),
        vec!["Unknown argument \"extra\" on field \"user\" of type \"Query\"."],
    );
    assert_eq!(
        rule_errors("{ user(id: 1, id: 2) { id } }", "UniqueArgumentNames"),
        vec!["There can be only one argument named \"id\"."],
    );
}
