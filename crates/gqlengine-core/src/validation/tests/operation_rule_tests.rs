use crate::tests::test_utils::doubling_fragment_chain;
use crate::tests::test_utils::parse;
use crate::tests::test_utils::rule_errors;
use crate::tests::test_utils::rule_errors_with_depth;
use crate::tests::test_utils::validate;
use gqlengine_parser::Location;

/// Verifies that a well-formed document produces no errors.
#[test]
fn test_valid_document() {
    let document = parse(
        "query Q($id: ID!) { user(id: $id) { ...UserParts friends { id } } }
         fragment UserParts on User { id name @include(if: true) }",
    );
    let outcome = validate(&document, 0);
    assert!(outcome.is_valid(), "{:?}", outcome.errors);
}

/// Verifies `UniqueOperationNames` with the locations of both names.
#[test]
fn test_unique_operation_names() {
    let document = parse("query A { hello }\nquery A { hello }");
    let outcome = validate(&document, 0);
    let err = outcome
        .errors
        .iter()
        .find(|err| err.rule == Some("UniqueOperationNames"))
        .expect("duplicate reported");
    assert_eq!(err.message, "There can be only one operation named \"A\".");
    assert_eq!(err.locations, vec![Location::new(1, 7), Location::new(2, 7)]);
}

#[test]
fn test_lone_anonymous_operation() {
    assert_eq!(
        rule_errors("{ hello }\nquery B { hello }", "LoneAnonymousOperation"),
        vec!["This anonymous operation must be the only defined operation."],
    );
    assert!(rule_errors("{ hello }", "LoneAnonymousOperation").is_empty());
}

#[test]
fn test_known_operation_types() {
    assert_eq!(
        rule_errors("subscription { hello }", "KnownOperationTypes"),
        vec!["Schema is not configured for subscriptions."],
    );
    assert!(rule_errors("mutation { setName(id: 1, name: \"x\") { id } }", "KnownOperationTypes").is_empty());
}

/// Verifies `KnownDirectives` and directive argument checks.
#[test]
fn test_known_directives() {
    assert_eq!(
        rule_errors("{ hello @nope }", "KnownDirectives"),
        vec!["Unknown directive \"@nope\"."],
    );
    assert!(rule_errors("{ hello @auth(role: ADMIN) }", "KnownDirectives").is_empty());
    assert_eq!(
        rule_errors("{ hello @skip }", "ProvidedRequiredArguments"),
        vec!["Directive \"@skip\" argument \"if\" of type \"Boolean!\" is required but not provided."],
    );
    assert_eq!(
        rule_errors("{ hello @skip(if: true, unless: false) }", "KnownArgumentNames"),
        vec!["Unknown argument \"unless\" on directive \"@skip\"."],
    );
}

/// Verifies `MaxDepth`, including depth through fragments and that `0`
/// disables the check.
#[test]
fn test_max_depth() {
    let query = "{ user(id: 1) { friends { friends { name } } } }";
    assert_eq!(
        rule_errors_with_depth(query, "MaxDepth", 3),
        vec!["Field \"name\" has depth 4 that exceeds max depth 3"],
    );
    assert!(rule_errors_with_depth(query, "MaxDepth", 4).is_empty());
    assert!(rule_errors_with_depth(query, "MaxDepth", 0).is_empty());

    let via_fragment = "{ user(id: 1) { ...F } } fragment F on User { friends { name } }";
    assert_eq!(
        rule_errors_with_depth(via_fragment, "MaxDepth", 2),
        vec!["Field \"name\" has depth 3 that exceeds max depth 2"],
    );
}

/// Verifies that a fragment reached again at a greater depth is checked
/// at that depth.
#[test]
fn test_max_depth_fragment_reached_deeper() {
    let query = "{ user(id: 1) { ...F friends { friends { ...F } } } }
                 fragment F on User { friends { name } }";
    assert_eq!(
        rule_errors_with_depth(query, "MaxDepth", 4),
        vec!["Field \"name\" has depth 5 that exceeds max depth 4"],
    );
}

/// Verifies that the depth check over fragments spread many times over
/// visits each one once per depth.
#[test]
fn test_max_depth_on_deep_fragment_dag() {
    let query = doubling_fragment_chain(30);
    assert!(rule_errors_with_depth(&query, "MaxDepth", 100).is_empty());
    assert_eq!(
        rule_errors_with_depth(&query, "MaxDepth", 5),
        vec![
            "Field \"id\" has depth 6 that exceeds max depth 5",
            "Field \"friends\" has depth 6 that exceeds max depth 5",
        ],
    );
}

/// Verifies that the depth check terminates on cyclic fragments.
#[test]
fn test_max_depth_with_fragment_cycle() {
    let query = "{ user(id: 1) { ...A } }
                 fragment A on User { friends { ...B } }
                 fragment B on User { friends { ...A } }";
    assert!(rule_errors_with_depth(query, "MaxDepth", 10).is_empty());
    assert_eq!(rule_errors(query, "NoFragmentCycles").len(), 1);
}
