use crate::TypeResolutionError;
use crate::tests::test_utils::test_schema;
use crate::types::Field;
use crate::types::TypeAnnotation;
use gqlengine_parser::Location;
use gqlengine_parser::ast::Name;
use gqlengine_parser::ast::TypeRef;

fn named(name: &str) -> TypeRef {
    TypeRef::Named(Name::new(name, Location::new(1, 12)))
}

fn non_null(inner: TypeRef) -> TypeRef {
    TypeRef::NonNull(Box::new(inner))
}

fn list(inner: TypeRef) -> TypeRef {
    TypeRef::List(Box::new(inner))
}

/// Verifies that field lookup answers declared fields and the `__typename`
/// meta field, and nothing else.
#[test]
fn test_field_lookup() {
    let schema = test_schema();

    let name = schema.field("User", "name").expect("User.name");
    assert_eq!(name.type_annotation(), &TypeAnnotation::named("String", false));

    let iface_field = schema.field("Node", "id").expect("Node.id");
    assert_eq!(iface_field.type_annotation().to_string(), "ID!");

    assert!(std::ptr::eq(
        schema.field("User", "__typename").expect("meta field"),
        Field::typename_meta_field(),
    ));
    assert!(schema.field("SearchResult", "__typename").is_some());
    assert!(schema.field("SearchResult", "id").is_none());
    assert!(schema.field("User", "missing").is_none());
    assert!(schema.field("Role", "__typename").is_none());
    assert!(schema.field("Nope", "id").is_none());
}

/// Verifies possible-type checks for objects, interfaces and unions.
#[test]
fn test_is_possible_type() {
    let schema = test_schema();
    assert!(schema.is_possible_type("User", "User"));
    assert!(!schema.is_possible_type("User", "Post"));
    assert!(schema.is_possible_type("Node", "User"));
    assert!(schema.is_possible_type("Node", "Post"));
    assert!(schema.is_possible_type("SearchResult", "Post"));
    assert!(!schema.is_possible_type("SearchResult", "Query"));
    assert!(!schema.is_possible_type("Node", "Role"));
    assert!(!schema.is_possible_type("Role", "Role"));

    let node_impls: Vec<&str> = schema.possible_types("Node").iter().map(|t| t.name()).collect();
    assert_eq!(node_impls, vec!["User", "Post"]);
}

/// Verifies that declared variable types resolve with their nullability.
#[test]
fn test_resolve_type_annotation() {
    let schema = test_schema();
    let annot = schema
        .resolve_type_annotation(&non_null(list(non_null(named("Int")))))
        .expect("resolves");
    assert_eq!(annot.to_string(), "[Int!]!");
    assert!(!annot.is_nullable());
    assert_eq!(annot.innermost_type_name(), "Int");

    let input = schema.resolve_type_annotation(&named("EchoInput")).expect("input type");
    assert!(input.is_nullable());
}

/// Verifies that unknown and non-input variable types are rejected with the
/// location of the type name.
#[test]
fn test_resolve_type_annotation_errors() {
    let schema = test_schema();
    assert_eq!(
        schema.resolve_type_annotation(&named("Missing")),
        Err(TypeResolutionError::UnknownType {
            type_name: "Missing".to_string(),
            location: Location::new(1, 12),
        }),
    );

    let err = schema.resolve_type_annotation(&non_null(named("User"))).unwrap_err();
    assert_eq!(err.to_string(), "Variable type \"User!\" is not an input type.");
    assert_eq!(err.location(), Location::new(1, 12));
}
