//! `graphql-parser` schema AST types, specialised to owned strings.

pub(crate) type Definition = graphql_parser::schema::Definition<'static, String>;
pub(crate) type DirectiveDefinition = graphql_parser::schema::DirectiveDefinition<'static, String>;
pub(crate) type EnumType = graphql_parser::schema::EnumType<'static, String>;
pub(crate) type EnumTypeExtension = graphql_parser::schema::EnumTypeExtension<'static, String>;
pub(crate) type EnumValue = graphql_parser::schema::EnumValue<'static, String>;
pub(crate) type Field = graphql_parser::schema::Field<'static, String>;
pub(crate) type InputObjectType = graphql_parser::schema::InputObjectType<'static, String>;
pub(crate) type InputObjectTypeExtension =
    graphql_parser::schema::InputObjectTypeExtension<'static, String>;
pub(crate) type InputValue = graphql_parser::schema::InputValue<'static, String>;
pub(crate) type InterfaceType = graphql_parser::schema::InterfaceType<'static, String>;
pub(crate) type InterfaceTypeExtension =
    graphql_parser::schema::InterfaceTypeExtension<'static, String>;
pub(crate) type ObjectType = graphql_parser::schema::ObjectType<'static, String>;
pub(crate) type ObjectTypeExtension = graphql_parser::schema::ObjectTypeExtension<'static, String>;
pub(crate) type ScalarType = graphql_parser::schema::ScalarType<'static, String>;
pub(crate) type ScalarTypeExtension = graphql_parser::schema::ScalarTypeExtension<'static, String>;
pub(crate) type SchemaDefinition = graphql_parser::schema::SchemaDefinition<'static, String>;
pub(crate) type Type = graphql_parser::schema::Type<'static, String>;
pub(crate) type TypeDefinition = graphql_parser::schema::TypeDefinition<'static, String>;
pub(crate) type TypeExtension = graphql_parser::schema::TypeExtension<'static, String>;
pub(crate) type UnionType = graphql_parser::schema::UnionType<'static, String>;
pub(crate) type UnionTypeExtension = graphql_parser::schema::UnionTypeExtension<'static, String>;
pub(crate) type Value = graphql_parser::schema::Value<'static, String>;
