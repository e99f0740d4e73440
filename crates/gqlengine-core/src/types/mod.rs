mod directive;
mod enum_type;
mod enum_type_builder;
mod field;
mod graphql_type;
mod input_object_type;
mod input_object_type_builder;
mod interface_type_builder;
mod object_type;
mod object_type_builder;
mod parameter;
mod scalar_type;
mod scalar_type_builder;
mod type_annotation;
mod type_builder;
mod types_map_builder;
mod union_type;
mod union_type_builder;

pub use directive::Directive;
pub use enum_type::EnumType;
pub use enum_type::EnumValue;
pub(crate) use enum_type_builder::EnumTypeBuilder;
pub use field::Field;
pub use graphql_type::GraphQLType;
pub use input_object_type::InputObjectType;
pub(crate) use input_object_type_builder::InputObjectTypeBuilder;
pub(crate) use interface_type_builder::InterfaceTypeBuilder;
pub use object_type::InterfaceType;
pub use object_type::ObjectType;
use object_type::ObjectOrInterfaceTypeData;
pub(crate) use object_type_builder::ObjectTypeBuilder;
pub use parameter::Parameter;
pub use scalar_type::ScalarType;
pub(crate) use scalar_type_builder::ScalarTypeBuilder;
pub use type_annotation::TypeAnnotation;
use type_builder::TypeBuilder;
pub(crate) use type_builder::TypeBuilderHelpers;
pub(crate) use types_map_builder::TypesMapBuilder;
pub use union_type::UnionType;
pub(crate) use union_type_builder::UnionTypeBuilder;

#[cfg(test)]
mod tests;
