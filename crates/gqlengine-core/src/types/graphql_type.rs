use crate::loc;
use crate::types::EnumType;
use crate::types::Field;
use crate::types::InputObjectType;
use crate::types::InterfaceType;
use crate::types::ObjectType;
use crate::types::ScalarType;
use crate::types::UnionType;
use indexmap::IndexMap;

/// Represents a defined GraphQL type
#[derive(Clone, Debug, PartialEq)]
pub enum GraphQLType {
    Bool,
    Enum(EnumType),
    Float,
    ID,
    InputObject(InputObjectType),
    Int,
    Interface(InterfaceType),
    Object(ObjectType),
    Scalar(ScalarType),
    String,
    Union(UnionType),
}

impl GraphQLType {
    pub fn def_location(&self) -> loc::SchemaDefLocation {
        match self {
            GraphQLType::Bool
            | GraphQLType::Float
            | GraphQLType::ID
            | GraphQLType::Int
            | GraphQLType::String => loc::SchemaDefLocation::GraphQLBuiltIn,
            GraphQLType::Enum(t) => t.def_location().clone(),
            GraphQLType::InputObject(t) => t.def_location().clone(),
            GraphQLType::Interface(t) => t.def_location().clone(),
            GraphQLType::Object(t) => t.def_location().clone(),
            GraphQLType::Scalar(t) => t.def_location().clone(),
            GraphQLType::Union(t) => t.def_location().clone(),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            GraphQLType::Bool => "Boolean",
            GraphQLType::Float => "Float",
            GraphQLType::ID => "ID",
            GraphQLType::Int => "Int",
            GraphQLType::String => "String",
            GraphQLType::Enum(t) => t.name(),
            GraphQLType::InputObject(t) => t.name(),
            GraphQLType::Interface(t) => t.name(),
            GraphQLType::Object(t) => t.name(),
            GraphQLType::Scalar(t) => t.name(),
            GraphQLType::Union(t) => t.name(),
        }
    }

    /// Lower-case kind name used in error messages.
    pub fn kind_name(&self) -> &'static str {
        match self {
            GraphQLType::Bool
            | GraphQLType::Float
            | GraphQLType::ID
            | GraphQLType::Int
            | GraphQLType::String
            | GraphQLType::Scalar(_) => "scalar",
            GraphQLType::Enum(_) => "enum",
            GraphQLType::InputObject(_) => "input object",
            GraphQLType::Interface(_) => "interface",
            GraphQLType::Object(_) => "object",
            GraphQLType::Union(_) => "union",
        }
    }

    /// Object, interface, or union: types that take a selection set.
    pub fn is_composite(&self) -> bool {
        matches!(
            self,
            GraphQLType::Object(_) | GraphQLType::Interface(_) | GraphQLType::Union(_)
        )
    }

    /// Interface or union.
    pub fn is_abstract(&self) -> bool {
        matches!(self, GraphQLType::Interface(_) | GraphQLType::Union(_))
    }

    /// Scalar or enum.
    pub fn is_leaf(&self) -> bool {
        !self.is_composite() && !matches!(self, GraphQLType::InputObject(_))
    }

    pub fn is_input_type(&self) -> bool {
        self.is_leaf() || matches!(self, GraphQLType::InputObject(_))
    }

    pub fn is_output_type(&self) -> bool {
        !matches!(self, GraphQLType::InputObject(_))
    }

    /// The fields of an object or interface type.
    pub fn fields(&self) -> Option<&IndexMap<String, Field>> {
        match self {
            GraphQLType::Object(t) => Some(t.fields()),
            GraphQLType::Interface(t) => Some(t.fields()),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&ObjectType> {
        match self {
            GraphQLType::Object(t) => Some(t),
            _ => None,
        }
    }

    pub fn as_enum(&self) -> Option<&EnumType> {
        match self {
            GraphQLType::Enum(t) => Some(t),
            _ => None,
        }
    }

    pub fn as_input_object(&self) -> Option<&InputObjectType> {
        match self {
            GraphQLType::InputObject(t) => Some(t),
            _ => None,
        }
    }
}
