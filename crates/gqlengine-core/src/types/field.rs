use crate::loc;
use crate::types::Parameter;
use crate::types::TypeAnnotation;
use indexmap::IndexMap;
use std::sync::OnceLock;

/// A field defined on an object or interface type.
#[derive(Clone, Debug, PartialEq)]
pub struct Field {
    pub(crate) def_location: loc::SchemaDefLocation,
    pub(crate) name: String,
    pub(crate) parameters: IndexMap<String, Parameter>,
    pub(crate) type_annotation: TypeAnnotation,
}

impl Field {
    /// The implicit `__typename: String!` field every composite type has.
    pub fn typename_meta_field() -> &'static Field {
        static TYPENAME: OnceLock<Field> = OnceLock::new();
        TYPENAME.get_or_init(|| Field {
            def_location: loc::SchemaDefLocation::GraphQLBuiltIn,
            name: "__typename".to_string(),
            parameters: IndexMap::new(),
            type_annotation: TypeAnnotation::named("String", false),
        })
    }

    pub fn def_location(&self) -> &loc::SchemaDefLocation {
        &self.def_location
    }

    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Parameters in declaration order.
    pub fn parameters(&self) -> &IndexMap<String, Parameter> {
        &self.parameters
    }

    pub fn type_annotation(&self) -> &TypeAnnotation {
        &self.type_annotation
    }
}
