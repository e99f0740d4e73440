use crate::loc;
use crate::schema::SchemaBuildError;
use crate::types::Field;
use crate::types::GraphQLType;
use crate::types::Parameter;
use crate::types::TypeAnnotation;
use indexmap::IndexMap;

type Result<T> = std::result::Result<T, SchemaBuildError>;

/// Accumulates named types while SDL is loaded and checks type references
/// once everything has been seen.
#[derive(Debug)]
pub(crate) struct TypesMapBuilder {
    types: IndexMap<String, GraphQLType>,
}

impl TypesMapBuilder {
    pub fn new() -> Self {
        Self {
            types: IndexMap::from([
                ("Boolean".to_string(), GraphQLType::Bool),
                ("Float".to_string(), GraphQLType::Float),
                ("ID".to_string(), GraphQLType::ID),
                ("Int".to_string(), GraphQLType::Int),
                ("String".to_string(), GraphQLType::String),
            ]),
        }
    }

    pub fn add_new_type(
        &mut self,
        file_position: loc::FilePosition,
        type_name: &str,
        type_: GraphQLType,
    ) -> Result<()> {
        if type_name.starts_with("__") {
            return Err(SchemaBuildError::InvalidDunderPrefixedTypeName {
                def_location: file_position.into(),
                type_name: type_name.to_string(),
            });
        }

        if let Some(existing_type) = self.types.get(type_name) {
            return Err(SchemaBuildError::DuplicateTypeDefinition {
                type_name: type_name.to_string(),
                def1: existing_type.def_location(),
                def2: file_position.into(),
            });
        }

        self.types.insert(type_name.to_string(), type_);
        Ok(())
    }

    pub fn get_type(&self, type_name: &str) -> Option<&GraphQLType> {
        self.types.get(type_name)
    }

    pub fn get_type_mut(&mut self, type_name: &str) -> Option<&mut GraphQLType> {
        self.types.get_mut(type_name)
    }

    /// Finishes the map after checking that every referenced type exists and
    /// has the right kind for where it is referenced.
    pub fn into_types_map(self) -> Result<IndexMap<String, GraphQLType>> {
        for type_ in self.types.values() {
            self.check_type_references(type_)?;
        }
        Ok(self.types)
    }

    fn check_type_references(&self, type_: &GraphQLType) -> Result<()> {
        match type_ {
            GraphQLType::Object(obj) =>
                self.check_fields_and_interfaces(obj.name(), obj.def_location(), obj.fields(), obj.interfaces())?,

            GraphQLType::Interface(iface) =>
                self.check_fields_and_interfaces(
                    iface.name(),
                    iface.def_location(),
                    iface.fields(),
                    iface.interfaces(),
                )?,

            GraphQLType::Union(union_type) => {
                for member in union_type.members() {
                    match self.types.get(member) {
                        Some(GraphQLType::Object(_)) => (),
                        Some(_) => return Err(SchemaBuildError::UnionMemberNotObjectType {
                            union_name: union_type.name().to_string(),
                            member_name: member.clone(),
                        }),
                        None => return Err(SchemaBuildError::UndefinedTypeReference {
                            type_name: member.clone(),
                            referenced_from: union_type.name().to_string(),
                            location: union_type.def_location().clone(),
                        }),
                    }
                }
            },

            GraphQLType::InputObject(input_type) => {
                for field in input_type.fields().values() {
                    self.check_parameter(&format!("{}.{}", input_type.name(), field.name()), field)?;
                }
            },

            GraphQLType::Bool
            | GraphQLType::Enum(_)
            | GraphQLType::Float
            | GraphQLType::ID
            | GraphQLType::Int
            | GraphQLType::Scalar(_)
            | GraphQLType::String => (),
        }
        Ok(())
    }

    fn check_fields_and_interfaces(
        &self,
        type_name: &str,
        def_location: &loc::SchemaDefLocation,
        fields: &IndexMap<String, Field>,
        interfaces: &[String],
    ) -> Result<()> {
        for iface_name in interfaces {
            match self.types.get(iface_name) {
                Some(GraphQLType::Interface(_)) => (),
                Some(_) => return Err(SchemaBuildError::ImplementsNonInterfaceType {
                    type_name: type_name.to_string(),
                    interface_name: iface_name.clone(),
                }),
                None => return Err(SchemaBuildError::UndefinedTypeReference {
                    type_name: iface_name.clone(),
                    referenced_from: type_name.to_string(),
                    location: def_location.clone(),
                }),
            }
        }

        for field in fields.values() {
            let referenced_from = format!("{type_name}.{}", field.name());
            self.check_annotation(
                &referenced_from,
                field.type_annotation(),
                field.def_location(),
                /* want_input = */ false,
            )?;
            for param in field.parameters().values() {
                self.check_parameter(&format!("{referenced_from}({})", param.name()), param)?;
            }
        }
        Ok(())
    }

    fn check_parameter(&self, referenced_from: &str, param: &Parameter) -> Result<()> {
        self.check_annotation(
            referenced_from,
            param.type_annotation(),
            param.def_location(),
            /* want_input = */ true,
        )
    }

    fn check_annotation(
        &self,
        referenced_from: &str,
        annotation: &TypeAnnotation,
        location: &loc::SchemaDefLocation,
        want_input: bool,
    ) -> Result<()> {
        let type_name = annotation.innermost_type_name();
        let Some(referenced) = self.types.get(type_name) else {
            return Err(SchemaBuildError::UndefinedTypeReference {
                type_name: type_name.to_string(),
                referenced_from: referenced_from.to_string(),
                location: location.clone(),
            });
        };

        let kind_ok = if want_input {
            referenced.is_input_type()
        } else {
            referenced.is_output_type()
        };
        if !kind_ok {
            return Err(SchemaBuildError::InvalidTypeKindReference {
                type_name: type_name.to_string(),
                referenced_from: referenced_from.to_string(),
                expected: if want_input { "input" } else { "output" },
            });
        }
        Ok(())
    }
}
