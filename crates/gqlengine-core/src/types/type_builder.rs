use crate::loc;
use crate::schema::SchemaBuildError;
use crate::sdl;
use crate::types::Field;
use crate::types::Parameter;
use crate::types::TypeAnnotation;
use crate::types::TypesMapBuilder;
use indexmap::IndexMap;
use std::path::Path;

type Result<T> = std::result::Result<T, SchemaBuildError>;

/// Collects the definitions and extensions of one kind of type while SDL is
/// loaded, then merges deferred extensions in `finalize()`.
pub(crate) trait TypeBuilder: Sized {
    type AstTypeDef;
    type AstTypeExtension;

    fn finalize(self, types_map_builder: &mut TypesMapBuilder) -> Result<()>;

    fn visit_type_def(
        &mut self,
        types_map_builder: &mut TypesMapBuilder,
        file_path: &Path,
        def: Self::AstTypeDef,
    ) -> Result<()>;

    /// Extensions of a type that has not been seen yet are kept until
    /// `finalize()`, since SDL may extend a type before defining it.
    fn visit_type_extension(
        &mut self,
        types_map_builder: &mut TypesMapBuilder,
        file_path: &Path,
        ext: Self::AstTypeExtension,
    ) -> Result<()>;
}

pub(crate) struct TypeBuilderHelpers;
impl TypeBuilderHelpers {
    /// Adds `ast_fields` to `fields`, rejecting duplicates and `__` names.
    pub fn insert_fields(
        type_name: &str,
        fields: &mut IndexMap<String, Field>,
        file_path: &Path,
        ast_fields: &[sdl::Field],
    ) -> Result<()> {
        for ast_field in ast_fields {
            let def_location: loc::SchemaDefLocation =
                loc::FilePosition::from_pos(file_path, ast_field.position).into();

            if ast_field.name.starts_with("__") {
                return Err(SchemaBuildError::InvalidDunderPrefixedFieldName {
                    def_location,
                    field_name: ast_field.name.clone(),
                    type_name: type_name.to_string(),
                });
            }
            if let Some(existing) = fields.get(ast_field.name.as_str()) {
                return Err(SchemaBuildError::DuplicateFieldNameDefinition {
                    type_name: type_name.to_string(),
                    field_name: ast_field.name.clone(),
                    field_def1: existing.def_location.clone(),
                    field_def2: def_location,
                });
            }

            let mut parameters = IndexMap::new();
            Self::insert_input_values(
                &format!("{type_name}.{}", ast_field.name),
                &mut parameters,
                file_path,
                &ast_field.arguments,
            )?;

            fields.insert(ast_field.name.clone(), Field {
                def_location,
                name: ast_field.name.clone(),
                parameters,
                type_annotation: TypeAnnotation::from_schema_ast(&ast_field.field_type),
            });
        }
        Ok(())
    }

    /// Adds parameters or input fields, rejecting duplicates. `owner` names
    /// the field, directive, or input type they belong to.
    pub fn insert_input_values(
        owner: &str,
        values: &mut IndexMap<String, Parameter>,
        file_path: &Path,
        ast_values: &[sdl::InputValue],
    ) -> Result<()> {
        for input_val in ast_values {
            let param = Parameter::from_ast(file_path, input_val);
            if let Some(existing) = values.get(input_val.name.as_str()) {
                return Err(SchemaBuildError::DuplicateInputValueDefinition {
                    owner: owner.to_string(),
                    name: input_val.name.clone(),
                    def1: existing.def_location.clone(),
                    def2: param.def_location,
                });
            }
            values.insert(input_val.name.clone(), param);
        }
        Ok(())
    }

    /// Appends implemented interface names, rejecting repeats.
    pub fn insert_interfaces(
        type_name: &str,
        interfaces: &mut Vec<String>,
        def_location: &loc::SchemaDefLocation,
        ast_interfaces: &[String],
    ) -> Result<()> {
        for iface_name in ast_interfaces {
            // Object type declarations must declare a unique list of
            // interfaces they implement.
            if interfaces.contains(iface_name) {
                return Err(SchemaBuildError::DuplicateInterfaceImplementsDeclaration {
                    def_location: def_location.clone(),
                    duplicated_interface_name: iface_name.clone(),
                    type_name: type_name.to_string(),
                });
            }
            interfaces.push(iface_name.clone());
        }
        Ok(())
    }
}
