use crate::loc;
use crate::schema::SchemaBuildError;
use crate::sdl;
use crate::types::EnumType;
use crate::types::EnumValue;
use crate::types::GraphQLType;
use crate::types::TypeBuilder;
use crate::types::TypesMapBuilder;
use indexmap::IndexMap;
use inherent::inherent;
use std::path::Path;
use std::path::PathBuf;

type Result<T> = std::result::Result<T, SchemaBuildError>;

#[derive(Debug)]
pub(crate) struct EnumTypeBuilder {
    extensions: Vec<(PathBuf, sdl::EnumTypeExtension)>,
}

impl EnumTypeBuilder {
    pub fn new() -> Self {
        Self {
            extensions: vec![],
        }
    }

    fn insert_values(
        enum_name: &str,
        values: &mut IndexMap<String, EnumValue>,
        file_path: &Path,
        ast_values: &[sdl::EnumValue],
    ) -> Result<()> {
        for ast_value in ast_values {
            let def_location: loc::SchemaDefLocation =
                loc::FilePosition::from_pos(file_path, ast_value.position).into();
            if let Some(existing) = values.get(ast_value.name.as_str()) {
                return Err(SchemaBuildError::DuplicateEnumValueDefinition {
                    enum_name: enum_name.to_string(),
                    value_name: ast_value.name.clone(),
                    def1: existing.def_location.clone(),
                    def2: def_location,
                });
            }
            values.insert(ast_value.name.clone(), EnumValue {
                def_location,
                name: ast_value.name.clone(),
            });
        }
        Ok(())
    }
}

#[inherent]
impl TypeBuilder for EnumTypeBuilder {
    type AstTypeDef = sdl::EnumType;
    type AstTypeExtension = sdl::EnumTypeExtension;

    pub(crate) fn finalize(mut self, types_builder: &mut TypesMapBuilder) -> Result<()> {
        while let Some((ext_path, ext)) = self.extensions.pop() {
            match types_builder.get_type_mut(ext.name.as_str()) {
                Some(GraphQLType::Enum(enum_type)) => Self::insert_values(
                    ext.name.as_str(),
                    &mut enum_type.values,
                    ext_path.as_path(),
                    &ext.values,
                )?,

                Some(non_enum_type) =>
                    return Err(SchemaBuildError::InvalidExtensionType {
                        type_name: ext.name.clone(),
                        type_kind: non_enum_type.kind_name(),
                        extension_kind: "enum",
                        extension_loc: loc::FilePosition::from_pos(&ext_path, ext.position).into(),
                    }),

                None =>
                    return Err(SchemaBuildError::ExtensionOfUndefinedType {
                        type_name: ext.name.clone(),
                        extension_loc: loc::FilePosition::from_pos(&ext_path, ext.position).into(),
                    }),
            }
        }
        Ok(())
    }

    pub(crate) fn visit_type_def(
        &mut self,
        types_builder: &mut TypesMapBuilder,
        file_path: &Path,
        def: <Self as TypeBuilder>::AstTypeDef,
    ) -> Result<()> {
        let file_position = loc::FilePosition::from_pos(file_path, def.position);
        if def.values.is_empty() {
            return Err(SchemaBuildError::EnumWithNoVariants {
                type_name: def.name.clone(),
                location: file_position.into(),
            });
        }

        let mut values = IndexMap::new();
        Self::insert_values(def.name.as_str(), &mut values, file_path, &def.values)?;

        types_builder.add_new_type(
            file_position.clone(),
            def.name.as_str(),
            GraphQLType::Enum(EnumType {
                def_location: file_position.into(),
                name: def.name.clone(),
                values,
            }),
        )
    }

    pub(crate) fn visit_type_extension(
        &mut self,
        types_builder: &mut TypesMapBuilder,
        file_path: &Path,
        ext: <Self as TypeBuilder>::AstTypeExtension,
    ) -> Result<()> {
        match types_builder.get_type_mut(ext.name.as_str()) {
            Some(GraphQLType::Enum(enum_type)) => Self::insert_values(
                ext.name.as_str(),
                &mut enum_type.values,
                file_path,
                &ext.values,
            ),

            Some(non_enum_type) =>
                Err(SchemaBuildError::InvalidExtensionType {
                    type_name: ext.name.clone(),
                    type_kind: non_enum_type.kind_name(),
                    extension_kind: "enum",
                    extension_loc: loc::FilePosition::from_pos(file_path, ext.position).into(),
                }),

            None => {
                self.extensions.push((file_path.to_path_buf(), ext));
                Ok(())
            },
        }
    }
}
