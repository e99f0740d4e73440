use crate::loc;
use crate::schema::SchemaBuildError;
use crate::sdl;
use crate::types::GraphQLType;
use crate::types::InputObjectType;
use crate::types::TypeBuilder;
use crate::types::TypeBuilderHelpers;
use crate::types::TypesMapBuilder;
use indexmap::IndexMap;
use inherent::inherent;
use std::path::Path;
use std::path::PathBuf;

type Result<T> = std::result::Result<T, SchemaBuildError>;

#[derive(Debug)]
pub(crate) struct InputObjectTypeBuilder {
    extensions: Vec<(PathBuf, sdl::InputObjectTypeExtension)>,
}

impl InputObjectTypeBuilder {
    pub fn new() -> Self {
        Self {
            extensions: vec![],
        }
    }
}

#[inherent]
impl TypeBuilder for InputObjectTypeBuilder {
    type AstTypeDef = sdl::InputObjectType;
    type AstTypeExtension = sdl::InputObjectTypeExtension;

    pub(crate) fn finalize(mut self, types_builder: &mut TypesMapBuilder) -> Result<()> {
        while let Some((ext_path, ext)) = self.extensions.pop() {
            match types_builder.get_type_mut(ext.name.as_str()) {
                Some(GraphQLType::InputObject(input_type)) =>
                    TypeBuilderHelpers::insert_input_values(
                        ext.name.as_str(),
                        &mut input_type.fields,
                        ext_path.as_path(),
                        &ext.fields,
                    )?,

                Some(non_input_type) =>
                    return Err(SchemaBuildError::InvalidExtensionType {
                        type_name: ext.name.clone(),
                        type_kind: non_input_type.kind_name(),
                        extension_kind: "input object",
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

        let mut fields = IndexMap::new();
        TypeBuilderHelpers::insert_input_values(
            def.name.as_str(),
            &mut fields,
            file_path,
            &def.fields,
        )?;

        types_builder.add_new_type(
            file_position.clone(),
            def.name.as_str(),
            GraphQLType::InputObject(InputObjectType {
                def_location: file_position.into(),
                fields,
                name: def.name.clone(),
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
            Some(GraphQLType::InputObject(input_type)) =>
                TypeBuilderHelpers::insert_input_values(
                    ext.name.as_str(),
                    &mut input_type.fields,
                    file_path,
                    &ext.fields,
                ),

            Some(non_input_type) =>
                Err(SchemaBuildError::InvalidExtensionType {
                    type_name: ext.name.clone(),
                    type_kind: non_input_type.kind_name(),
                    extension_kind: "input object",
                    extension_loc: loc::FilePosition::from_pos(file_path, ext.position).into(),
                }),

            None => {
                self.extensions.push((file_path.to_path_buf(), ext));
                Ok(())
            },
        }
    }
}
