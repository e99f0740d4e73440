use crate::loc;
use crate::schema::SchemaBuildError;
use crate::sdl;
use crate::types::GraphQLType;
use crate::types::InterfaceType;
use crate::types::ObjectOrInterfaceTypeData;
use crate::types::TypeBuilder;
use crate::types::TypeBuilderHelpers;
use crate::types::TypesMapBuilder;
use indexmap::IndexMap;
use inherent::inherent;
use std::path::Path;
use std::path::PathBuf;

type Result<T> = std::result::Result<T, SchemaBuildError>;

#[derive(Debug)]
pub(crate) struct InterfaceTypeBuilder {
    extensions: Vec<(PathBuf, sdl::InterfaceTypeExtension)>,
}

impl InterfaceTypeBuilder {
    pub fn new() -> Self {
        Self {
            extensions: vec![],
        }
    }

    fn merge_type_extension(
        &mut self,
        iface_type: &mut InterfaceType,
        ext_file_path: &Path,
        ext: sdl::InterfaceTypeExtension,
    ) -> Result<()> {
        let ext_loc: loc::SchemaDefLocation =
            loc::FilePosition::from_pos(ext_file_path, ext.position).into();
        TypeBuilderHelpers::insert_interfaces(
            ext.name.as_str(),
            &mut iface_type.0.interfaces,
            &ext_loc,
            &ext.implements_interfaces,
        )?;
        TypeBuilderHelpers::insert_fields(
            ext.name.as_str(),
            &mut iface_type.0.fields,
            ext_file_path,
            &ext.fields,
        )
    }
}

#[inherent]
impl TypeBuilder for InterfaceTypeBuilder {
    type AstTypeDef = sdl::InterfaceType;
    type AstTypeExtension = sdl::InterfaceTypeExtension;

    pub(crate) fn finalize(mut self, types_builder: &mut TypesMapBuilder) -> Result<()> {
        while let Some((ext_path, ext)) = self.extensions.pop() {
            match types_builder.get_type_mut(ext.name.as_str()) {
                Some(GraphQLType::Interface(iface_type)) =>
                    self.merge_type_extension(iface_type, ext_path.as_path(), ext)?,

                Some(non_iface_type) =>
                    return Err(SchemaBuildError::InvalidExtensionType {
                        type_name: ext.name.clone(),
                        type_kind: non_iface_type.kind_name(),
                        extension_kind: "interface",
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
        let def_location: loc::SchemaDefLocation = file_position.clone().into();

        let mut fields = IndexMap::new();
        TypeBuilderHelpers::insert_fields(def.name.as_str(), &mut fields, file_path, &def.fields)?;

        let mut interfaces = vec![];
        TypeBuilderHelpers::insert_interfaces(
            def.name.as_str(),
            &mut interfaces,
            &def_location,
            &def.implements_interfaces,
        )?;

        types_builder.add_new_type(
            file_position,
            def.name.as_str(),
            GraphQLType::Interface(InterfaceType(ObjectOrInterfaceTypeData {
                def_location,
                fields,
                interfaces,
                name: def.name.clone(),
            })),
        )
    }

    pub(crate) fn visit_type_extension(
        &mut self,
        types_builder: &mut TypesMapBuilder,
        file_path: &Path,
        ext: <Self as TypeBuilder>::AstTypeExtension,
    ) -> Result<()> {
        match types_builder.get_type_mut(ext.name.as_str()) {
            Some(GraphQLType::Interface(iface_type)) =>
                self.merge_type_extension(iface_type, file_path, ext),

            Some(non_iface_type) =>
                Err(SchemaBuildError::InvalidExtensionType {
                    type_name: ext.name.clone(),
                    type_kind: non_iface_type.kind_name(),
                    extension_kind: "interface",
                    extension_loc: loc::FilePosition::from_pos(file_path, ext.position).into(),
                }),

            None => {
                self.extensions.push((file_path.to_path_buf(), ext));
                Ok(())
            },
        }
    }
}
