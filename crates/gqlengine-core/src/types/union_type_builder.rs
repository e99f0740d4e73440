use crate::loc;
use crate::schema::SchemaBuildError;
use crate::sdl;
use crate::types::GraphQLType;
use crate::types::TypeBuilder;
use crate::types::TypesMapBuilder;
use crate::types::UnionType;
use inherent::inherent;
use std::path::Path;
use std::path::PathBuf;

type Result<T> = std::result::Result<T, SchemaBuildError>;

#[derive(Debug)]
pub(crate) struct UnionTypeBuilder {
    extensions: Vec<(PathBuf, sdl::UnionTypeExtension)>,
}

impl UnionTypeBuilder {
    pub fn new() -> Self {
        Self {
            extensions: vec![],
        }
    }

    fn insert_members(
        union_name: &str,
        members: &mut Vec<String>,
        location: &loc::SchemaDefLocation,
        ast_members: &[String],
    ) -> Result<()> {
        for member_name in ast_members {
            if members.contains(member_name) {
                return Err(SchemaBuildError::DuplicatedUnionMember {
                    union_name: union_name.to_string(),
                    member_name: member_name.clone(),
                    location: location.clone(),
                });
            }
            members.push(member_name.clone());
        }
        Ok(())
    }
}

#[inherent]
impl TypeBuilder for UnionTypeBuilder {
    type AstTypeDef = sdl::UnionType;
    type AstTypeExtension = sdl::UnionTypeExtension;

    pub(crate) fn finalize(mut self, types_builder: &mut TypesMapBuilder) -> Result<()> {
        while let Some((ext_path, ext)) = self.extensions.pop() {
            let ext_loc: loc::SchemaDefLocation =
                loc::FilePosition::from_pos(&ext_path, ext.position).into();
            match types_builder.get_type_mut(ext.name.as_str()) {
                Some(GraphQLType::Union(union_type)) => Self::insert_members(
                    ext.name.as_str(),
                    &mut union_type.members,
                    &ext_loc,
                    &ext.types,
                )?,

                Some(non_union_type) =>
                    return Err(SchemaBuildError::InvalidExtensionType {
                        type_name: ext.name.clone(),
                        type_kind: non_union_type.kind_name(),
                        extension_kind: "union",
                        extension_loc: ext_loc,
                    }),

                None =>
                    return Err(SchemaBuildError::ExtensionOfUndefinedType {
                        type_name: ext.name.clone(),
                        extension_loc: ext_loc,
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

        let mut members = vec![];
        Self::insert_members(def.name.as_str(), &mut members, &def_location, &def.types)?;

        types_builder.add_new_type(
            file_position,
            def.name.as_str(),
            GraphQLType::Union(UnionType {
                def_location,
                members,
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
        let ext_loc: loc::SchemaDefLocation =
            loc::FilePosition::from_pos(file_path, ext.position).into();
        match types_builder.get_type_mut(ext.name.as_str()) {
            Some(GraphQLType::Union(union_type)) => Self::insert_members(
                ext.name.as_str(),
                &mut union_type.members,
                &ext_loc,
                &ext.types,
            ),

            Some(non_union_type) =>
                Err(SchemaBuildError::InvalidExtensionType {
                    type_name: ext.name.clone(),
                    type_kind: non_union_type.kind_name(),
                    extension_kind: "union",
                    extension_loc: ext_loc,
                }),

            None => {
                self.extensions.push((file_path.to_path_buf(), ext));
                Ok(())
            },
        }
    }
}
