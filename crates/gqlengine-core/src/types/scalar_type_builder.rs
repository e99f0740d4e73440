use crate::loc;
use crate::schema::SchemaBuildError;
use crate::sdl;
use crate::types::GraphQLType;
use crate::types::ScalarType;
use crate::types::TypeBuilder;
use crate::types::TypesMapBuilder;
use inherent::inherent;
use std::path::Path;
use std::path::PathBuf;

type Result<T> = std::result::Result<T, SchemaBuildError>;

/// Scalar extensions only add directives, which carry no execution meaning
/// here, so an extension is only checked against the type it names.
#[derive(Debug)]
pub(crate) struct ScalarTypeBuilder {
    extensions: Vec<(PathBuf, sdl::ScalarTypeExtension)>,
}

impl ScalarTypeBuilder {
    pub fn new() -> Self {
        Self {
            extensions: vec![],
        }
    }

    fn check_extension_target(
        target: Option<&GraphQLType>,
        file_path: &Path,
        ext: &sdl::ScalarTypeExtension,
    ) -> Result<()> {
        match target {
            Some(GraphQLType::Scalar(_)) => Ok(()),
            Some(non_scalar_type) => Err(SchemaBuildError::InvalidExtensionType {
                type_name: ext.name.clone(),
                type_kind: non_scalar_type.kind_name(),
                extension_kind: "scalar",
                extension_loc: loc::FilePosition::from_pos(file_path, ext.position).into(),
            }),
            None => Err(SchemaBuildError::ExtensionOfUndefinedType {
                type_name: ext.name.clone(),
                extension_loc: loc::FilePosition::from_pos(file_path, ext.position).into(),
            }),
        }
    }
}

#[inherent]
impl TypeBuilder for ScalarTypeBuilder {
    type AstTypeDef = sdl::ScalarType;
    type AstTypeExtension = sdl::ScalarTypeExtension;

    pub(crate) fn finalize(mut self, types_builder: &mut TypesMapBuilder) -> Result<()> {
        while let Some((ext_path, ext)) = self.extensions.pop() {
            let target = types_builder.get_type(ext.name.as_str());
            Self::check_extension_target(target, ext_path.as_path(), &ext)?;
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
        types_builder.add_new_type(
            file_position.clone(),
            def.name.as_str(),
            GraphQLType::Scalar(ScalarType {
                def_location: file_position.into(),
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
        match types_builder.get_type(ext.name.as_str()) {
            None => {
                self.extensions.push((file_path.to_path_buf(), ext));
                Ok(())
            },
            target => Self::check_extension_target(target, file_path, &ext),
        }
    }
}
