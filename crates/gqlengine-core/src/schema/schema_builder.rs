use crate::loc;
use crate::schema::Schema;
use crate::sdl;
use crate::types::Directive;
use crate::types::EnumTypeBuilder;
use crate::types::GraphQLType;
use crate::types::InputObjectTypeBuilder;
use crate::types::InterfaceTypeBuilder;
use crate::types::ObjectTypeBuilder;
use crate::types::ScalarTypeBuilder;
use crate::types::TypeBuilderHelpers;
use crate::types::TypesMapBuilder;
use crate::types::UnionTypeBuilder;
use gqlengine_parser::ast::OperationKind;
use indexmap::IndexMap;
use std::path::Path;
use std::path::PathBuf;
use thiserror::Error;

type Result<T> = std::result::Result<T, SchemaBuildError>;

const BUILTIN_DIRECTIVE_NAMES: [&str; 4] = ["skip", "include", "deprecated", "specifiedBy"];

/// Utility for building a [Schema] from one or more SDL sources.
///
/// Definitions may arrive in any order across sources: a type can be
/// referenced (or extended) before it is defined. All cross-references are
/// checked by [`SchemaBuilder::build()`].
#[derive(Debug)]
pub struct SchemaBuilder {
    directive_defs: IndexMap<String, Directive>,
    enum_builder: EnumTypeBuilder,
    inputobject_builder: InputObjectTypeBuilder,
    interface_builder: InterfaceTypeBuilder,
    query_type: Option<NamedTypeDefLocation>,
    mutation_type: Option<NamedTypeDefLocation>,
    object_builder: ObjectTypeBuilder,
    scalar_builder: ScalarTypeBuilder,
    str_load_counter: u16,
    subscription_type: Option<NamedTypeDefLocation>,
    types_map_builder: TypesMapBuilder,
    union_builder: UnionTypeBuilder,
}

impl SchemaBuilder {
    pub fn build(mut self) -> Result<Schema> {
        self.inject_builtin_directives();

        self.enum_builder.finalize(&mut self.types_map_builder)?;
        self.inputobject_builder.finalize(&mut self.types_map_builder)?;
        self.interface_builder.finalize(&mut self.types_map_builder)?;
        self.object_builder.finalize(&mut self.types_map_builder)?;
        self.scalar_builder.finalize(&mut self.types_map_builder)?;
        self.union_builder.finalize(&mut self.types_map_builder)?;

        let types = self.types_map_builder.into_types_map()?;

        let query_type = match self.query_type.take() {
            Some(def) => Self::check_root_type(&types, OperationKind::Query, def)?,
            None => match types.get("Query") {
                Some(GraphQLType::Object(_)) => "Query".to_string(),
                _ => return Err(SchemaBuildError::NoQueryOperationTypeDefined),
            },
        };

        let mutation_type = match self.mutation_type.take() {
            Some(def) => Some(Self::check_root_type(&types, OperationKind::Mutation, def)?),
            None => Self::default_root_type(&types, "Mutation"),
        };

        let subscription_type = match self.subscription_type.take() {
            Some(def) => Some(Self::check_root_type(&types, OperationKind::Subscription, def)?),
            None => Self::default_root_type(&types, "Subscription"),
        };

        Ok(Schema {
            directive_defs: self.directive_defs,
            query_type,
            mutation_type,
            subscription_type,
            types,
        })
    }

    pub fn new() -> Self {
        Self {
            directive_defs: IndexMap::new(),
            enum_builder: EnumTypeBuilder::new(),
            inputobject_builder: InputObjectTypeBuilder::new(),
            interface_builder: InterfaceTypeBuilder::new(),
            query_type: None,
            mutation_type: None,
            object_builder: ObjectTypeBuilder::new(),
            scalar_builder: ScalarTypeBuilder::new(),
            str_load_counter: 0,
            subscription_type: None,
            types_map_builder: TypesMapBuilder::new(),
            union_builder: UnionTypeBuilder::new(),
        }
    }

    pub fn load_file(self, file_path: impl AsRef<Path>) -> Result<Self> {
        self.load_files(vec![file_path])
    }

    pub fn load_files(mut self, file_paths: Vec<impl AsRef<Path>>) -> Result<Self> {
        for file_path in file_paths {
            let file_path = file_path.as_ref();
            let file_content = std::fs::read_to_string(file_path)
                .map_err(|err| SchemaBuildError::SchemaFileReadError {
                    file: file_path.to_path_buf(),
                    err: err.to_string(),
                })?;
            self = self.load_str(Some(file_path.to_path_buf()), file_content.as_str())?;
        }
        Ok(self)
    }

    /// Loads SDL from a string. Sources without a path are named
    /// `str://0`, `str://1`, ... in locations and errors.
    pub fn load_str(mut self, file_path: Option<PathBuf>, content: &str) -> Result<Self> {
        let file_path = match file_path {
            Some(file_path) => file_path,
            None => {
                let ctr = self.str_load_counter;
                self.str_load_counter += 1;
                PathBuf::from(format!("str://{ctr}"))
            },
        };

        let ast_doc = graphql_parser::schema::parse_schema::<String>(content)
            .map_err(|err| SchemaBuildError::ParseError {
                file: file_path.to_owned(),
                err: err.to_string(),
            })?
            .into_static();

        for def in ast_doc.definitions {
            self.visit_ast_def(file_path.as_path(), def)?;
        }

        Ok(self)
    }

    fn check_root_type(
        types: &IndexMap<String, GraphQLType>,
        operation: OperationKind,
        def: NamedTypeDefLocation,
    ) -> Result<String> {
        match types.get(def.type_name.as_str()) {
            Some(GraphQLType::Object(_)) => Ok(def.type_name),
            Some(other) => Err(SchemaBuildError::RootOperationTypeNotObject {
                operation,
                type_name: def.type_name,
                type_kind: other.kind_name(),
            }),
            None => Err(SchemaBuildError::UndefinedRootOperationType {
                operation,
                type_name: def.type_name,
                location: def.def_location,
            }),
        }
    }

    fn default_root_type(types: &IndexMap<String, GraphQLType>, type_name: &str) -> Option<String> {
        match types.get(type_name) {
            Some(GraphQLType::Object(_)) => Some(type_name.to_string()),
            _ => None,
        }
    }

    fn inject_builtin_directives(&mut self) {
        for directive in Directive::builtins() {
            self.directive_defs.insert(directive.name.clone(), directive);
        }
    }

    fn visit_ast_def(&mut self, file_path: &Path, def: sdl::Definition) -> Result<()> {
        match def {
            sdl::Definition::SchemaDefinition(schema_def) =>
                self.visit_ast_schemablock_def(file_path, schema_def),
            sdl::Definition::TypeDefinition(type_def) =>
                self.visit_ast_type_def(file_path, type_def),
            sdl::Definition::TypeExtension(type_ext) =>
                self.visit_ast_type_extension(file_path, type_ext),
            sdl::Definition::DirectiveDefinition(directive_def) =>
                self.visit_ast_directive_def(file_path, directive_def),
        }
    }

    fn visit_ast_directive_def(
        &mut self,
        file_path: &Path,
        def: sdl::DirectiveDefinition,
    ) -> Result<()> {
        let file_position = loc::FilePosition::from_pos(file_path, def.position);

        if BUILTIN_DIRECTIVE_NAMES.contains(&def.name.as_str()) {
            return Err(SchemaBuildError::RedefinitionOfBuiltinDirective {
                directive_name: def.name,
                location: file_position.into(),
            });
        }

        if def.name.starts_with("__") {
            return Err(SchemaBuildError::InvalidDunderPrefixedDirectiveName {
                def_location: file_position.into(),
                directive_name: def.name,
            });
        }

        if let Some(existing) = self.directive_defs.get(def.name.as_str()) {
            return Err(SchemaBuildError::DuplicateDirectiveDefinition {
                directive_name: def.name.clone(),
                location1: existing.def_location.clone(),
                location2: file_position.into(),
            });
        }

        let mut params = IndexMap::new();
        TypeBuilderHelpers::insert_input_values(
            &format!("@{}", def.name),
            &mut params,
            file_path,
            &def.arguments,
        )?;

        self.directive_defs.insert(def.name.clone(), Directive {
            def_location: file_position.into(),
            name: def.name,
            params,
        });

        Ok(())
    }

    fn visit_ast_schemablock_def(
        &mut self,
        file_path: &Path,
        schema_def: sdl::SchemaDefinition,
    ) -> Result<()> {
        let roots = [
            (OperationKind::Query, schema_def.query),
            (OperationKind::Mutation, schema_def.mutation),
            (OperationKind::Subscription, schema_def.subscription),
        ];
        for (operation, type_name) in roots {
            let Some(type_name) = type_name else {
                continue;
            };
            let typedef_loc =
                NamedTypeDefLocation::from_pos(type_name, file_path, schema_def.position);
            let slot = match operation {
                OperationKind::Query => &mut self.query_type,
                OperationKind::Mutation => &mut self.mutation_type,
                OperationKind::Subscription => &mut self.subscription_type,
            };
            if let Some(existing_typedef_loc) = slot {
                return Err(SchemaBuildError::DuplicateOperationDefinition {
                    operation,
                    location1: existing_typedef_loc.clone(),
                    location2: typedef_loc,
                });
            }
            *slot = Some(typedef_loc);
        }

        // The query, mutation, and subscription root types must all be
        // different types if provided.
        let declared = [
            (OperationKind::Query, &self.query_type),
            (OperationKind::Mutation, &self.mutation_type),
            (OperationKind::Subscription, &self.subscription_type),
        ];
        for (i, (op1, def1)) in declared.iter().enumerate() {
            for (op2, def2) in declared.iter().skip(i + 1) {
                if let (Some(def1), Some(def2)) = (def1, def2)
                    && def1.type_name == def2.type_name
                {
                    return Err(SchemaBuildError::NonUniqueOperationTypes {
                        reused_type_name: def1.type_name.clone(),
                        operation1: *op1,
                        operation1_loc: def1.def_location.clone(),
                        operation2: *op2,
                        operation2_loc: def2.def_location.clone(),
                    });
                }
            }
        }

        Ok(())
    }

    fn visit_ast_type_def(&mut self, file_path: &Path, type_def: sdl::TypeDefinition) -> Result<()> {
        match type_def {
            sdl::TypeDefinition::Enum(enum_def) =>
                self.enum_builder.visit_type_def(&mut self.types_map_builder, file_path, enum_def),

            sdl::TypeDefinition::InputObject(inputobj_def) =>
                self.inputobject_builder.visit_type_def(
                    &mut self.types_map_builder,
                    file_path,
                    inputobj_def,
                ),

            sdl::TypeDefinition::Interface(iface_def) =>
                self.interface_builder.visit_type_def(
                    &mut self.types_map_builder,
                    file_path,
                    iface_def,
                ),

            sdl::TypeDefinition::Scalar(scalar_def) =>
                self.scalar_builder.visit_type_def(
                    &mut self.types_map_builder,
                    file_path,
                    scalar_def,
                ),

            sdl::TypeDefinition::Object(obj_def) =>
                self.object_builder.visit_type_def(&mut self.types_map_builder, file_path, obj_def),

            sdl::TypeDefinition::Union(union_def) =>
                self.union_builder.visit_type_def(&mut self.types_map_builder, file_path, union_def),
        }
    }

    fn visit_ast_type_extension(&mut self, file_path: &Path, ext: sdl::TypeExtension) -> Result<()> {
        match ext {
            sdl::TypeExtension::Enum(enum_ext) =>
                self.enum_builder.visit_type_extension(
                    &mut self.types_map_builder,
                    file_path,
                    enum_ext,
                ),

            sdl::TypeExtension::InputObject(inputobj_ext) =>
                self.inputobject_builder.visit_type_extension(
                    &mut self.types_map_builder,
                    file_path,
                    inputobj_ext,
                ),

            sdl::TypeExtension::Interface(iface_ext) =>
                self.interface_builder.visit_type_extension(
                    &mut self.types_map_builder,
                    file_path,
                    iface_ext,
                ),

            sdl::TypeExtension::Object(obj_ext) =>
                self.object_builder.visit_type_extension(
                    &mut self.types_map_builder,
                    file_path,
                    obj_ext,
                ),

            sdl::TypeExtension::Scalar(scalar_ext) =>
                self.scalar_builder.visit_type_extension(
                    &mut self.types_map_builder,
                    file_path,
                    scalar_ext,
                ),

            sdl::TypeExtension::Union(union_ext) =>
                self.union_builder.visit_type_extension(
                    &mut self.types_map_builder,
                    file_path,
                    union_ext,
                ),
        }
    }
}

impl Default for SchemaBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Clone, Debug, Error, PartialEq)]
pub enum SchemaBuildError {
    #[error("Directive `@{directive_name}` is defined more than once ({location1} and {location2})")]
    DuplicateDirectiveDefinition {
        directive_name: String,
        location1: loc::SchemaDefLocation,
        location2: loc::SchemaDefLocation,
    },

    #[error("Enum `{enum_name}` defines the value `{value_name}` more than once ({def1} and {def2})")]
    DuplicateEnumValueDefinition {
        enum_name: String,
        value_name: String,
        def1: loc::SchemaDefLocation,
        def2: loc::SchemaDefLocation,
    },

    #[error("Field `{type_name}.{field_name}` is defined more than once ({field_def1} and {field_def2})")]
    DuplicateFieldNameDefinition {
        type_name: String,
        field_name: String,
        field_def1: loc::SchemaDefLocation,
        field_def2: loc::SchemaDefLocation,
    },

    #[error("`{owner}` defines the input value `{name}` more than once ({def1} and {def2})")]
    DuplicateInputValueDefinition {
        owner: String,
        name: String,
        def1: loc::SchemaDefLocation,
        def2: loc::SchemaDefLocation,
    },

    #[error(
        "The `{type_name}` type declares that it implements the \
        `{duplicated_interface_name}` interface more than once"
    )]
    DuplicateInterfaceImplementsDeclaration {
        def_location: loc::SchemaDefLocation,
        duplicated_interface_name: String,
        type_name: String,
    },

    #[error("The {operation} root operation type is declared more than once")]
    DuplicateOperationDefinition {
        operation: OperationKind,
        location1: NamedTypeDefLocation,
        location2: NamedTypeDefLocation,
    },

    #[error("Type `{type_name}` is defined more than once ({def1} and {def2})")]
    DuplicateTypeDefinition {
        type_name: String,
        def1: loc::SchemaDefLocation,
        def2: loc::SchemaDefLocation,
    },

    #[error("Union `{union_name}` lists `{member_name}` as a member more than once")]
    DuplicatedUnionMember {
        union_name: String,
        member_name: String,
        location: loc::SchemaDefLocation,
    },

    #[error("Enum `{type_name}` must define one or more unique values")]
    EnumWithNoVariants {
        type_name: String,
        location: loc::SchemaDefLocation,
    },

    #[error("Attempted to extend `{type_name}`, which is not defined anywhere ({extension_loc})")]
    ExtensionOfUndefinedType {
        type_name: String,
        extension_loc: loc::SchemaDefLocation,
    },

    #[error("`{type_name}` implements `{interface_name}`, which is not an interface type")]
    ImplementsNonInterfaceType {
        type_name: String,
        interface_name: String,
    },

    #[error(
        "Attempted to extend the {type_kind} type `{type_name}` with an \
        {extension_kind} extension ({extension_loc})"
    )]
    InvalidExtensionType {
        type_name: String,
        type_kind: &'static str,
        extension_kind: &'static str,
        extension_loc: loc::SchemaDefLocation,
    },

    #[error("Custom directive names must not start with `__`: `@{directive_name}`")]
    InvalidDunderPrefixedDirectiveName {
        def_location: loc::SchemaDefLocation,
        directive_name: String,
    },

    #[error("Field names must not start with `__`: `{type_name}.{field_name}`")]
    InvalidDunderPrefixedFieldName {
        def_location: loc::SchemaDefLocation,
        field_name: String,
        type_name: String,
    },

    #[error("Type names must not start with `__`: `{type_name}`")]
    InvalidDunderPrefixedTypeName {
        def_location: loc::SchemaDefLocation,
        type_name: String,
    },

    #[error("`{referenced_from}` references `{type_name}`, which is not an {expected} type")]
    InvalidTypeKindReference {
        type_name: String,
        referenced_from: String,
        expected: &'static str,
    },

    #[error("Attempted to build a schema that has no Query operation type defined")]
    NoQueryOperationTypeDefined,

    #[error(
        "The {operation1} and {operation2} root operations are both defined with \
        the `{reused_type_name}` type. All root operations must use different types."
    )]
    NonUniqueOperationTypes {
        reused_type_name: String,
        operation1: OperationKind,
        operation1_loc: loc::SchemaDefLocation,
        operation2: OperationKind,
        operation2_loc: loc::SchemaDefLocation,
    },

    #[error("Error parsing schema `{}`: {err}", file.display())]
    ParseError {
        file: PathBuf,
        err: String,
    },

    #[error("Attempted to redefine the builtin directive `@{directive_name}`")]
    RedefinitionOfBuiltinDirective {
        directive_name: String,
        location: loc::SchemaDefLocation,
    },

    #[error("The {operation} root operation type `{type_name}` is a {type_kind} type, not an object type")]
    RootOperationTypeNotObject {
        operation: OperationKind,
        type_name: String,
        type_kind: &'static str,
    },

    #[error("Failed to read schema file `{}`: {err}", file.display())]
    SchemaFileReadError {
        file: PathBuf,
        err: String,
    },

    #[error("The {operation} root operation type `{type_name}` is not defined")]
    UndefinedRootOperationType {
        operation: OperationKind,
        type_name: String,
        location: loc::SchemaDefLocation,
    },

    #[error("`{referenced_from}` references the undefined type `{type_name}` ({location})")]
    UndefinedTypeReference {
        type_name: String,
        referenced_from: String,
        location: loc::SchemaDefLocation,
    },

    #[error("Union `{union_name}` lists `{member_name}`, which is not an object type")]
    UnionMemberNotObjectType {
        union_name: String,
        member_name: String,
    },
}

/// Where a root operation type was named in a `schema { ... }` block.
#[derive(Clone, Debug, PartialEq)]
pub struct NamedTypeDefLocation {
    pub def_location: loc::SchemaDefLocation,
    pub type_name: String,
}

impl NamedTypeDefLocation {
    pub(crate) fn from_pos(type_name: String, file: &Path, pos: graphql_parser::Pos) -> Self {
        Self {
            def_location: loc::FilePosition::from_pos(file, pos).into(),
            type_name,
        }
    }
}
