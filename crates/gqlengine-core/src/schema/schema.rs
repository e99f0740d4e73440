use crate::schema::SchemaBuilder;
use crate::schema::TypeResolutionError;
use crate::types::Directive;
use crate::types::Field;
use crate::types::GraphQLType;
use crate::types::ObjectType;
use crate::types::TypeAnnotation;
use gqlengine_parser::ast;
use indexmap::IndexMap;

/// Represents a fully typechecked and immutable GraphQL schema.
///
/// Every type reference inside a [`Schema`] has been checked to exist and to
/// have a kind that is legal where it is referenced, so lookups that follow
/// a reference out of the schema itself only fail on caller-supplied names.
#[derive(Clone, Debug, PartialEq)]
pub struct Schema {
    pub(crate) directive_defs: IndexMap<String, Directive>,
    pub(crate) query_type: String,
    pub(crate) mutation_type: Option<String>,
    pub(crate) subscription_type: Option<String>,
    pub(crate) types: IndexMap<String, GraphQLType>,
}

impl Schema {
    /// Returns all directives defined within this [`Schema`], including the
    /// implicitly-defined built-ins like `@skip`.
    pub fn all_directives(&self) -> &IndexMap<String, Directive> {
        &self.directive_defs
    }

    /// Returns all types defined within this [`Schema`], including built-in
    /// scalars like [`GraphQLType::Bool`].
    pub fn all_types(&self) -> &IndexMap<String, GraphQLType> {
        &self.types
    }

    /// Helper function that just delegates to [`SchemaBuilder::new()`].
    pub fn builder() -> SchemaBuilder {
        SchemaBuilder::new()
    }

    pub fn directive(&self, name: &str) -> Option<&Directive> {
        self.directive_defs.get(name)
    }

    /// Looks up the field `field_name` on the object or interface type
    /// `parent_type`.
    ///
    /// `__typename` is answered for every composite type (unions included)
    /// with a synthetic `String!` field.
    pub fn field(&self, parent_type: &str, field_name: &str) -> Option<&Field> {
        let parent = self.types.get(parent_type)?;
        if field_name == "__typename" && parent.is_composite() {
            return Some(Field::typename_meta_field());
        }
        parent.fields()?.get(field_name)
    }

    /// Whether `object_type` is a possible runtime type of `type_name`: the
    /// same object, a union member, or an implementor of an interface.
    pub fn is_possible_type(&self, type_name: &str, object_type: &str) -> bool {
        match self.types.get(type_name) {
            Some(GraphQLType::Object(obj)) => obj.name() == object_type,
            Some(GraphQLType::Union(union_type)) =>
                union_type.members().iter().any(|member| member == object_type),
            Some(GraphQLType::Interface(iface)) => match self.types.get(object_type) {
                Some(GraphQLType::Object(obj)) =>
                    obj.interfaces().iter().any(|name| name == iface.name()),
                _ => false,
            },
            _ => false,
        }
    }

    /// The object types that `type_name` could be at runtime.
    pub fn possible_types(&self, type_name: &str) -> Vec<&ObjectType> {
        self.types
            .values()
            .filter_map(GraphQLType::as_object)
            .filter(|obj| self.is_possible_type(type_name, obj.name()))
            .collect()
    }

    pub fn lookup_type(&self, name: &str) -> Option<&GraphQLType> {
        self.types.get(name)
    }

    /// Name of the Mutation root operation type, if the schema has one.
    pub fn mutation_type_name(&self) -> Option<&str> {
        self.mutation_type.as_deref()
    }

    /// Name of the Query root operation type.
    ///
    /// This is `Query` unless a `schema { query: ... }` block overrides it,
    /// so prefer this (or [`Schema::root_operation_type()`]) over looking
    /// for a type named `Query`.
    pub fn query_type_name(&self) -> &str {
        self.query_type.as_str()
    }

    /// The object type that roots operations of `kind`, or `None` if the
    /// schema does not support that kind of operation.
    pub fn root_operation_type(&self, kind: ast::OperationKind) -> Option<&ObjectType> {
        let type_name = match kind {
            ast::OperationKind::Query => Some(self.query_type.as_str()),
            ast::OperationKind::Mutation => self.mutation_type.as_deref(),
            ast::OperationKind::Subscription => self.subscription_type.as_deref(),
        }?;
        self.types.get(type_name)?.as_object()
    }

    pub fn subscription_type_name(&self) -> Option<&str> {
        self.subscription_type.as_deref()
    }

    /// Resolves a variable's declared type against this schema. The named
    /// type at the bottom must exist and be an input type.
    pub fn resolve_type_annotation(
        &self,
        type_ref: &ast::TypeRef,
    ) -> Result<TypeAnnotation, TypeResolutionError> {
        let name = type_ref.innermost_name();
        match self.types.get(name.as_str()) {
            None => Err(TypeResolutionError::UnknownType {
                type_name: name.value.clone(),
                location: name.location,
            }),
            Some(type_) if !type_.is_input_type() => Err(TypeResolutionError::NotAnInputType {
                type_name: TypeAnnotation::from_type_ref(type_ref).to_string(),
                location: name.location,
            }),
            Some(_) => Ok(TypeAnnotation::from_type_ref(type_ref)),
        }
    }
}
