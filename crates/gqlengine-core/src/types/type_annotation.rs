use crate::sdl;
use gqlengine_parser::ast;

/// The declared type of a field, parameter, input field, or variable.
///
/// Nullability is a flag on each level rather than a wrapper, so `[Int!]`
/// is `List { inner: Named { "Int", nullable: false }, nullable: true }`.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub enum TypeAnnotation {
    Named {
        type_name: String,
        nullable: bool,
    },
    List {
        inner: Box<TypeAnnotation>,
        nullable: bool,
    },
}

impl TypeAnnotation {
    pub fn named(type_name: impl Into<String>, nullable: bool) -> Self {
        Self::Named {
            type_name: type_name.into(),
            nullable,
        }
    }

    pub fn list(inner: TypeAnnotation, nullable: bool) -> Self {
        Self::List {
            inner: Box::new(inner),
            nullable,
        }
    }

    pub fn is_nullable(&self) -> bool {
        match self {
            Self::Named { nullable, .. } | Self::List { nullable, .. } => *nullable,
        }
    }

    /// Recursively unwrap list levels and return the named type at the
    /// bottom.
    pub fn innermost_type_name(&self) -> &str {
        match self {
            Self::Named { type_name, .. } => type_name,
            Self::List { inner, .. } => inner.innermost_type_name(),
        }
    }

    /// The element type if this is a list annotation.
    pub fn list_inner(&self) -> Option<&TypeAnnotation> {
        match self {
            Self::List { inner, .. } => Some(inner),
            Self::Named { .. } => None,
        }
    }

    /// This same annotation with the outermost level made nullable.
    pub fn as_nullable(&self) -> TypeAnnotation {
        let mut annot = self.clone();
        match &mut annot {
            Self::Named { nullable, .. } | Self::List { nullable, .. } => *nullable = true,
        }
        annot
    }

    pub(crate) fn from_schema_ast(ast_type: &sdl::Type) -> Self {
        Self::from_schema_ast_impl(ast_type, /* nullable = */ true)
    }

    fn from_schema_ast_impl(
        ast_type: &sdl::Type,
        nullable: bool,
    ) -> Self {
        match ast_type {
            sdl::Type::NamedType(name) => Self::named(name.as_str(), nullable),
            sdl::Type::ListType(inner) => Self::list(Self::from_schema_ast_impl(inner, true), nullable),
            sdl::Type::NonNullType(inner) => Self::from_schema_ast_impl(inner, false),
        }
    }

    /// Converts a request's type reference without checking that the named
    /// type exists. See
    /// [`Schema::resolve_type_annotation()`](crate::Schema::resolve_type_annotation).
    pub fn from_type_ref(type_ref: &ast::TypeRef) -> Self {
        Self::from_type_ref_impl(type_ref, true)
    }

    fn from_type_ref_impl(type_ref: &ast::TypeRef, nullable: bool) -> Self {
        match type_ref {
            ast::TypeRef::Named(name) => Self::named(name.as_str(), nullable),
            ast::TypeRef::List(inner) => Self::list(Self::from_type_ref_impl(inner, true), nullable),
            ast::TypeRef::NonNull(inner) => Self::from_type_ref_impl(inner, false),
        }
    }
}

impl std::fmt::Display for TypeAnnotation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let nullable = match self {
            Self::Named { type_name, nullable } => {
                f.write_str(type_name)?;
                *nullable
            },
            Self::List { inner, nullable } => {
                write!(f, "[{inner}]")?;
                *nullable
            },
        };
        if !nullable {
            f.write_str("!")?;
        }
        Ok(())
    }
}
