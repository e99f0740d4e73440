use crate::Location;
use crate::ast::Directive;
use crate::ast::Name;
use crate::ast::Selection;
use crate::ast::TypeRef;
use crate::ast::Value;

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum OperationKind {
    Query,
    Mutation,
    Subscription,
}

impl OperationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            OperationKind::Query => "query",
            OperationKind::Mutation => "mutation",
            OperationKind::Subscription => "subscription",
        }
    }
}

impl std::fmt::Display for OperationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One query, mutation, or subscription within a [`Document`](crate::ast::Document).
#[derive(Clone, Debug, PartialEq)]
pub struct Operation {
    pub kind: OperationKind,

    /// `None` for anonymous operations (including the `{ ... }` shorthand).
    pub name: Option<Name>,

    pub variables: Vec<VariableDefinition>,
    pub directives: Vec<Directive>,
    pub selections: Vec<Selection>,

    /// Location of the operation keyword, or of `{` for the shorthand form.
    pub location: Location,
}

/// A declared operation variable: `$name: Type = default`.
#[derive(Clone, Debug, PartialEq)]
pub struct VariableDefinition {
    /// The variable's name without the leading `$`.
    pub name: Name,
    pub var_type: TypeRef,
    pub default_value: Option<Value>,
    pub directives: Vec<Directive>,

    /// Location of the `$`.
    pub location: Location,
}

/// `fragment Name on Type @directives { ... }`
#[derive(Clone, Debug, PartialEq)]
pub struct FragmentDecl {
    pub name: Name,
    pub type_condition: Name,
    pub directives: Vec<Directive>,
    pub selections: Vec<Selection>,

    /// Location of the `fragment` keyword.
    pub location: Location,
}
