use crate::Location;
use crate::ast::Argument;
use crate::ast::Directive;
use crate::ast::FragmentTable;
use crate::ast::Name;

/// A field, inline fragment, or fragment spread.
///
/// Child selections are direct for fields and inline fragments. A fragment
/// spread has none of its own: its children are looked up by name in the
/// document's [`FragmentTable`] on every access.
#[derive(Clone, Debug, PartialEq)]
pub enum Selection {
    Field(Field),
    InlineFragment(InlineFragment),
    FragmentSpread(FragmentSpread),
}

impl Selection {
    /// Returns the child selections of this node.
    ///
    /// For a [`FragmentSpread`] this is the referenced fragment's selection
    /// list, or an empty slice if no such fragment is declared.
    pub fn selections<'a>(&'a self, fragments: &'a FragmentTable) -> &'a [Selection] {
        match self {
            Selection::Field(field) => &field.selections,
            Selection::InlineFragment(inline) => &inline.selections,
            Selection::FragmentSpread(spread) => fragments
                .get(&spread.fragment_name.value)
                .map(|decl| decl.selections.as_slice())
                .unwrap_or(&[]),
        }
    }

    /// Replaces the child selections of this node.
    ///
    /// For a [`FragmentSpread`] this replaces the referenced fragment's
    /// selections, which every other spread of that fragment observes too.
    /// Spreading an undeclared fragment makes this a no-op.
    pub fn set_selections(&mut self, fragments: &mut FragmentTable, selections: Vec<Selection>) {
        match self {
            Selection::Field(field) => field.selections = selections,
            Selection::InlineFragment(inline) => inline.selections = selections,
            Selection::FragmentSpread(spread) => {
                if let Some(decl) = fragments.get_mut(&spread.fragment_name.value) {
                    decl.selections = selections;
                }
            },
        }
    }

    /// Where this selection appears in the source. For fields this is the
    /// field name; for fragments it is the `...`.
    pub fn location(&self) -> Location {
        match self {
            Selection::Field(field) => field.location(),
            Selection::InlineFragment(inline) => inline.location,
            Selection::FragmentSpread(spread) => spread.location,
        }
    }

    pub fn directives(&self) -> &[Directive] {
        match self {
            Selection::Field(field) => &field.directives,
            Selection::InlineFragment(inline) => &inline.directives,
            Selection::FragmentSpread(spread) => &spread.directives,
        }
    }
}

/// Dense per-document index of a [`Field`] node, assigned in source order
/// while parsing.
///
/// Schema bindings for fields live in side tables keyed by this id rather
/// than on the node itself.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct FieldId(pub(crate) u32);

impl FieldId {
    pub fn index(&self) -> usize {
        self.0 as usize
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Field {
    pub id: FieldId,

    /// The response key. Equal to `name` when no alias was written.
    pub alias: Name,

    pub name: Name,
    pub arguments: Vec<Argument>,
    pub directives: Vec<Directive>,

    /// Empty for leaf fields.
    pub selections: Vec<Selection>,

    /// Location of the `{` opening this field's selection set, if any.
    pub selection_set_location: Option<Location>,
}

impl Field {
    pub fn response_key(&self) -> &str {
        &self.alias.value
    }

    /// Whether an explicit `alias:` prefix was written.
    pub fn has_alias(&self) -> bool {
        self.alias.location != self.name.location
    }

    pub fn location(&self) -> Location {
        self.name.location
    }

    pub fn argument(&self, name: &str) -> Option<&Argument> {
        self.arguments.iter().find(|arg| arg.name.value == name)
    }
}

/// `... on Type @directives { ... }`; the type condition is optional.
#[derive(Clone, Debug, PartialEq)]
pub struct InlineFragment {
    pub type_condition: Option<Name>,
    pub directives: Vec<Directive>,
    pub selections: Vec<Selection>,
    pub location: Location,
}

/// `...FragmentName @directives`
#[derive(Clone, Debug, PartialEq)]
pub struct FragmentSpread {
    pub fragment_name: Name,
    pub directives: Vec<Directive>,
    pub location: Location,
}
