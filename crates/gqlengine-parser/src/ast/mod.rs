//! Executable-document AST.
//!
//! A [`Document`] owns every node. Fragment spreads hold only the fragment's
//! name and are expanded through the document's [`FragmentTable`] each time
//! they are traversed, so one fragment reached from several spread sites is
//! never duplicated.

mod display;
mod document;
mod name;
mod operation;
mod selection;
mod type_ref;
mod value;

pub use document::Document;
pub use document::FragmentTable;
pub use name::Name;
pub use operation::FragmentDecl;
pub use operation::Operation;
pub use operation::OperationKind;
pub use operation::VariableDefinition;
pub use selection::Field;
pub use selection::FieldId;
pub use selection::FragmentSpread;
pub use selection::InlineFragment;
pub use selection::Selection;
pub use type_ref::TypeRef;
pub use value::Argument;
pub use value::Directive;
pub use value::ObjectField;
pub use value::Value;
