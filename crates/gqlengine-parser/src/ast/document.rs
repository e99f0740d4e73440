use crate::ast::FragmentDecl;
use crate::ast::Operation;
use std::collections::HashMap;

/// The parsed representation of a request's query text.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Document {
    /// Operations in source order.
    pub operations: Vec<Operation>,

    pub fragments: FragmentTable,

    /// Number of [`Field`](crate::ast::Field) nodes in the document. Every
    /// [`FieldId`](crate::ast::FieldId) is below this bound.
    pub(crate) field_count: usize,
}

impl Document {
    /// Finds the first operation whose name matches `name` exactly.
    pub fn operation(&self, name: &str) -> Option<&Operation> {
        self.operations
            .iter()
            .find(|op| op.name.as_ref().is_some_and(|n| n.value == name))
    }

    /// Finds the first fragment declared as `name`.
    pub fn fragment(&self, name: &str) -> Option<&FragmentDecl> {
        self.fragments.get(name)
    }

    pub fn field_count(&self) -> usize {
        self.field_count
    }
}

/// Fragment declarations in source order, indexed by name.
///
/// Duplicate names are kept so that validation can report them; lookups
/// return the first declaration with a matching name.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FragmentTable {
    decls: Vec<FragmentDecl>,

    /// Position in `decls` of the first declaration of each name.
    first_by_name: HashMap<String, usize>,
}

impl FragmentTable {
    pub fn get(&self, name: &str) -> Option<&FragmentDecl> {
        self.first_by_name.get(name).and_then(|&idx| self.decls.get(idx))
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut FragmentDecl> {
        let idx = *self.first_by_name.get(name)?;
        self.decls.get_mut(idx)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, FragmentDecl> {
        self.decls.iter()
    }

    pub fn len(&self) -> usize {
        self.decls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.decls.is_empty()
    }

    pub(crate) fn push(&mut self, decl: FragmentDecl) {
        self.first_by_name.entry(decl.name.value.clone()).or_insert(self.decls.len());
        self.decls.push(decl);
    }
}

impl<'a> IntoIterator for &'a FragmentTable {
    type Item = &'a FragmentDecl;
    type IntoIter = std::slice::Iter<'a, FragmentDecl>;

    fn into_iter(self) -> Self::IntoIter {
        self.decls.iter()
    }
}
