use crate::types::Field;
use gqlengine_parser::ast::FieldId;

/// The schema field a field node selects, and the type it was selected on.
///
/// `parent_type` is the static type of the enclosing selection set, which
/// may be an interface even though execution later sees a concrete object.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FieldBinding<'schema> {
    pub parent_type: &'schema str,
    pub field: &'schema Field,
}

/// Side table from [`FieldId`] to [`FieldBinding`].
#[derive(Clone, Debug, Default)]
pub struct FieldBindings<'schema> {
    slots: Vec<Option<FieldBinding<'schema>>>,
}

impl<'schema> FieldBindings<'schema> {
    /// A table with room for every field of a document with `field_count`
    /// fields.
    pub fn with_capacity(field_count: usize) -> Self {
        Self {
            slots: vec![None; field_count],
        }
    }

    pub fn get(&self, id: FieldId) -> Option<&FieldBinding<'schema>> {
        self.slots.get(id.index())?.as_ref()
    }

    pub fn insert(&mut self, id: FieldId, binding: FieldBinding<'schema>) {
        let idx = id.index();
        if idx >= self.slots.len() {
            self.slots.resize(idx + 1, None);
        }
        self.slots[idx] = Some(binding);
    }

    /// Number of bound fields.
    pub fn len(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
