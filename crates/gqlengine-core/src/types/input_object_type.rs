use crate::loc;
use crate::types::Parameter;
use indexmap::IndexMap;

#[derive(Clone, Debug, PartialEq)]
pub struct InputObjectType {
    pub(crate) def_location: loc::SchemaDefLocation,
    pub(crate) fields: IndexMap<String, Parameter>,
    pub(crate) name: String,
}

impl InputObjectType {
    pub fn def_location(&self) -> &loc::SchemaDefLocation {
        &self.def_location
    }

    /// Input fields in declaration order. They share [`Parameter`]'s shape:
    /// a name, a type, and an optional default.
    pub fn fields(&self) -> &IndexMap<String, Parameter> {
        &self.fields
    }

    pub fn name(&self) -> &str {
        self.name.as_str()
    }
}
