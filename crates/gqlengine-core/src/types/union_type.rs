use crate::loc;

#[derive(Clone, Debug, PartialEq)]
pub struct UnionType {
    pub(crate) def_location: loc::SchemaDefLocation,
    pub(crate) members: Vec<String>,
    pub(crate) name: String,
}

impl UnionType {
    pub fn def_location(&self) -> &loc::SchemaDefLocation {
        &self.def_location
    }

    /// Member object type names in declaration order.
    pub fn members(&self) -> &[String] {
        &self.members
    }

    pub fn name(&self) -> &str {
        self.name.as_str()
    }
}
