use crate::loc;

/// A custom scalar. Values of custom scalars pass through coercion and
/// output checks unchanged.
#[derive(Clone, Debug, PartialEq)]
pub struct ScalarType {
    pub(crate) def_location: loc::SchemaDefLocation,
    pub(crate) name: String,
}

impl ScalarType {
    pub fn def_location(&self) -> &loc::SchemaDefLocation {
        &self.def_location
    }

    pub fn name(&self) -> &str {
        self.name.as_str()
    }
}
