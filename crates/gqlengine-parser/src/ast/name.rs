use crate::Location;

/// A name token together with where it appeared.
#[derive(Clone, Debug, PartialEq)]
pub struct Name {
    pub value: String,
    pub location: Location,
}

impl Name {
    pub fn new(value: impl Into<String>, location: Location) -> Self {
        Self {
            value: value.into(),
            location,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.value
    }
}

impl std::fmt::Display for Name {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.value)
    }
}
