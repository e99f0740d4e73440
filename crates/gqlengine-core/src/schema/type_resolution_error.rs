use gqlengine_parser::Location;
use thiserror::Error;

/// Why a variable's declared type could not be resolved against the schema.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum TypeResolutionError {
    #[error("Unknown type \"{type_name}\".")]
    UnknownType {
        type_name: String,
        location: Location,
    },

    #[error("Variable type \"{type_name}\" is not an input type.")]
    NotAnInputType {
        type_name: String,
        location: Location,
    },
}

impl TypeResolutionError {
    /// Where the offending type name appears in the request.
    pub fn location(&self) -> Location {
        match self {
            Self::UnknownType { location, .. } | Self::NotAnInputType { location, .. } => *location,
        }
    }
}
