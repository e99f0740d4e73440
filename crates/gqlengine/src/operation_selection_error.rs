use gqlengine_core::QueryError;
use gqlengine_core::QueryErrorKind;
use thiserror::Error;

/// Why no operation could be chosen from a valid document.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum OperationSelectionError {
    #[error("no operations in query document")]
    NoOperations,

    #[error("more than one operation in query document and no operation name given")]
    AmbiguousOperation,

    #[error("no operation with name \"{0}\"")]
    UnknownOperation(String),
}

impl From<OperationSelectionError> for QueryError {
    fn from(err: OperationSelectionError) -> Self {
        QueryError::new(QueryErrorKind::OperationSelection, err.to_string())
    }
}
