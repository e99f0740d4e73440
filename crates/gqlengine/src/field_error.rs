use serde_json::Map;
use serde_json::Value;
use thiserror::Error;

/// The error a resolver returns for its field.
///
/// The engine records it at the field's path and location, then applies
/// null propagation. Any extensions are copied into the response error.
#[derive(Clone, Debug, Error, PartialEq)]
#[error("{message}")]
pub struct FieldError {
    pub message: String,
    pub extensions: Option<Map<String, Value>>,
}

impl FieldError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            extensions: None,
        }
    }

    pub fn with_extension(mut self, key: impl Into<String>, value: Value) -> Self {
        self.extensions.get_or_insert_with(Map::new).insert(key.into(), value);
        self
    }
}

impl From<String> for FieldError {
    fn from(message: String) -> Self {
        Self::new(message)
    }
}

impl From<&str> for FieldError {
    fn from(message: &str) -> Self {
        Self::new(message)
    }
}
