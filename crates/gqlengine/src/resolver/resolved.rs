use serde_json::Value;
use std::any::Any;
use std::sync::Arc;

/// A parent value as the resolver factory sees it. Factories downcast it to
/// whatever type they produced.
pub type ParentValue = Arc<dyn Any + Send + Sync>;

/// The value a resolver returned for a field, before the engine completes it
/// against the field's declared type.
#[derive(Clone)]
pub enum Resolved {
    Null,
    Leaf(Value),
    List(Vec<Resolved>),

    /// An object whose fields are resolved in turn.
    Object(ParentValue),
}

impl Resolved {
    /// Converts JSON into a resolved value: arrays become lists, objects
    /// become [`ParentValue`]s holding the JSON object.
    pub fn from_json(value: Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::Array(items) => Self::List(items.into_iter().map(Self::from_json).collect()),
            object @ Value::Object(_) => Self::Object(Arc::new(object)),
            leaf => Self::Leaf(leaf),
        }
    }

    pub fn object<T: Any + Send + Sync>(value: T) -> Self {
        Self::Object(Arc::new(value))
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// The JSON form of this value for a leaf position, so that custom
    /// scalars may carry JSON objects and arrays. `None` if an object in it
    /// is not JSON.
    pub(crate) fn to_leaf_json(&self) -> Option<Value> {
        match self {
            Self::Null => Some(Value::Null),
            Self::Leaf(value) => Some(value.clone()),
            Self::List(items) => items.iter().map(Self::to_leaf_json).collect::<Option<_>>().map(Value::Array),
            Self::Object(object) => object.downcast_ref::<Value>().cloned(),
        }
    }
}

impl std::fmt::Debug for Resolved {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Null => f.write_str("Null"),
            Self::Leaf(value) => f.debug_tuple("Leaf").field(value).finish(),
            Self::List(items) => f.debug_tuple("List").field(items).finish(),
            Self::Object(object) => match object.downcast_ref::<Value>() {
                Some(json) => f.debug_tuple("Object").field(json).finish(),
                None => f.write_str("Object(..)"),
            },
        }
    }
}

impl From<Value> for Resolved {
    fn from(value: Value) -> Self {
        Self::from_json(value)
    }
}
