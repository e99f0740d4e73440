use crate::loc;
use crate::sdl;
use crate::types::TypeAnnotation;
use std::path::Path;

/// An input value definition: a field or directive argument, or a field of
/// an input object type.
#[derive(Clone, Debug, PartialEq)]
pub struct Parameter {
    pub(crate) def_location: loc::SchemaDefLocation,

    /// The SDL default converted to JSON. Enum defaults are their value name
    /// as a string, so they coerce like request variables.
    pub(crate) default_value: Option<serde_json::Value>,

    pub(crate) name: String,
    pub(crate) type_annotation: TypeAnnotation,
}

impl Parameter {
    pub(crate) fn builtin(
        name: &str,
        type_annotation: TypeAnnotation,
        default_value: Option<serde_json::Value>,
    ) -> Self {
        Self {
            def_location: loc::SchemaDefLocation::GraphQLBuiltIn,
            default_value,
            name: name.to_string(),
            type_annotation,
        }
    }

    pub(crate) fn from_ast(
        file_path: &Path,
        input_val: &sdl::InputValue,
    ) -> Self {
        Self {
            def_location: loc::FilePosition::from_pos(file_path, input_val.position).into(),
            default_value: input_val.default_value.as_ref().map(const_value_to_json),
            name: input_val.name.clone(),
            type_annotation: TypeAnnotation::from_schema_ast(&input_val.value_type),
        }
    }

    pub fn def_location(&self) -> &loc::SchemaDefLocation {
        &self.def_location
    }

    pub fn default_value(&self) -> Option<&serde_json::Value> {
        self.default_value.as_ref()
    }

    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    pub fn type_annotation(&self) -> &TypeAnnotation {
        &self.type_annotation
    }

    /// Whether leaving this parameter out is an error.
    pub fn is_required(&self) -> bool {
        !self.type_annotation.is_nullable() && self.default_value.is_none()
    }
}

/// Converts an SDL default-value literal to JSON.
fn const_value_to_json(value: &sdl::Value) -> serde_json::Value {
    use graphql_parser::schema::Value;
    match value {
        Value::Int(num) => num
            .as_i64()
            .map(serde_json::Value::from)
            .unwrap_or(serde_json::Value::Null),
        Value::Float(f) => serde_json::Number::from_f64(*f)
            .map(serde_json::Value::Number)
            .unwrap_or(serde_json::Value::Null),
        Value::String(s) => serde_json::Value::String(s.clone()),
        Value::Boolean(b) => serde_json::Value::Bool(*b),
        Value::Enum(name) => serde_json::Value::String(name.clone()),
        Value::List(items) => serde_json::Value::Array(items.iter().map(const_value_to_json).collect()),
        Value::Object(fields) => serde_json::Value::Object(
            fields
                .iter()
                .map(|(name, value)| (name.clone(), const_value_to_json(value)))
                .collect(),
        ),
        // Variables cannot appear in SDL; graphql-parser still models them.
        Value::Null | Value::Variable(_) => serde_json::Value::Null,
    }
}
