use gqlengine_core::types::GraphQLType;
use serde_json::Value;

/// Checks a resolver's value for a leaf position of type `leaf_type` and
/// returns the value to emit.
pub(crate) fn complete_leaf(leaf_type: &GraphQLType, value: Value) -> Result<Value, String> {
    match leaf_type {
        GraphQLType::Int => value
            .as_i64()
            .or_else(|| value.as_f64().filter(|f| f.fract() == 0.0).map(|f| f as i64))
            .filter(|i| i32::try_from(*i).is_ok())
            .map(Value::from)
            .ok_or_else(|| format!("Int cannot represent non 32-bit signed integer value: {value}")),
        GraphQLType::Float if value.is_number() => Ok(value),
        GraphQLType::Float => Err(format!("Float cannot represent non numeric value: {value}")),
        GraphQLType::String if value.is_string() => Ok(value),
        GraphQLType::String => Err(format!("String cannot represent value: {value}")),
        GraphQLType::Bool if value.is_boolean() => Ok(value),
        GraphQLType::Bool => Err(format!("Boolean cannot represent a non boolean value: {value}")),
        GraphQLType::ID => match &value {
            Value::String(_) => Ok(value),
            Value::Number(num) if num.is_i64() || num.is_u64() => Ok(Value::String(num.to_string())),
            _ => Err(format!("ID cannot represent value: {value}")),
        },
        GraphQLType::Enum(enum_type) => match value.as_str() {
            Some(name) if enum_type.value(name).is_some() => Ok(value),
            _ => Err(format!("Enum \"{}\" cannot represent value: {value}", enum_type.name())),
        },
        GraphQLType::Scalar(_) => Ok(value),
        composite => Err(format!("\"{}\" is not a leaf type", composite.name())),
    }
}
