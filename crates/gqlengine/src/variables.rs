use gqlengine_core::QueryError;
use gqlengine_core::QueryErrorKind;
use gqlengine_core::Schema;
use gqlengine_core::coercion::VariableTypes;
use gqlengine_core::coercion::literal_to_json;
use gqlengine_parser::ast::Operation;
use serde_json::Map;
use serde_json::Value;

/// Resolves the declared type of each of `operation`'s variables.
pub(crate) fn resolve_variable_types(
    schema: &Schema,
    operation: &Operation,
) -> Result<VariableTypes, QueryError> {
    let mut var_types = VariableTypes::with_capacity(operation.variables.len());
    for var_def in &operation.variables {
        let annot = schema.resolve_type_annotation(&var_def.var_type).map_err(|err| {
            QueryError::new(QueryErrorKind::VariableType, err.to_string()).with_location(err.location())
        })?;
        var_types.insert(var_def.name.value.clone(), annot);
    }
    Ok(var_types)
}

/// The request's raw variables plus the operation's declared defaults for
/// the ones it left out. Nothing is coerced here: each variable is coerced
/// against its declared type where an argument uses it, and a bad value
/// fails only that field.
pub(crate) fn with_defaults(operation: &Operation, raw: &Map<String, Value>) -> Map<String, Value> {
    let mut variables = raw.clone();
    for var_def in &operation.variables {
        let name = var_def.name.as_str();
        if let Some(default) = &var_def.default_value
            && !variables.contains_key(name)
        {
            variables.insert(name.to_string(), literal_to_json(default, &Map::new()));
        }
    }
    variables
}
