//! Coercion of request input into values of declared input types.
//!
//! Raw variables arrive as JSON and go through [`coerce_variable_value()`].
//! Argument literals in the document go through
//! [`coerce_argument_value()`]; variable references inside them are looked
//! up in the request's raw variables and coerced against the variable's
//! declared type at that point, so a bad variable only fails the positions
//! that use it.
//!
//! Coerced values are plain JSON: enum values become strings, `ID`s become
//! strings, and input objects gain their defaulted fields.

use crate::Schema;
use crate::types::GraphQLType;
use crate::types::Parameter;
use crate::types::TypeAnnotation;
use gqlengine_parser::Location;
use gqlengine_parser::ast;
use indexmap::IndexMap;
use serde_json::Map;
use serde_json::Value;
use thiserror::Error;

/// Why an input value does not fit its declared type.
#[derive(Clone, Debug, Error, PartialEq)]
#[error("{message}")]
pub struct CoercionError {
    pub message: String,
}

impl CoercionError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

type Result<T> = std::result::Result<T, CoercionError>;

/// Declared variable types of the executing operation, by variable name.
pub type VariableTypes = IndexMap<String, TypeAnnotation>;

/// Coerced field arguments in schema-declaration order.
pub type Arguments = IndexMap<String, Value>;

/// Coerces a raw JSON variable value to `annot`.
pub fn coerce_variable_value(value: &Value, annot: &TypeAnnotation, schema: &Schema) -> Result<Value> {
    if value.is_null() {
        return null_for(annot);
    }

    match annot {
        TypeAnnotation::List { inner, .. } => match value {
            Value::Array(items) => items
                .iter()
                .map(|item| coerce_variable_value(item, inner, schema))
                .collect::<Result<Vec<_>>>()
                .map(Value::Array),
            single => Ok(Value::Array(vec![coerce_variable_value(single, inner, schema)?])),
        },

        TypeAnnotation::Named { type_name, .. } => {
            let mismatch = || {
                CoercionError::new(format!("Expected value of type \"{annot}\", found {value}."))
            };
            match lookup_input_type(schema, type_name)? {
                GraphQLType::Int => match value {
                    Value::Number(num) => int_from_number(num).ok_or_else(|| {
                        CoercionError::new(format!(
                            "Int cannot represent non 32-bit signed integer value: {value}",
                        ))
                    }),
                    _ => Err(mismatch()),
                },
                GraphQLType::Float if value.is_number() => Ok(value.clone()),
                GraphQLType::String if value.is_string() => Ok(value.clone()),
                GraphQLType::Bool if value.is_boolean() => Ok(value.clone()),
                GraphQLType::ID => match value {
                    Value::String(_) => Ok(value.clone()),
                    Value::Number(num) if num.is_i64() || num.is_u64() =>
                        Ok(Value::String(num.to_string())),
                    _ => Err(mismatch()),
                },
                GraphQLType::Scalar(_) => Ok(value.clone()),
                GraphQLType::Enum(enum_type) => match value.as_str() {
                    Some(name) if enum_type.value(name).is_some() => Ok(value.clone()),
                    Some(name) => Err(CoercionError::new(format!(
                        "Value \"{name}\" does not exist in \"{}\" enum.",
                        enum_type.name(),
                    ))),
                    None => Err(mismatch()),
                },
                GraphQLType::InputObject(input_type) => {
                    let Value::Object(fields) = value else {
                        return Err(mismatch());
                    };
                    coerce_input_object(
                        input_type.name(),
                        input_type.fields(),
                        |name| fields.get(name),
                        fields.keys().map(String::as_str),
                        |raw, field_annot| coerce_variable_value(raw, field_annot, schema),
                        schema,
                    )
                },
                _ => Err(mismatch()),
            }
        },
    }
}

/// Coerces an argument literal to `annot`. `variables` holds the request's
/// variable values and `var_types` their declared types.
pub fn coerce_argument_value(
    value: &ast::Value,
    annot: &TypeAnnotation,
    variables: &Map<String, Value>,
    var_types: &VariableTypes,
    schema: &Schema,
) -> Result<Value> {
    if let ast::Value::Variable(name) = value {
        return match coerce_variable_reference(name.as_str(), variables, var_types, schema)? {
            Some(coerced) if !coerced.is_null() => Ok(coerced),
            _ => null_for(annot),
        };
    }

    if matches!(value, ast::Value::Null) {
        return null_for(annot);
    }

    match annot {
        TypeAnnotation::List { inner, .. } => match value {
            ast::Value::List(items) => items
                .iter()
                .map(|item| coerce_argument_value(item, inner, variables, var_types, schema))
                .collect::<Result<Vec<_>>>()
                .map(Value::Array),
            single => Ok(Value::Array(vec![coerce_argument_value(
                single,
                inner,
                variables,
                var_types,
                schema,
            )?])),
        },

        TypeAnnotation::Named { type_name, .. } => {
            let mismatch = || {
                CoercionError::new(format!("Expected value of type \"{annot}\", found {value}."))
            };
            match lookup_input_type(schema, type_name)? {
                GraphQLType::Int => match value {
                    ast::Value::Int(i) => i32::try_from(*i).map(Value::from).map_err(|_| {
                        CoercionError::new(format!(
                            "Int cannot represent non 32-bit signed integer value: {i}",
                        ))
                    }),
                    _ => Err(mismatch()),
                },
                GraphQLType::Float => match value {
                    ast::Value::Int(i) => Ok(Value::from(*i)),
                    ast::Value::Float(f) => serde_json::Number::from_f64(*f)
                        .map(Value::Number)
                        .ok_or_else(mismatch),
                    _ => Err(mismatch()),
                },
                GraphQLType::String => match value {
                    ast::Value::String(s) => Ok(Value::String(s.clone())),
                    _ => Err(mismatch()),
                },
                GraphQLType::Bool => match value {
                    ast::Value::Boolean(b) => Ok(Value::Bool(*b)),
                    _ => Err(mismatch()),
                },
                GraphQLType::ID => match value {
                    ast::Value::String(s) => Ok(Value::String(s.clone())),
                    ast::Value::Int(i) => Ok(Value::String(i.to_string())),
                    _ => Err(mismatch()),
                },
                GraphQLType::Scalar(_) => Ok(literal_to_json(value, variables)),
                GraphQLType::Enum(enum_type) => match value {
                    ast::Value::Enum(name) if enum_type.value(name).is_some() =>
                        Ok(Value::String(name.clone())),
                    ast::Value::Enum(name) => Err(CoercionError::new(format!(
                        "Value \"{name}\" does not exist in \"{}\" enum.",
                        enum_type.name(),
                    ))),
                    _ => Err(mismatch()),
                },
                GraphQLType::InputObject(input_type) => {
                    let ast::Value::Object(fields) = value else {
                        return Err(mismatch());
                    };
                    coerce_input_object(
                        input_type.name(),
                        input_type.fields(),
                        |name| {
                            let field = fields.iter().find(|f| f.name.as_str() == name)?;
                            if is_unset_variable(&field.value, variables, var_types) {
                                return None;
                            }
                            Some(&field.value)
                        },
                        fields.iter().map(|f| f.name.as_str()),
                        |field_value, field_annot| {
                            coerce_argument_value(field_value, field_annot, variables, var_types, schema)
                        },
                        schema,
                    )
                },
                _ => Err(mismatch()),
            }
        },
    }
}

/// Coerces a field's (or directive's) arguments in declaration order.
///
/// Absent arguments take their default, or are left out when they have
/// none. An argument given as a nullable variable the request did not
/// provide counts as absent. Errors carry the location to report them at.
pub fn coerce_arguments(
    params: &IndexMap<String, Parameter>,
    args: &[ast::Argument],
    owner_location: Location,
    variables: &Map<String, Value>,
    var_types: &VariableTypes,
    schema: &Schema,
) -> std::result::Result<Arguments, (CoercionError, Location)> {
    let mut coerced = Arguments::new();
    for param in params.values() {
        let arg = args
            .iter()
            .find(|arg| arg.name.as_str() == param.name())
            .filter(|arg| !is_unset_variable(&arg.value, variables, var_types));

        match arg {
            Some(arg) => {
                let value = coerce_argument_value(
                    &arg.value,
                    param.type_annotation(),
                    variables,
                    var_types,
                    schema,
                )
                .map_err(|err| (err, arg.location()))?;
                coerced.insert(param.name().to_string(), value);
            },
            None => match param.default_value() {
                Some(default) => {
                    let value = coerce_variable_value(default, param.type_annotation(), schema)
                        .map_err(|err| (err, owner_location))?;
                    coerced.insert(param.name().to_string(), value);
                },
                None if !param.type_annotation().is_nullable() => {
                    return Err((
                        CoercionError::new(format!(
                            "Argument \"{}\" of required type \"{}\" was not provided.",
                            param.name(),
                            param.type_annotation(),
                        )),
                        owner_location,
                    ));
                },
                None => (),
            },
        }
    }
    Ok(coerced)
}

/// Converts a literal to JSON without a target type, resolving variables
/// to their raw values. Used for custom scalars.
pub fn literal_to_json(value: &ast::Value, variables: &Map<String, Value>) -> Value {
    match value {
        ast::Value::Variable(name) => variables.get(name.as_str()).cloned().unwrap_or(Value::Null),
        ast::Value::Int(i) => Value::from(*i),
        ast::Value::Float(f) => serde_json::Number::from_f64(*f)
            .map(Value::Number)
            .unwrap_or(Value::Null),
        ast::Value::String(s) => Value::String(s.clone()),
        ast::Value::Boolean(b) => Value::Bool(*b),
        ast::Value::Null => Value::Null,
        ast::Value::Enum(name) => Value::String(name.clone()),
        ast::Value::List(items) =>
            Value::Array(items.iter().map(|item| literal_to_json(item, variables)).collect()),
        ast::Value::Object(fields) => Value::Object(
            fields
                .iter()
                .map(|field| (field.name.value.clone(), literal_to_json(&field.value, variables)))
                .collect(),
        ),
    }
}

/// Coerces the raw request value of `$name` against the variable's declared
/// type. `Ok(None)` means the variable is unset and may be.
pub fn coerce_variable_reference(
    name: &str,
    variables: &Map<String, Value>,
    var_types: &VariableTypes,
    schema: &Schema,
) -> Result<Option<Value>> {
    let raw = variables.get(name);
    let Some(var_annot) = var_types.get(name) else {
        return Ok(raw.cloned());
    };
    match raw {
        None if var_annot.is_nullable() => Ok(None),
        None => Err(CoercionError::new(format!(
            "Variable \"${name}\" of required type \"{var_annot}\" was not provided.",
        ))),
        Some(Value::Null) if !var_annot.is_nullable() => Err(CoercionError::new(format!(
            "Variable \"${name}\" of non-null type \"{var_annot}\" must not be null.",
        ))),
        Some(raw) => coerce_variable_value(raw, var_annot, schema)
            .map(Some)
            .map_err(|err| {
                CoercionError::new(format!("Variable \"${name}\" got invalid value {raw}; {err}"))
            }),
    }
}

/// An unset variable whose type allows it to be unset. Positions given
/// such a variable count as absent. An unset non-null variable is not
/// "unset" here, so coercing it reports the missing value.
fn is_unset_variable(value: &ast::Value, variables: &Map<String, Value>, var_types: &VariableTypes) -> bool {
    match value {
        ast::Value::Variable(name) => {
            let name = name.as_str();
            !variables.contains_key(name) && var_types.get(name).is_none_or(TypeAnnotation::is_nullable)
        },
        _ => false,
    }
}

fn null_for(annot: &TypeAnnotation) -> Result<Value> {
    if annot.is_nullable() {
        Ok(Value::Null)
    } else {
        Err(CoercionError::new(format!(
            "Expected non-nullable type \"{annot}\" not to be null.",
        )))
    }
}

fn lookup_input_type<'a>(schema: &'a Schema, type_name: &str) -> Result<&'a GraphQLType> {
    match schema.lookup_type(type_name) {
        Some(type_) if type_.is_input_type() => Ok(type_),
        Some(_) => Err(CoercionError::new(format!("Type \"{type_name}\" is not an input type."))),
        None => Err(CoercionError::new(format!("Unknown type \"{type_name}\"."))),
    }
}

/// Accepts whole numbers in i32 range, including `1.0`.
fn int_from_number(num: &serde_json::Number) -> Option<Value> {
    if let Some(i) = num.as_i64() {
        return i32::try_from(i).ok().map(Value::from);
    }
    if num.is_u64() {
        return None;
    }
    let f = num.as_f64()?;
    if f.fract() != 0.0 || f < i32::MIN as f64 || f > i32::MAX as f64 {
        return None;
    }
    Some(Value::from(f as i32))
}

/// Shared input-object coercion for raw and literal inputs.
///
/// `get` returns the provided value for a field name, `provided_names`
/// lists every field the input names, and `coerce` coerces one provided
/// value.
fn coerce_input_object<'v, V: 'v>(
    type_name: &str,
    params: &IndexMap<String, Parameter>,
    get: impl Fn(&str) -> Option<&'v V>,
    provided_names: impl Iterator<Item = &'v str>,
    coerce: impl Fn(&'v V, &TypeAnnotation) -> Result<Value>,
    schema: &Schema,
) -> Result<Value> {
    for name in provided_names {
        if !params.contains_key(name) {
            return Err(CoercionError::new(format!(
                "Field \"{name}\" is not defined by type \"{type_name}\".",
            )));
        }
    }

    let mut coerced = Map::new();
    for param in params.values() {
        match get(param.name()) {
            Some(provided) => {
                let value = coerce(provided, param.type_annotation())?;
                coerced.insert(param.name().to_string(), value);
            },
            None => match param.default_value() {
                Some(default) => {
                    let value = coerce_variable_value(default, param.type_annotation(), schema)?;
                    coerced.insert(param.name().to_string(), value);
                },
                None if !param.type_annotation().is_nullable() => {
                    return Err(CoercionError::new(format!(
                        "Field \"{}\" of required type \"{}\" was not provided.",
                        param.name(),
                        param.type_annotation(),
                    )));
                },
                None => (),
            },
        }
    }
    Ok(Value::Object(coerced))
}
