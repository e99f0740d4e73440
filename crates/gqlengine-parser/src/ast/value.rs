use crate::Location;
use crate::ast::Name;

/// A value literal, or a variable reference, as written in the document.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    /// `$name`; the stored name omits the `$`.
    Variable(Name),
    Int(i64),
    Float(f64),
    String(String),
    Boolean(bool),
    Null,
    Enum(String),
    List(Vec<Value>),
    Object(Vec<ObjectField>),
}

impl Value {
    /// Calls `f` with every variable referenced anywhere inside this value.
    pub fn for_each_variable<'a>(&'a self, f: &mut impl FnMut(&'a Name)) {
        match self {
            Value::Variable(name) => f(name),
            Value::List(items) => items.iter().for_each(|item| item.for_each_variable(f)),
            Value::Object(fields) => fields.iter().for_each(|field| field.value.for_each_variable(f)),
            Value::Int(_)
            | Value::Float(_)
            | Value::String(_)
            | Value::Boolean(_)
            | Value::Null
            | Value::Enum(_) => (),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ObjectField {
    pub name: Name,
    pub value: Value,
}

/// `name: value` within an argument list.
#[derive(Clone, Debug, PartialEq)]
pub struct Argument {
    pub name: Name,
    pub value: Value,
}

impl Argument {
    pub fn location(&self) -> Location {
        self.name.location
    }
}

/// `@name(arguments)`
#[derive(Clone, Debug, PartialEq)]
pub struct Directive {
    pub name: Name,
    pub arguments: Vec<Argument>,

    /// Location of the `@`.
    pub location: Location,
}

impl Directive {
    pub fn argument(&self, name: &str) -> Option<&Argument> {
        self.arguments.iter().find(|arg| arg.name.value == name)
    }
}
