//! Prints AST nodes back to GraphQL source text.
//!
//! Output is compact (one line per definition) and preserves field order,
//! aliases, and argument order, so re-parsing printed text yields the same
//! selection structure.

use std::fmt;
use std::fmt::Display;
use std::fmt::Formatter;
use std::fmt::Write;

use crate::ast::Argument;
use crate::ast::Directive;
use crate::ast::Document;
use crate::ast::Field;
use crate::ast::FragmentDecl;
use crate::ast::Operation;
use crate::ast::OperationKind;
use crate::ast::Selection;
use crate::ast::TypeRef;
use crate::ast::Value;
use crate::ast::VariableDefinition;

impl Display for Document {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for op in &self.operations {
            if !first {
                f.write_char('\n')?;
            }
            first = false;
            writeln!(f, "{op}")?;
        }
        for frag in &self.fragments {
            if !first {
                f.write_char('\n')?;
            }
            first = false;
            writeln!(f, "{frag}")?;
        }
        Ok(())
    }
}

impl Display for Operation {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let is_shorthand = self.kind == OperationKind::Query
            && self.name.is_none()
            && self.variables.is_empty()
            && self.directives.is_empty();
        if !is_shorthand {
            f.write_str(self.kind.as_str())?;
            if let Some(name) = &self.name {
                write!(f, " {name}")?;
            }
            if !self.variables.is_empty() {
                f.write_char('(')?;
                write_separated(f, &self.variables, ", ")?;
                f.write_char(')')?;
            }
            write_directives(f, &self.directives)?;
            f.write_char(' ')?;
        }
        write_selection_set(f, &self.selections)
    }
}

impl Display for VariableDefinition {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "${}: {}", self.name, self.var_type)?;
        if let Some(default) = &self.default_value {
            write!(f, " = {default}")?;
        }
        write_directives(f, &self.directives)
    }
}

impl Display for FragmentDecl {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "fragment {} on {}", self.name, self.type_condition)?;
        write_directives(f, &self.directives)?;
        f.write_char(' ')?;
        write_selection_set(f, &self.selections)
    }
}

impl Display for Selection {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Selection::Field(field) => field.fmt(f),
            Selection::InlineFragment(inline) => {
                f.write_str("...")?;
                if let Some(on) = &inline.type_condition {
                    write!(f, " on {on}")?;
                }
                write_directives(f, &inline.directives)?;
                f.write_char(' ')?;
                write_selection_set(f, &inline.selections)
            },
            Selection::FragmentSpread(spread) => {
                write!(f, "...{}", spread.fragment_name)?;
                write_directives(f, &spread.directives)
            },
        }
    }
}

impl Display for Field {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        if self.has_alias() {
            write!(f, "{}: ", self.alias)?;
        }
        f.write_str(&self.name.value)?;
        write_arguments(f, &self.arguments)?;
        write_directives(f, &self.directives)?;
        if !self.selections.is_empty() {
            f.write_char(' ')?;
            write_selection_set(f, &self.selections)?;
        }
        Ok(())
    }
}

impl Display for Directive {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "@{}", self.name)?;
        write_arguments(f, &self.arguments)
    }
}

impl Display for Argument {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.name, self.value)
    }
}

impl Display for TypeRef {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            TypeRef::Named(name) => f.write_str(&name.value),
            TypeRef::List(inner) => write!(f, "[{inner}]"),
            TypeRef::NonNull(inner) => write!(f, "{inner}!"),
        }
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Value::Variable(name) => write!(f, "${name}"),
            Value::Int(i) => write!(f, "{i}"),
            // `Debug` keeps a fractional part (`1.0`), so the literal re-lexes
            // as a float.
            Value::Float(v) => write!(f, "{v:?}"),
            Value::String(s) => write_string_literal(f, s),
            Value::Boolean(b) => write!(f, "{b}"),
            Value::Null => f.write_str("null"),
            Value::Enum(e) => f.write_str(e),
            Value::List(items) => {
                f.write_char('[')?;
                write_separated(f, items, ", ")?;
                f.write_char(']')
            },
            Value::Object(fields) => {
                f.write_char('{')?;
                for (i, field) in fields.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}: {}", field.name, field.value)?;
                }
                f.write_char('}')
            },
        }
    }
}

fn write_selection_set(f: &mut Formatter<'_>, selections: &[Selection]) -> fmt::Result {
    f.write_str("{ ")?;
    write_separated(f, selections, " ")?;
    f.write_str(" }")
}

fn write_arguments(f: &mut Formatter<'_>, arguments: &[Argument]) -> fmt::Result {
    if arguments.is_empty() {
        return Ok(());
    }
    f.write_char('(')?;
    write_separated(f, arguments, ", ")?;
    f.write_char(')')
}

fn write_directives(f: &mut Formatter<'_>, directives: &[Directive]) -> fmt::Result {
    for directive in directives {
        write!(f, " {directive}")?;
    }
    Ok(())
}

fn write_separated<T: Display>(f: &mut Formatter<'_>, items: &[T], sep: &str) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(sep)?;
        }
        item.fmt(f)?;
    }
    Ok(())
}

fn write_string_literal(f: &mut Formatter<'_>, s: &str) -> fmt::Result {
    f.write_char('"')?;
    for ch in s.chars() {
        match ch {
            '"' => f.write_str("\\\"")?,
            '\\' => f.write_str("\\\\")?,
            '\n' => f.write_str("\\n")?,
            '\r' => f.write_str("\\r")?,
            '\t' => f.write_str("\\t")?,
            c if c.is_control() => write!(f, "\\u{:04X}", c as u32)?,
            c => f.write_char(c)?,
        }
    }
    f.write_char('"')
}
