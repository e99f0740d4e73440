use crate::loc;
use crate::types::Parameter;
use crate::types::TypeAnnotation;
use indexmap::IndexMap;

/// A directive definition, either built in or declared in SDL.
#[derive(Clone, Debug, PartialEq)]
pub struct Directive {
    pub(crate) def_location: loc::SchemaDefLocation,
    pub(crate) name: String,
    pub(crate) params: IndexMap<String, Parameter>,
}

impl Directive {
    pub(crate) fn builtins() -> Vec<Directive> {
        let if_param = || {
            let param = Parameter::builtin("if", TypeAnnotation::named("Boolean", false), None);
            IndexMap::from([("if".to_string(), param)])
        };
        vec![
            Self::builtin("skip", if_param()),
            Self::builtin("include", if_param()),
            Self::builtin(
                "deprecated",
                IndexMap::from([(
                    "reason".to_string(),
                    Parameter::builtin(
                        "reason",
                        TypeAnnotation::named("String", true),
                        Some(serde_json::Value::from("No longer supported")),
                    ),
                )]),
            ),
            Self::builtin(
                "specifiedBy",
                IndexMap::from([(
                    "url".to_string(),
                    Parameter::builtin("url", TypeAnnotation::named("String", false), None),
                )]),
            ),
        ]
    }

    fn builtin(name: &str, params: IndexMap<String, Parameter>) -> Self {
        Self {
            def_location: loc::SchemaDefLocation::GraphQLBuiltIn,
            name: name.to_string(),
            params,
        }
    }

    pub fn def_location(&self) -> &loc::SchemaDefLocation {
        &self.def_location
    }

    pub fn is_builtin(&self) -> bool {
        matches!(self.def_location, loc::SchemaDefLocation::GraphQLBuiltIn)
    }

    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    pub fn parameters(&self) -> &IndexMap<String, Parameter> {
        &self.params
    }
}
