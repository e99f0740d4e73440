use gqlengine_parser::GraphQLParseError;
use gqlengine_parser::Location;
use serde::Serialize;

/// The phase a [`QueryError`] came from.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum QueryErrorKind {
    Syntax,
    Validation,
    OperationSelection,
    VariableType,
    FieldExecution,
    Coercion,
    Cancellation,
}

impl QueryErrorKind {
    /// Phase-level errors abort the request before any resolver runs.
    pub fn is_request_error(&self) -> bool {
        matches!(
            self,
            Self::Syntax | Self::Validation | Self::OperationSelection | Self::VariableType,
        )
    }
}

/// One step of a response path: an object key or a list index.
#[derive(Clone, Debug, Eq, Hash, PartialEq, Serialize)]
#[serde(untagged)]
pub enum PathSegment {
    Key(String),
    Index(usize),
}

impl std::fmt::Display for PathSegment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Key(key) => f.write_str(key),
            Self::Index(idx) => write!(f, "{idx}"),
        }
    }
}

impl From<&str> for PathSegment {
    fn from(value: &str) -> Self {
        Self::Key(value.to_string())
    }
}

impl From<usize> for PathSegment {
    fn from(value: usize) -> Self {
        Self::Index(value)
    }
}

/// An error as it appears in a response's `errors` list.
///
/// `rule` and `kind` are for programmatic use and are not serialized.
#[derive(Clone, Debug, PartialEq, Serialize, thiserror::Error)]
#[error("{}", self.format_oneline())]
pub struct QueryError {
    pub message: String,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub locations: Vec<Location>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub path: Vec<PathSegment>,

    /// Name of the validation rule that produced this error.
    #[serde(skip)]
    pub rule: Option<&'static str>,

    #[serde(skip)]
    pub kind: QueryErrorKind,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub extensions: Option<serde_json::Map<String, serde_json::Value>>,
}

impl QueryError {
    pub fn new(kind: QueryErrorKind, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            locations: Vec::new(),
            path: Vec::new(),
            rule: None,
            kind,
            extensions: None,
        }
    }

    pub fn syntax(err: &GraphQLParseError) -> Self {
        Self::new(QueryErrorKind::Syntax, format!("syntax error: {}", err.message()))
            .with_location(err.location())
    }

    pub fn validation(rule: &'static str, message: impl Into<String>) -> Self {
        let mut err = Self::new(QueryErrorKind::Validation, message);
        err.rule = Some(rule);
        err
    }

    pub fn with_location(mut self, location: Location) -> Self {
        self.locations.push(location);
        self
    }

    pub fn with_locations(mut self, locations: impl IntoIterator<Item = Location>) -> Self {
        self.locations.extend(locations);
        self
    }

    pub fn with_path(mut self, path: Vec<PathSegment>) -> Self {
        self.path = path;
        self
    }

    pub fn with_extension(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.extensions
            .get_or_insert_with(serde_json::Map::new)
            .insert(key.into(), value);
        self
    }

    /// `message (line 1, column 2)`; locations are omitted when absent.
    pub fn format_oneline(&self) -> String {
        let mut out = self.message.clone();
        if let Some(loc) = self.locations.first() {
            out.push_str(&format!(" (line {}, column {})", loc.line, loc.column));
        }
        if !self.path.is_empty() {
            let path: Vec<String> = self.path.iter().map(|seg| seg.to_string()).collect();
            out.push_str(&format!(" at {}", path.join(".")));
        }
        out
    }
}

/// A non-empty batch of [`QueryError`]s returned as one `Err`.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
#[error("{}", self.0.iter().map(|e| e.to_string()).collect::<Vec<_>>().join("\n"))]
pub struct QueryErrors(pub Vec<QueryError>);

impl QueryErrors {
    pub fn iter(&self) -> std::slice::Iter<'_, QueryError> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<QueryError> for QueryErrors {
    fn from(value: QueryError) -> Self {
        Self(vec![value])
    }
}
