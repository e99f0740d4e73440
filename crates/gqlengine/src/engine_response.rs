use gqlengine_core::QueryError;
use gqlengine_core::QueryErrors;
use serde::Serialize;
use serde::Serializer;
use serde::ser::Error as _;
use serde::ser::SerializeMap;
use serde_json::Map;
use serde_json::Value;

/// The `{"errors", "data", "extensions"}` response envelope.
///
/// `data` holds the serialized result exactly as execution produced it.
/// It is `None` when the request failed before execution (syntax,
/// validation, operation selection, or variable errors) and the bytes
/// `null` when a non-null failure propagated all the way to the root.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct EngineResponse {
    pub errors: Vec<QueryError>,
    pub data: Option<Vec<u8>>,
    pub extensions: Option<Map<String, Value>>,
}

impl EngineResponse {
    pub(crate) fn from_errors(errors: Vec<QueryError>) -> Self {
        Self {
            errors,
            data: None,
            extensions: None,
        }
    }

    pub fn with_extension(mut self, key: impl Into<String>, value: Value) -> Self {
        self.extensions.get_or_insert_with(Map::new).insert(key.into(), value);
        self
    }

    /// Folds the error list into a `Result`.
    pub fn error(&self) -> Result<(), QueryErrors> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(QueryErrors(self.errors.clone()))
        }
    }

    /// Decodes the data payload, if there is one.
    pub fn data_json(&self) -> serde_json::Result<Option<Value>> {
        self.data.as_deref().map(serde_json::from_slice).transpose()
    }

    /// Writes the envelope as JSON with `errors` first, then `data`, then
    /// `extensions`. The data bytes are copied through without re-parsing.
    pub fn to_json_bytes(&self) -> serde_json::Result<Vec<u8>> {
        let mut out = Vec::with_capacity(self.data.as_ref().map_or(64, |data| data.len() + 64));
        out.push(b'{');
        let mut first = true;
        let mut sep = |out: &mut Vec<u8>| {
            if !std::mem::take(&mut first) {
                out.push(b',');
            }
        };
        if !self.errors.is_empty() {
            sep(&mut out);
            out.extend_from_slice(b"\"errors\":");
            serde_json::to_writer(&mut out, &self.errors)?;
        }
        if let Some(data) = &self.data {
            sep(&mut out);
            out.extend_from_slice(b"\"data\":");
            out.extend_from_slice(data);
        }
        if let Some(extensions) = &self.extensions {
            sep(&mut out);
            out.extend_from_slice(b"\"extensions\":");
            serde_json::to_writer(&mut out, extensions)?;
        }
        out.push(b'}');
        Ok(out)
    }
}

impl Serialize for EngineResponse {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let len = usize::from(!self.errors.is_empty())
            + usize::from(self.data.is_some())
            + usize::from(self.extensions.is_some());
        let mut map = serializer.serialize_map(Some(len))?;
        if !self.errors.is_empty() {
            map.serialize_entry("errors", &self.errors)?;
        }
        if self.data.is_some() {
            let data = self.data_json().map_err(S::Error::custom)?;
            map.serialize_entry("data", &data)?;
        }
        if let Some(extensions) = &self.extensions {
            map.serialize_entry("extensions", extensions)?;
        }
        map.end()
    }
}
