// murmur/murmur-store
//
// Copyright: 2024, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use std::fmt::{Display, Formatter};

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::StoreError;

/// A path to a (possibly nested) field of a document.
///
/// `FieldPath::from("a.b")` addresses `{"a": {"b": …}}`. Use `FieldPath::new` when a segment
/// may itself contain a dot.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FieldPath(Vec<String>);

impl FieldPath {
    pub fn new<S: Into<String>>(segments: impl IntoIterator<Item = S>) -> Self {
        Self(segments.into_iter().map(Into::into).collect())
    }

    pub fn segments(&self) -> &[String] {
        &self.0
    }
}

impl From<&str> for FieldPath {
    fn from(value: &str) -> Self {
        Self(value.split('.').map(ToString::to_string).collect())
    }
}

impl From<String> for FieldPath {
    fn from(value: String) -> Self {
        Self::from(value.as_str())
    }
}

impl Display for FieldPath {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.join("."))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub id: String,
    pub data: Map<String, Value>,
}

impl Document {
    pub fn new(id: impl Into<String>, data: Map<String, Value>) -> Self {
        Self {
            id: id.into(),
            data,
        }
    }

    /// Returns the value at `path` or `None` if any segment is missing.
    pub fn field(&self, path: &FieldPath) -> Option<&Value> {
        let (first, rest) = path.segments().split_first()?;
        let mut value = self.data.get(first)?;

        for segment in rest {
            value = value.as_object()?.get(segment)?;
        }

        Some(value)
    }

    /// Deserializes the document into `T`. The document's id is made available to `T` as the
    /// field `id`.
    pub fn decode<T: DeserializeOwned>(&self) -> Result<T, StoreError> {
        let mut data = self.data.clone();
        data.insert("id".to_string(), Value::String(self.id.clone()));
        Ok(serde_json::from_value(Value::Object(data))?)
    }
}
