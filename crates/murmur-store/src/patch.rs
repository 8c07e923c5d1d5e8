// murmur/murmur-store
//
// Copyright: 2024, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use serde::Serialize;
use serde_json::{Map, Value};

use crate::{FieldPath, StoreError};

/// The value written to a single field.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Value(Value),
    /// Replaced by the store with its own clock (milliseconds since the Unix epoch).
    ServerTimestamp,
    /// Adds each value to the array unless it is already contained.
    ArrayUnion(Vec<Value>),
    /// Removes all occurrences of each value from the array.
    ArrayRemove(Vec<Value>),
    Delete,
}

/// A list of field writes applied atomically to one document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Patch {
    fields: Vec<(FieldPath, FieldValue)>,
}

impl Patch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a patch that sets every top-level field of `value` except `id`.
    pub fn from_serializable<T: Serialize + ?Sized>(value: &T) -> Result<Self, StoreError> {
        let Value::Object(map) = serde_json::to_value(value)? else {
            return Err(StoreError::Serialization(
                "Only structs and maps can be converted into a Patch".to_string(),
            ));
        };

        Ok(Self {
            fields: map
                .into_iter()
                .filter(|(key, _)| key != "id")
                .map(|(key, value)| (FieldPath::new([key]), FieldValue::Value(value)))
                .collect(),
        })
    }

    pub fn set(mut self, path: impl Into<FieldPath>, value: impl Into<Value>) -> Self {
        self.fields
            .push((path.into(), FieldValue::Value(value.into())));
        self
    }

    pub fn set_serialized<T: Serialize + ?Sized>(
        self,
        path: impl Into<FieldPath>,
        value: &T,
    ) -> Result<Self, StoreError> {
        Ok(self.set(path, serde_json::to_value(value)?))
    }

    pub fn server_timestamp(mut self, path: impl Into<FieldPath>) -> Self {
        self.fields.push((path.into(), FieldValue::ServerTimestamp));
        self
    }

    pub fn array_union(mut self, path: impl Into<FieldPath>, values: Vec<Value>) -> Self {
        self.fields
            .push((path.into(), FieldValue::ArrayUnion(values)));
        self
    }

    pub fn array_remove(mut self, path: impl Into<FieldPath>, values: Vec<Value>) -> Self {
        self.fields
            .push((path.into(), FieldValue::ArrayRemove(values)));
        self
    }

    pub fn delete(mut self, path: impl Into<FieldPath>) -> Self {
        self.fields.push((path.into(), FieldValue::Delete));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &(FieldPath, FieldValue)> {
        self.fields.iter()
    }

    /// Applies the patch to `data`, resolving server timestamps to `timestamp`.
    pub fn apply(&self, data: &mut Map<String, Value>, timestamp: i64) {
        for (path, value) in self.fields.iter() {
            let Some((last, parents)) = path.segments().split_last() else {
                continue;
            };

            // Removals must not create the objects leading up to the field.
            let creates_parents = !matches!(value, FieldValue::ArrayRemove(_) | FieldValue::Delete);
            let Some(target) = parent_object(data, parents, creates_parents) else {
                continue;
            };

            match value {
                FieldValue::Value(value) => {
                    target.insert(last.clone(), value.clone());
                }
                FieldValue::ServerTimestamp => {
                    target.insert(last.clone(), Value::from(timestamp));
                }
                FieldValue::ArrayUnion(values) => {
                    let entry = target
                        .entry(last.clone())
                        .or_insert_with(|| Value::Array(vec![]));
                    if !entry.is_array() {
                        *entry = Value::Array(vec![]);
                    }
                    let Value::Array(array) = entry else {
                        unreachable!()
                    };
                    for value in values {
                        if !array.contains(value) {
                            array.push(value.clone());
                        }
                    }
                }
                FieldValue::ArrayRemove(values) => {
                    if let Some(Value::Array(array)) = target.get_mut(last) {
                        array.retain(|value| !values.contains(value));
                    }
                }
                FieldValue::Delete => {
                    target.remove(last);
                }
            }
        }
    }
}

fn parent_object<'a>(
    data: &'a mut Map<String, Value>,
    segments: &[String],
    create: bool,
) -> Option<&'a mut Map<String, Value>> {
    let mut target = data;

    for segment in segments {
        if create {
            let entry = target
                .entry(segment.clone())
                .or_insert_with(|| Value::Object(Map::new()));
            if !entry.is_object() {
                *entry = Value::Object(Map::new());
            }
        }
        target = target.get_mut(segment)?.as_object_mut()?;
    }

    Some(target)
}
