// murmur/murmur-store
//
// Copyright: 2024, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use std::cmp::Ordering;

use serde_json::Value;

use crate::{Document, FieldPath};

#[derive(Debug, Clone, PartialEq)]
pub enum Filter {
    Eq(FieldPath, Value),
    NotEq(FieldPath, Value),
    /// Matches if the field is an array containing the value.
    ArrayContains(FieldPath, Value),
    /// Matches if the field is a string starting with the prefix.
    Prefix(FieldPath, String),
}

impl Filter {
    pub fn eq(path: impl Into<FieldPath>, value: impl Into<Value>) -> Self {
        Self::Eq(path.into(), value.into())
    }

    pub fn not_eq(path: impl Into<FieldPath>, value: impl Into<Value>) -> Self {
        Self::NotEq(path.into(), value.into())
    }

    pub fn array_contains(path: impl Into<FieldPath>, value: impl Into<Value>) -> Self {
        Self::ArrayContains(path.into(), value.into())
    }

    pub fn prefix(path: impl Into<FieldPath>, prefix: impl Into<String>) -> Self {
        Self::Prefix(path.into(), prefix.into())
    }

    pub fn matches(&self, document: &Document) -> bool {
        const NULL: Value = Value::Null;

        match self {
            Filter::Eq(path, value) => document.field(path).unwrap_or(&NULL) == value,
            Filter::NotEq(path, value) => document.field(path).unwrap_or(&NULL) != value,
            Filter::ArrayContains(path, value) => document
                .field(path)
                .and_then(Value::as_array)
                .map(|array| array.contains(value))
                .unwrap_or(false),
            Filter::Prefix(path, prefix) => document
                .field(path)
                .and_then(Value::as_str)
                .map(|s| s.starts_with(prefix.as_str()))
                .unwrap_or(false),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum QueryDirection {
    #[default]
    Forward,
    Backward,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Query {
    pub filters: Vec<Filter>,
    pub order_by: Vec<(FieldPath, QueryDirection)>,
    pub limit: Option<usize>,
}

impl Query {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn filter(mut self, filter: Filter) -> Self {
        self.filters.push(filter);
        self
    }

    pub fn order_by(mut self, path: impl Into<FieldPath>, direction: QueryDirection) -> Self {
        self.order_by.push((path.into(), direction));
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn matches(&self, document: &Document) -> bool {
        self.filters.iter().all(|filter| filter.matches(document))
    }

    /// Filters, sorts and truncates `documents`. Documents which compare equal on all sort keys
    /// are ordered by their id.
    pub fn apply(&self, documents: impl IntoIterator<Item = Document>) -> Vec<Document> {
        let mut documents = documents
            .into_iter()
            .filter(|doc| self.matches(doc))
            .collect::<Vec<_>>();

        documents.sort_by(|lhs, rhs| {
            for (path, direction) in self.order_by.iter() {
                let ordering = compare_values(lhs.field(path), rhs.field(path));
                let ordering = match direction {
                    QueryDirection::Forward => ordering,
                    QueryDirection::Backward => ordering.reverse(),
                };
                if ordering != Ordering::Equal {
                    return ordering;
                }
            }
            lhs.id.cmp(&rhs.id)
        });

        if let Some(limit) = self.limit {
            documents.truncate(limit);
        }

        documents
    }
}

fn type_rank(value: &Value) -> u8 {
    match value {
        Value::Null => 0,
        Value::Bool(_) => 1,
        Value::Number(_) => 2,
        Value::String(_) => 3,
        Value::Array(_) => 4,
        Value::Object(_) => 5,
    }
}

fn compare_values(lhs: Option<&Value>, rhs: Option<&Value>) -> Ordering {
    let lhs = lhs.unwrap_or(&Value::Null);
    let rhs = rhs.unwrap_or(&Value::Null);

    match (lhs, rhs) {
        (Value::Bool(l), Value::Bool(r)) => l.cmp(r),
        (Value::Number(l), Value::Number(r)) => {
            match (l.as_i64(), r.as_i64()) {
                (Some(l), Some(r)) => l.cmp(&r),
                _ => l
                    .as_f64()
                    .unwrap_or_default()
                    .total_cmp(&r.as_f64().unwrap_or_default()),
            }
        }
        (Value::String(l), Value::String(r)) => l.cmp(r),
        _ => type_rank(lhs).cmp(&type_rank(rhs)),
    }
}
