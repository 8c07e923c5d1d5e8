// murmur/murmur-store
//
// Copyright: 2024, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum StoreError {
    #[error("No document with id '{id}' exists in collection '{collection}'.")]
    NotFound { collection: String, id: String },
    #[error("Failed to encode or decode a document: {0}")]
    Serialization(String),
    #[error("The store is unavailable: {0}")]
    Unavailable(String),
    #[error("The store request timed out.")]
    Timeout,
}

impl From<serde_json::Error> for StoreError {
    fn from(value: serde_json::Error) -> Self {
        Self::Serialization(value.to_string())
    }
}
