// murmur/murmur-store
//
// Copyright: 2024, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use async_trait::async_trait;
use futures::stream::BoxStream;

pub use document::{Document, FieldPath};
pub use error::StoreError;
pub use patch::{FieldValue, Patch};
pub use query::{Filter, Query, QueryDirection};

mod document;
mod driver;
mod error;
mod patch;
pub mod prelude;
mod query;
mod repository;

/// A stream of complete, ordered snapshots of the documents matching a query.
pub type DocumentStream = BoxStream<'static, Result<Vec<Document>, StoreError>>;

/// The contract of the backing document store.
///
/// The store is shared between many writers and arbitrates concurrent writes itself. Every
/// method operates on exactly one document (or one query), there are no transactions spanning
/// multiple documents.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Appends a new document to `collection` and returns its store-assigned id.
    async fn append(&self, collection: &str, patch: Patch) -> Result<String, StoreError>;

    /// Creates or replaces the document `id` with the result of applying `patch` to an empty
    /// document.
    async fn set(&self, collection: &str, id: &str, patch: Patch) -> Result<(), StoreError>;

    /// Merges `patch` into the existing document `id`. Fails with `StoreError::NotFound` if the
    /// document does not exist.
    async fn update(&self, collection: &str, id: &str, patch: Patch) -> Result<(), StoreError>;

    /// Removes the document `id`. Removing a missing document is not an error.
    async fn remove(&self, collection: &str, id: &str) -> Result<(), StoreError>;

    async fn get(&self, collection: &str, id: &str) -> Result<Option<Document>, StoreError>;

    async fn query_once(&self, collection: &str, query: Query)
        -> Result<Vec<Document>, StoreError>;

    /// Subscribes to `query`. The returned stream yields the current snapshot first and a new
    /// snapshot after every change to `collection`. An `Err` item is terminal.
    async fn subscribe(&self, collection: &str, query: Query)
        -> Result<DocumentStream, StoreError>;
}
