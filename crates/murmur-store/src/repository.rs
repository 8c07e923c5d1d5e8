// murmur/murmur-store
//
// Copyright: 2024, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use std::marker::PhantomData;
use std::sync::Arc;

use futures::stream::BoxStream;
use futures::StreamExt;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::warn;

use crate::{Document, DocumentStore, Patch, Query, StoreError};

pub trait Entity: Serialize + DeserializeOwned + Send + Sync {
    type ID: AsRef<str>;

    fn id(&self) -> &Self::ID;
    fn collection() -> &'static str;
}

/// Typed access to the collection of `E`.
pub struct Repository<E: Entity> {
    store: Arc<dyn DocumentStore>,
    phantom: PhantomData<E>,
}

impl<E: Entity> Clone for Repository<E> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            phantom: Default::default(),
        }
    }
}

impl<E: Entity + 'static> Repository<E> {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self {
            store,
            phantom: Default::default(),
        }
    }

    pub async fn get(&self, id: &E::ID) -> Result<Option<E>, StoreError> {
        self.store
            .get(E::collection(), id.as_ref())
            .await?
            .map(|doc| doc.decode::<E>())
            .transpose()
    }

    pub async fn query(&self, query: Query) -> Result<Vec<E>, StoreError> {
        let documents = self.store.query_once(E::collection(), query).await?;
        Ok(decode_all(documents))
    }

    pub async fn watch(
        &self,
        query: Query,
    ) -> Result<BoxStream<'static, Result<Vec<E>, StoreError>>, StoreError> {
        let stream = self.store.subscribe(E::collection(), query).await?;
        Ok(stream.map(|snapshot| snapshot.map(decode_all::<E>)).boxed())
    }

    /// Creates or replaces the document of `entity`.
    pub async fn put(&self, entity: &E) -> Result<(), StoreError> {
        self.store
            .set(
                E::collection(),
                entity.id().as_ref(),
                Patch::from_serializable(entity)?,
            )
            .await
    }

    pub async fn set(&self, id: &E::ID, patch: Patch) -> Result<(), StoreError> {
        self.store.set(E::collection(), id.as_ref(), patch).await
    }

    pub async fn append(&self, patch: Patch) -> Result<String, StoreError> {
        self.store.append(E::collection(), patch).await
    }

    pub async fn update(&self, id: &E::ID, patch: Patch) -> Result<(), StoreError> {
        self.store.update(E::collection(), id.as_ref(), patch).await
    }

    pub async fn delete(&self, id: &E::ID) -> Result<(), StoreError> {
        self.store.remove(E::collection(), id.as_ref()).await
    }

    pub fn collection_name(&self) -> &str {
        E::collection()
    }
}

/// Documents written by other clients might not conform to `E`. These are skipped so that one
/// malformed document cannot break a whole snapshot.
fn decode_all<E: Entity>(documents: Vec<Document>) -> Vec<E> {
    documents
        .into_iter()
        .filter_map(|doc| match doc.decode::<E>() {
            Ok(entity) => Some(entity),
            Err(err) => {
                warn!(
                    "Skipping malformed document {} in {}. {}",
                    doc.id,
                    E::collection(),
                    err
                );
                None
            }
        })
        .collect()
}
