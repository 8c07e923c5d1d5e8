// murmur/murmur-store
//
// Copyright: 2024, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use async_trait::async_trait;
use futures::{stream, StreamExt};
use parking_lot::{Mutex, RwLock};
use serde_json::{Map, Value};
use tokio::sync::broadcast;
use tokio::sync::broadcast::error::RecvError;
use tracing::{debug, info};
use uuid::Uuid;

use crate::{
    Document, DocumentStore, DocumentStream, FieldValue, Patch, Query, StoreError,
};

type Collection = BTreeMap<String, Map<String, Value>>;
type Clock = Box<dyn Fn() -> i64 + Send + Sync>;

#[derive(Debug, Clone)]
enum Change {
    Collection(String),
    Outage(StoreError),
}

/// A `DocumentStore` that keeps all documents in memory and supports live queries. All clones
/// share the same documents, so that multiple clients can be connected to one store.
#[derive(Clone)]
pub struct InMemoryStore {
    inner: Arc<Inner>,
}

struct Inner {
    collections: RwLock<HashMap<String, Collection>>,
    changes: broadcast::Sender<Change>,
    clock: Clock,
    last_timestamp: Mutex<i64>,
    pending_failure: Mutex<Option<StoreError>>,
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::with_clock(|| chrono::Utc::now().timestamp_millis())
    }

    /// Creates a store which reads server timestamps from `clock` (milliseconds since the Unix
    /// epoch). Server timestamps are strictly increasing even if `clock` is not.
    pub fn with_clock(clock: impl Fn() -> i64 + Send + Sync + 'static) -> Self {
        let (changes, _) = broadcast::channel(256);

        Self {
            inner: Arc::new(Inner {
                collections: Default::default(),
                changes,
                clock: Box::new(clock),
                last_timestamp: Mutex::new(i64::MIN),
                pending_failure: Default::default(),
            }),
        }
    }

    /// Makes the next request fail with `error`.
    pub fn fail_next_request(&self, error: StoreError) {
        self.inner.pending_failure.lock().replace(error);
    }

    /// Terminates all open subscriptions with `error`.
    pub fn interrupt_subscriptions(&self, error: StoreError) {
        info!("Interrupting subscriptions: {}", error);
        _ = self.inner.changes.send(Change::Outage(error));
    }
}

impl Inner {
    fn check_availability(&self) -> Result<(), StoreError> {
        match self.pending_failure.lock().take() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }

    fn next_timestamp(&self) -> i64 {
        let mut last = self.last_timestamp.lock();
        let timestamp = (self.clock)().max(last.saturating_add(1));
        *last = timestamp;
        timestamp
    }

    fn timestamp_for(&self, patch: &Patch) -> i64 {
        let needs_timestamp = patch
            .iter()
            .any(|(_, value)| matches!(value, FieldValue::ServerTimestamp));

        if needs_timestamp {
            self.next_timestamp()
        } else {
            0
        }
    }

    fn snapshot(&self, collection: &str, query: &Query) -> Vec<Document> {
        let collections = self.collections.read();
        let Some(documents) = collections.get(collection) else {
            return vec![];
        };
        query.apply(
            documents
                .iter()
                .map(|(id, data)| Document::new(id.clone(), data.clone())),
        )
    }

    fn notify(&self, collection: &str) {
        // Nobody listening is fine.
        _ = self
            .changes
            .send(Change::Collection(collection.to_string()));
    }
}

#[async_trait]
impl DocumentStore for InMemoryStore {
    async fn append(&self, collection: &str, patch: Patch) -> Result<String, StoreError> {
        self.inner.check_availability()?;

        let id = Uuid::new_v4().simple().to_string();
        let mut data = Map::new();
        patch.apply(&mut data, self.inner.timestamp_for(&patch));

        debug!("Appending document {} to {}", id, collection);
        self.inner
            .collections
            .write()
            .entry(collection.to_string())
            .or_default()
            .insert(id.clone(), data);
        self.inner.notify(collection);

        Ok(id)
    }

    async fn set(&self, collection: &str, id: &str, patch: Patch) -> Result<(), StoreError> {
        self.inner.check_availability()?;

        let mut data = Map::new();
        patch.apply(&mut data, self.inner.timestamp_for(&patch));

        debug!("Setting document {} in {}", id, collection);
        self.inner
            .collections
            .write()
            .entry(collection.to_string())
            .or_default()
            .insert(id.to_string(), data);
        self.inner.notify(collection);

        Ok(())
    }

    async fn update(&self, collection: &str, id: &str, patch: Patch) -> Result<(), StoreError> {
        self.inner.check_availability()?;

        let timestamp = self.inner.timestamp_for(&patch);

        {
            let mut collections = self.inner.collections.write();
            let Some(data) = collections
                .get_mut(collection)
                .and_then(|documents| documents.get_mut(id))
            else {
                return Err(StoreError::NotFound {
                    collection: collection.to_string(),
                    id: id.to_string(),
                });
            };
            debug!("Updating document {} in {}", id, collection);
            patch.apply(data, timestamp);
        }

        self.inner.notify(collection);
        Ok(())
    }

    async fn remove(&self, collection: &str, id: &str) -> Result<(), StoreError> {
        self.inner.check_availability()?;

        let removed = self
            .inner
            .collections
            .write()
            .get_mut(collection)
            .and_then(|documents| documents.remove(id))
            .is_some();

        if removed {
            debug!("Removed document {} from {}", id, collection);
            self.inner.notify(collection);
        }

        Ok(())
    }

    async fn get(&self, collection: &str, id: &str) -> Result<Option<Document>, StoreError> {
        self.inner.check_availability()?;

        Ok(self
            .inner
            .collections
            .read()
            .get(collection)
            .and_then(|documents| documents.get(id))
            .map(|data| Document::new(id, data.clone())))
    }

    async fn query_once(
        &self,
        collection: &str,
        query: Query,
    ) -> Result<Vec<Document>, StoreError> {
        self.inner.check_availability()?;
        Ok(self.inner.snapshot(collection, &query))
    }

    async fn subscribe(
        &self,
        collection: &str,
        query: Query,
    ) -> Result<DocumentStream, StoreError> {
        self.inner.check_availability()?;

        // Subscribe before taking the initial snapshot so that no change gets lost in between.
        let receiver = self.inner.changes.subscribe();
        let initial = self.inner.snapshot(collection, &query);

        let state = WatchState {
            receiver,
            inner: self.inner.clone(),
            collection: collection.to_string(),
            query,
            last: initial.clone(),
            finished: false,
        };

        let updates = stream::unfold(state, |mut state| async move {
            let item = state.next_snapshot().await?;
            Some((item, state))
        });

        Ok(stream::once(async move { Ok(initial) })
            .chain(updates)
            .boxed())
    }
}

struct WatchState {
    receiver: broadcast::Receiver<Change>,
    inner: Arc<Inner>,
    collection: String,
    query: Query,
    last: Vec<Document>,
    finished: bool,
}

impl WatchState {
    async fn next_snapshot(&mut self) -> Option<Result<Vec<Document>, StoreError>> {
        if self.finished {
            return None;
        }

        loop {
            match self.receiver.recv().await {
                Ok(Change::Collection(collection)) if collection == self.collection => (),
                Ok(Change::Collection(_)) => continue,
                Ok(Change::Outage(error)) => {
                    self.finished = true;
                    return Some(Err(error));
                }
                // We missed some changes, but a fresh snapshot covers them all.
                Err(RecvError::Lagged(_)) => (),
                Err(RecvError::Closed) => return None,
            }

            let snapshot = self.inner.snapshot(&self.collection, &self.query);
            if snapshot == self.last {
                continue;
            }
            self.last = snapshot.clone();
            return Some(Ok(snapshot));
        }
    }
}
