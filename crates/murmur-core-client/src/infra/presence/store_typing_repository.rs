// murmur/murmur-core-client
//
// Copyright: 2024, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use std::sync::Arc;

use async_trait::async_trait;
use futures::StreamExt;
use tracing::warn;

use murmur_store::prelude::*;

use crate::domain::presence::models::TypingIndicator;
use crate::domain::presence::repos::{TypingRepository, TypingStream};
use crate::domain::shared::models::{Scope, UserId};

use super::typing_record::fields;
use super::TypingRecord;

pub struct StoreTypingRepository {
    repo: Repository<TypingRecord>,
}

impl StoreTypingRepository {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self {
            repo: Repository::new(store),
        }
    }
}

#[async_trait]
impl TypingRepository for StoreTypingRepository {
    async fn upsert(
        &self,
        scope: &Scope,
        user_id: &UserId,
        user_name: &str,
    ) -> Result<(), StoreError> {
        self.repo
            .set(
                &TypingRecord::id_for(scope, user_id),
                Patch::new()
                    .set(fields::USER_ID, user_id.as_ref())
                    .set(fields::USER_NAME, user_name)
                    .set(fields::SCOPE, scope.key())
                    .server_timestamp(fields::TIMESTAMP),
            )
            .await
    }

    async fn delete(&self, scope: &Scope, user_id: &UserId) -> Result<(), StoreError> {
        self.repo
            .delete(&TypingRecord::id_for(scope, user_id))
            .await
    }

    async fn delete_all(&self, user_id: &UserId) -> Result<(), StoreError> {
        let records = self
            .repo
            .query(Query::all().filter(Filter::eq(fields::USER_ID, user_id.as_ref())))
            .await?;

        for record in records {
            self.repo.delete(&record.id).await?;
        }
        Ok(())
    }

    async fn watch(&self, scope: &Scope) -> Result<TypingStream, StoreError> {
        let query = Query::all().filter(Filter::eq(fields::SCOPE, scope.key()));

        Ok(self
            .repo
            .watch(query)
            .await?
            .map(|records| {
                records.map(|records| {
                    records
                        .into_iter()
                        .filter_map(|record| {
                            let id = record.id.clone();
                            TypingIndicator::try_from(record)
                                .map_err(|err| {
                                    warn!("Ignoring typing indicator {}. {}", id, err);
                                })
                                .ok()
                        })
                        .collect()
                })
            })
            .boxed())
    }
}
