// murmur/murmur-core-client
//
// Copyright: 2024, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use std::sync::Arc;

use async_trait::async_trait;
use futures::StreamExt;

use murmur_store::prelude::*;

use crate::domain::identity::models::SessionUser;
use crate::domain::shared::models::UserId;
use crate::domain::users::models::User;
use crate::domain::users::repos::{UserDirectoryRepository, UserStream};

use super::user_record::fields;
use super::UserRecord;

pub struct StoreUserDirectoryRepository {
    repo: Repository<UserRecord>,
}

impl StoreUserDirectoryRepository {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self {
            repo: Repository::new(store),
        }
    }

    async fn search(&self, filter: Filter, limit: usize) -> Result<Vec<User>, StoreError> {
        let query = Query::all()
            .filter(filter)
            .order_by(fields::DISPLAY_NAME, QueryDirection::Forward)
            .limit(limit);

        Ok(self
            .repo
            .query(query)
            .await?
            .into_iter()
            .map(User::from)
            .collect())
    }
}

#[async_trait]
impl UserDirectoryRepository for StoreUserDirectoryRepository {
    async fn upsert(&self, user: &SessionUser) -> Result<(), StoreError> {
        let profile = Patch::new()
            .set(fields::EMAIL, user.email.as_str())
            .set(fields::DISPLAY_NAME, user.name())
            .set(fields::AVATAR, user.avatar.clone());

        match self.repo.update(&user.id, profile.clone()).await {
            Ok(()) => Ok(()),
            Err(StoreError::NotFound { .. }) => {
                self.repo
                    .set(&user.id, profile.server_timestamp(fields::CREATED_AT))
                    .await
            }
            Err(err) => Err(err),
        }
    }

    async fn get(&self, user_id: &UserId) -> Result<Option<User>, StoreError> {
        Ok(self.repo.get(user_id).await?.map(User::from))
    }

    async fn get_all(&self) -> Result<Vec<User>, StoreError> {
        Ok(self
            .repo
            .query(Query::all().order_by(fields::DISPLAY_NAME, QueryDirection::Forward))
            .await?
            .into_iter()
            .map(User::from)
            .collect())
    }

    async fn search_by_name_prefix(
        &self,
        prefix: &str,
        limit: usize,
    ) -> Result<Vec<User>, StoreError> {
        self.search(Filter::prefix(fields::DISPLAY_NAME, prefix), limit)
            .await
    }

    async fn search_by_email_prefix(
        &self,
        prefix: &str,
        limit: usize,
    ) -> Result<Vec<User>, StoreError> {
        self.search(Filter::prefix(fields::EMAIL, prefix.to_lowercase()), limit)
            .await
    }

    async fn watch_all(&self) -> Result<UserStream, StoreError> {
        Ok(self
            .repo
            .watch(Query::all().order_by(fields::DISPLAY_NAME, QueryDirection::Forward))
            .await?
            .map(|records| records.map(|records| records.into_iter().map(User::from).collect()))
            .boxed())
    }
}
