// murmur/murmur-core-client
//
// Copyright: 2024, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use std::sync::Arc;

use async_trait::async_trait;
use futures::StreamExt;
use serde_json::json;

use murmur_store::prelude::*;

use crate::domain::rooms::models::{CreateRoomRequest, PasswordHash, Room};
use crate::domain::rooms::repos::{RoomStream, RoomsRepository};
use crate::domain::shared::models::{RoomId, UserId};

use super::room_record::fields;
use super::RoomRecord;

pub struct StoreRoomsRepository {
    repo: Repository<RoomRecord>,
}

impl StoreRoomsRepository {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self {
            repo: Repository::new(store),
        }
    }
}

#[async_trait]
impl RoomsRepository for StoreRoomsRepository {
    async fn get(&self, room_id: &RoomId) -> Result<Option<Room>, StoreError> {
        Ok(self.repo.get(room_id).await?.map(Room::from))
    }

    async fn get_password_hash(
        &self,
        room_id: &RoomId,
    ) -> Result<Option<PasswordHash>, StoreError> {
        Ok(self
            .repo
            .get(room_id)
            .await?
            .and_then(|record| record.password_hash()))
    }

    async fn create(&self, request: &CreateRoomRequest) -> Result<RoomId, StoreError> {
        let patch = Patch::new()
            .set(fields::NAME, request.name.as_str())
            .set(fields::DESCRIPTION, request.description.clone())
            .set(fields::CREATED_BY, request.created_by.as_ref())
            .server_timestamp(fields::CREATED_AT)
            .set(fields::MEMBERS, json!([request.created_by]))
            .set(fields::IS_PRIVATE, request.is_private)
            .set(
                fields::PASSWORD_HASH,
                request
                    .password_hash
                    .as_ref()
                    .map(|hash| hash.as_str().to_string()),
            );

        Ok(self.repo.append(patch).await?.into())
    }

    async fn add_member(&self, room_id: &RoomId, user_id: &UserId) -> Result<(), StoreError> {
        self.repo
            .update(
                room_id,
                Patch::new().array_union(fields::MEMBERS, vec![json!(user_id)]),
            )
            .await
    }

    async fn remove_member(&self, room_id: &RoomId, user_id: &UserId) -> Result<(), StoreError> {
        self.repo
            .update(
                room_id,
                Patch::new().array_remove(fields::MEMBERS, vec![json!(user_id)]),
            )
            .await
    }

    async fn search_public(&self, prefix: &str, limit: usize) -> Result<Vec<Room>, StoreError> {
        let query = Query::all()
            .filter(Filter::eq(fields::IS_PRIVATE, false))
            .filter(Filter::prefix(fields::NAME, prefix))
            .order_by(fields::NAME, QueryDirection::Forward)
            .limit(limit);

        Ok(self
            .repo
            .query(query)
            .await?
            .into_iter()
            .map(Room::from)
            .collect())
    }

    async fn watch_memberships(&self, user_id: &UserId) -> Result<RoomStream, StoreError> {
        let query = Query::all()
            .filter(Filter::array_contains(fields::MEMBERS, user_id.as_ref()))
            .order_by(fields::NAME, QueryDirection::Forward);

        Ok(self
            .repo
            .watch(query)
            .await?
            .map(|records| records.map(|records| records.into_iter().map(Room::from).collect()))
            .boxed())
    }
}
