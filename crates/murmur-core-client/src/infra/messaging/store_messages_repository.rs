// murmur/murmur-core-client
//
// Copyright: 2024, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use std::sync::Arc;

use async_trait::async_trait;
use futures::StreamExt;
use serde_json::{json, Value};

use murmur_store::prelude::*;

use crate::domain::messaging::models::{Emoji, Message, MessageId, SendMessageRequest};
use crate::domain::messaging::repos::{MessageStream, MessagesRepository};
use crate::domain::shared::models::UserId;

use super::message_record::fields;
use super::MessageRecord;

pub struct StoreMessagesRepository {
    repo: Repository<MessageRecord>,
}

impl StoreMessagesRepository {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self {
            repo: Repository::new(store),
        }
    }
}

#[async_trait]
impl MessagesRepository for StoreMessagesRepository {
    async fn get(&self, id: &MessageId) -> Result<Option<Message>, StoreError> {
        Ok(self.repo.get(id).await?.map(Message::from))
    }

    async fn append(&self, request: &SendMessageRequest) -> Result<MessageId, StoreError> {
        let patch = Patch::new()
            .set(fields::TEXT, request.text.as_str())
            .set(fields::USER_ID, request.sender.id.as_ref())
            .set(fields::USER_NAME, request.sender.name.as_str())
            .set(fields::USER_EMAIL, request.sender.email.as_str())
            .set(fields::TIMESTAMP, request.timestamp.timestamp_millis())
            .server_timestamp(fields::CREATED_AT)
            .set(
                fields::ROOM_ID,
                request.scope.room_id().map(|id| id.to_string()),
            )
            .set_serialized(fields::MENTIONS, &request.mentions)?
            .set(fields::IS_EDITED, false)
            .set(fields::UPDATED_AT, Value::Null)
            .set(fields::REACTIONS, json!({}));

        Ok(self.repo.append(patch).await?.into())
    }

    async fn update_text(&self, id: &MessageId, text: &str) -> Result<(), StoreError> {
        self.repo
            .update(
                id,
                Patch::new()
                    .set(fields::TEXT, text)
                    .set(fields::IS_EDITED, true)
                    .server_timestamp(fields::UPDATED_AT),
            )
            .await
    }

    async fn delete(&self, id: &MessageId) -> Result<(), StoreError> {
        self.repo.delete(id).await
    }

    async fn add_reaction(
        &self,
        id: &MessageId,
        emoji: &Emoji,
        user_id: &UserId,
    ) -> Result<(), StoreError> {
        self.repo
            .update(
                id,
                Patch::new()
                    .set(MessageRecord::reaction_emoji_field(emoji), emoji.as_ref())
                    .array_union(
                        MessageRecord::reaction_users_field(emoji),
                        vec![json!(user_id)],
                    ),
            )
            .await
    }

    async fn remove_reaction(
        &self,
        id: &MessageId,
        emoji: &Emoji,
        user_id: &UserId,
    ) -> Result<(), StoreError> {
        self.repo
            .update(
                id,
                Patch::new().array_remove(
                    MessageRecord::reaction_users_field(emoji),
                    vec![json!(user_id)],
                ),
            )
            .await
    }

    async fn watch_all(&self) -> Result<MessageStream, StoreError> {
        let stream = self
            .repo
            .watch(Query::all().order_by(fields::CREATED_AT, QueryDirection::Forward))
            .await?;

        Ok(stream
            .map(|records| records.map(|records| records.into_iter().map(Message::from).collect()))
            .boxed())
    }
}
