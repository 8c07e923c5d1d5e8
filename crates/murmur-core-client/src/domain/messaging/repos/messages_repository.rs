// murmur/murmur-core-client
//
// Copyright: 2024, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use async_trait::async_trait;
use futures::stream::BoxStream;

use murmur_store::StoreError;

use crate::domain::messaging::models::{Emoji, Message, MessageId, SendMessageRequest};
use crate::domain::shared::models::UserId;

pub type MessageStream = BoxStream<'static, Result<Vec<Message>, StoreError>>;

#[async_trait]
#[cfg_attr(feature = "test", mockall::automock)]
pub trait MessagesRepository: Send + Sync {
    async fn get(&self, id: &MessageId) -> Result<Option<Message>, StoreError>;
    /// Appends a message. Its creation date is assigned by the store.
    async fn append(&self, request: &SendMessageRequest) -> Result<MessageId, StoreError>;
    /// Replaces the text and marks the message as edited.
    async fn update_text(&self, id: &MessageId, text: &str) -> Result<(), StoreError>;
    async fn delete(&self, id: &MessageId) -> Result<(), StoreError>;
    async fn add_reaction(
        &self,
        id: &MessageId,
        emoji: &Emoji,
        user_id: &UserId,
    ) -> Result<(), StoreError>;
    /// Removes `user_id` from the users of `emoji`. The reaction entry itself remains in the
    /// store when its last user is removed, since the store can't remove it atomically. Such
    /// entries are never part of a `Message`.
    async fn remove_reaction(
        &self,
        id: &MessageId,
        emoji: &Emoji,
        user_id: &UserId,
    ) -> Result<(), StoreError>;
    /// Live view of all messages in all scopes.
    async fn watch_all(&self) -> Result<MessageStream, StoreError>;
}
