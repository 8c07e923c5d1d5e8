// murmur/murmur-core-client
//
// Copyright: 2024, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use async_trait::async_trait;
use futures::stream::BoxStream;

use murmur_store::StoreError;

use crate::domain::presence::models::TypingIndicator;
use crate::domain::shared::models::{Scope, UserId};

pub type TypingStream = BoxStream<'static, Result<Vec<TypingIndicator>, StoreError>>;

/// Typing indicators are stored once per user and scope.
#[async_trait]
#[cfg_attr(feature = "test", mockall::automock)]
pub trait TypingRepository: Send + Sync {
    /// Creates or refreshes the indicator of `user_id` in `scope` with the store's current
    /// time.
    async fn upsert(
        &self,
        scope: &Scope,
        user_id: &UserId,
        user_name: &str,
    ) -> Result<(), StoreError>;
    async fn delete(&self, scope: &Scope, user_id: &UserId) -> Result<(), StoreError>;
    /// Deletes the indicators of `user_id` in all scopes.
    async fn delete_all(&self, user_id: &UserId) -> Result<(), StoreError>;
    /// Live view of all indicators in `scope`, including stale ones.
    async fn watch(&self, scope: &Scope) -> Result<TypingStream, StoreError>;
}
