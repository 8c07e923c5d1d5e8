// murmur/murmur-core-client
//
// Copyright: 2024, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use async_trait::async_trait;
use futures::stream::BoxStream;

use murmur_store::StoreError;

use crate::domain::identity::models::SessionUser;
use crate::domain::shared::models::UserId;
use crate::domain::users::models::User;

pub type UserStream = BoxStream<'static, Result<Vec<User>, StoreError>>;

#[async_trait]
#[cfg_attr(feature = "test", mockall::automock)]
pub trait UserDirectoryRepository: Send + Sync {
    /// Creates or updates the profile of `user`. The creation date is kept for existing
    /// profiles.
    async fn upsert(&self, user: &SessionUser) -> Result<(), StoreError>;
    async fn get(&self, user_id: &UserId) -> Result<Option<User>, StoreError>;
    /// Returns all users ordered by name.
    async fn get_all(&self) -> Result<Vec<User>, StoreError>;
    async fn search_by_name_prefix(&self, prefix: &str, limit: usize)
        -> Result<Vec<User>, StoreError>;
    async fn search_by_email_prefix(
        &self,
        prefix: &str,
        limit: usize,
    ) -> Result<Vec<User>, StoreError>;
    /// Live view of all users ordered by name.
    async fn watch_all(&self) -> Result<UserStream, StoreError>;
}
