// murmur/murmur-core-client
//
// Copyright: 2024, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use async_trait::async_trait;
use futures::stream::BoxStream;

use murmur_store::StoreError;

use crate::domain::rooms::models::{CreateRoomRequest, PasswordHash, Room};
use crate::domain::shared::models::{RoomId, UserId};

pub type RoomStream = BoxStream<'static, Result<Vec<Room>, StoreError>>;

#[async_trait]
#[cfg_attr(feature = "test", mockall::automock)]
pub trait RoomsRepository: Send + Sync {
    async fn get(&self, room_id: &RoomId) -> Result<Option<Room>, StoreError>;
    async fn get_password_hash(&self, room_id: &RoomId)
        -> Result<Option<PasswordHash>, StoreError>;
    /// Creates a room with its creator as the only member.
    async fn create(&self, request: &CreateRoomRequest) -> Result<RoomId, StoreError>;
    /// Adds `user_id` to the members of the room. Adding an existing member is a no-op.
    async fn add_member(&self, room_id: &RoomId, user_id: &UserId) -> Result<(), StoreError>;
    /// Removes `user_id` from the members of the room. Removing a non-member is a no-op.
    async fn remove_member(&self, room_id: &RoomId, user_id: &UserId) -> Result<(), StoreError>;
    /// Returns public rooms whose name starts with `prefix`, ordered by name.
    async fn search_public(&self, prefix: &str, limit: usize) -> Result<Vec<Room>, StoreError>;
    /// Live view of the rooms `user_id` is a member of, ordered by name.
    async fn watch_memberships(&self, user_id: &UserId) -> Result<RoomStream, StoreError>;
}
