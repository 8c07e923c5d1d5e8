// murmur/murmur-core-client
//
// Copyright: 2024, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use futures::stream::BoxStream;
use futures::{Stream, StreamExt};
use tracing::info;

use crate::app::deps::DynRoomsRepository;
use crate::domain::shared::models::{
    AuthorizationError, ChatError, EntityKind, RoomId, Scope, UserId,
};

/// Checks whether `user_id` may read from and write to `scope`. The global scope and public
/// rooms are open to everybody, private rooms only to their members.
///
/// Returns a `MembershipGuard` if access depends on a membership which can be revoked later.
pub(crate) async fn ensure_can_access(
    rooms_repo: &DynRoomsRepository,
    scope: &Scope,
    user_id: &UserId,
) -> Result<Option<MembershipGuard>, ChatError> {
    let Some(room_id) = scope.room_id() else {
        return Ok(None);
    };

    let Some(room) = rooms_repo.get(room_id).await? else {
        return Err(ChatError::not_found(EntityKind::Room, room_id));
    };

    if !room.is_readable_by(user_id) {
        return Err(AuthorizationError::NotRoomMember.into());
    }

    // Rooms never change their visibility, so public rooms stay readable.
    if !room.is_private {
        return Ok(None);
    }

    Ok(Some(MembershipGuard {
        rooms_repo: rooms_repo.clone(),
        room_id: room_id.clone(),
        user_id: user_id.clone(),
    }))
}

/// Re-checks the membership of a user in a private room, e.g. after the user left the room
/// while a subscription was running.
#[derive(Clone)]
pub(crate) struct MembershipGuard {
    rooms_repo: DynRoomsRepository,
    room_id: RoomId,
    user_id: UserId,
}

impl MembershipGuard {
    pub async fn check(&self) -> Result<(), ChatError> {
        let Some(room) = self.rooms_repo.get(&self.room_id).await? else {
            return Err(ChatError::not_found(EntityKind::Room, &self.room_id));
        };

        if !room.is_member(&self.user_id) {
            info!(
                "{} is no longer a member of room {}.",
                self.user_id, self.room_id
            );
            return Err(AuthorizationError::NotRoomMember.into());
        }

        Ok(())
    }

    /// Checks the membership before passing on each snapshot of `snapshots`. Once the
    /// membership ends the stream yields `AuthorizationError::NotRoomMember`.
    pub fn guard<T, S>(
        guard: Option<Self>,
        snapshots: S,
    ) -> BoxStream<'static, Result<T, ChatError>>
    where
        T: Send + 'static,
        S: Stream<Item = Result<T, ChatError>> + Send + 'static,
    {
        let Some(guard) = guard else {
            return snapshots.boxed();
        };

        snapshots
            .then(move |snapshot| {
                let guard = guard.clone();
                async move {
                    let snapshot = snapshot?;
                    guard.check().await?;
                    Ok(snapshot)
                }
            })
            .boxed()
    }
}
