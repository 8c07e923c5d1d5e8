// murmur/murmur-core-client
//
// Copyright: 2024, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use futures::StreamExt;
use secrecy::{ExposeSecret, SecretString};
use tracing::info;

use murmur_proc_macros::InjectDependencies;

use crate::app::deps::{DynAppContext, DynIdentityProvider, DynRoomPasswordHasher, DynRoomsRepository};
use crate::app::services::Subscription;
use crate::domain::identity::services::IdentityProviderExt;
use crate::domain::rooms::models::{CreateRoomRequest, PasswordHash, Room};
use crate::domain::shared::models::{
    AuthorizationError, ChatError, EntityKind, RoomId, ValidationError,
};

#[derive(InjectDependencies)]
pub struct RoomsService {
    #[inject]
    ctx: DynAppContext,
    #[inject]
    identity_provider: DynIdentityProvider,
    #[inject]
    password_hasher: DynRoomPasswordHasher,
    #[inject]
    rooms_repo: DynRoomsRepository,
}

impl RoomsService {
    /// Subscribes to the rooms the current user is a member of, ordered by name.
    #[tracing::instrument(skip(self))]
    pub async fn subscribe_to_my_rooms(&self) -> Result<Subscription<Vec<Room>>, ChatError> {
        let user = self.identity_provider.require_user()?;

        let stream = self
            .rooms_repo
            .watch_memberships(&user.id)
            .await?
            .map(|snapshot| snapshot.map_err(ChatError::from));

        Ok(Subscription::spawn(stream))
    }

    /// Creates a room with the current user as its creator and only member. Private rooms need
    /// a password which other users have to provide when joining.
    #[tracing::instrument(skip(self, password))]
    pub async fn create_room(
        &self,
        name: &str,
        description: Option<&str>,
        is_private: bool,
        password: Option<SecretString>,
    ) -> Result<RoomId, ChatError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ValidationError::EmptyRoomName.into());
        }

        let password = password.filter(|password| !password.expose_secret().is_empty());
        if is_private && password.is_none() {
            return Err(ValidationError::MissingRoomPassword.into());
        }

        let user = self.identity_provider.require_user()?;

        let password_hash = match password {
            Some(password) if is_private => Some(self.hash_password(password).await?),
            _ => None,
        };

        let request = CreateRoomRequest {
            name: name.to_string(),
            description: description
                .map(str::trim)
                .filter(|description| !description.is_empty())
                .map(ToString::to_string),
            created_by: user.id,
            is_private,
            password_hash,
        };

        let room_id = self.rooms_repo.create(&request).await?;
        info!("Created room {} ('{}').", room_id, request.name);
        Ok(room_id)
    }

    /// Joins the room `room_id`. Joining a private room requires its password unless the
    /// current user is a member already. Joining a room twice has no effect.
    #[tracing::instrument(skip(self, password))]
    pub async fn join_room(
        &self,
        room_id: &RoomId,
        password: Option<SecretString>,
    ) -> Result<(), ChatError> {
        let user = self.identity_provider.require_user()?;
        let room = self.load_room(room_id).await?;

        if room.is_member(&user.id) {
            return Ok(());
        }

        if room.is_private {
            let hash = self.rooms_repo.get_password_hash(room_id).await?;

            let is_valid = match (password, hash) {
                (Some(password), Some(hash)) => self.verify_password(password, hash).await?,
                _ => false,
            };

            if !is_valid {
                return Err(AuthorizationError::InvalidRoomPassword.into());
            }
        }

        self.rooms_repo
            .add_member(room_id, &user.id)
            .await
            .map_err(|err| ChatError::from_store(err, EntityKind::Room, room_id))?;
        info!("Joined room {}.", room_id);
        Ok(())
    }

    /// Leaves the room `room_id`. Leaving a room one isn't a member of has no effect.
    #[tracing::instrument(skip(self))]
    pub async fn leave_room(&self, room_id: &RoomId) -> Result<(), ChatError> {
        let user = self.identity_provider.require_user()?;

        self.rooms_repo
            .remove_member(room_id, &user.id)
            .await
            .map_err(|err| ChatError::from_store(err, EntityKind::Room, room_id))?;
        info!("Left room {}.", room_id);
        Ok(())
    }

    /// Searches public rooms by name prefix. Private rooms are never returned.
    #[tracing::instrument(skip(self))]
    pub async fn search_rooms(&self, term: &str) -> Result<Vec<Room>, ChatError> {
        let term = term.trim();
        if term.is_empty() {
            return Ok(vec![]);
        }

        Ok(self
            .rooms_repo
            .search_public(term, self.ctx.config.room_search_limit)
            .await?)
    }

    #[tracing::instrument(skip(self))]
    pub async fn load_room(&self, room_id: &RoomId) -> Result<Room, ChatError> {
        self.rooms_repo
            .get(room_id)
            .await?
            .ok_or_else(|| ChatError::not_found(EntityKind::Room, room_id))
    }

    // Password hashing is CPU-bound and must not run on the async executor.
    async fn hash_password(&self, password: SecretString) -> Result<PasswordHash, ChatError> {
        let hasher = self.password_hasher.clone();
        let hash = tokio::task::spawn_blocking(move || hasher.hash(&password))
            .await
            .map_err(anyhow::Error::from)??;
        Ok(hash)
    }

    async fn verify_password(
        &self,
        password: SecretString,
        hash: PasswordHash,
    ) -> Result<bool, ChatError> {
        let hasher = self.password_hasher.clone();
        let is_valid = tokio::task::spawn_blocking(move || hasher.verify(&password, &hash))
            .await
            .map_err(anyhow::Error::from)?;
        Ok(is_valid)
    }
}
