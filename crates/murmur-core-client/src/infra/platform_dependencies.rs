// murmur/murmur-core-client
//
// Copyright: 2024, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use std::sync::Arc;

use murmur_store::DocumentStore;

use crate::app::deps::{AppContext, AppDependencies, DynIdentityProvider, DynTimeProvider};
use crate::infra::messaging::StoreMessagesRepository;
use crate::infra::presence::StoreTypingRepository;
use crate::infra::rooms::{Argon2RoomPasswordHasher, StoreRoomsRepository};
use crate::infra::users::StoreUserDirectoryRepository;

/// The collaborators supplied by the host application.
pub struct PlatformDependencies {
    pub ctx: AppContext,
    pub identity_provider: DynIdentityProvider,
    pub store: Arc<dyn DocumentStore>,
    pub time_provider: DynTimeProvider,
}

impl From<PlatformDependencies> for AppDependencies {
    fn from(d: PlatformDependencies) -> Self {
        Self {
            ctx: Arc::new(d.ctx),
            identity_provider: d.identity_provider,
            messages_repo: Arc::new(StoreMessagesRepository::new(d.store.clone())),
            password_hasher: Arc::new(Argon2RoomPasswordHasher::default()),
            rooms_repo: Arc::new(StoreRoomsRepository::new(d.store.clone())),
            time_provider: d.time_provider,
            typing_repo: Arc::new(StoreTypingRepository::new(d.store.clone())),
            user_directory_repo: Arc::new(StoreUserDirectoryRepository::new(d.store)),
        }
    }
}
