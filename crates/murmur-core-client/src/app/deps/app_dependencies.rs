// murmur/murmur-core-client
//
// Copyright: 2024, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use std::sync::Arc;

use crate::app::deps::app_context::AppContext;
use crate::domain::general::services::TimeProvider;
use crate::domain::identity::services::IdentityProvider;
use crate::domain::messaging::repos::MessagesRepository;
use crate::domain::presence::repos::TypingRepository;
use crate::domain::rooms::repos::RoomsRepository;
use crate::domain::rooms::services::RoomPasswordHasher;
use crate::domain::users::repos::UserDirectoryRepository;

pub(crate) type DynAppContext = Arc<AppContext>;
pub(crate) type DynIdentityProvider = Arc<dyn IdentityProvider>;
pub(crate) type DynMessagesRepository = Arc<dyn MessagesRepository>;
pub(crate) type DynRoomPasswordHasher = Arc<dyn RoomPasswordHasher>;
pub(crate) type DynRoomsRepository = Arc<dyn RoomsRepository>;
pub(crate) type DynTimeProvider = Arc<dyn TimeProvider>;
pub(crate) type DynTypingRepository = Arc<dyn TypingRepository>;
pub(crate) type DynUserDirectoryRepository = Arc<dyn UserDirectoryRepository>;

pub struct AppDependencies {
    pub ctx: DynAppContext,
    pub identity_provider: DynIdentityProvider,
    pub messages_repo: DynMessagesRepository,
    pub password_hasher: DynRoomPasswordHasher,
    pub rooms_repo: DynRoomsRepository,
    pub time_provider: DynTimeProvider,
    pub typing_repo: DynTypingRepository,
    pub user_directory_repo: DynUserDirectoryRepository,
}
