// murmur/murmur-core-client
//
// Copyright: 2024, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

pub use mentions_service::MentionsService;
pub use messages_service::MessagesService;
pub use presence_service::PresenceService;
pub use rooms_service::RoomsService;
pub use subscription::Subscription;
pub use users_service::UsersService;

mod mentions_service;
mod messages_service;
mod presence_service;
mod rooms_service;
mod scope_access;
mod subscription;
mod users_service;
