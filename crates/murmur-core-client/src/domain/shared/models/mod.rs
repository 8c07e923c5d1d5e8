// murmur/murmur-core-client
//
// Copyright: 2024, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

pub use error::{AuthorizationError, ChatError, EntityKind, ValidationError};
pub use room_id::RoomId;
pub use scope::Scope;
pub use string_index::UnicodeScalarIndex;
pub use user_id::UserId;

mod error;
mod room_id;
mod scope;
mod string_index;
mod user_id;
