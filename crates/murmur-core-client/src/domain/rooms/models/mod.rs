// murmur/murmur-core-client
//
// Copyright: 2024, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

pub use create_room_request::CreateRoomRequest;
pub use password_hash::PasswordHash;
pub use room::Room;

mod create_room_request;
mod password_hash;
mod room;
