// murmur/murmur-core-client
//
// Copyright: 2024, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

pub use room_password_hasher::RoomPasswordHasher;

mod room_password_hasher;

#[cfg(feature = "test")]
pub mod mocks {
    pub use super::room_password_hasher::MockRoomPasswordHasher;
}
