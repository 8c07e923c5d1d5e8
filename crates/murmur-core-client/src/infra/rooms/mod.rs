// murmur/murmur-core-client
//
// Copyright: 2024, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

pub use argon2_room_password_hasher::Argon2RoomPasswordHasher;
pub use room_record::RoomRecord;
pub use store_rooms_repository::StoreRoomsRepository;

mod argon2_room_password_hasher;
mod room_record;
mod store_rooms_repository;
