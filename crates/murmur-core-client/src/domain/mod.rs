// murmur/murmur-core-client
//
// Copyright: 2024, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

pub mod general;
pub mod identity;
pub mod messaging;
pub mod presence;
pub mod rooms;
pub mod shared;
pub mod users;
