// murmur/murmur-core-integration-tests
//
// Copyright: 2024, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

mod client;
mod end_to_end;
mod helpers;
mod messages;
mod presence;
mod rooms;
mod users;
