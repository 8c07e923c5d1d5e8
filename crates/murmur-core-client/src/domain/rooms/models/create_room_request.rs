// murmur/murmur-core-client
//
// Copyright: 2024, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use crate::domain::shared::models::UserId;

use super::PasswordHash;

#[derive(Debug, Clone, PartialEq)]
pub struct CreateRoomRequest {
    pub name: String,
    pub description: Option<String>,
    pub created_by: UserId,
    pub is_private: bool,
    pub password_hash: Option<PasswordHash>,
}
