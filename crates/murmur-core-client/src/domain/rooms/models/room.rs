// murmur/murmur-core-client
//
// Copyright: 2024, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use chrono::{DateTime, Utc};

use crate::domain::shared::models::{RoomId, UserId};

#[derive(Debug, Clone, PartialEq)]
pub struct Room {
    pub id: RoomId,
    pub name: String,
    pub description: Option<String>,
    pub created_by: UserId,
    pub created_at: Option<DateTime<Utc>>,
    pub members: Vec<UserId>,
    pub is_private: bool,
}

impl Room {
    pub fn is_member(&self, user_id: &UserId) -> bool {
        self.members.contains(user_id)
    }

    /// Public rooms can be read by everybody, private rooms only by their members.
    pub fn is_readable_by(&self, user_id: &UserId) -> bool {
        !self.is_private || self.is_member(user_id)
    }
}
