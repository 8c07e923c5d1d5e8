// murmur/murmur-core-client
//
// Copyright: 2024, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use murmur_store::prelude::*;

use crate::domain::rooms::models::{PasswordHash, Room};
use crate::domain::shared::models::{RoomId, UserId};
use crate::infra::timestamp::date_from_millis;

#[entity("rooms")]
#[serde(rename_all = "camelCase")]
pub struct RoomRecord {
    pub id: RoomId,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub created_by: UserId,
    #[serde(default)]
    pub created_at: Option<i64>,
    #[serde(default)]
    pub members: Vec<UserId>,
    #[serde(default)]
    pub is_private: bool,
    #[serde(default)]
    pub password_hash: Option<String>,
}

pub(crate) mod fields {
    pub const NAME: &str = "name";
    pub const DESCRIPTION: &str = "description";
    pub const CREATED_BY: &str = "createdBy";
    pub const CREATED_AT: &str = "createdAt";
    pub const MEMBERS: &str = "members";
    pub const IS_PRIVATE: &str = "isPrivate";
    pub const PASSWORD_HASH: &str = "passwordHash";
}

impl RoomRecord {
    pub fn password_hash(&self) -> Option<PasswordHash> {
        self.password_hash.as_deref().map(PasswordHash::new)
    }
}

impl From<RoomRecord> for Room {
    fn from(record: RoomRecord) -> Self {
        Room {
            id: record.id,
            name: record.name,
            description: record
                .description
                .filter(|description| !description.trim().is_empty()),
            created_by: record.created_by,
            created_at: record.created_at.and_then(date_from_millis),
            members: record.members,
            is_private: record.is_private,
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::{json, Value};

    use super::*;

    #[test]
    fn test_decode_room_without_optional_fields() {
        let Value::Object(data) = json!({
            "name": "general",
            "createdBy": "u1",
            "description": " ",
        }) else {
            unreachable!()
        };

        let record = Document::new("r1", data).decode::<RoomRecord>().unwrap();
        assert_eq!(record.password_hash(), None);

        assert_eq!(
            Room::from(record),
            Room {
                id: "r1".into(),
                name: "general".to_string(),
                description: None,
                created_by: "u1".into(),
                created_at: None,
                members: vec![],
                is_private: false,
            }
        );
    }
}
