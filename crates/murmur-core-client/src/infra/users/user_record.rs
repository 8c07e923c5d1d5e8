// murmur/murmur-core-client
//
// Copyright: 2024, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use murmur_store::prelude::*;

use crate::domain::shared::models::UserId;
use crate::domain::users::models::User;
use crate::infra::timestamp::date_from_millis;

#[entity("users")]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    pub id: UserId,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub avatar: Option<String>,
    #[serde(default)]
    pub created_at: Option<i64>,
}

pub(crate) mod fields {
    pub const EMAIL: &str = "email";
    pub const DISPLAY_NAME: &str = "displayName";
    pub const AVATAR: &str = "avatar";
    pub const CREATED_AT: &str = "createdAt";
}

impl From<UserRecord> for User {
    fn from(record: UserRecord) -> Self {
        let name = record
            .display_name
            .filter(|name| !name.trim().is_empty())
            .unwrap_or_else(|| record.email.clone());

        User {
            id: record.id,
            name,
            email: record.email,
            avatar: record.avatar,
            created_at: record.created_at.and_then(date_from_millis),
        }
    }
}
