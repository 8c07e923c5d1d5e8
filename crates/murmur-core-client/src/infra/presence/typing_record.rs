// murmur/murmur-core-client
//
// Copyright: 2024, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use murmur_store::prelude::*;

use crate::domain::presence::models::TypingIndicator;
use crate::domain::shared::models::{Scope, UserId};
use crate::infra::timestamp::date_from_millis;

#[entity("typing")]
#[serde(rename_all = "camelCase")]
pub struct TypingRecord {
    pub id: String,
    pub user_id: UserId,
    #[serde(default)]
    pub user_name: String,
    pub scope: String,
    #[serde(default)]
    pub timestamp: Option<i64>,
}

pub(crate) mod fields {
    pub const USER_ID: &str = "userId";
    pub const USER_NAME: &str = "userName";
    pub const SCOPE: &str = "scope";
    pub const TIMESTAMP: &str = "timestamp";
}

impl TypingRecord {
    /// One record per user and scope.
    pub fn id_for(scope: &Scope, user_id: &UserId) -> String {
        format!("{}|{}", scope.key(), user_id)
    }
}

impl TryFrom<TypingRecord> for TypingIndicator {
    type Error = anyhow::Error;

    fn try_from(record: TypingRecord) -> Result<Self, Self::Error> {
        let scope = Scope::from_key(&record.scope)
            .ok_or_else(|| anyhow::format_err!("Invalid scope '{}'", record.scope))?;
        let timestamp = record
            .timestamp
            .and_then(date_from_millis)
            .ok_or_else(|| anyhow::format_err!("Missing timestamp"))?;

        Ok(TypingIndicator {
            user_id: record.user_id,
            user_name: record.user_name,
            scope,
            timestamp,
        })
    }
}
