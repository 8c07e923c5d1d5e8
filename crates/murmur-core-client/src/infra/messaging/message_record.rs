// murmur/murmur-core-client
//
// Copyright: 2024, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use murmur_store::prelude::*;

use crate::domain::messaging::models::{
    Emoji, Mention, Message, MessageFlags, MessageId, MessageSender, Reaction,
};
use crate::domain::shared::models::{RoomId, Scope, UserId};
use crate::infra::timestamp::date_from_millis;

#[entity("messages")]
#[serde(rename_all = "camelCase")]
pub struct MessageRecord {
    pub id: MessageId,
    pub text: String,
    pub user_id: UserId,
    pub user_name: String,
    #[serde(default)]
    pub user_email: String,
    #[serde(default)]
    pub timestamp: Option<i64>,
    #[serde(default)]
    pub created_at: Option<i64>,
    #[serde(default)]
    pub room_id: Option<RoomId>,
    #[serde(default)]
    pub mentions: Vec<Mention>,
    #[serde(default)]
    pub is_edited: bool,
    #[serde(default)]
    pub updated_at: Option<i64>,
    #[serde(default)]
    pub reactions: BTreeMap<String, ReactionRecord>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ReactionRecord {
    #[serde(default)]
    pub emoji: Option<Emoji>,
    #[serde(default)]
    pub users: Vec<UserId>,
}

pub(crate) mod fields {
    pub const TEXT: &str = "text";
    pub const USER_ID: &str = "userId";
    pub const USER_NAME: &str = "userName";
    pub const USER_EMAIL: &str = "userEmail";
    pub const TIMESTAMP: &str = "timestamp";
    pub const CREATED_AT: &str = "createdAt";
    pub const ROOM_ID: &str = "roomId";
    pub const MENTIONS: &str = "mentions";
    pub const IS_EDITED: &str = "isEdited";
    pub const UPDATED_AT: &str = "updatedAt";
    pub const REACTIONS: &str = "reactions";
}

impl MessageRecord {
    pub fn reaction_emoji_field(emoji: &Emoji) -> FieldPath {
        FieldPath::new([fields::REACTIONS, emoji.as_ref(), "emoji"])
    }

    pub fn reaction_users_field(emoji: &Emoji) -> FieldPath {
        FieldPath::new([fields::REACTIONS, emoji.as_ref(), "users"])
    }
}

impl From<MessageRecord> for Message {
    fn from(record: MessageRecord) -> Self {
        let timestamp = record.timestamp.and_then(date_from_millis);
        // A message whose creation date the store hasn't assigned yet sorts last.
        let created_at = record
            .created_at
            .and_then(date_from_millis)
            .or(timestamp)
            .unwrap_or(DateTime::<Utc>::MAX_UTC);

        let reactions = record
            .reactions
            .into_iter()
            .filter(|(_, reaction)| !reaction.users.is_empty())
            .map(|(key, reaction)| Reaction {
                emoji: reaction.emoji.unwrap_or_else(|| key.into()),
                from: reaction.users,
            })
            .collect();

        Message {
            id: record.id,
            text: record.text,
            sender: MessageSender {
                id: record.user_id,
                name: record.user_name,
                email: record.user_email,
            },
            timestamp: timestamp.unwrap_or(created_at),
            created_at,
            scope: Scope::from(record.room_id),
            mentions: record.mentions,
            flags: MessageFlags {
                is_edited: record.is_edited,
            },
            updated_at: record.updated_at.and_then(date_from_millis),
            reactions,
        }
    }
}
