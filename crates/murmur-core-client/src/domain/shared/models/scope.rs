// murmur/murmur-core-client
//
// Copyright: 2024, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use std::fmt::{Display, Formatter};

use crate::domain::shared::models::RoomId;

const GLOBAL_KEY: &str = "global";
const ROOM_KEY_PREFIX: &str = "room:";

/// Where a message or typing indicator lives. Messages without a room belong to the global
/// stream.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum Scope {
    #[default]
    Global,
    Room(RoomId),
}

impl Scope {
    pub fn room_id(&self) -> Option<&RoomId> {
        match self {
            Scope::Global => None,
            Scope::Room(room_id) => Some(room_id),
        }
    }

    /// A string representation which is safe to use as part of a document id.
    pub fn key(&self) -> String {
        match self {
            Scope::Global => GLOBAL_KEY.to_string(),
            Scope::Room(room_id) => format!("{ROOM_KEY_PREFIX}{room_id}"),
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        if key == GLOBAL_KEY {
            return Some(Scope::Global);
        }
        key.strip_prefix(ROOM_KEY_PREFIX)
            .filter(|room_id| !room_id.is_empty())
            .map(|room_id| Scope::Room(room_id.into()))
    }
}

impl From<Option<RoomId>> for Scope {
    fn from(value: Option<RoomId>) -> Self {
        value.map(Scope::Room).unwrap_or_default()
    }
}

impl From<RoomId> for Scope {
    fn from(value: RoomId) -> Self {
        Scope::Room(value)
    }
}

impl Display for Scope {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.key())
    }
}
