// murmur/murmur-core-client
//
// Copyright: 2024, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use chrono::{DateTime, Utc};

use crate::domain::shared::models::Scope;

use super::{Mention, MessageSender};

/// A validated message that is about to be appended to the store.
#[derive(Debug, Clone, PartialEq)]
pub struct SendMessageRequest {
    pub sender: MessageSender,
    pub text: String,
    pub scope: Scope,
    pub mentions: Vec<Mention>,
    pub timestamp: DateTime<Utc>,
}
