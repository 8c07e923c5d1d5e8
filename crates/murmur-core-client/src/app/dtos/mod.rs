// murmur/murmur-core-client
//
// Copyright: 2024, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

pub use crate::app::deps::AppConfig;
pub use crate::domain::{
    identity::models::SessionUser,
    messaging::models::{
        Emoji, Mention, Message, MessageFlags, MessageId, MessageSender, Reaction, TextSpan,
    },
    presence::models::{TypingIndicator, TypingSummary},
    rooms::models::Room,
    shared::models::{
        AuthorizationError, ChatError, EntityKind, RoomId, Scope, UnicodeScalarIndex, UserId,
        ValidationError,
    },
    users::models::User,
};
