// murmur/murmur-core-client
//
// Copyright: 2024, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

pub use mention::Mention;
pub use message::{Emoji, Message, MessageFlags, MessageSender, Reaction};
pub use message_id::MessageId;
pub use send_message_request::SendMessageRequest;
pub use text_span::TextSpan;

mod mention;
mod message;
mod message_id;
mod send_message_request;
mod text_span;
