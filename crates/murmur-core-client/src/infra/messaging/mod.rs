// murmur/murmur-core-client
//
// Copyright: 2024, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

pub use message_record::{MessageRecord, ReactionRecord};
pub use store_messages_repository::StoreMessagesRepository;

mod message_record;
mod store_messages_repository;
