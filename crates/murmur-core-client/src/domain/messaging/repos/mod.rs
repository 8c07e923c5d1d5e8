// murmur/murmur-core-client
//
// Copyright: 2024, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

pub use messages_repository::{MessageStream, MessagesRepository};

mod messages_repository;

#[cfg(feature = "test")]
pub mod mocks {
    pub use super::messages_repository::MockMessagesRepository;
}
