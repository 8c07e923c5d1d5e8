// murmur/murmur-core-client
//
// Copyright: 2024, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

pub use typing_repository::{TypingRepository, TypingStream};

mod typing_repository;

#[cfg(feature = "test")]
pub mod mocks {
    pub use super::typing_repository::MockTypingRepository;
}
