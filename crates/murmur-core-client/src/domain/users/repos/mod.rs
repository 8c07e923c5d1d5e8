// murmur/murmur-core-client
//
// Copyright: 2024, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

pub use user_directory_repository::{UserDirectoryRepository, UserStream};

mod user_directory_repository;

#[cfg(feature = "test")]
pub mod mocks {
    pub use super::user_directory_repository::MockUserDirectoryRepository;
}
