// murmur/murmur-core-client
//
// Copyright: 2024, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

pub use store_user_directory_repository::StoreUserDirectoryRepository;
pub use user_record::UserRecord;

mod store_user_directory_repository;
mod user_record;
